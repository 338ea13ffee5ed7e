//! Config-file and literal-JSON flags for command-dispatch apps.
//!
//! [`ConfigHandle::attach`] declares two String flags on an App's root
//! command, `--config <path>` and `--json <literal>`, and registers a
//! before-hook that copies their values into the handle. Actions read the
//! values of their own run with [`ConfigSource::from_context`] and turn them
//! into a typed value with [`ConfigSource::load`].
//!
//! # Quick start
//!
//! ```no_run
//! use command_dispatch_config::{ConfigSource, attach_flags};
//! use command_dispatch_core::App;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Settings {
//!     jobs: usize,
//! }
//!
//! let app = App::new("tool").configure(attach_flags).with_action(|ctx| {
//!     let settings: Settings = ConfigSource::from_context(ctx)
//!         .load_or_default()
//!         .map_err(command_dispatch_core::Error::other)?;
//!     println!("jobs = {}", settings.jobs);
//!     Ok(())
//! });
//! std::process::exit(app.run_env());
//! ```

mod error;
mod handle;
mod source;

pub use error::{ConfigError, Result};
pub use handle::{CONFIG_FLAG, ConfigHandle, JSON_FLAG, attach_flags, new_app};
pub use source::ConfigSource;
