//! Command-line argument parsing and dispatch.
//!
//! This crate turns a raw argument vector into a call of a user-supplied
//! action:
//!
//! - [`FlagSpec`]: declaration of a flag (`Bool`, `String`, `StringList`)
//!   or of the positional collector of a command.
//! - [`Tokenizer`]: resolves the tokens of one command level against its
//!   flags.
//! - [`Command`]: a node of the command tree with its own flags, an optional
//!   action and subcommands.
//! - [`Context`]: the read-only view over resolved values handed to hooks,
//!   actions and error handlers.
//! - [`App`]: the run controller: validation, before-hooks, resolution,
//!   execution and the error-to-exit-code policy.
//!
//! Validation ([`validate_command`]) catches malformed trees such as
//! duplicate flag names before any token is parsed.
//!
//! # Example
//!
//! ```
//! use command_dispatch_core::*;
//!
//! let app = App::new("test").with_subcommand(
//!     Command::new("test-cmd")
//!         .with_flag(FlagSpec::string("name").with_default("default"))
//!         .with_flag(FlagSpec::bool("bool").with_default(true))
//!         .with_action(|ctx| {
//!             assert_eq!(ctx.string("name"), "default");
//!             assert!(ctx.bool("bool"));
//!             Ok(())
//!         }),
//! );
//!
//! assert_eq!(app.run(["./test", "test-cmd"]), 0);
//! ```

mod app;
mod command;
mod context;
mod error;
mod flag;
mod help;
mod streams;
mod tokenize;
mod validate;
mod values;

pub use app::{App, BeforeHook, EXIT_FAILURE, EXIT_SUCCESS, ErrorHandler};
pub use command::{Action, Command};
pub use context::Context;
pub use error::{DeclarationError, Error, ParseBoolError, ParseError, Result};
pub use flag::{FlagKind, FlagSpec, FlagValue, parse_bool};
pub use help::render_help;
pub use streams::Streams;
pub use tokenize::{Builtin, Stop, Tokenizer, Tokens};
pub use validate::validate_command;
pub use values::ResolvedValues;
