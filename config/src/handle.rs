//! Attaching the config flags to an App.

use std::sync::{Arc, Mutex, PoisonError};

use command_dispatch_core::{App, FlagSpec};
use tracing::debug;

use crate::source::ConfigSource;

/// Name of the flag holding the configuration file path.
pub const CONFIG_FLAG: &str = "config";

/// Name of the flag holding literal configuration JSON.
pub const JSON_FLAG: &str = "json";

/// Caller-owned slot receiving the config flag values of a run.
///
/// Clones share the same slot: keep one, attach another to the App.
///
/// # Examples
///
/// ```
/// use command_dispatch_config::ConfigHandle;
/// use command_dispatch_core::App;
///
/// let config = ConfigHandle::new();
/// let app = App::new("tool")
///     .configure(|app| config.attach(app))
///     .with_action(|_| Ok(()));
///
/// assert_eq!(app.run(["tool", "--json", r#"{"jobs":2}"#]), 0);
/// let source = config.source().unwrap();
/// assert_eq!(source.json.as_deref(), Some(r#"{"jobs":2}"#));
/// assert_eq!(source.path, None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    slot: Arc<Mutex<Option<ConfigSource>>>,
}

impl ConfigHandle {
    /// Creates an empty handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `--config` and `--json` on the app's root command and adds a
    /// before-hook that stores their values in this handle.
    ///
    /// Hooks registered earlier keep running, ahead of this one.
    pub fn attach(&self, app: &mut App) {
        attach_flags(app);

        let slot = Arc::clone(&self.slot);
        app.add_before(move |ctx| {
            let source = ConfigSource::from_context(ctx);
            debug!(?source, "Captured configuration flags");
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(source);
            Ok(())
        });
    }

    /// The values captured by the most recent run, if any run got as far as
    /// the before-hooks.
    ///
    /// Runs of one App share this slot. Actions that may run concurrently
    /// should use [`ConfigSource::from_context`] instead.
    pub fn source(&self) -> Option<ConfigSource> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Declares `--config` and `--json` on the app's root command without a
/// capturing hook; actions read them with [`ConfigSource::from_context`].
pub fn attach_flags(app: &mut App) {
    app.add_flag(FlagSpec::string(CONFIG_FLAG).with_usage("Path to configuration file"));
    app.add_flag(
        FlagSpec::string(JSON_FLAG).with_usage("JSON configuration (provide as literal JSON)"),
    );
}

/// Creates an App with the config flags attached.
pub fn new_app(name: &str) -> (App, ConfigHandle) {
    let handle = ConfigHandle::new();
    let app = App::new(name).configure(|app| handle.attach(app));
    (app, handle)
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use command_dispatch_core::{Command, Error};

    use super::*;

    #[test]
    fn test_source_is_none_before_run() {
        let (_app, handle) = new_app("tool");
        assert_eq!(handle.source(), None);
    }

    #[test]
    fn test_previous_hooks_still_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let handle = ConfigHandle::new();
        let app = App::new("tool")
            .with_before(move |_| {
                counted.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .configure(|app| handle.attach(app))
            .with_subcommand(Command::new("run").with_action(|_| Ok(())));

        assert_eq!(app.run(["tool", "--config=c.yml", "run"]), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            handle.source(),
            Some(ConfigSource::from_flags("c.yml", ""))
        );
    }

    #[test]
    fn test_failing_earlier_hook_skips_capture() {
        let handle = ConfigHandle::new();
        let app = App::new("tool")
            .with_stderr(std::io::sink())
            .with_before(|_| Err(Error::msg("nope")))
            .configure(|app| handle.attach(app))
            .with_action(|_| Ok(()));

        assert_eq!(app.run(["tool", "--config", "c.yml"]), 1);
        assert_eq!(handle.source(), None);
    }

    #[test]
    fn test_action_can_read_captured_source() {
        let (app, handle) = new_app("tool");
        let seen = handle.clone();
        let app = app.with_action(move |_| {
            let source = seen.source().ok_or("config not captured")?;
            if source.path.is_none() {
                return Err(Error::msg("expected a path"));
            }
            Ok(())
        });

        assert_eq!(app.run(["tool", "--config", "settings.yml"]), 0);
    }

    #[test]
    fn test_concurrent_runs_read_their_own_source() {
        let barrier = Arc::new(Barrier::new(2));
        let app = App::new("tool")
            .configure(attach_flags)
            .with_flag(FlagSpec::positional("expected"))
            .with_action(move |ctx| {
                // Both runs have parsed their flags before either reads them.
                barrier.wait();
                let source = ConfigSource::from_context(ctx);
                let expected = ctx.positionals().first().map(String::as_str);
                if source.json.as_deref() != expected {
                    return Err(Error::msg(format!("read {:?}", source.json)));
                }
                Ok(())
            })
            .with_stderr(std::io::sink());

        std::thread::scope(|scope| {
            let runs: Vec<_> = ["{\"jobs\":1}", "{\"jobs\":2}"]
                .into_iter()
                .map(|json| {
                    let app = &app;
                    scope.spawn(move || app.run(["tool", "--json", json, json]))
                })
                .collect();
            for run in runs {
                assert_eq!(run.join().unwrap(), 0);
            }
        });
    }

    #[test]
    fn test_from_context_without_flags_is_empty() {
        let app = App::new("tool").with_action(|ctx| {
            if ConfigSource::from_context(ctx).is_empty() {
                Ok(())
            } else {
                Err(Error::msg("expected empty source"))
            }
        });
        assert_eq!(app.run(["tool"]), 0);
    }
}
