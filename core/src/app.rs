//! Run controller: drives one invocation from raw arguments to exit code.
//!
//! A run walks `Init -> Before-Hook -> Resolving -> Executing -> Reporting`:
//!
//! 1. the command tree is validated,
//! 2. the root level is tokenized and the before-hooks run in registration
//!    order with a root [`Context`],
//! 3. the remaining tokens are resolved down the command tree,
//! 4. the terminal command's action runs,
//! 5. any error from the steps above is turned into an exit code, either by
//!    the custom error handler or by the default policy (message plus `\n`
//!    on the error stream, exit code 1).

use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::command::Command;
use crate::context::{Context, Level};
use crate::error::{DeclarationError, Error, Result};
use crate::flag::FlagSpec;
use crate::help::render_help;
use crate::streams::Streams;
use crate::tokenize::{Builtin, Stop, Tokenizer, Tokens};
use crate::validate::validate_command;

/// Hook run before the terminal action, with the root-level context.
pub type BeforeHook = Box<dyn Fn(&Context<'_>) -> Result<()> + Send + Sync>;

/// Custom error-to-exit-code policy.
pub type ErrorHandler = Box<dyn Fn(&Context<'_>, &Error) -> i32 + Send + Sync>;

/// Exit code for successful runs.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for parse errors and default-handled failures.
pub const EXIT_FAILURE: i32 = 1;

enum Outcome {
    Done,
    Builtin(Builtin),
}

/// A command-line application: a command tree plus hooks, an optional error
/// handler and the streams it talks to.
///
/// The tree is only read during [`run`](App::run), so one `App` can serve
/// concurrent runs; each run owns its resolved values.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{App, Command, FlagSpec};
///
/// let app = App::new("greet").with_subcommand(
///     Command::new("hello")
///         .with_flag(FlagSpec::string("name").with_default("world"))
///         .with_action(|ctx| {
///             ctx.printf(format_args!("hello {}\n", ctx.string("name")))?;
///             Ok(())
///         }),
/// );
///
/// assert_eq!(app.run(["greet", "hello", "--name", "you"]), 0);
/// assert_eq!(app.run(["greet", "hello", "--bogus"]), 1);
/// ```
pub struct App {
    name: String,
    version: Option<String>,
    root: Command,
    before: Vec<BeforeHook>,
    error_handler: Option<ErrorHandler>,
    streams: Streams,
}

impl App {
    /// Creates an app whose root command is named `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: None,
            root: Command::new(name),
            before: Vec::new(),
            error_handler: None,
            streams: Streams::default(),
        }
    }

    /// Application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The root command.
    pub fn root(&self) -> &Command {
        &self.root
    }

    /// Mutable access to the root command.
    pub fn root_mut(&mut self) -> &mut Command {
        &mut self.root
    }

    /// Sets the version reported by `--version`.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Sets the root command's usage line.
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.root.usage = Some(usage.to_string());
        self
    }

    /// Declares an app-level flag.
    pub fn with_flag(mut self, flag: FlagSpec) -> Self {
        self.add_flag(flag);
        self
    }

    /// Adds a subcommand under the root.
    pub fn with_subcommand(mut self, sub: Command) -> Self {
        self.root.subcommands.push(sub);
        self
    }

    /// Sets the root action, run when no subcommand is selected.
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Context<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.root = self.root.with_action(action);
        self
    }

    /// Appends a before-hook.
    pub fn with_before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.add_before(hook);
        self
    }

    /// Installs a custom error handler.
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Context<'_>, &Error) -> i32 + Send + Sync + 'static,
    {
        self.error_handler = Some(Box::new(handler));
        self
    }

    /// Replaces the input stream.
    pub fn with_stdin(mut self, reader: impl Read + Send + 'static) -> Self {
        self.streams.set_stdin(reader);
        self
    }

    /// Replaces the output stream.
    pub fn with_stdout(mut self, writer: impl Write + Send + 'static) -> Self {
        self.streams.set_stdout(writer);
        self
    }

    /// Replaces the error stream.
    pub fn with_stderr(mut self, writer: impl Write + Send + 'static) -> Self {
        self.streams.set_stderr(writer);
        self
    }

    /// Applies an option function, e.g. one provided by a collaborator crate.
    pub fn configure(mut self, option: impl FnOnce(&mut App)) -> Self {
        option(&mut self);
        self
    }

    /// Declares an app-level flag in place.
    pub fn add_flag(&mut self, flag: FlagSpec) {
        self.root.flags.push(flag);
    }

    /// Appends a before-hook in place. Hooks run in registration order and
    /// the first failure stops the run.
    pub fn add_before<F>(&mut self, hook: F)
    where
        F: Fn(&Context<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.before.push(Box::new(hook));
    }

    /// Runs the app with the process arguments.
    pub fn run_env(&self) -> i32 {
        self.run(std::env::args())
    }

    /// Runs the app. Element 0 of `args` is the program name and is not
    /// parsed. Returns the exit code.
    pub fn run<I, S>(&self, args: I) -> i32
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().skip(1).map(Into::into).collect();
        let mut levels = vec![Level::defaults(&self.root)];

        let code = match self.execute(&args, &mut levels) {
            Ok(Outcome::Done) => EXIT_SUCCESS,
            Ok(Outcome::Builtin(builtin)) => self.answer_builtin(&levels, builtin),
            Err(err) => self.report(&levels, &err),
        };

        if let Err(err) = self.streams.stdout().flush() {
            warn!(error = %err, "Failed to flush output stream");
        }
        debug!(app = %self.name, code, "Run finished");
        code
    }

    fn tokenize(&self, command: &Command, args: &[String], is_root: bool) -> Result<Tokens> {
        let tokens = Tokenizer::new(&command.flags)
            .with_version(is_root && self.version.is_some())
            .tokenize(args, |name| command.find_subcommand(name).is_some())?;
        Ok(tokens)
    }

    fn execute<'a>(&'a self, args: &[String], levels: &mut Vec<Level<'a>>) -> Result<Outcome> {
        if let Some(err) = validate_command(&self.root).into_iter().next() {
            return Err(err.into());
        }

        let mut command = &self.root;
        let tokens = self.tokenize(command, args, true)?;
        levels[0].values = tokens.values;
        let mut stop = tokens.stop;
        if let Stop::Builtin(builtin) = stop {
            return Ok(Outcome::Builtin(builtin));
        }

        let ctx = Context::new(&self.streams, levels.as_slice(), 0);
        for (index, hook) in self.before.iter().enumerate() {
            debug!(hook = index, "Running before hook");
            hook(&ctx)?;
        }

        let mut rest = args;
        loop {
            match stop {
                Stop::End => break,
                Stop::Builtin(builtin) => return Ok(Outcome::Builtin(builtin)),
                Stop::Subcommand { name, index } => {
                    let Some(child) = command.find_subcommand(&name) else {
                        unreachable!("tokenizer stopped on undeclared subcommand `{name}`");
                    };
                    debug!(parent = %command.name, subcommand = %child.name, "Resolved subcommand");
                    command = child;
                    rest = &rest[index + 1..];
                    let tokens = self.tokenize(command, rest, false)?;
                    levels.push(Level {
                        command,
                        values: tokens.values,
                    });
                    stop = tokens.stop;
                }
            }
        }

        let Some(action) = &command.action else {
            let path: Vec<&str> = levels.iter().map(|l| l.command.name.as_str()).collect();
            return Err(DeclarationError::MissingAction(path.join(" ")).into());
        };

        let ctx = Context::new(&self.streams, levels.as_slice(), levels.len() - 1);
        debug!(command = ?ctx.command_path(), "Executing action");
        action(&ctx)?;
        Ok(Outcome::Done)
    }

    fn answer_builtin(&self, levels: &[Level<'_>], builtin: Builtin) -> i32 {
        let text = match builtin {
            Builtin::Help => {
                let ctx = Context::new(&self.streams, levels, levels.len() - 1);
                render_help(&ctx.command_path(), ctx.command())
            }
            Builtin::Version => format!(
                "{} version {}\n",
                self.name,
                self.version.as_deref().unwrap_or_default()
            ),
        };
        if let Err(err) = self.streams.stdout().write_all(text.as_bytes()) {
            warn!(error = %err, "Failed to write built-in output");
        }
        EXIT_SUCCESS
    }

    fn report(&self, levels: &[Level<'_>], err: &Error) -> i32 {
        let ctx = Context::new(&self.streams, levels, levels.len() - 1);
        if let Some(handler) = &self.error_handler {
            let code = handler(&ctx, err);
            debug!(code, error = %err, "Custom error handler finished");
            return code;
        }

        let message = err.to_string();
        if !message.is_empty() {
            if let Err(write_err) = writeln!(self.streams.stderr(), "{message}") {
                warn!(error = %write_err, "Failed to write error message");
            }
        }
        EXIT_FAILURE
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("root", &self.root)
            .field("before", &self.before.len())
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}
