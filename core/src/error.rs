//! Error types for declaration, parsing and action failures.
//!
//! Every failure that can happen during [`App::run`](crate::App::run) ends up
//! as an [`Error`], which is what before-hooks, actions and error handlers
//! see. The `Display` impl of each variant is the exact text written to the
//! error stream by the default reporting policy.

use thiserror::Error;

/// Problems with the static command tree.
///
/// These are detected before any token is parsed (or, for
/// [`MissingAction`](DeclarationError::MissingAction), once resolution has
/// picked the terminal command) and are reported like any other error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty (under `{0}`)")]
    EmptyCommandName(String),
    /// A flag was declared with an empty name.
    #[error("command `{0}` declares a flag with an empty name")]
    EmptyFlagName(String),
    /// Two flags in the same command share a name.
    #[error("command `{command}` declares flag --{flag} more than once")]
    DuplicateFlag { command: String, flag: String },
    /// Two subcommands of the same parent share a name or alias.
    #[error("command `{command}` declares subcommand `{subcommand}` more than once")]
    DuplicateSubcommand { command: String, subcommand: String },
    /// A flag's default value does not match its declared kind.
    #[error("flag --{flag} has a {default} default but is declared as {kind}")]
    DefaultKindMismatch {
        flag: String,
        kind: &'static str,
        default: &'static str,
    },
    /// More than one positional collector on one command.
    #[error("command `{0}` declares more than one positional parameter")]
    MultiplePositionals(String),
    /// The resolved command has nothing to run.
    #[error("command `{0}` has no action")]
    MissingAction(String),
}

/// Failure to parse a boolean flag value.
///
/// Accepted spellings are `1 t T TRUE true True` and `0 f F FALSE false False`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parsing {input:?}: invalid syntax")]
pub struct ParseBoolError {
    /// The rejected text.
    pub input: String,
}

/// Errors produced while tokenizing the argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `--name` token that matches no declared flag.
    #[error("Unknown flag {0}")]
    UnrecognizedFlag(String),
    /// A value-taking flag was given no value.
    #[error("Missing value for flag --{0}")]
    MissingValue(String),
    /// A boolean flag's explicit value could not be parsed.
    #[error("--{flag}: {source}")]
    InvalidBool {
        flag: String,
        #[source]
        source: ParseBoolError,
    },
    /// A flag marked `required` was never supplied.
    #[error("Required flag --{0} not provided")]
    MissingRequired(String),
    /// A required positional parameter received no tokens.
    #[error("Required parameter <{0}> not provided")]
    MissingRequiredPositional(String),
}

/// Any failure surfaced by a run.
///
/// `Error::Action(String::new())` is a legitimate failure: it produces a
/// non-zero exit code but no diagnostic output under the default policy.
#[derive(Debug, Error)]
pub enum Error {
    /// The command tree is malformed.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
    /// The argument vector could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Failure reported by a hook or action.
    #[error("{0}")]
    Action(String),
    /// Any other error bubbled up from user code.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Creates an action error carrying `message`.
    pub fn msg(message: impl Into<String>) -> Self {
        Error::Action(message.into())
    }

    /// Creates an action error with an empty message.
    ///
    /// Signals failure to the caller without printing anything.
    pub fn silent() -> Self {
        Error::Action(String::new())
    }

    /// Wraps an arbitrary error.
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Other(Box::new(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::other(err)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Action(message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Action(message.to_string())
    }
}

/// Convenience alias for results with [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
