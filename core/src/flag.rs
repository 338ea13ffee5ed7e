//! Flag model: declarations of flags and positional parameters.
//!
//! A [`FlagSpec`] describes one accepted `--name` flag or the positional
//! collector of a command. Its [`FlagKind`] decides how the tokenizer treats
//! the flag, and its default [`FlagValue`] is what the action sees when the
//! flag is absent from the command line.

use std::fmt;

use crate::error::ParseBoolError;

/// How a flag consumes tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKind {
    /// `--name` or `--name=<bool>`; no separate value token.
    Bool,
    /// `--name value` or `--name=value`; last occurrence wins.
    String,
    /// Like [`String`](FlagKind::String) but every occurrence appends.
    StringList,
    /// Never matched by `--name`; collects the leftover tokens.
    Positional,
}

impl FlagKind {
    /// Short human-readable name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            FlagKind::Bool => "bool",
            FlagKind::String => "string",
            FlagKind::StringList => "string list",
            FlagKind::Positional => "positional",
        }
    }

    /// Whether a present `--name` token needs a value.
    pub fn takes_value(self) -> bool {
        matches!(self, FlagKind::String | FlagKind::StringList)
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value of any flag kind.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::FlagValue;
///
/// assert_eq!(FlagValue::Bool(true).render(), "true");
/// assert_eq!(FlagValue::String("foo".into()).render(), "foo");
/// assert_eq!(
///     FlagValue::StringList(vec!["a".into(), "b=1".into()]).render(),
///     "[a b=1]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    String(String),
    StringList(Vec<String>),
    Positional(Vec<String>),
}

impl FlagValue {
    /// The kind this value belongs to.
    pub fn kind(&self) -> FlagKind {
        match self {
            FlagValue::Bool(_) => FlagKind::Bool,
            FlagValue::String(_) => FlagKind::String,
            FlagValue::StringList(_) => FlagKind::StringList,
            FlagValue::Positional(_) => FlagKind::Positional,
        }
    }

    /// The empty value for `kind`.
    pub fn empty(kind: FlagKind) -> Self {
        match kind {
            FlagKind::Bool => FlagValue::Bool(false),
            FlagKind::String => FlagValue::String(String::new()),
            FlagKind::StringList => FlagValue::StringList(Vec::new()),
            FlagKind::Positional => FlagValue::Positional(Vec::new()),
        }
    }

    /// Renders the value for display: booleans as `true`/`false`, strings
    /// verbatim, lists as `[a b c]`.
    pub fn render(&self) -> String {
        match self {
            FlagValue::Bool(value) => value.to_string(),
            FlagValue::String(value) => value.clone(),
            FlagValue::StringList(values) | FlagValue::Positional(values) => {
                format!("[{}]", values.join(" "))
            }
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Declaration of a flag or positional parameter.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{FlagKind, FlagSpec, FlagValue};
///
/// let name = FlagSpec::string("name").with_default("default");
/// assert_eq!(name.kind, FlagKind::String);
/// assert_eq!(name.default, FlagValue::String("default".into()));
///
/// let verbose = FlagSpec::bool("verbose").with_usage("Print more");
/// assert_eq!(verbose.default, FlagValue::Bool(false));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    /// Name matched against `--name` (without the dashes).
    pub name: String,
    /// How the flag consumes tokens.
    pub kind: FlagKind,
    /// Value seen by the action when the flag is absent.
    pub default: FlagValue,
    /// Fail the parse if the flag is never supplied.
    pub required: bool,
    /// One-line description for help output.
    pub usage: Option<String>,
}

impl FlagSpec {
    fn new(name: &str, kind: FlagKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default: FlagValue::empty(kind),
            required: false,
            usage: None,
        }
    }

    /// Boolean flag, default `false`.
    pub fn bool(name: &str) -> Self {
        Self::new(name, FlagKind::Bool)
    }

    /// String flag, default empty.
    pub fn string(name: &str) -> Self {
        Self::new(name, FlagKind::String)
    }

    /// Repeatable string flag, default empty list.
    pub fn string_list(name: &str) -> Self {
        Self::new(name, FlagKind::StringList)
    }

    /// Positional collector.
    pub fn positional(name: &str) -> Self {
        Self::new(name, FlagKind::Positional)
    }

    /// Sets the default value.
    ///
    /// A default whose kind differs from the flag's kind is rejected when
    /// the command tree is validated.
    pub fn with_default(mut self, value: impl Into<FlagValue>) -> Self {
        let value = value.into();
        // Lists convert to StringList; reinterpret for positional specs.
        self.default = match (self.kind, value) {
            (FlagKind::Positional, FlagValue::StringList(values)) => FlagValue::Positional(values),
            (_, value) => value,
        };
        self
    }

    /// Adds a usage line.
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = Some(usage.to_string());
        self
    }

    /// Marks the flag as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Display form: `--name` for flags, `<name>` for positionals.
    pub fn display_name(&self) -> String {
        match self.kind {
            FlagKind::Positional => format!("<{}>", self.name),
            _ => format!("--{}", self.name),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::String(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::String(value)
    }
}

impl From<Vec<String>> for FlagValue {
    fn from(values: Vec<String>) -> Self {
        FlagValue::StringList(values)
    }
}

impl From<&[&str]> for FlagValue {
    fn from(values: &[&str]) -> Self {
        FlagValue::StringList(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Lexical boolean parse.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::parse_bool;
///
/// assert_eq!(parse_bool("TRUE"), Ok(true));
/// assert_eq!(parse_bool("0"), Ok(false));
/// assert!(parse_bool("yes").is_err());
/// ```
pub fn parse_bool(input: &str) -> Result<bool, ParseBoolError> {
    match input {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseBoolError {
            input: input.to_string(),
        }),
    }
}
