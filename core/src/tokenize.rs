//! Tokenizer: resolves the tokens of one command level against its flags.
//!
//! Rules, applied left to right:
//!
//! - `--name=value` splits at the **first** `=` that leaves a declared flag
//!   name on the left; `--name` without `=` takes the next token verbatim
//!   when the flag needs a value.
//! - Bool flags never consume the next token.
//! - Anything not starting with `--` is a positional and is never split.
//! - A bare `--` ends flag parsing for the rest of the line.
//! - The first positional that names a subcommand stops tokenization so the
//!   caller can switch to that subcommand.

use tracing::debug;

use crate::error::ParseError;
use crate::flag::{FlagKind, FlagSpec, parse_bool};
use crate::values::ResolvedValues;

/// Flags the tokenizer answers itself when the command does not declare them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `--help`
    Help,
    /// `--version`
    Version,
}

/// Where tokenization of a level stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stop {
    /// Every token was consumed.
    End,
    /// Token `index` names a subcommand; tokens after it belong to that
    /// subcommand.
    Subcommand { name: String, index: usize },
    /// A built-in flag was seen; the rest of the line is ignored.
    Builtin(Builtin),
}

/// Result of tokenizing one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub values: ResolvedValues,
    pub stop: Stop,
}

/// Tokenizer bound to one command's flag declarations.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{FlagSpec, Stop, Tokenizer};
///
/// let flags = vec![FlagSpec::string("name"), FlagSpec::bool("force")];
/// let args: Vec<String> = ["--name=a=b", "--force", "file"].iter().map(|s| s.to_string()).collect();
///
/// let tokens = Tokenizer::new(&flags).tokenize(&args, |_| false).unwrap();
/// assert_eq!(tokens.values.string("name"), Some("a=b"));
/// assert_eq!(tokens.values.bool("force"), Some(true));
/// assert_eq!(tokens.values.positionals(), &["file".to_string()]);
/// assert_eq!(tokens.stop, Stop::End);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    flags: &'a [FlagSpec],
    help: bool,
    version: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer with the `--help` built-in enabled.
    pub fn new(flags: &'a [FlagSpec]) -> Self {
        Self {
            flags,
            help: true,
            version: false,
        }
    }

    /// Enables or disables the `--help` built-in.
    pub fn with_help(mut self, enabled: bool) -> Self {
        self.help = enabled;
        self
    }

    /// Enables or disables the `--version` built-in.
    pub fn with_version(mut self, enabled: bool) -> Self {
        self.version = enabled;
        self
    }

    fn find(&self, name: &str) -> Option<&'a FlagSpec> {
        self.flags
            .iter()
            .find(|spec| spec.name == name && spec.kind != FlagKind::Positional)
    }

    /// Splits `body` into a declared flag and its inline value.
    ///
    /// The first `=` is tried first; later `=` positions are only tried when
    /// the shorter name is not declared, so `--name=foo=bar` resolves to
    /// `name` = `foo=bar` whenever `name` exists.
    fn split<'t>(&self, body: &'t str) -> Option<(&'a FlagSpec, Option<&'t str>)> {
        for (at, _) in body.match_indices('=') {
            if let Some(spec) = self.find(&body[..at]) {
                return Some((spec, Some(&body[at + 1..])));
            }
        }
        self.find(body).map(|spec| (spec, None))
    }

    fn builtin(&self, name: &str) -> Option<Builtin> {
        match name {
            "help" if self.help => Some(Builtin::Help),
            "version" if self.version => Some(Builtin::Version),
            _ => None,
        }
    }

    /// Tokenizes `args`, calling `is_subcommand` on the first positional.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] hit; nothing after it is examined.
    pub fn tokenize(
        &self,
        args: &[String],
        is_subcommand: impl Fn(&str) -> bool,
    ) -> Result<Tokens, ParseError> {
        let mut values = ResolvedValues::with_defaults(self.flags);
        let mut index = 0;
        let mut flags_done = false;

        while index < args.len() {
            let token = &args[index];
            index += 1;

            let body = match token.strip_prefix("--") {
                Some(body) if !flags_done => body,
                _ => {
                    if !flags_done && !values.has_positionals() && is_subcommand(token) {
                        debug!(subcommand = %token, "Switching to subcommand");
                        values.check_required(self.flags)?;
                        return Ok(Tokens {
                            values,
                            stop: Stop::Subcommand {
                                name: token.clone(),
                                index: index - 1,
                            },
                        });
                    }
                    values.push_positional(token.clone());
                    continue;
                }
            };

            if body.is_empty() {
                flags_done = true;
                continue;
            }

            let Some((spec, inline)) = self.split(body) else {
                if let Some(builtin) = self.builtin(body) {
                    return Ok(Tokens {
                        values,
                        stop: Stop::Builtin(builtin),
                    });
                }
                return Err(ParseError::UnrecognizedFlag(token.clone()));
            };

            match spec.kind {
                FlagKind::Bool => {
                    let value = match inline {
                        None => true,
                        Some("") => return Err(ParseError::MissingValue(spec.name.clone())),
                        Some(text) => parse_bool(text).map_err(|source| ParseError::InvalidBool {
                            flag: spec.name.clone(),
                            source,
                        })?,
                    };
                    values.set_bool(&spec.name, value);
                }
                FlagKind::String | FlagKind::StringList => {
                    let value = match inline {
                        Some("") => return Err(ParseError::MissingValue(spec.name.clone())),
                        Some(text) => text.to_string(),
                        None => {
                            let Some(next) = args.get(index) else {
                                return Err(ParseError::MissingValue(spec.name.clone()));
                            };
                            index += 1;
                            next.clone()
                        }
                    };
                    if spec.kind == FlagKind::StringList {
                        values.push_list(&spec.name, value);
                    } else {
                        values.set_string(&spec.name, value);
                    }
                }
                FlagKind::Positional => unreachable!("positional specs are excluded by find"),
            }
        }

        values.check_required(self.flags)?;
        Ok(Tokens {
            values,
            stop: Stop::End,
        })
    }
}
