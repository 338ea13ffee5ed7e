//! Command tree validation.
//!
//! Checks the structural invariants of a command tree before anything is
//! parsed: non-empty names, unique flag names per command, defaults that
//! match their flag's kind, at most one positional collector per command, and
//! unique subcommand names (aliases included) per parent.
//!
//! # Examples
//!
//! ```
//! use command_dispatch_core::*;
//!
//! let ok = Command::new("git").with_flag(FlagSpec::bool("verbose"));
//! assert!(validate_command(&ok).is_empty());
//!
//! // Invalid: the same flag twice
//! let bad = Command::new("git")
//!     .with_flag(FlagSpec::bool("verbose"))
//!     .with_flag(FlagSpec::string("verbose"));
//! assert!(!validate_command(&bad).is_empty());
//! ```

use std::collections::HashSet;

use crate::command::Command;
use crate::error::DeclarationError;
use crate::flag::{FlagKind, FlagSpec};

/// Validates a command tree, returning every problem found.
///
/// An empty list means the tree is well formed.
pub fn validate_command(command: &Command) -> Vec<DeclarationError> {
    let mut errors = Vec::new();

    if command.name.trim().is_empty() {
        errors.push(DeclarationError::EmptyCommandName(String::new()));
    }

    let mut path = vec![command.name.trim().to_string()];
    validate_node(command, &mut path, &mut errors);
    errors
}

fn validate_node(command: &Command, path: &mut Vec<String>, errors: &mut Vec<DeclarationError>) {
    validate_flags(&command.flags, &path.join(" "), errors);

    let mut seen: HashSet<&str> = HashSet::new();
    for sub in &command.subcommands {
        let name = sub.name.trim();
        if name.is_empty() {
            errors.push(DeclarationError::EmptyCommandName(path.join(" ")));
        }

        for label in std::iter::once(name)
            .filter(|name| !name.is_empty())
            .chain(sub.aliases.iter().map(String::as_str))
        {
            if !seen.insert(label) {
                errors.push(DeclarationError::DuplicateSubcommand {
                    command: path.join(" "),
                    subcommand: label.to_string(),
                });
            }
        }

        path.push(name.to_string());
        validate_node(sub, path, errors);
        path.pop();
    }
}

fn validate_flags(flags: &[FlagSpec], command: &str, errors: &mut Vec<DeclarationError>) {
    let mut seen = HashSet::new();
    let mut positionals = 0;

    for flag in flags {
        if flag.name.is_empty() {
            errors.push(DeclarationError::EmptyFlagName(command.to_string()));
        } else if !seen.insert(flag.name.as_str()) {
            errors.push(DeclarationError::DuplicateFlag {
                command: command.to_string(),
                flag: flag.name.clone(),
            });
        }

        if flag.default.kind() != flag.kind {
            errors.push(DeclarationError::DefaultKindMismatch {
                flag: flag.name.clone(),
                kind: flag.kind.as_str(),
                default: flag.default.kind().as_str(),
            });
        }

        if flag.kind == FlagKind::Positional {
            positionals += 1;
            if positionals == 2 {
                errors.push(DeclarationError::MultiplePositionals(command.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_duplicate_flags() {
        let cmd = Command::new("app").with_subcommand(
            Command::new("run")
                .with_flag(FlagSpec::string("name"))
                .with_flag(FlagSpec::bool("name")),
        );

        assert_eq!(
            validate_command(&cmd),
            vec![DeclarationError::DuplicateFlag {
                command: "app run".to_string(),
                flag: "name".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_rejects_default_kind_mismatch() {
        let cmd = Command::new("app").with_flag(FlagSpec::bool("force").with_default("yes"));

        assert_eq!(
            validate_command(&cmd),
            vec![DeclarationError::DefaultKindMismatch {
                flag: "force".to_string(),
                kind: "bool",
                default: "string",
            }]
        );
    }

    #[test]
    fn test_validate_rejects_alias_clash() {
        let cmd = Command::new("app")
            .with_subcommand(Command::new("checkout").with_alias("co"))
            .with_subcommand(Command::new("co"));

        assert_eq!(
            validate_command(&cmd),
            vec![DeclarationError::DuplicateSubcommand {
                command: "app".to_string(),
                subcommand: "co".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_rejects_two_positionals() {
        let cmd = Command::new("app")
            .with_flag(FlagSpec::positional("a"))
            .with_flag(FlagSpec::positional("b"));

        assert_eq!(
            validate_command(&cmd),
            vec![DeclarationError::MultiplePositionals("app".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        assert_eq!(
            validate_command(&Command::new(" ")),
            vec![DeclarationError::EmptyCommandName(String::new())]
        );
        assert_eq!(
            validate_command(&Command::new("app").with_flag(FlagSpec::string(""))),
            vec![DeclarationError::EmptyFlagName("app".to_string())]
        );
    }

    #[test]
    fn test_validate_accepts_same_flag_on_different_levels() {
        let cmd = Command::new("app")
            .with_flag(FlagSpec::bool("verbose"))
            .with_subcommand(Command::new("run").with_flag(FlagSpec::bool("verbose")));

        assert!(validate_command(&cmd).is_empty());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let cmd = Command::new("app")
            .with_flag(FlagSpec::string("name"))
            .with_flag(FlagSpec::string("name"))
            .with_subcommand(
                Command::new("run")
                    .with_flag(FlagSpec::positional("a"))
                    .with_flag(FlagSpec::positional("b"))
                    .with_flag(FlagSpec::positional("c")),
            )
            .with_subcommand(Command::new("run"));

        assert_eq!(
            validate_command(&cmd),
            vec![
                DeclarationError::DuplicateFlag {
                    command: "app".to_string(),
                    flag: "name".to_string(),
                },
                DeclarationError::MultiplePositionals("app run".to_string()),
                DeclarationError::DuplicateSubcommand {
                    command: "app".to_string(),
                    subcommand: "run".to_string(),
                },
            ]
        );
    }
}
