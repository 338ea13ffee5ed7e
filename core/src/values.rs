//! Resolved flag values for one command level.

use std::collections::{HashMap, HashSet};

use crate::error::ParseError;
use crate::flag::{FlagKind, FlagSpec, FlagValue};

/// Values of every flag declared on one command, after defaults and tokens
/// have been applied.
///
/// Built by the [`Tokenizer`](crate::Tokenizer) and read through a
/// [`Context`](crate::Context).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedValues {
    strings: HashMap<String, String>,
    bools: HashMap<String, bool>,
    lists: HashMap<String, Vec<String>>,
    positionals: Vec<String>,
    positional_name: Option<String>,
    kinds: HashMap<String, FlagKind>,
    supplied: HashSet<String>,
    positionals_supplied: bool,
}

impl ResolvedValues {
    /// Values holding only the declared defaults.
    pub fn with_defaults(flags: &[FlagSpec]) -> Self {
        let mut values = Self::default();
        for spec in flags {
            values.kinds.insert(spec.name.clone(), spec.kind);
            match (&spec.default, spec.kind) {
                (FlagValue::Bool(value), FlagKind::Bool) => {
                    values.bools.insert(spec.name.clone(), *value);
                }
                (FlagValue::String(value), FlagKind::String) => {
                    values.strings.insert(spec.name.clone(), value.clone());
                }
                (FlagValue::StringList(items), FlagKind::StringList) => {
                    values.lists.insert(spec.name.clone(), items.clone());
                }
                (FlagValue::Positional(items), FlagKind::Positional) => {
                    values.positional_name = Some(spec.name.clone());
                    values.positionals = items.clone();
                }
                // Mismatched defaults are rejected by validation; fall back
                // to the empty value of the declared kind.
                (_, kind) => values.set_empty(&spec.name, kind),
            }
        }
        values
    }

    fn set_empty(&mut self, name: &str, kind: FlagKind) {
        match kind {
            FlagKind::Bool => {
                self.bools.insert(name.to_string(), false);
            }
            FlagKind::String => {
                self.strings.insert(name.to_string(), String::new());
            }
            FlagKind::StringList => {
                self.lists.insert(name.to_string(), Vec::new());
            }
            FlagKind::Positional => {
                self.positional_name = Some(name.to_string());
                self.positionals.clear();
            }
        }
    }

    pub(crate) fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
        self.supplied.insert(name.to_string());
    }

    pub(crate) fn set_string(&mut self, name: &str, value: String) {
        self.strings.insert(name.to_string(), value);
        self.supplied.insert(name.to_string());
    }

    pub(crate) fn push_list(&mut self, name: &str, value: String) {
        // The first occurrence replaces the default rather than extending it.
        let first = self.supplied.insert(name.to_string());
        let list = self.lists.entry(name.to_string()).or_default();
        if first {
            list.clear();
        }
        list.push(value);
    }

    pub(crate) fn push_positional(&mut self, token: String) {
        if !self.positionals_supplied {
            self.positionals.clear();
            self.positionals_supplied = true;
        }
        if let Some(name) = &self.positional_name {
            self.supplied.insert(name.clone());
        }
        self.positionals.push(token);
    }

    /// Whether any positional token has been seen at this level.
    pub fn has_positionals(&self) -> bool {
        self.positionals_supplied
    }

    /// Checks that every required flag was supplied.
    pub(crate) fn check_required(&self, flags: &[FlagSpec]) -> Result<(), ParseError> {
        for spec in flags.iter().filter(|spec| spec.required) {
            if self.was_supplied(&spec.name) {
                continue;
            }
            return Err(match spec.kind {
                FlagKind::Positional => ParseError::MissingRequiredPositional(spec.name.clone()),
                _ => ParseError::MissingRequired(spec.name.clone()),
            });
        }
        Ok(())
    }

    /// Declared kind of `name`, if declared.
    pub fn kind_of(&self, name: &str) -> Option<FlagKind> {
        self.kinds.get(name).copied()
    }

    /// String value of a String flag.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    /// Value of a Bool flag.
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    /// Items of a StringList flag or of the positional collector.
    pub fn list(&self, name: &str) -> Option<&[String]> {
        if self.positional_name.as_deref() == Some(name) {
            return Some(&self.positionals);
        }
        self.lists.get(name).map(Vec::as_slice)
    }

    /// Every positional token of this level, in encounter order.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Whether the flag appeared on the command line.
    pub fn was_supplied(&self, name: &str) -> bool {
        self.supplied.contains(name)
    }

    /// The value of `name` as a [`FlagValue`].
    pub fn value(&self, name: &str) -> Option<FlagValue> {
        match self.kind_of(name)? {
            FlagKind::Bool => self.bool(name).map(FlagValue::Bool),
            FlagKind::String => self.string(name).map(|v| FlagValue::String(v.to_string())),
            FlagKind::StringList => self.list(name).map(|v| FlagValue::StringList(v.to_vec())),
            FlagKind::Positional => Some(FlagValue::Positional(self.positionals.clone())),
        }
    }
}
