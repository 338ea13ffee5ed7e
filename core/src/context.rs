//! Execution context: the read-only view handed to hooks, actions and
//! error handlers.

use std::fmt;
use std::io::{self, Read, Write};
use std::sync::MutexGuard;

use crate::command::Command;
use crate::flag::{FlagKind, FlagValue};
use crate::streams::Streams;
use crate::values::ResolvedValues;

/// One resolved level of the command path.
#[derive(Debug)]
pub(crate) struct Level<'a> {
    pub(crate) command: &'a Command,
    pub(crate) values: ResolvedValues,
}

impl<'a> Level<'a> {
    pub(crate) fn defaults(command: &'a Command) -> Self {
        Self {
            command,
            values: ResolvedValues::with_defaults(&command.flags),
        }
    }
}

/// Read view over the values resolved for one command level.
///
/// Lookups are strict: asking for a flag that the command does not declare,
/// or asking for it with the wrong kind, is a bug in the action and panics.
/// Use the `try_*` variants when the flag may legitimately be absent.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    streams: &'a Streams,
    levels: &'a [Level<'a>],
    index: usize,
}

impl<'a> Context<'a> {
    pub(crate) fn new(streams: &'a Streams, levels: &'a [Level<'a>], index: usize) -> Self {
        debug_assert!(index < levels.len());
        Self {
            streams,
            levels,
            index,
        }
    }

    fn level(&self) -> &'a Level<'a> {
        &self.levels[self.index]
    }

    fn values(&self) -> &'a ResolvedValues {
        &self.level().values
    }

    /// The command this context belongs to.
    pub fn command(&self) -> &'a Command {
        self.level().command
    }

    /// Name of the command this context belongs to.
    pub fn command_name(&self) -> &'a str {
        &self.command().name
    }

    /// Names from the root down to this command.
    pub fn command_path(&self) -> Vec<&'a str> {
        self.levels[..=self.index]
            .iter()
            .map(|level| level.command.name.as_str())
            .collect()
    }

    /// Context of the root command (app-level flags).
    pub fn root(&self) -> Context<'a> {
        Context::new(self.streams, self.levels, 0)
    }

    /// Context of the parent command, if any.
    pub fn parent(&self) -> Option<Context<'a>> {
        self.index
            .checked_sub(1)
            .map(|index| Context::new(self.streams, self.levels, index))
    }

    /// Value of a String flag.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a String flag of this command.
    pub fn string(&self, name: &str) -> &'a str {
        self.try_string(name)
            .unwrap_or_else(|| self.undeclared(name, FlagKind::String))
    }

    /// Value of a Bool flag.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a Bool flag of this command.
    pub fn bool(&self, name: &str) -> bool {
        self.try_bool(name)
            .unwrap_or_else(|| self.undeclared(name, FlagKind::Bool))
    }

    /// Items of a StringList flag or of the positional collector.
    ///
    /// # Panics
    ///
    /// Panics if `name` is neither a StringList flag nor the positional
    /// parameter of this command.
    pub fn slice(&self, name: &str) -> &'a [String] {
        self.try_slice(name)
            .unwrap_or_else(|| self.undeclared(name, FlagKind::StringList))
    }

    /// Like [`string`](Self::string) but returns `None` instead of panicking.
    pub fn try_string(&self, name: &str) -> Option<&'a str> {
        self.values().string(name)
    }

    /// Like [`bool`](Self::bool) but returns `None` instead of panicking.
    pub fn try_bool(&self, name: &str) -> Option<bool> {
        self.values().bool(name)
    }

    /// Like [`slice`](Self::slice) but returns `None` instead of panicking.
    pub fn try_slice(&self, name: &str) -> Option<&'a [String]> {
        self.values().list(name)
    }

    /// Every positional token of this level, in encounter order.
    pub fn positionals(&self) -> &'a [String] {
        self.values().positionals()
    }

    /// Whether `name` was supplied on the command line (as opposed to
    /// holding its default).
    pub fn is_set(&self, name: &str) -> bool {
        self.values().was_supplied(name)
    }

    /// Value of any declared flag as a [`FlagValue`].
    pub fn value(&self, name: &str) -> Option<FlagValue> {
        self.values().value(name)
    }

    /// Display form of any declared flag's value.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not declared on this command.
    pub fn render(&self, name: &str) -> String {
        match self.value(name) {
            Some(value) => value.render(),
            None => panic!(
                "flag `{name}` is not declared on command `{}`",
                self.command_name()
            ),
        }
    }

    fn undeclared(&self, name: &str, wanted: FlagKind) -> ! {
        match self.values().kind_of(name) {
            Some(actual) => panic!(
                "flag `{name}` of command `{}` is a {actual} flag, not {wanted}",
                self.command_name()
            ),
            None => panic!(
                "flag `{name}` is not declared on command `{}`",
                self.command_name()
            ),
        }
    }

    /// Locks the configured input stream.
    pub fn stdin(&self) -> MutexGuard<'a, Box<dyn Read + Send>> {
        self.streams.stdin()
    }

    /// Locks the configured output stream.
    pub fn stdout(&self) -> MutexGuard<'a, Box<dyn Write + Send>> {
        self.streams.stdout()
    }

    /// Locks the configured error stream.
    pub fn stderr(&self) -> MutexGuard<'a, Box<dyn Write + Send>> {
        self.streams.stderr()
    }

    /// Formatted write to the output stream.
    ///
    /// ```ignore
    /// ctx.printf(format_args!("name: {}\n", ctx.string("name")))?;
    /// ```
    pub fn printf(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.stdout().write_fmt(args)
    }

    /// Formatted write to the error stream.
    pub fn errorf(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.stderr().write_fmt(args)
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("command_path", &self.command_path())
            .field("values", self.values())
            .finish()
    }
}
