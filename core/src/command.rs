//! Command tree: named nodes with flags, an optional action, and children.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::error::Result;
use crate::flag::{FlagKind, FlagSpec};

/// Callable run for the resolved command.
pub type Action = Arc<dyn Fn(&Context<'_>) -> Result<()> + Send + Sync>;

/// A node of the command tree.
///
/// Flags are not inherited: each node is parsed strictly against its own
/// [`flags`](Command::flags). Values of ancestor levels stay reachable from
/// the action through [`Context::parent`] and [`Context::root`].
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{Command, FlagSpec};
///
/// let remote = Command::new("remote")
///     .with_subcommand(
///         Command::new("add")
///             .with_flag(FlagSpec::bool("fetch"))
///             .with_flag(FlagSpec::positional("args"))
///             .with_action(|_ctx| Ok(())),
///     )
///     .with_alias("r");
///
/// assert!(remote.find_subcommand("add").is_some());
/// assert!(remote.find_subcommand("rm").is_none());
/// assert!(remote.answers_to("r"));
/// ```
#[derive(Clone, Default)]
pub struct Command {
    /// Name matched against the positional token that selects this node.
    pub name: String,
    /// Alternative names.
    pub aliases: Vec<String>,
    /// One-line description for help output.
    pub usage: Option<String>,
    /// Flags and the positional collector of this node.
    pub flags: Vec<FlagSpec>,
    /// Children, looked up by name or alias.
    pub subcommands: Vec<Command>,
    /// Run when this node is the terminal one.
    pub action: Option<Action>,
}

impl Command {
    /// Creates an empty command.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a flag.
    pub fn with_flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }

    /// Adds a child command.
    pub fn with_subcommand(mut self, sub: Command) -> Self {
        self.subcommands.push(sub);
        self
    }

    /// Adds an alias.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Adds a usage line.
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = Some(usage.to_string());
        self
    }

    /// Sets the action.
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Context<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Whether `name` is this command's name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|alias| alias == name)
    }

    /// Finds a direct child by name or alias.
    pub fn find_subcommand(&self, name: &str) -> Option<&Command> {
        self.subcommands.iter().find(|sub| sub.answers_to(name))
    }

    /// Finds a declared flag by name.
    pub fn find_flag(&self, name: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|flag| flag.name == name)
    }

    /// The positional collector, if declared.
    pub fn positional(&self) -> Option<&FlagSpec> {
        self.flags
            .iter()
            .find(|flag| flag.kind == FlagKind::Positional)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("usage", &self.usage)
            .field("flags", &self.flags)
            .field("subcommands", &self.subcommands)
            .field("action", &self.action.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
