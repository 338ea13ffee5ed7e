//! Plain-text help output.
//!
//! No wrapping: usage lines are printed as declared.

use std::fmt::Write as _;

use crate::command::Command;
use crate::flag::{FlagKind, FlagSpec, FlagValue};

/// Renders help for `command`, reached through `path` (root first).
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{Command, FlagSpec, render_help};
///
/// let cmd = Command::new("run")
///     .with_usage("Run a task")
///     .with_flag(FlagSpec::string("name").with_default("default").with_usage("Task name"));
/// let help = render_help(&["app", "run"], &cmd);
///
/// assert!(help.starts_with("NAME:\n   app run - Run a task\n"));
/// assert!(help.contains("--name <value>"));
/// assert!(help.contains("(default: \"default\")"));
/// ```
pub fn render_help(path: &[&str], command: &Command) -> String {
    let full_name = path.join(" ");
    let mut out = String::new();

    let _ = writeln!(out, "NAME:");
    match &command.usage {
        Some(usage) => {
            let _ = writeln!(out, "   {full_name} - {usage}");
        }
        None => {
            let _ = writeln!(out, "   {full_name}");
        }
    }

    let _ = writeln!(out, "\nUSAGE:");
    let _ = writeln!(out, "   {}", usage_line(&full_name, command));

    if !command.subcommands.is_empty() {
        let _ = writeln!(out, "\nCOMMANDS:");
        let rows: Vec<(String, &str)> = command
            .subcommands
            .iter()
            .map(|sub| {
                let mut label = sub.name.clone();
                for alias in &sub.aliases {
                    label.push_str(", ");
                    label.push_str(alias);
                }
                (label, sub.usage.as_deref().unwrap_or(""))
            })
            .collect();
        write_rows(&mut out, &rows);
    }

    if !command.flags.is_empty() {
        let _ = writeln!(out, "\nFLAGS:");
        let rows: Vec<(String, String)> = command
            .flags
            .iter()
            .map(|flag| (flag_label(flag), flag_description(flag)))
            .collect();
        write_rows(&mut out, &rows);
    }

    out
}

fn usage_line(full_name: &str, command: &Command) -> String {
    let mut line = full_name.to_string();
    if command.flags.iter().any(|f| f.kind != FlagKind::Positional) {
        line.push_str(" [flags]");
    }
    if !command.subcommands.is_empty() {
        line.push_str(" <command>");
    }
    if let Some(positional) = command.positional() {
        if positional.required {
            let _ = write!(line, " <{}>...", positional.name);
        } else {
            let _ = write!(line, " [{}...]", positional.name);
        }
    }
    line
}

fn flag_label(flag: &FlagSpec) -> String {
    match flag.kind {
        FlagKind::Bool => format!("--{}", flag.name),
        FlagKind::String => format!("--{} <value>", flag.name),
        FlagKind::StringList => format!("--{} <value>...", flag.name),
        FlagKind::Positional => format!("<{}>", flag.name),
    }
}

fn flag_description(flag: &FlagSpec) -> String {
    let mut desc = flag.usage.clone().unwrap_or_default();
    let default = match &flag.default {
        FlagValue::Bool(true) => Some("true".to_string()),
        FlagValue::String(value) if !value.is_empty() => Some(format!("{value:?}")),
        FlagValue::StringList(values) | FlagValue::Positional(values) if !values.is_empty() => {
            Some(flag.default.render())
        }
        _ => None,
    };
    if let Some(default) = default {
        if !desc.is_empty() {
            desc.push(' ');
        }
        let _ = write!(desc, "(default: {default})");
    }
    if flag.required {
        if !desc.is_empty() {
            desc.push(' ');
        }
        desc.push_str("(required)");
    }
    desc
}

fn write_rows<S: AsRef<str>>(out: &mut String, rows: &[(String, S)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, desc) in rows {
        let desc = desc.as_ref();
        if desc.is_empty() {
            let _ = writeln!(out, "   {label}");
        } else {
            let _ = writeln!(out, "   {label:<width$}   {desc}");
        }
    }
}
