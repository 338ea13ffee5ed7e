//! `pathscan`: list a directory tree or test paths against matchers.

mod walk;

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use command_dispatch_config::{ConfigSource, attach_flags};
use command_dispatch_core::{App, Command, Context, Error, FlagSpec, Result};
use command_dispatch_matcher::{BoxMatcher, Matcher, all, any, name, not, path};
use command_dispatch_signals::{SignalKind, cancel_on_signals, register_stack_trace_writer};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::walk::{WalkOutcome, walk};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Defaults for `list`, read from `--config` or `--json`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListConfig {
    include: Vec<String>,
    exclude: Vec<String>,
    hidden: bool,
}

fn main() {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start runtime: {err}");
            std::process::exit(1);
        }
    };
    let _guard = runtime.enter();

    let code = build_app().run_env();
    std::process::exit(code);
}

fn build_app() -> App {
    App::new("pathscan")
        .configure(attach_flags)
        .with_version(PACKAGE_VERSION)
        .with_usage("List and match relative paths")
        .with_flag(FlagSpec::bool("verbose").with_usage("Log resolution steps to stderr"))
        .with_before(init_logging)
        .with_subcommand(list_command())
        .with_subcommand(match_command())
}

fn init_logging(ctx: &Context<'_>) -> Result<()> {
    let default = if ctx.bool("verbose") { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second run in the same process keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
    Ok(())
}

fn list_command() -> Command {
    Command::new("list")
        .with_alias("ls")
        .with_usage("Print paths below a directory that pass the filters")
        .with_flag(FlagSpec::string_list("include").with_usage("Glob of paths to keep"))
        .with_flag(FlagSpec::string_list("exclude").with_usage("Glob of paths to drop"))
        .with_flag(FlagSpec::string_list("name").with_usage("Regex a path component must match"))
        .with_flag(FlagSpec::bool("hidden").with_usage("Include hidden entries"))
        .with_flag(FlagSpec::bool("dump-stacks").with_usage("Write stack snapshots on SIGUSR1"))
        .with_flag(FlagSpec::positional("root").with_default(vec![".".to_string()]))
        .with_action(run_list)
}

fn match_command() -> Command {
    Command::new("match")
        .with_usage("Report whether each path passes the filters")
        .with_flag(FlagSpec::string_list("glob").with_usage("Glob a path must match"))
        .with_flag(FlagSpec::string_list("name").with_usage("Regex a path component must match"))
        .with_flag(FlagSpec::positional("paths").required())
        .with_action(run_match)
}

fn run_list(ctx: &Context<'_>) -> Result<()> {
    let defaults: ListConfig = ConfigSource::from_context(ctx)
        .load_or_default()
        .map_err(Error::other)?;
    debug!(?defaults, "Loaded list defaults");

    let roots = ctx.positionals();
    let [root] = roots else {
        return Err(Error::msg(format!(
            "list takes exactly one directory, got {}",
            roots.len()
        )));
    };

    let includes = or_defaults(ctx.slice("include"), &defaults.include);
    let excludes = or_defaults(ctx.slice("exclude"), &defaults.exclude);
    let filter = all([
        optional_paths(includes)?,
        Some(not(any([optional_paths(excludes)?])).boxed()),
        optional_names(ctx.slice("name"))?,
    ]);

    let _stacks = if ctx.bool("dump-stacks") {
        let sink = Arc::new(Mutex::new(io::stderr()));
        Some(register_stack_trace_writer(sink, &[SignalKind::user_defined1()])?)
    } else {
        None
    };
    let cancel = cancel_on_signals(
        &CancellationToken::new(),
        &[SignalKind::interrupt(), SignalKind::terminate()],
    )?;

    let outcome = walk(
        Path::new(root),
        ctx.bool("hidden") || defaults.hidden,
        &cancel,
        &mut |rel| {
            if filter.matches(rel) {
                ctx.printf(format_args!("{rel}\n"))?;
            }
            Ok(())
        },
    )?;

    match outcome {
        WalkOutcome::Completed => Ok(()),
        WalkOutcome::Cancelled => {
            info!(root = %root, "Walk interrupted");
            Err(Error::msg("interrupted"))
        }
    }
}

fn run_match(ctx: &Context<'_>) -> Result<()> {
    let filter = all([
        optional_paths(ctx.slice("glob"))?,
        optional_names(ctx.slice("name"))?,
    ]);
    for rel in ctx.positionals() {
        ctx.printf(format_args!("{rel}: {}\n", filter.matches(rel)))?;
    }
    Ok(())
}

fn or_defaults<'a>(given: &'a [String], defaults: &'a [String]) -> &'a [String] {
    if given.is_empty() { defaults } else { given }
}

/// Glob matcher over `patterns`, or `None` when there are none.
fn optional_paths(patterns: &[String]) -> Result<Option<BoxMatcher>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    Ok(Some(path(patterns).map_err(Error::other)?.boxed()))
}

/// Name matcher over `patterns`, or `None` when there are none.
fn optional_names(patterns: &[String]) -> Result<Option<BoxMatcher>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    Ok(Some(name(patterns).map_err(Error::other)?.boxed()))
}
