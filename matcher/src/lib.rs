//! Composable matchers over slash-separated relative paths.
//!
//! - [`name`]: regex full match against the base name of a path or of any
//!   of its ancestors ([`hidden`] is a preset).
//! - [`path`]: glob match against a path or any of its ancestors, so a
//!   matched directory also matches everything below it.
//! - [`all`], [`any`], [`not`]: combinators.
//!
//! Absolute paths have no relative sub-paths and never match [`name`] or
//! [`path`] matchers.
//!
//! # Example
//!
//! ```
//! use command_dispatch_matcher::*;
//!
//! let sources = all([
//!     path(["src"]).unwrap().boxed(),
//!     not(name([r".*\.bak"]).unwrap()).boxed(),
//! ]);
//!
//! assert!(sources.matches("src/lib.rs"));
//! assert!(!sources.matches("src/lib.rs.bak"));
//! assert!(!sources.matches("tests/it.rs"));
//! ```

mod compound;
mod name;
mod path;

use thiserror::Error;

pub use compound::{All, Any, Not, all, any, not};
pub use name::{NameMatcher, hidden, name};
pub use path::{PathMatcher, path};

/// A predicate over relative paths.
pub trait Matcher: Send + Sync {
    /// Whether `rel_path` matches.
    fn matches(&self, rel_path: &str) -> bool;

    /// Boxes the matcher for use in [`all`] and [`any`].
    fn boxed(self) -> BoxMatcher
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// An owned, type-erased matcher.
pub type BoxMatcher = Box<dyn Matcher>;

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn matches(&self, rel_path: &str) -> bool {
        (**self).matches(rel_path)
    }
}

/// Invalid pattern passed to a matcher constructor.
#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("invalid name pattern {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid path pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// `rel_path` followed by each of its ancestors, innermost first.
///
/// `"foo/bar/baz.txt"` yields `["foo/bar/baz.txt", "foo/bar", "foo"]`.
/// Absolute paths yield nothing.
pub fn subpaths(rel_path: &str) -> Vec<&str> {
    if rel_path.starts_with('/') {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut current = rel_path.trim_end_matches('/');
    while !current.is_empty() && current != "." {
        out.push(current);
        current = match current.rfind('/') {
            Some(at) => current[..at].trim_end_matches('/'),
            None => "",
        };
    }
    out
}

/// Final component of a slash-separated path.
pub(crate) fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
