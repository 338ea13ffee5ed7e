//! Glob matching on paths and their ancestors.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::{Matcher, MatcherError, subpaths};

/// Matches paths that match, or are below a path that matches, one of the
/// globs.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    globs: GlobSet,
}

/// Builds a [`PathMatcher`].
///
/// `*` and `?` never cross a `/`. The pattern `foo` matches `foo` and
/// everything under it but not `bar/foo`; `foo/*/bar` also matches
/// `foo/x/bar/baz`.
///
/// # Examples
///
/// ```
/// use command_dispatch_matcher::{Matcher, path};
///
/// let m = path(["foo/*/bar"]).unwrap();
/// assert!(m.matches("foo/x/bar"));
/// assert!(m.matches("foo/x/bar/baz.txt"));
/// assert!(!m.matches("foo/x/y/bar"));
/// ```
///
/// # Errors
///
/// Returns [`MatcherError::InvalidGlob`] for the first invalid pattern.
pub fn path<I>(patterns: I) -> Result<PathMatcher, MatcherError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| MatcherError::InvalidGlob {
                pattern: pattern.to_string(),
                source,
            })?;
        builder.add(glob);
    }
    let globs = builder.build().map_err(|source| MatcherError::InvalidGlob {
        pattern: String::new(),
        source,
    })?;
    Ok(PathMatcher { globs })
}

impl Matcher for PathMatcher {
    fn matches(&self, rel_path: &str) -> bool {
        subpaths(rel_path)
            .into_iter()
            .any(|subpath| self.globs.is_match(subpath))
    }
}
