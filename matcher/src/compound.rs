//! `all`, `any` and `not` combinators.

use crate::{BoxMatcher, Matcher};

/// Matches when every present sub-matcher matches.
///
/// With no present sub-matchers it matches nothing.
pub struct All(Vec<Option<BoxMatcher>>);

/// Matches when at least one present sub-matcher matches.
pub struct Any(Vec<Option<BoxMatcher>>);

/// Negation of a matcher.
pub struct Not(BoxMatcher);

/// Builds an [`All`]. Items may be `BoxMatcher` or `Option<BoxMatcher>`;
/// `None` entries are skipped.
///
/// # Examples
///
/// ```
/// use command_dispatch_matcher::{BoxMatcher, Matcher, all, path};
///
/// let none: [Option<BoxMatcher>; 1] = [None];
/// assert!(!all(none).matches("foo"));
/// assert!(all([Some(path(["foo"]).unwrap().boxed()), None]).matches("foo/bar"));
/// ```
pub fn all<I>(matchers: I) -> All
where
    I: IntoIterator,
    I::Item: Into<Option<BoxMatcher>>,
{
    All(matchers.into_iter().map(Into::into).collect())
}

/// Builds an [`Any`]. Items may be `BoxMatcher` or `Option<BoxMatcher>`.
pub fn any<I>(matchers: I) -> Any
where
    I: IntoIterator,
    I::Item: Into<Option<BoxMatcher>>,
{
    Any(matchers.into_iter().map(Into::into).collect())
}

/// Builds a [`Not`].
pub fn not(matcher: impl Matcher + 'static) -> Not {
    Not(Box::new(matcher))
}

impl Matcher for All {
    fn matches(&self, rel_path: &str) -> bool {
        let mut present = false;
        for matcher in self.0.iter().flatten() {
            present = true;
            if !matcher.matches(rel_path) {
                return false;
            }
        }
        present
    }
}

impl Matcher for Any {
    fn matches(&self, rel_path: &str) -> bool {
        self.0.iter().flatten().any(|matcher| matcher.matches(rel_path))
    }
}

impl Matcher for Not {
    fn matches(&self, rel_path: &str) -> bool {
        !self.0.matches(rel_path)
    }
}
