//! Regex matching on path component names.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Matcher, MatcherError, base_name, subpaths};

static HIDDEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\..+)$").expect("static regex must compile"));

/// Matches paths where the name of the path or of any ancestor fully
/// matches one of the expressions.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    patterns: Vec<Regex>,
}

/// Builds a [`NameMatcher`]. Each expression must match a whole name; names
/// never contain `/`.
///
/// # Examples
///
/// ```
/// use command_dispatch_matcher::{Matcher, name};
///
/// let m = name([r"target", r".*\.log"]).unwrap();
/// assert!(m.matches("target/debug/app"));
/// assert!(m.matches("logs/run.log"));
/// assert!(!m.matches("src/targets.rs"));
/// ```
///
/// # Errors
///
/// Returns [`MatcherError::InvalidRegex`] for the first invalid expression.
pub fn name<I>(patterns: I) -> Result<NameMatcher, MatcherError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let patterns = patterns
        .into_iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            Regex::new(&format!("^(?:{pattern})$")).map_err(|source| MatcherError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(NameMatcher { patterns })
}

/// Matches hidden files and directories (names starting with `.`), and
/// everything inside hidden directories.
pub fn hidden() -> NameMatcher {
    NameMatcher {
        patterns: vec![HIDDEN_RE.clone()],
    }
}

impl Matcher for NameMatcher {
    fn matches(&self, rel_path: &str) -> bool {
        subpaths(rel_path).into_iter().any(|subpath| {
            let name = base_name(subpath);
            self.patterns.iter().any(|re| re.is_match(name))
        })
    }
}
