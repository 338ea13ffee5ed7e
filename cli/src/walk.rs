//! Directory walk yielding slash-separated relative paths.

use std::fs;
use std::io;
use std::path::Path;

use command_dispatch_matcher::{Matcher, hidden};
use tokio_util::sync::CancellationToken;

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    Completed,
    Cancelled,
}

/// Visits every entry below `root`. A directory's entries are visited in
/// sorted order before those of its subdirectories.
///
/// Hidden entries are pruned, along with everything below them, unless
/// `include_hidden` is set. The token is checked before each entry.
pub fn walk(
    root: &Path,
    include_hidden: bool,
    cancel: &CancellationToken,
    visit: &mut dyn FnMut(&str) -> io::Result<()>,
) -> io::Result<WalkOutcome> {
    let hidden = hidden();
    let mut pending = vec![String::new()];

    while let Some(dir) = pending.pop() {
        let mut entries = fs::read_dir(root.join(&dir))?
            .map(|entry| entry.map(|e| (e.file_name().to_string_lossy().into_owned(), e)))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut subdirs = Vec::new();
        for (name, entry) in entries {
            if cancel.is_cancelled() {
                return Ok(WalkOutcome::Cancelled);
            }
            let rel = if dir.is_empty() { name } else { format!("{dir}/{name}") };
            if !include_hidden && hidden.matches(&rel) {
                continue;
            }
            visit(&rel)?;
            if entry.file_type()?.is_dir() {
                subdirs.push(rel);
            }
        }
        // Reversed so the stack pops them in sorted order.
        pending.extend(subdirs.into_iter().rev());
    }
    Ok(WalkOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(root: &Path, include_hidden: bool) -> Vec<String> {
        let mut seen = Vec::new();
        let outcome = walk(root, include_hidden, &CancellationToken::new(), &mut |rel| {
            seen.push(rel.to_string());
            Ok(())
        })
        .unwrap();
        assert_eq!(outcome, WalkOutcome::Completed);
        seen
    }

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("a/b/c.txt"), "").unwrap();
        fs::write(dir.path().join("a/z.txt"), "").unwrap();
        fs::write(dir.path().join(".git/config"), "").unwrap();
        fs::write(dir.path().join("top.rs"), "").unwrap();
        dir
    }

    #[test]
    fn test_walk_skips_hidden_by_default() {
        let dir = tree();
        assert_eq!(
            collect(dir.path(), false),
            vec!["a", "top.rs", "a/b", "a/z.txt", "a/b/c.txt"]
        );
    }

    #[test]
    fn test_walk_includes_hidden_when_asked() {
        let dir = tree();
        let seen = collect(dir.path(), true);
        assert!(seen.contains(&".git".to_string()));
        assert!(seen.contains(&".git/config".to_string()));
    }

    #[test]
    fn test_walk_stops_when_cancelled() {
        let dir = tree();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut seen = 0;
        let outcome = walk(dir.path(), false, &cancel, &mut |_| {
            seen += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(outcome, WalkOutcome::Cancelled);
        assert_eq!(seen, 0);
    }
}
