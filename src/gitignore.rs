/*!
 * Gitignore rule loading, caching and matching
 *
 * One compiled rule set per root, built lazily on first lookup and kept
 * for the lifetime of the engine. Cache entries record the .gitignore
 * modification time so an edited file is re-read instead of served
 * stale. Every failure on this path is fail-open: a file is only
 * skipped when a rule set loaded cleanly and matches it.
 */

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Cached rules for one root
struct CachedRules {
    /// Modification time of the .gitignore when it was compiled
    modified: Option<SystemTime>,
    /// Compiled rules; `None` when no usable .gitignore exists
    rules: Option<Gitignore>,
}

/// Per-root gitignore rule engine with an in-memory cache
#[derive(Default)]
pub struct IgnoreRuleEngine {
    cache: HashMap<PathBuf, CachedRules>,
}

impl IgnoreRuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `path` is excluded by the .gitignore at `root`.
    ///
    /// Matching is done on the path relative to `root`; paths outside
    /// the root are never ignored.
    pub fn is_ignored(&mut self, path: &Path, root: &Path, is_dir: bool) -> bool {
        let relative = match path.strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => return false,
        };

        match self.rules_for(root) {
            Some(rules) => rules
                .matched_path_or_any_parents(relative, is_dir)
                .is_ignore(),
            None => false,
        }
    }

    /// Compiled rules for `root`, rebuilt if the .gitignore changed
    fn rules_for(&mut self, root: &Path) -> Option<&Gitignore> {
        let gitignore_path = root.join(".gitignore");
        let modified = fs::metadata(&gitignore_path)
            .and_then(|m| m.modified())
            .ok();

        let stale = match self.cache.get(root) {
            Some(cached) => cached.modified != modified,
            None => true,
        };

        if stale {
            let rules = load_rules(root, &gitignore_path);
            self.cache
                .insert(root.to_path_buf(), CachedRules { modified, rules });
        }

        self.cache.get(root).and_then(|c| c.rules.as_ref())
    }
}

/// Compile the .gitignore at `path`, or `None` when absent or broken
fn load_rules(root: &Path, path: &Path) -> Option<Gitignore> {
    if !path.is_file() {
        return None;
    }

    let mut builder = GitignoreBuilder::new(root);
    if builder.add(path).is_some() {
        // Unreadable or unparsable file: treat as no rules
        return None;
    }
    builder.build().ok()
}

/// Nearest ancestor of `path` that looks like a workspace root, meaning
/// it contains a `.git` directory or a `.gitignore` file.
pub fn workspace_root_for(path: &Path) -> Option<PathBuf> {
    let start = if path.is_dir() { path } else { path.parent()? };
    for dir in start.ancestors() {
        if dir.join(".git").exists() || dir.join(".gitignore").is_file() {
            return Some(dir.to_path_buf());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use filetime::{set_file_mtime, FileTime};
    use tempfile::tempdir;

    use super::*;

    fn write_gitignore(root: &Path, content: &str) {
        let mut file = File::create(root.join(".gitignore")).unwrap();
        write!(file, "{}", content).unwrap();
    }

    #[test]
    fn matches_glob_patterns() {
        let dir = tempdir().unwrap();
        write_gitignore(dir.path(), "*.log\nbuild/\n");

        let mut engine = IgnoreRuleEngine::new();
        assert!(engine.is_ignored(&dir.path().join("debug.log"), dir.path(), false));
        assert!(engine.is_ignored(&dir.path().join("sub/trace.log"), dir.path(), false));
        assert!(engine.is_ignored(&dir.path().join("build"), dir.path(), true));
        assert!(!engine.is_ignored(&dir.path().join("main.rs"), dir.path(), false));
    }

    #[test]
    fn negation_reincludes() {
        let dir = tempdir().unwrap();
        write_gitignore(dir.path(), "*.log\n!keep.log\n");

        let mut engine = IgnoreRuleEngine::new();
        assert!(engine.is_ignored(&dir.path().join("debug.log"), dir.path(), false));
        assert!(!engine.is_ignored(&dir.path().join("keep.log"), dir.path(), false));
    }

    #[test]
    fn no_gitignore_means_nothing_ignored() {
        let dir = tempdir().unwrap();
        let mut engine = IgnoreRuleEngine::new();
        assert!(!engine.is_ignored(&dir.path().join("anything.log"), dir.path(), false));
        // The no-rules marker is cached too
        assert!(engine.cache.contains_key(dir.path()));
    }

    #[test]
    fn path_outside_root_is_not_ignored() {
        let dir = tempdir().unwrap();
        write_gitignore(dir.path(), "*\n");

        let mut engine = IgnoreRuleEngine::new();
        assert!(!engine.is_ignored(Path::new("/elsewhere/file.txt"), dir.path(), false));
    }

    #[test]
    fn edited_gitignore_invalidates_cache() {
        let dir = tempdir().unwrap();
        write_gitignore(dir.path(), "*.log\n");

        let mut engine = IgnoreRuleEngine::new();
        assert!(engine.is_ignored(&dir.path().join("a.log"), dir.path(), false));
        assert!(!engine.is_ignored(&dir.path().join("a.tmp"), dir.path(), false));

        // Rewrite the rules and force a distinct mtime
        write_gitignore(dir.path(), "*.tmp\n");
        set_file_mtime(
            dir.path().join(".gitignore"),
            FileTime::from_unix_time(4_102_444_800, 0),
        )
        .unwrap();

        assert!(!engine.is_ignored(&dir.path().join("a.log"), dir.path(), false));
        assert!(engine.is_ignored(&dir.path().join("a.tmp"), dir.path(), false));
    }

    #[test]
    fn workspace_root_walks_up() {
        let dir = tempdir().unwrap();
        write_gitignore(dir.path(), "*.log\n");
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        File::create(dir.path().join("a/b/file.txt")).unwrap();

        let root = workspace_root_for(&dir.path().join("a/b/file.txt"));
        assert_eq!(root.as_deref(), Some(dir.path()));

        let outside = tempdir().unwrap();
        File::create(outside.path().join("lonely.txt")).unwrap();
        // No .git or .gitignore anywhere under the temp root is likely,
        // but an ancestor outside the fixture could still match; only
        // assert the positive case above.
        let _ = workspace_root_for(&outside.path().join("lonely.txt"));
    }
}
