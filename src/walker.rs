/*!
 * Sequential directory traversal
 *
 * The walk visits one directory entry at a time, in the order the OS
 * reports them, and produces a flat entry list: the directory itself
 * first, then its children. Traversal is deliberately single-threaded;
 * memory stays bounded and entry order stays reproducible for a given
 * listing order.
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob_match::glob_match;
use indicatif::ProgressBar;

use crate::classifier::BinaryClassifier;
use crate::config::Config;
use crate::error::{MdclipError, Result};
use crate::gitignore::{workspace_root_for, IgnoreRuleEngine};
use crate::types::{Classification, Entry};

/// Walker for one copy operation
pub struct DirectoryWalker<'a> {
    config: &'a Config,
    ignore: &'a mut IgnoreRuleEngine,
    progress: ProgressBar,
}

impl<'a> DirectoryWalker<'a> {
    pub fn new(config: &'a Config, ignore: &'a mut IgnoreRuleEngine, progress: ProgressBar) -> Self {
        Self {
            config,
            ignore,
            progress,
        }
    }

    /// Walk the tree rooted at `root`, emitting entries under the
    /// `display_root` path prefix.
    ///
    /// A root that cannot be listed is an operation-level error; every
    /// failure below the root skips the affected item and continues.
    pub fn walk(&mut self, root: &Path, display_root: &Path) -> Result<Vec<Entry>> {
        let workspace_root = if self.config.use_gitignore {
            workspace_root_for(root)
        } else {
            None
        };

        let mut entries = Vec::new();
        self.walk_dir(root, display_root, workspace_root.as_deref(), &mut entries)
            .map_err(|source| MdclipError::UnreadableRoot {
                path: display_root.display().to_string(),
                source,
            })?;
        Ok(entries)
    }

    fn walk_dir(
        &mut self,
        abs: &Path,
        display: &Path,
        workspace_root: Option<&Path>,
        entries: &mut Vec<Entry>,
    ) -> io::Result<()> {
        let children: Vec<fs::DirEntry> = fs::read_dir(abs)?.filter_map(|e| e.ok()).collect();

        // The directory itself comes before anything inside it
        entries.push(Entry::Directory {
            path: display.to_path_buf(),
            is_empty: children.is_empty(),
        });

        for child in children {
            let name = child.file_name().to_string_lossy().to_string();
            let file_type = match child.file_type() {
                Ok(ft) => ft,
                Err(_) => continue,
            };
            let child_abs = abs.join(&name);
            let child_display = display.join(&name);

            if file_type.is_dir() {
                if self.config.exclude_directories.contains(&name) {
                    continue;
                }
                if self.config.recursive {
                    if let Err(e) =
                        self.walk_dir(&child_abs, &child_display, workspace_root, entries)
                    {
                        eprintln!("Error listing directory {}: {}", child_abs.display(), e);
                    }
                } else {
                    match directory_is_empty(&child_abs) {
                        Ok(is_empty) => entries.push(Entry::Directory {
                            path: child_display,
                            is_empty,
                        }),
                        Err(e) => {
                            eprintln!("Error listing directory {}: {}", child_abs.display(), e)
                        }
                    }
                }
            } else if file_type.is_file() {
                if let Some(entry) = self.process_file(&child_abs, child_display, &name, workspace_root)
                {
                    entries.push(entry);
                }
            }
            // Symlinks and special files are not copied
        }

        Ok(())
    }

    /// Filter and classify one file; `None` means the file is skipped
    fn process_file(
        &mut self,
        abs: &Path,
        display: PathBuf,
        name: &str,
        workspace_root: Option<&Path>,
    ) -> Option<Entry> {
        if self
            .config
            .ignore_patterns
            .iter()
            .any(|pattern| glob_match(pattern, name))
        {
            return None;
        }

        if let Some(root) = workspace_root {
            if self.ignore.is_ignored(abs, root, false) {
                return None;
            }
        }

        self.progress.inc(1);
        self.progress.set_message(name.to_string());

        let classifier = BinaryClassifier::new(self.config);
        match classifier.classify(abs) {
            Classification::Binary => Some(Entry::Binary { path: display }),
            Classification::Text => match fs::read_to_string(abs) {
                Ok(content) => Some(Entry::Text {
                    path: display,
                    content,
                }),
                // Unreadable or undecodable single files are skipped
                Err(_) => None,
            },
        }
    }
}

fn directory_is_empty(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}
