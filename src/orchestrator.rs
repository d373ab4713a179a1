/*!
 * The copy pipeline
 *
 * One invocation runs Gather -> Filter/Classify -> LimitCheck -> Render
 * -> Write -> report. A limit rejection or an empty gather aborts the
 * pipeline before anything reaches the clipboard; there are no partial
 * writes.
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::ProgressBar;

use crate::classifier::BinaryClassifier;
use crate::clipboard;
use crate::config::Config;
use crate::error::{MdclipError, Result};
use crate::gitignore::{workspace_root_for, IgnoreRuleEngine};
use crate::limits::LimitGuard;
use crate::markdown;
use crate::report::CopyReport;
use crate::types::{Classification, Entry};
use crate::walker::DirectoryWalker;

/// Orchestrator for one copy operation
pub struct CopyOrchestrator {
    config: Config,
    ignore: IgnoreRuleEngine,
    progress: ProgressBar,
}

impl CopyOrchestrator {
    pub fn new(config: Config, progress: ProgressBar) -> Self {
        Self {
            config,
            ignore: IgnoreRuleEngine::new(),
            progress,
        }
    }

    /// Run the full pipeline and return the copy report
    pub fn run(&mut self) -> Result<CopyReport> {
        let start = Instant::now();

        let entries = self.gather()?;
        if !entries.iter().any(Entry::is_file) {
            return Err(MdclipError::NoFilesFound);
        }

        LimitGuard::new(&self.config).check_entries(&entries)?;

        let document = markdown::render(&entries);

        let destination = if self.config.to_stdout {
            println!("{}", document);
            "stdout"
        } else {
            clipboard::copy_to_clipboard(&document)?;
            "clipboard"
        };

        Ok(CopyReport::from_entries(
            &entries,
            document.len() as u64,
            destination,
            start.elapsed(),
        ))
    }

    /// Gather entries for every target, in argument order.
    ///
    /// Directory targets are walked; file targets are ignore-checked and
    /// classified individually.
    pub fn gather(&mut self) -> Result<Vec<Entry>> {
        let targets = self.config.targets.clone();
        let mut entries = Vec::new();

        for target in &targets {
            if target.is_dir() {
                let abs = fs::canonicalize(target).map_err(|source| {
                    MdclipError::UnreadableRoot {
                        path: target.display().to_string(),
                        source,
                    }
                })?;
                let display = display_root(target, &abs);

                let mut walker =
                    DirectoryWalker::new(&self.config, &mut self.ignore, self.progress.clone());
                entries.extend(walker.walk(&abs, &display)?);
            } else if let Some(entry) = self.gather_file(target) {
                entries.push(entry);
            }
        }

        Ok(entries)
    }

    /// One explicit file target; `None` means it was skipped
    fn gather_file(&mut self, path: &Path) -> Option<Entry> {
        if self.config.use_gitignore {
            if let Some(root) = workspace_root_for(path) {
                if self.ignore.is_ignored(path, &root, false) {
                    eprintln!("Skipping {}: excluded by .gitignore", path.display());
                    return None;
                }
            }
        }

        self.progress.inc(1);

        let classifier = BinaryClassifier::new(&self.config);
        match classifier.classify(path) {
            Classification::Binary => Some(Entry::Binary {
                path: path.to_path_buf(),
            }),
            Classification::Text => match fs::read_to_string(path) {
                Ok(content) => Some(Entry::Text {
                    path: path.to_path_buf(),
                    content,
                }),
                Err(e) => {
                    eprintln!("Skipping {}: {}", path.display(), e);
                    None
                }
            },
        }
    }
}

/// Headings use the target path as the user typed it; targets without a
/// usable name (".", "..") fall back to the canonical directory name.
fn display_root(target: &Path, abs: &Path) -> PathBuf {
    match target.file_name() {
        Some(_) => target.to_path_buf(),
        None => PathBuf::from(abs.file_name().unwrap_or(abs.as_os_str())),
    }
}
