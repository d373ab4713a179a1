/*!
 * Utility functions for mdclip
 */

use std::path::Path;

use glob_match::glob_match;
use walkdir::WalkDir;

use crate::config::Config;

/// Count the files a walk of `dir` would visit, for progress sizing.
///
/// This is an estimate: gitignore rules and content classification are
/// not applied here, only the cheap name-based exclusions.
pub fn count_files(dir: &Path, config: &Config) -> u64 {
    let max_depth = if config.recursive { usize::MAX } else { 1 };

    WalkDir::new(dir)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir()
                && config
                    .exclude_directories
                    .contains(&e.file_name().to_string_lossy().to_string()))
        })
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            !config
                .ignore_patterns
                .iter()
                .any(|pattern| glob_match(pattern, &name))
        })
        .count() as u64
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
