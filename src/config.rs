/*!
 * Configuration handling for mdclip
 *
 * Settings are resolved from three layers, highest precedence first:
 * command-line flags, an optional JSON config file, built-in defaults.
 */

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::classifier::{DEFAULT_BINARY_EXTENSIONS, DEFAULT_TEXT_EXTENSIONS};
use crate::error::{MdclipError, Result};

/// Default maximum aggregate character count
pub const DEFAULT_MAX_CHARACTERS: usize = 400_000;

/// Default maximum number of entries per copy
pub const DEFAULT_MAX_FILES: usize = 50;

/// Default control-character ratio above which a file is binary
pub const DEFAULT_CONTROL_CHAR_RATIO: f64 = 0.3;

/// Directory names that are never descended into
pub static DEFAULT_EXCLUDE_DIRS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec![".git", "node_modules", "out"]);

/// Command-line arguments for mdclip
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "mdclip",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy files and directories to the clipboard as Markdown",
    long_about = "Copies the contents of files and directories to the system clipboard as a \
                  single Markdown document, one heading plus fenced code block per file. \
                  Binary files and directories are rendered as markers instead of content."
)]
pub struct Args {
    /// Files or directories to copy
    #[clap(default_value = ".")]
    pub paths: Vec<String>,

    /// Descend into subdirectories of directory targets
    #[clap(short, long)]
    pub recursive: bool,

    /// Do not apply .gitignore rules
    #[clap(long)]
    pub no_gitignore: bool,

    /// Comma-separated directory names to skip entirely
    #[clap(long, value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// Comma-separated glob patterns for file names to skip
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Maximum total characters of text content
    #[clap(long)]
    pub max_chars: Option<usize>,

    /// Maximum number of entries
    #[clap(long)]
    pub max_files: Option<usize>,

    /// Control-character ratio above which an unknown file is binary
    #[clap(long)]
    pub control_char_ratio: Option<f64>,

    /// Disable the null-byte binary check
    #[clap(long)]
    pub no_null_byte_check: bool,

    /// Disable the control-character-ratio binary check
    #[clap(long)]
    pub no_control_char_check: bool,

    /// Print the Markdown document to stdout instead of the clipboard
    #[clap(long)]
    pub stdout: bool,

    /// Path to an alternate config file
    #[clap(long)]
    pub config: Option<String>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Optional settings read from the JSON config file.
///
/// Every field is optional; absent fields fall through to the defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct FileSettings {
    pub use_gitignore: Option<bool>,
    pub exclude_directories: Option<Vec<String>>,
    pub known_text_extensions: Option<Vec<String>>,
    pub known_binary_extensions: Option<Vec<String>>,
    pub ignore_patterns: Option<Vec<String>>,
    pub null_byte_check: Option<bool>,
    pub control_char_check: Option<bool>,
    pub control_char_ratio: Option<f64>,
    pub max_characters: Option<usize>,
    pub max_files: Option<usize>,
}

impl FileSettings {
    /// Load settings from the given path, or from the default location
    /// (`<config dir>/mdclip/config.json`) when `path` is `None`.
    ///
    /// A missing file yields empty settings; a present but malformed
    /// file is a configuration error.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => match dirs::config_dir() {
                Some(dir) => dir.join("mdclip").join("config.json"),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|e| {
            MdclipError::Config(format!("invalid config file {}: {}", path.display(), e))
        })
    }
}

/// Resolved application configuration, immutable for one operation
#[derive(Clone, Debug)]
pub struct Config {
    /// Files or directories to copy
    pub targets: Vec<PathBuf>,

    /// Whether directory targets are walked recursively
    pub recursive: bool,

    /// Whether .gitignore rules apply
    pub use_gitignore: bool,

    /// Directory names skipped entirely during walks
    pub exclude_directories: HashSet<String>,

    /// Extensions always treated as text
    pub known_text_extensions: HashSet<String>,

    /// Extensions always treated as binary
    pub known_binary_extensions: HashSet<String>,

    /// Glob patterns for file names to skip
    pub ignore_patterns: Vec<String>,

    /// Whether any 0x00 byte marks a file binary
    pub null_byte_check: bool,

    /// Whether the control-character ratio marks a file binary
    pub control_char_check: bool,

    /// Control-character ratio threshold
    pub control_char_ratio: f64,

    /// Maximum total characters of text content
    pub max_characters: usize,

    /// Maximum number of entries
    pub max_files: usize,

    /// Print to stdout instead of the clipboard
    pub to_stdout: bool,
}

impl Config {
    /// Merge command-line arguments over file settings over defaults
    pub fn resolve(args: &Args, file: &FileSettings) -> Self {
        let exclude_directories: HashSet<String> = if !args.exclude_dirs.is_empty() {
            args.exclude_dirs.iter().cloned().collect()
        } else if let Some(dirs) = &file.exclude_directories {
            dirs.iter().cloned().collect()
        } else {
            DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect()
        };

        let known_text_extensions: HashSet<String> = match &file.known_text_extensions {
            Some(exts) => exts.iter().map(|e| e.to_lowercase()).collect(),
            None => DEFAULT_TEXT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        };

        let known_binary_extensions: HashSet<String> = match &file.known_binary_extensions {
            Some(exts) => exts.iter().map(|e| e.to_lowercase()).collect(),
            None => DEFAULT_BINARY_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        };

        let mut ignore_patterns = args.ignore_patterns.clone();
        if ignore_patterns.is_empty() {
            if let Some(patterns) = &file.ignore_patterns {
                ignore_patterns = patterns.clone();
            }
        }

        Self {
            targets: args.paths.iter().map(PathBuf::from).collect(),
            recursive: args.recursive,
            use_gitignore: if args.no_gitignore {
                false
            } else {
                file.use_gitignore.unwrap_or(true)
            },
            exclude_directories,
            known_text_extensions,
            known_binary_extensions,
            ignore_patterns,
            null_byte_check: if args.no_null_byte_check {
                false
            } else {
                file.null_byte_check.unwrap_or(true)
            },
            control_char_check: if args.no_control_char_check {
                false
            } else {
                file.control_char_check.unwrap_or(true)
            },
            control_char_ratio: args
                .control_char_ratio
                .or(file.control_char_ratio)
                .unwrap_or(DEFAULT_CONTROL_CHAR_RATIO),
            max_characters: args
                .max_chars
                .or(file.max_characters)
                .unwrap_or(DEFAULT_MAX_CHARACTERS),
            max_files: args.max_files.or(file.max_files).unwrap_or(DEFAULT_MAX_FILES),
            to_stdout: args.stdout,
        }
    }

    /// Validate the configuration once, before the operation starts
    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(MdclipError::Config("no target paths given".to_string()));
        }

        for target in &self.targets {
            if !target.exists() {
                return Err(MdclipError::Config(format!(
                    "target not found: {}",
                    target.display()
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.control_char_ratio) {
            return Err(MdclipError::Config(format!(
                "control-char ratio must be between 0 and 1, got {}",
                self.control_char_ratio
            )));
        }

        if self.max_files == 0 || self.max_characters == 0 {
            return Err(MdclipError::Config(
                "limits must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
impl Config {
    /// Default configuration rooted at the given targets, for tests
    pub fn for_targets(targets: Vec<PathBuf>) -> Self {
        let args = Args::parse_from(["mdclip"]);
        let mut config = Config::resolve(&args, &FileSettings::default());
        config.targets = targets;
        config
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn defaults_apply_without_flags_or_file() {
        let args = Args::parse_from(["mdclip"]);
        let config = Config::resolve(&args, &FileSettings::default());

        assert_eq!(config.targets, vec![PathBuf::from(".")]);
        assert!(config.use_gitignore);
        assert!(config.null_byte_check);
        assert!(config.control_char_check);
        assert_eq!(config.control_char_ratio, DEFAULT_CONTROL_CHAR_RATIO);
        assert_eq!(config.max_characters, DEFAULT_MAX_CHARACTERS);
        assert_eq!(config.max_files, DEFAULT_MAX_FILES);
        assert!(config.exclude_directories.contains(".git"));
        assert!(config.exclude_directories.contains("node_modules"));
        assert!(config.exclude_directories.contains("out"));
        assert!(config.known_text_extensions.contains("rs"));
        assert!(config.known_binary_extensions.contains("png"));
    }

    #[test]
    fn flags_override_file_settings() {
        let args = Args::parse_from(["mdclip", "--max-files", "7", "--no-gitignore"]);
        let file = FileSettings {
            max_files: Some(99),
            use_gitignore: Some(true),
            max_characters: Some(1_000),
            ..FileSettings::default()
        };
        let config = Config::resolve(&args, &file);

        assert_eq!(config.max_files, 7);
        assert!(!config.use_gitignore);
        // File settings still win over defaults where no flag was given
        assert_eq!(config.max_characters, 1_000);
    }

    #[test]
    fn config_file_loads_and_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{ "maxFiles": 12, "excludeDirectories": ["dist"] }}"#).unwrap();

        let settings = FileSettings::load(path.to_str()).unwrap();
        assert_eq!(settings.max_files, Some(12));
        assert_eq!(settings.exclude_directories, Some(vec!["dist".to_string()]));

        let mut file = File::create(&path).unwrap();
        write!(file, "not json").unwrap();
        assert!(FileSettings::load(path.to_str()).is_err());

        // Missing file is not an error
        let missing = dir.path().join("nope.json");
        assert!(FileSettings::load(missing.to_str()).unwrap().max_files.is_none());
    }

    #[test]
    fn validate_rejects_missing_targets_and_bad_ratios() {
        let dir = tempdir().unwrap();

        let mut config = Config::for_targets(vec![dir.path().join("ghost")]);
        assert!(config.validate().is_err());

        config = Config::for_targets(vec![dir.path().to_path_buf()]);
        assert!(config.validate().is_ok());

        config.control_char_ratio = 1.5;
        assert!(config.validate().is_err());

        config.control_char_ratio = 0.3;
        config.max_files = 0;
        assert!(config.validate().is_err());
    }
}
