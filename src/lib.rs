/*!
 * mdclip - Copy files and directories to the clipboard as Markdown
 *
 * This library gathers files and directory trees into a flat entry
 * list, renders it as a single Markdown document (one heading plus
 * fenced code block per file), and writes it to the system clipboard.
 */

pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod gitignore;
pub mod limits;
pub mod markdown;
pub mod orchestrator;
pub mod report;
pub mod types;
pub mod utils;
pub mod walker;


// Re-export main components for easier access
pub use classifier::BinaryClassifier;
pub use config::{Args, Config, FileSettings};
pub use error::{MdclipError, Result};
pub use gitignore::IgnoreRuleEngine;
pub use limits::LimitGuard;
pub use orchestrator::CopyOrchestrator;
pub use report::{CopyReport, FileReportInfo, Reporter};
pub use types::{Classification, Entry};
pub use walker::DirectoryWalker;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
