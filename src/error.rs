//! Global error handling for mdclip
//!
//! One error type covers every failure that can abort a copy operation.
//! Per-item failures (an unreadable file, a bad ignore rule) are handled
//! where they occur and never surface here.

use std::io;
use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for mdclip operations
#[derive(Error, Debug)]
pub enum MdclipError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The target directory could not be listed
    #[error("Cannot read directory {path}: {source}")]
    UnreadableRoot { path: String, source: io::Error },

    /// Nothing was gathered for copying
    #[error("No files found to copy")]
    NoFilesFound,

    /// More entries selected than the configured limit allows
    #[error(
        "Too many files selected. Maximum limit is {limit} files (got {count}). \
         Please reduce the selection and try again."
    )]
    TooManyFiles { count: usize, limit: usize },

    /// More text content selected than the configured limit allows
    #[error(
        "Content is too large. Maximum size is approximately {limit} characters (got {chars}). \
         Please reduce the selection and try again."
    )]
    ContentTooLarge { chars: usize, limit: usize },
}

/// Specialized Result type for mdclip operations
pub type Result<T> = std::result::Result<T, MdclipError>;

impl MdclipError {
    /// Whether this error is a limit rejection rather than a hard failure
    pub fn is_limit_rejection(&self) -> bool {
        matches!(
            self,
            MdclipError::TooManyFiles { .. } | MdclipError::ContentTooLarge { .. }
        )
    }
}
