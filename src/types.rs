/*!
 * Core types for mdclip
 */

use std::path::{Path, PathBuf};

/// The text/binary decision for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Content can be read and rendered as text
    Text,
    /// Content must not be rendered (binary or unreadable)
    Binary,
}

/// One unit of traversal output.
///
/// The variants are mutually exclusive by construction: an entry is a
/// directory marker, a text file with its content, or a binary file
/// whose content is never materialized.
#[derive(Debug, Clone)]
pub enum Entry {
    /// A directory, with its emptiness recorded at listing time
    Directory { path: PathBuf, is_empty: bool },
    /// A text file and its full content
    Text { path: PathBuf, content: String },
    /// A binary file; content omitted
    Binary { path: PathBuf },
}

impl Entry {
    /// Display path of the entry, as gathered
    pub fn path(&self) -> &Path {
        match self {
            Entry::Directory { path, .. } => path,
            Entry::Text { path, .. } => path,
            Entry::Binary { path } => path,
        }
    }

    /// Text content, if this entry carries any
    pub fn content(&self) -> Option<&str> {
        match self {
            Entry::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn is_file(&self) -> bool {
        !matches!(self, Entry::Directory { .. })
    }
}
