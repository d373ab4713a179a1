/*!
 * Size and count limits enforced before any clipboard write
 */

use crate::config::Config;
use crate::error::{MdclipError, Result};
use crate::types::Entry;

/// Aggregate limits for one copy operation
#[derive(Debug, Clone, Copy)]
pub struct LimitGuard {
    max_characters: usize,
    max_files: usize,
}

impl LimitGuard {
    pub fn new(config: &Config) -> Self {
        Self {
            max_characters: config.max_characters,
            max_files: config.max_files,
        }
    }

    /// Reject entry counts over the configured maximum
    pub fn check_count(&self, count: usize) -> Result<()> {
        if count > self.max_files {
            return Err(MdclipError::TooManyFiles {
                count,
                limit: self.max_files,
            });
        }
        Ok(())
    }

    /// Reject aggregate text sizes over the configured maximum
    pub fn check_size(&self, chars: usize) -> Result<()> {
        if chars > self.max_characters {
            return Err(MdclipError::ContentTooLarge {
                chars,
                limit: self.max_characters,
            });
        }
        Ok(())
    }

    /// Run both checks over a gathered entry list.
    ///
    /// Only text content counts toward the size limit; binary and
    /// directory entries contribute zero characters.
    pub fn check_entries(&self, entries: &[Entry]) -> Result<()> {
        self.check_count(entries.len())?;
        let chars: usize = entries
            .iter()
            .filter_map(Entry::content)
            .map(|c| c.chars().count())
            .sum();
        self.check_size(chars)
    }
}
