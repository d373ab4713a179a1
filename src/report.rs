/*!
 * Post-copy reporting
 *
 * Renders a per-file table and a summary table for a finished copy
 * operation, using the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::Entry;
use crate::utils::format_file_size;

/// Per-file detail for the report
#[derive(Debug, Clone, Default)]
pub struct FileReportInfo {
    /// Number of lines of text content
    pub lines: usize,
    /// Number of characters of text content
    pub chars: usize,
}

/// Statistics for one copy operation
#[derive(Debug, Clone)]
pub struct CopyReport {
    /// Where the document went ("clipboard" or "stdout")
    pub destination: String,
    /// Time taken to gather and render
    pub duration: Duration,
    /// Text files copied with content
    pub text_files: usize,
    /// Binary files included as markers
    pub binary_files: usize,
    /// Directory entries included as markers
    pub directories: usize,
    /// Total lines of text content
    pub total_lines: usize,
    /// Total characters of text content
    pub total_chars: usize,
    /// Size of the rendered Markdown document in bytes
    pub document_bytes: u64,
    /// Per-file details, in entry order
    pub file_details: Vec<(String, FileReportInfo)>,
}

impl CopyReport {
    /// Build a report from the gathered entries and rendered document
    pub fn from_entries(
        entries: &[Entry],
        document_bytes: u64,
        destination: &str,
        duration: Duration,
    ) -> Self {
        let mut report = CopyReport {
            destination: destination.to_string(),
            duration,
            document_bytes,
            text_files: 0,
            binary_files: 0,
            directories: 0,
            total_lines: 0,
            total_chars: 0,
            file_details: Vec::new(),
        };

        for entry in entries {
            match entry {
                Entry::Text { path, content } => {
                    let lines = content.lines().count();
                    let chars = content.chars().count();
                    report.text_files += 1;
                    report.total_lines += lines;
                    report.total_chars += chars;
                    report
                        .file_details
                        .push((path.display().to_string(), FileReportInfo { lines, chars }));
                }
                Entry::Binary { path } => {
                    report.binary_files += 1;
                    report
                        .file_details
                        .push((path.display().to_string(), FileReportInfo::default()));
                }
                Entry::Directory { .. } => report.directories += 1,
            }
        }

        report
    }
}

/// Report generator for copy results
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &CopyReport) {
        println!("\n{}", self.generate_report(report));
    }

    /// Generate the full report string
    pub fn generate_report(&self, report: &CopyReport) -> String {
        let files_title = if report.file_details.len() > 15 {
            "TOP 10 LARGEST FILES BY CHARACTER COUNT"
        } else {
            "COPIED FILES"
        };

        format!(
            "{}\n{}\n\nCOPY COMPLETE\n{}",
            files_title,
            self.create_files_table(report),
            self.create_summary_table(report)
        )
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    fn create_summary_table(&self, report: &CopyReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "Destination".to_string(),
                value: report.destination.clone(),
            },
            SummaryRow {
                key: "Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Text Files".to_string(),
                value: self.format_number(report.text_files),
            },
            SummaryRow {
                key: "Total Lines".to_string(),
                value: self.format_number(report.total_lines),
            },
            SummaryRow {
                key: "Total Characters".to_string(),
                value: self.format_number(report.total_chars),
            },
            SummaryRow {
                key: "Document Size".to_string(),
                value: format_file_size(report.document_bytes),
            },
            SummaryRow {
                key: "Est. LLM Tokens".to_string(),
                value: format!("{} (chars / 4)", self.format_number(report.total_chars / 4)),
            },
        ];

        if report.binary_files > 0 {
            rows.push(SummaryRow {
                key: "Binary Files".to_string(),
                value: self.format_number(report.binary_files),
            });
        }
        if report.directories > 0 {
            rows.push(SummaryRow {
                key: "Directories".to_string(),
                value: self.format_number(report.directories),
            });
        }

        style_table(Table::new(rows))
    }

    fn create_files_table(&self, report: &CopyReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Chars")]
            chars: String,
        }

        // Largest files first; truncate long lists to the top ten
        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));
        let files_to_show = if files.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|(path, info)| FileRow {
                path: truncate_path(path, 60),
                lines: self.format_number(info.lines),
                chars: self.format_number(info.chars),
            })
            .collect();

        style_table(Table::new(rows))
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

fn style_table(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));
    table.to_string()
}

/// Shorten a path for display, keeping the trailing segments
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.len() <= max_len {
        return path.to_string();
    }

    let mut kept = Vec::new();
    let mut current_len = 3;
    for part in path.split('/').rev() {
        let part_len = part.len() + 1;
        if current_len + part_len > max_len {
            break;
        }
        kept.push(part);
        current_len += part_len;
    }

    if kept.is_empty() {
        return format!("...{}", &path[path.len().saturating_sub(max_len - 3)..]);
    }

    let mut result = String::from("...");
    for part in kept.iter().rev() {
        result.push('/');
        result.push_str(part);
    }
    result
}
