/*!
 * Markdown rendering of gathered entries
 *
 * Each entry becomes a heading plus a fenced code block. Text entries
 * carry their content verbatim with the file extension as the language
 * tag; directory and binary entries get an untagged fence around a
 * literal marker. Fences are sized to exceed the longest backtick run
 * in the body, so content cannot close its own block early.
 */

use crate::classifier::extension_of;
use crate::types::Entry;

/// Marker body for non-empty directories
pub const DIRECTORY_MARKER: &str = "(Directory)";
/// Marker body for empty directories
pub const EMPTY_DIRECTORY_MARKER: &str = "(Empty Directory)";
/// Marker body for binary files
pub const BINARY_MARKER: &str = "(Binary File)";

/// Render entries, in input order, into one Markdown document
pub fn render(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(entry: &Entry) -> String {
    let (tag, body) = match entry {
        Entry::Text { content, .. } => {
            let tag = extension_of(entry.path()).unwrap_or_default();
            let tag = if tag.is_empty() { "txt".to_string() } else { tag };
            (tag, content.as_str())
        }
        Entry::Directory { is_empty, .. } => {
            let marker = if *is_empty {
                EMPTY_DIRECTORY_MARKER
            } else {
                DIRECTORY_MARKER
            };
            (String::new(), marker)
        }
        Entry::Binary { .. } => (String::new(), BINARY_MARKER),
    };

    let fence = "`".repeat(fence_len(body));
    let heading = format!("# {}", entry.path().display());
    let opening = format!("{}{}", fence, tag);
    [heading.as_str(), "", opening.as_str(), body, fence.as_str(), ""].join("\n")
}

/// Fence length: at least three, and longer than any backtick run in
/// the body
fn fence_len(body: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in body.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    (longest + 1).max(3)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn text_entry(path: &str, content: &str) -> Entry {
        Entry::Text {
            path: PathBuf::from(path),
            content: content.to_string(),
        }
    }

    #[test]
    fn text_block_layout() {
        let doc = render(&[text_entry("src/main.rs", "fn main() {}")]);
        assert_eq!(doc, "# src/main.rs\n\n```rs\nfn main() {}\n```\n");
    }

    #[test]
    fn extension_tag_defaults_to_txt() {
        let doc = render(&[text_entry("Makefile", "all:")]);
        assert!(doc.contains("```txt\n"));

        let doc = render(&[text_entry("notes.MD", "hi")]);
        assert!(doc.contains("```md\n"));
    }

    #[test]
    fn directory_and_binary_markers() {
        let entries = vec![
            Entry::Directory {
                path: PathBuf::from("src"),
                is_empty: false,
            },
            Entry::Directory {
                path: PathBuf::from("empty"),
                is_empty: true,
            },
            Entry::Binary {
                path: PathBuf::from("logo.png"),
            },
        ];
        let doc = render(&entries);
        assert!(doc.contains("# src\n\n```\n(Directory)\n```\n"));
        assert!(doc.contains("# empty\n\n```\n(Empty Directory)\n```\n"));
        assert!(doc.contains("# logo.png\n\n```\n(Binary File)\n```\n"));
    }

    #[test]
    fn headings_round_trip_in_order() {
        let entries = vec![
            text_entry("a.txt", "hello"),
            Entry::Binary {
                path: PathBuf::from("b.png"),
            },
            Entry::Directory {
                path: PathBuf::from("c"),
                is_empty: true,
            },
        ];
        let doc = render(&entries);

        let mut headings = Vec::new();
        let mut in_fence = false;
        for line in doc.lines() {
            if line.starts_with("```") {
                in_fence = !in_fence;
            } else if !in_fence {
                if let Some(path) = line.strip_prefix("# ") {
                    headings.push(path.to_string());
                }
            }
        }
        assert_eq!(headings, vec!["a.txt", "b.png", "c"]);
    }

    #[test]
    fn fences_outgrow_embedded_backticks() {
        let doc = render(&[text_entry("demo.md", "code:\n```rust\nlet x = 1;\n```\n")]);
        // The block fence must be four backticks so the embedded triple
        // fence stays inside the block
        assert!(doc.contains("````md\n"));
        assert!(doc.trim_end().ends_with("````"));
    }

    #[test]
    fn blocks_are_separated_by_blank_lines() {
        let doc = render(&[text_entry("a.txt", "one"), text_entry("b.txt", "two")]);
        assert!(doc.contains("```\n\n# b.txt\n"));
    }
}
