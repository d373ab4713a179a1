/*!
 * Text/binary classification for files
 *
 * Decision order, first match wins:
 *   1. extension on the text allow-list -> text
 *   2. extension on the binary deny-list -> binary
 *   3. content inspection: empty -> text; known magic number -> binary;
 *      any null byte -> binary; control-character ratio over the
 *      threshold -> binary; otherwise text
 *   4. any read error -> binary
 *
 * Extension checks are authoritative and never read the file. Content
 * errors fail safe: unreadable content is never rendered as text.
 */

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::config::Config;
use crate::types::Classification;

/// Extensions always treated as text, regardless of content
pub static DEFAULT_TEXT_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Source code
        "rs", "ts", "tsx", "js", "jsx", "py", "rb", "go", "java", "c", "h", "cpp", "hpp", "cs",
        "swift", "kt", "lua", "php", "pl", "scala", "dart",
        // Shell and build
        "sh", "bash", "zsh", "bat", "ps1", "cmake", "mk", "gradle",
        // Markup and data
        "md", "txt", "html", "htm", "css", "scss", "less", "xml", "json", "yaml", "yml", "toml",
        "ini", "csv", "tsv", "sql", "tex", "rst",
        // Config-ish
        "env", "properties", "conf", "lock", "editorconfig", "gitignore",
    ]
});

/// Extensions always treated as binary, regardless of content
pub static DEFAULT_BINARY_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Executables and objects
        "exe", "dll", "so", "dylib", "bin", "obj", "o", "a", "class",
        // Images
        "jpg", "jpeg", "png", "gif", "bmp", "ico", "svg", "webp",
        // Archives
        "zip", "rar", "7z", "tar", "gz", "tgz", "bz2", "xz", "jar", "war",
        // Documents and databases
        "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "db", "sqlite", "sqlite3",
        // Media
        "mp3", "mp4", "wav", "ogg", "avi", "mov", "flac", "woff", "woff2", "ttf", "otf", "eot",
    ]
});

/// Leading-byte signatures of common binary formats
const MAGIC_SIGNATURES: &[&[u8]] = &[
    &[0xFF, 0xD8, 0xFF],       // JPEG
    &[0x89, 0x50, 0x4E, 0x47], // PNG
    &[0x47, 0x49, 0x46],       // GIF
    &[0x50, 0x4B, 0x03, 0x04], // ZIP / JAR / OOXML
    &[0x25, 0x50, 0x44, 0x46], // PDF
    &[0x7F, 0x45, 0x4C, 0x46], // ELF
    &[0xD0, 0xCF, 0x11, 0xE0], // legacy MS Office
];

/// Classifier for a single operation; the config never changes mid-walk
pub struct BinaryClassifier<'a> {
    config: &'a Config,
}

impl<'a> BinaryClassifier<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Decide whether the file at `path` is text or binary
    pub fn classify(&self, path: &Path) -> Classification {
        if let Some(ext) = extension_of(path) {
            if self.config.known_text_extensions.contains(&ext) {
                return Classification::Text;
            }
            if self.config.known_binary_extensions.contains(&ext) {
                return Classification::Binary;
            }
        }

        match fs::read(path) {
            Ok(bytes) => self.classify_bytes(&bytes),
            Err(_) => Classification::Binary,
        }
    }

    /// Content heuristics for files with unrecognized extensions
    fn classify_bytes(&self, bytes: &[u8]) -> Classification {
        if bytes.is_empty() {
            return Classification::Text;
        }

        if MAGIC_SIGNATURES.iter().any(|sig| bytes.starts_with(sig)) {
            return Classification::Binary;
        }

        if self.config.null_byte_check && bytes.contains(&0x00) {
            return Classification::Binary;
        }

        if self.config.control_char_check {
            let control_count = bytes.iter().filter(|&&b| is_control_byte(b)).count();
            let ratio = control_count as f64 / bytes.len() as f64;
            if ratio > self.config.control_char_ratio {
                return Classification::Binary;
            }
        }

        Classification::Text
    }
}

/// Control bytes counted by the ratio check. TAB, LF and CR are ordinary
/// text; the C1 range 0x7F-0x9F counts as control.
fn is_control_byte(b: u8) -> bool {
    (b < 32 && b != 9 && b != 10 && b != 13) || (0x7F..=0x9F).contains(&b)
}

/// Lowercased extension without the leading dot, if any
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::*;

    fn test_config() -> Config {
        Config::for_targets(vec![PathBuf::from(".")])
    }

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn text_extension_wins_over_content() {
        let dir = tempdir().unwrap();
        let config = test_config();
        let classifier = BinaryClassifier::new(&config);

        // Null bytes would normally mean binary, but .txt is on the allow-list
        let path = write_file(dir.path(), "data.txt", &[0x00, 0x01, 0x02]);
        assert_eq!(classifier.classify(&path), Classification::Text);
    }

    #[test]
    fn binary_extension_wins_over_content() {
        let dir = tempdir().unwrap();
        let config = test_config();
        let classifier = BinaryClassifier::new(&config);

        let path = write_file(dir.path(), "image.png", b"just plain text");
        assert_eq!(classifier.classify(&path), Classification::Binary);
    }

    #[test]
    fn png_magic_is_binary() {
        let dir = tempdir().unwrap();
        let config = test_config();
        let classifier = BinaryClassifier::new(&config);

        let path = write_file(dir.path(), "noext", &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]);
        assert_eq!(classifier.classify(&path), Classification::Binary);
    }

    #[test]
    fn empty_unknown_file_is_text() {
        let dir = tempdir().unwrap();
        let config = test_config();
        let classifier = BinaryClassifier::new(&config);

        let path = write_file(dir.path(), "empty.unknown-ext", b"");
        assert_eq!(classifier.classify(&path), Classification::Text);
    }

    #[test]
    fn null_byte_is_binary() {
        let dir = tempdir().unwrap();
        let config = test_config();
        let classifier = BinaryClassifier::new(&config);

        let path = write_file(dir.path(), "blob", b"hello\x00world");
        assert_eq!(classifier.classify(&path), Classification::Binary);
    }

    #[test]
    fn control_char_ratio_is_binary() {
        let dir = tempdir().unwrap();
        let config = test_config();
        let classifier = BinaryClassifier::new(&config);

        // Half the bytes are 0x01: ratio 0.5 > default threshold 0.3
        let path = write_file(dir.path(), "noisy", &[0x01, b'a', 0x01, b'b', 0x01, b'c']);
        assert_eq!(classifier.classify(&path), Classification::Binary);

        // Ordinary text with tabs and newlines stays text
        let path = write_file(dir.path(), "plain", b"a\tb\nc\r\nd");
        assert_eq!(classifier.classify(&path), Classification::Text);
    }

    #[test]
    fn missing_file_is_binary() {
        let dir = tempdir().unwrap();
        let config = test_config();
        let classifier = BinaryClassifier::new(&config);

        assert_eq!(
            classifier.classify(&dir.path().join("does-not-exist")),
            Classification::Binary
        );
    }

    #[test]
    fn checks_can_be_disabled() {
        let dir = tempdir().unwrap();
        let mut config = test_config();
        config.null_byte_check = false;
        config.control_char_check = false;
        let classifier = BinaryClassifier::new(&config);

        let path = write_file(dir.path(), "blob", b"hello\x00world");
        assert_eq!(classifier.classify(&path), Classification::Text);
    }
}
