//! Corpus tokenization and loading.

use std::path::Path;
use sw_core::{Result, SubwordError};

/// Whitespace-delimited words of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Like [`tokenize`], with `end_of_line` appended after every line that
/// ends in `\n`. An unterminated last line gets no placeholder.
pub fn tokenize_lines(text: &str, end_of_line: &str) -> Vec<String> {
    let mut words = Vec::new();
    for line in text.split_inclusive('\n') {
        words.extend(line.split_whitespace().map(str::to_string));
        if line.ends_with('\n') {
            words.push(end_of_line.to_string());
        }
    }
    words
}

/// Read a UTF-8 corpus file.
pub fn read_corpus(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| SubwordError::Input(format!("cannot read corpus {}: {e}", path.display())))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| SubwordError::Input(format!("corpus {} is not UTF-8: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "corpus read");
    Ok(text)
}
