//! Reassembler: substitution by inverse index, re-tokenization between
//! passes, final text cleanup, and the inverse transform.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use sw_core::types::{CONTINUATION, SEPARATOR, TERMINAL};
use sw_core::Result;

use crate::vocabulary::Vocabulary;

/// Vocabulary index → rewritten form.
pub type Rewrites = HashMap<usize, String>;

static RE_ARTIFACT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" \+: ").unwrap());
static RE_LETTER_TERMINAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ([a-z]): ").unwrap());

/// Rebuild the corpus, taking each position's word from `rewrites` when the
/// vocabulary entry was rewritten.
pub fn substitute(vocabulary: &Vocabulary, rewrites: &Rewrites) -> Vec<String> {
    vocabulary
        .inverse()
        .iter()
        .map(|index| match rewrites.get(index) {
            Some(rewritten) => rewritten.clone(),
            None => vocabulary.word(*index).unwrap_or_default().to_string(),
        })
        .collect()
}

/// Re-tokenize substituted words so joined fragments become separate items.
pub fn flatten<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words
        .iter()
        .flat_map(|w| w.as_ref().split_whitespace())
        .map(str::to_string)
        .collect()
}

pub fn join<S: AsRef<str>>(words: &[S]) -> String {
    let mut out = String::new();
    for (i, w) in words.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(w.as_ref());
    }
    out
}

fn replace_to_fixpoint(re: &Regex, text: &str, replacement: &str) -> String {
    let mut current = text.to_string();
    while re.is_match(&current) {
        current = re.replace_all(&current, replacement).into_owned();
    }
    current
}

/// Collapse standalone `+:` tokens to a single space.
pub fn collapse_artifacts(text: &str) -> String {
    replace_to_fixpoint(&RE_ARTIFACT, text, " ")
}

/// Turn `:` after a space-preceded lowercase letter into `+`.
pub fn repair_letter_terminals(text: &str) -> String {
    replace_to_fixpoint(&RE_LETTER_TERMINAL, text, " ${1}+ ")
}

/// Final rewrites applied to joined output, in order: artifacts, letter
/// terminals, line breaks. Idempotent.
#[derive(Debug, Clone)]
pub struct Cleanup {
    end_of_line: Regex,
}

impl Cleanup {
    pub fn new(end_of_line: &str) -> Result<Self> {
        let pattern = format!(" ?{} ?", regex::escape(end_of_line));
        let end_of_line = Regex::new(&pattern).map_err(anyhow::Error::from)?;
        Ok(Self { end_of_line })
    }

    /// Replace each placeholder, with one optional space on either side, by `\n`.
    pub fn restore_line_breaks(&self, text: &str) -> String {
        self.end_of_line.replace_all(text, "\n").into_owned()
    }

    pub fn apply(&self, text: &str) -> String {
        let text = collapse_artifacts(text);
        let text = repair_letter_terminals(&text);
        self.restore_line_breaks(&text)
    }
}

/// Concatenate a word's fragments with their markers removed.
pub fn strip_markers(fragments: &str) -> String {
    fragments
        .split_whitespace()
        .map(|f| f.strip_suffix(&[CONTINUATION, TERMINAL][..]).unwrap_or(f))
        .collect()
}

/// Inverse of segmentation: glue `+` fragments onto what follows, close
/// words at `:`, keep unmarked tokens whole. Line breaks are preserved.
pub fn restore(text: &str) -> String {
    text.split('\n').map(restore_line).collect::<Vec<_>>().join("\n")
}

fn restore_line(line: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut pending = String::new();
    for token in line.split_whitespace() {
        if let Some(body) = token.strip_suffix(CONTINUATION) {
            pending.push_str(body);
            continue;
        }
        let body = token.strip_suffix(TERMINAL).unwrap_or(token);
        pending.push_str(body);
        words.push(std::mem::take(&mut pending));
    }
    if !pending.is_empty() {
        words.push(pending);
    }
    join(&words)
}
