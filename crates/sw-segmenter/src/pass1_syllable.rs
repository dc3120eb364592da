//! Pass 1: syllable split: vowel-delimited chunks for infrequent words.

use sw_core::types::{CONTINUATION, SEPARATOR, TERMINAL};
use sw_core::SegmenterConfig;

/// Chunks of this many characters or more are cut after their first two.
const LONG_CHUNK: usize = 4;

/// Rewritten words, aligned with the input, plus the input positions that
/// were split into more than one chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyllableSplit {
    pub words: Vec<String>,
    pub marked: Vec<usize>,
}

/// Vowel-boundary splitter.
#[derive(Debug, Clone)]
pub struct SyllableSplitter {
    vowels: Vec<char>,
    end_of_line: String,
}

impl SyllableSplitter {
    pub fn new(vowels: impl IntoIterator<Item = char>, end_of_line: impl Into<String>) -> Self {
        Self { vowels: vowels.into_iter().collect(), end_of_line: end_of_line.into() }
    }

    pub fn from_config(config: &SegmenterConfig) -> Self {
        Self::new(config.vowels.iter().copied(), config.end_of_line.clone())
    }

    fn is_vowel(&self, c: char) -> bool {
        self.vowels.contains(&c)
    }

    /// Cut `word` after every vowel that ends a buffer of two or more
    /// characters. A single trailing character joins the previous chunk.
    pub fn chunks(&self, word: &str) -> Vec<String> {
        let total = word.chars().count();
        if total <= 1 || word == self.end_of_line {
            return vec![word.to_string()];
        }

        let mut chunks: Vec<String> = Vec::new();
        let mut buffer = String::new();
        let mut buffered = 0;
        for (i, c) in word.chars().enumerate() {
            buffer.push(c);
            buffered += 1;
            if buffered > 1 && self.is_vowel(c) {
                chunks.push(std::mem::take(&mut buffer));
                buffered = 0;
            } else if i + 1 == total {
                let rest = std::mem::take(&mut buffer);
                if buffered == 1 && !chunks.is_empty() {
                    let last = chunks.len() - 1;
                    chunks[last].push_str(&rest);
                } else {
                    chunks.push(rest);
                }
            }
        }
        split_long_chunks(chunks)
    }

    /// Marked form of `word`, or `None` when it stays a single chunk.
    pub fn split_word(&self, word: &str) -> Option<String> {
        let chunks = self.chunks(word);
        (chunks.len() > 1).then(|| mark_chunks(&chunks))
    }

    pub fn split_all<S: AsRef<str>>(&self, words: &[S]) -> SyllableSplit {
        let mut split = SyllableSplit { words: Vec::with_capacity(words.len()), marked: Vec::new() };
        for (pos, word) in words.iter().enumerate() {
            match self.split_word(word.as_ref()) {
                Some(marked) => {
                    split.words.push(marked);
                    split.marked.push(pos);
                }
                None => split.words.push(word.as_ref().to_string()),
            }
        }
        tracing::debug!(words = words.len(), marked = split.marked.len(), "syllable split");
        split
    }
}

/// Replace every chunk of four or more characters with its first two
/// characters and the remainder.
pub fn split_long_chunks(chunks: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(chunks.len() * 2);
    for chunk in chunks {
        if chunk.chars().count() >= LONG_CHUNK {
            let cut = chunk.char_indices().nth(2).map_or(chunk.len(), |(i, _)| i);
            out.push(chunk[..cut].to_string());
            out.push(chunk[cut..].to_string());
        } else {
            out.push(chunk);
        }
    }
    out
}

/// Join chunks as `c1+ c2+ ... cn:`. Markers go by position, so repeated
/// chunks are marked like any other.
pub fn mark_chunks<S: AsRef<str>>(chunks: &[S]) -> String {
    let mut out = String::new();
    let last = chunks.len().saturating_sub(1);
    for (i, chunk) in chunks.iter().enumerate() {
        out.push_str(chunk.as_ref());
        if i < last {
            out.push(CONTINUATION);
            out.push(SEPARATOR);
        } else {
            out.push(TERMINAL);
        }
    }
    out
}
