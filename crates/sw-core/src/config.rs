use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SubwordError};
use crate::types::{Proportion, CONTINUATION, DEFAULT_END_OF_LINE, DEFAULT_VOWELS, TERMINAL};

/// Parameters of a two-pass subword segmentation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Pass-1 retention proportion (`w`).
    pub word_retention: f64,
    /// Pass-2 retention proportion (`s`).
    pub subword_retention: f64,
    /// Token standing in for a line break.
    pub end_of_line: String,
    /// Characters that close a syllable chunk in pass 1.
    pub vowels: Vec<char>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            word_retention: 0.2,
            subword_retention: 1.0,
            end_of_line: DEFAULT_END_OF_LINE.into(),
            vowels: DEFAULT_VOWELS.to_vec(),
        }
    }
}

impl SegmenterConfig {
    pub fn new(word_retention: f64, subword_retention: f64) -> Self {
        Self { word_retention, subword_retention, ..Self::default() }
    }

    pub fn with_word_retention(mut self, w: f64) -> Self {
        self.word_retention = w;
        self
    }

    pub fn with_subword_retention(mut self, s: f64) -> Self {
        self.subword_retention = s;
        self
    }

    pub fn with_end_of_line(mut self, placeholder: impl Into<String>) -> Self {
        self.end_of_line = placeholder.into();
        self
    }

    pub fn with_vowels(mut self, vowels: impl IntoIterator<Item = char>) -> Self {
        self.vowels = vowels.into_iter().collect();
        self
    }

    pub fn word_proportion(&self) -> Result<Proportion> {
        Proportion::new("w", self.word_retention)
    }

    pub fn subword_proportion(&self) -> Result<Proportion> {
        Proportion::new("s", self.subword_retention)
    }

    pub fn is_vowel(&self, c: char) -> bool {
        self.vowels.contains(&c)
    }

    /// Check every field; the first problem found is returned.
    pub fn validate(&self) -> Result<()> {
        self.word_proportion()?;
        self.subword_proportion()?;
        if self.end_of_line.is_empty() {
            return Err(SubwordError::InvalidConfig("end_of_line placeholder is empty".into()));
        }
        if self.end_of_line.chars().any(char::is_whitespace) {
            return Err(SubwordError::InvalidConfig(format!(
                "end_of_line placeholder {:?} contains whitespace",
                self.end_of_line
            )));
        }
        if self.end_of_line.ends_with(&[CONTINUATION, TERMINAL][..]) {
            return Err(SubwordError::InvalidConfig(format!(
                "end_of_line placeholder {:?} ends with a fragment marker",
                self.end_of_line
            )));
        }
        if self.vowels.is_empty() {
            return Err(SubwordError::InvalidConfig("vowel set is empty".into()));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading segmenter config");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
