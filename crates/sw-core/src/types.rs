use serde::{Deserialize, Serialize};

use crate::error::{Result, SubwordError};

/// Trailing symbol on a fragment whose word continues in the next fragment.
pub const CONTINUATION: char = '+';
/// Trailing symbol on the last fragment of a word.
pub const TERMINAL: char = ':';
/// Separator between fragments and words in joined text.
pub const SEPARATOR: char = ' ';

pub const DEFAULT_END_OF_LINE: &str = "<eos>";
/// Plain and umlaut vowels of German.
pub const DEFAULT_VOWELS: [char; 8] = ['a', 'e', 'i', 'o', 'u', 'ä', 'ö', 'ü'];

/// Fragment marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Continuation,
    Terminal,
}

impl Marker {
    pub const fn as_char(self) -> char {
        match self {
            Self::Continuation => CONTINUATION,
            Self::Terminal => TERMINAL,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            CONTINUATION => Some(Self::Continuation),
            TERMINAL => Some(Self::Terminal),
            _ => None,
        }
    }

    /// Marker closing `fragment`, if any.
    pub fn trailing(fragment: &str) -> Option<Self> {
        fragment.chars().last().and_then(Self::from_char)
    }
}

/// Fraction of a vocabulary, ranked by frequency, kept verbatim in a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proportion(f64);

impl Proportion {
    pub const FULL: Proportion = Proportion(1.0);

    /// Validate `value` as a proportion in `(0, 1]`. `name` labels the error.
    pub fn new(name: &str, value: f64) -> Result<Self> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(SubwordError::InvalidProportion { name: name.to_string(), value })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Number of entries kept out of `total`: `round(p * total)`, ties to even.
    pub fn retained(self, total: usize) -> usize {
        let kept = (self.0 * total as f64).round_ties_even() as usize;
        kept.min(total)
    }
}

impl Default for Proportion {
    fn default() -> Self {
        Self::FULL
    }
}
