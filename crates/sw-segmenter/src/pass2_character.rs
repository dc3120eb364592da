//! Pass 2: character split: single-character units for tokens still rare
//! after the second frequency filter.

use sw_core::types::{CONTINUATION, SEPARATOR, TERMINAL};
use sw_core::SegmenterConfig;

#[derive(Debug, Clone)]
pub struct CharacterSplitter {
    end_of_line: String,
}

impl CharacterSplitter {
    pub fn new(end_of_line: impl Into<String>) -> Self {
        Self { end_of_line: end_of_line.into() }
    }

    pub fn from_config(config: &SegmenterConfig) -> Self {
        Self::new(config.end_of_line.clone())
    }

    /// Decompose `token` into `c+ c+ ... c:`.
    ///
    /// A trailing `+` is dropped first. A character right after an embedded
    /// `+` is copied as-is, and a character right before a `:` takes that
    /// `:` as its marker. A final `+` becomes `:`.
    pub fn split_token(&self, token: &str) -> String {
        if token == self.end_of_line {
            return token.to_string();
        }
        let body = token.strip_suffix(CONTINUATION).unwrap_or(token);
        let chars: Vec<char> = body.chars().collect();
        let Some(last) = chars.len().checked_sub(1) else {
            return token.to_string();
        };

        let mut out = String::with_capacity(body.len() * 3);
        for (i, &c) in chars.iter().enumerate() {
            if i == last {
                match c {
                    TERMINAL | CONTINUATION => out.push(TERMINAL),
                    _ => {
                        out.push(c);
                        out.push(TERMINAL);
                    }
                }
            } else if i > 0 && chars[i - 1] == CONTINUATION {
                out.push(c);
            } else if chars[i + 1] == TERMINAL {
                out.push(c);
            } else if c != CONTINUATION {
                out.push(c);
                out.push(CONTINUATION);
                out.push(SEPARATOR);
            }
        }
        if out.ends_with(SEPARATOR) {
            out.pop();
        }
        out
    }

    pub fn split_all<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        let out: Vec<String> = tokens.iter().map(|t| self.split_token(t.as_ref())).collect();
        tracing::debug!(tokens = tokens.len(), "character split");
        out
    }
}
