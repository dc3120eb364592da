//! Two-pass frequency-driven subword segmentation.
//!
//! Stages:
//! 1. Vocabulary filter: keep the most frequent `w` of the words verbatim
//! 2. Syllable split: vowel-delimited chunks for the remaining words
//! 3. Flatten + second vocabulary filter: keep the most frequent `s` of the fragments
//! 4. Character split: single-character units for what is still rare
//! 5. Reassembly: substitution, marker cleanup, line-break restoration

pub mod corpus;
pub mod observer;
pub mod pass1_syllable;
pub mod pass2_character;
pub mod pipeline;
pub mod reassembler;
pub mod vocabulary;

pub use observer::{NullObserver, RecordingObserver, Stage, StageObserver, StageReport, TracingObserver};
pub use pass1_syllable::{SyllableSplit, SyllableSplitter};
pub use pass2_character::CharacterSplitter;
pub use pipeline::{SegmentationResult, SubwordPipeline};
pub use reassembler::{Cleanup, Rewrites};
pub use vocabulary::{filter_by_frequency, FilteredVocabulary, FrequencyPartition, Vocabulary};

#[cfg(test)]
mod tests;
