//! Segmentation pipeline: orchestrates both passes.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use sw_core::{Proportion, Result, SegmenterConfig, SubwordError};

use crate::corpus;
use crate::observer::{Stage, StageObserver, StageReport, TracingObserver};
use crate::pass1_syllable::SyllableSplitter;
use crate::pass2_character::CharacterSplitter;
use crate::reassembler::{self, Cleanup, Rewrites};
use crate::vocabulary::Vocabulary;

/// Segmentation output with statistics.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentationResult {
    pub output: String,
    /// Words in the input stream, placeholders included.
    pub word_count: usize,
    /// Distinct words seen by the first filter.
    pub vocabulary_size: usize,
    /// Words split into several chunks by pass 1.
    pub words_split: usize,
    /// Items in the flattened stream seen by the second filter.
    pub fragment_count: usize,
    /// Distinct items seen by the second filter.
    pub fragment_vocabulary_size: usize,
    /// Items decomposed by pass 2.
    pub tokens_char_split: usize,
}

impl SegmentationResult {
    /// Distinct output items with their counts.
    pub fn inventory(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for item in self.output.split_whitespace() {
            *counts.entry(item).or_insert(0) += 1;
        }
        counts
    }

    pub fn inventory_size(&self) -> usize {
        self.inventory().len()
    }
}

/// Two-pass subword segmentation pipeline.
pub struct SubwordPipeline {
    config: SegmenterConfig,
    word_retention: Proportion,
    subword_retention: Proportion,
    syllables: SyllableSplitter,
    characters: CharacterSplitter,
    cleanup: Cleanup,
    observer: Arc<dyn StageObserver>,
}

impl SubwordPipeline {
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            word_retention: config.word_proportion()?,
            subword_retention: config.subword_proportion()?,
            syllables: SyllableSplitter::from_config(&config),
            characters: CharacterSplitter::from_config(&config),
            cleanup: Cleanup::new(&config.end_of_line)?,
            observer: Arc::new(TracingObserver),
            config,
        })
    }

    pub fn with_retention(w: f64, s: f64) -> Result<Self> {
        Self::new(SegmenterConfig::new(w, s))
    }

    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    fn report(&self, stage: Stage, items: usize, started: Instant) {
        self.observer.on_stage(&StageReport { stage, items, elapsed: started.elapsed() });
    }

    /// Segment an ordered word stream. Line breaks must already be present
    /// as end-of-line placeholders.
    pub fn segment<S: AsRef<str>>(&self, words: &[S]) -> Result<SegmentationResult> {
        if words.is_empty() {
            return Err(SubwordError::EmptyCorpus);
        }

        // Pass 1: keep the top w of the word vocabulary, syllable-split the rest.
        let started = Instant::now();
        let word_vocab = Vocabulary::from_words(words);
        let word_partition = word_vocab.partition(self.word_retention);
        self.report(Stage::WordFilter, word_vocab.len(), started);

        let started = Instant::now();
        let split = self.syllables.split_all(&word_partition.infrequent_words());
        let first_rewrites: Rewrites = split
            .marked
            .iter()
            .map(|&pos| (word_partition.infrequent[pos].0, split.words[pos].clone()))
            .collect();
        self.report(Stage::SyllableSplit, first_rewrites.len(), started);

        let started = Instant::now();
        let fragments = reassembler::flatten(&reassembler::substitute(&word_vocab, &first_rewrites));
        self.report(Stage::Flatten, fragments.len(), started);

        // Pass 2: keep the top s of the fragment vocabulary, character-split the rest.
        let started = Instant::now();
        let fragment_vocab = Vocabulary::from_words(&fragments);
        let fragment_partition = fragment_vocab.partition(self.subword_retention);
        self.report(Stage::SubwordFilter, fragment_vocab.len(), started);

        let started = Instant::now();
        let decomposed = self.characters.split_all(&fragment_partition.infrequent_words());
        let second_rewrites: Rewrites = fragment_partition
            .infrequent
            .iter()
            .map(|(index, _)| *index)
            .zip(decomposed)
            .filter(|(index, rewritten)| fragment_vocab.word(*index) != Some(rewritten.as_str()))
            .collect();
        self.report(Stage::CharacterSplit, second_rewrites.len(), started);

        let started = Instant::now();
        let joined = reassembler::join(&reassembler::substitute(&fragment_vocab, &second_rewrites));
        let output = self.cleanup.apply(&joined);
        self.report(Stage::Reassembly, output.len(), started);

        Ok(SegmentationResult {
            output,
            word_count: words.len(),
            vocabulary_size: word_vocab.len(),
            words_split: split.marked.len(),
            fragment_count: fragments.len(),
            fragment_vocabulary_size: fragment_vocab.len(),
            tokens_char_split: second_rewrites.len(),
        })
    }

    /// Segment raw text, marking every line break with the placeholder.
    pub fn segment_text(&self, text: &str) -> Result<SegmentationResult> {
        let words = corpus::tokenize_lines(text, &self.config.end_of_line);
        self.segment(&words)
    }

    pub fn segment_file(&self, path: impl AsRef<Path>) -> Result<SegmentationResult> {
        let text = corpus::read_corpus(path)?;
        self.segment_text(&text)
    }
}
