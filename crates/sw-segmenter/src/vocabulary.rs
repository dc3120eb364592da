//! Vocabulary filter: distinct words, counts, inverse mapping, frequency partition.

use std::collections::HashMap;
use sw_core::{Proportion, Result};

/// One distinct word and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabEntry {
    pub word: String,
    pub count: usize,
}

/// Distinct words of a corpus.
///
/// Entries are stored in ascending lexicographic order; an entry's position in
/// that order is its vocabulary index. `ranking` lists the same indices by
/// count descending, ties broken by the word ascending. `inverse[i]` is the
/// vocabulary index of corpus position `i`.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
    ranking: Vec<usize>,
    inverse: Vec<usize>,
}

impl Vocabulary {
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for word in words {
            *counts.entry(word.as_ref()).or_insert(0) += 1;
        }

        let mut distinct: Vec<(&str, usize)> = counts.into_iter().collect();
        distinct.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let index: HashMap<&str, usize> = distinct
            .iter()
            .enumerate()
            .map(|(i, (word, _))| (*word, i))
            .collect();
        let inverse = words.iter().map(|w| index[w.as_ref()]).collect();

        let entries: Vec<VocabEntry> = distinct
            .into_iter()
            .map(|(word, count)| VocabEntry { word: word.to_string(), count })
            .collect();

        let mut ranking: Vec<usize> = (0..entries.len()).collect();
        ranking.sort_by(|&a, &b| {
            entries[b].count
                .cmp(&entries[a].count)
                .then_with(|| entries[a].word.cmp(&entries[b].word))
        });

        Self { entries, ranking, inverse }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of corpus positions the vocabulary was built from.
    pub fn corpus_len(&self) -> usize {
        self.inverse.len()
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.word.as_str())
    }

    pub fn count(&self, index: usize) -> Option<usize> {
        self.entries.get(index).map(|e| e.count)
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.entries.binary_search_by(|e| e.word.as_str().cmp(word)).ok()
    }

    /// Vocabulary indices from most to least frequent.
    pub fn ranking(&self) -> &[usize] {
        &self.ranking
    }

    /// Zero-based frequency rank of a vocabulary index.
    pub fn rank(&self, index: usize) -> Option<usize> {
        self.ranking.iter().position(|&i| i == index)
    }

    pub fn inverse(&self) -> &[usize] {
        &self.inverse
    }

    /// Word at a corpus position.
    pub fn reconstruct(&self, position: usize) -> Option<&str> {
        self.inverse.get(position).and_then(|&i| self.word(i))
    }

    /// The whole corpus, rebuilt from entries and the inverse mapping.
    pub fn corpus(&self) -> impl Iterator<Item = &str> + '_ {
        self.inverse.iter().map(move |&i| self.entries[i].word.as_str())
    }

    /// Split into the `round(p * len)` most frequent entries and the rest.
    pub fn partition(&self, proportion: Proportion) -> FrequencyPartition {
        let keep = proportion.retained(self.len());
        let pair = |&i: &usize| (i, self.entries[i].word.clone());
        FrequencyPartition {
            frequent: self.ranking[..keep].iter().map(pair).collect(),
            infrequent: self.ranking[keep..].iter().map(pair).collect(),
        }
    }
}

/// Frequent and infrequent words, each paired with its vocabulary index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyPartition {
    pub frequent: Vec<(usize, String)>,
    pub infrequent: Vec<(usize, String)>,
}

impl FrequencyPartition {
    pub fn len(&self) -> usize {
        self.frequent.len() + self.infrequent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn infrequent_words(&self) -> Vec<&str> {
        self.infrequent.iter().map(|(_, w)| w.as_str()).collect()
    }
}

/// Result of one filtering round.
#[derive(Debug, Clone)]
pub struct FilteredVocabulary {
    pub vocabulary: Vocabulary,
    pub partition: FrequencyPartition,
}

/// Build the vocabulary of `words` and keep the top `proportion` of it.
///
/// Fails with [`sw_core::SubwordError::InvalidProportion`] when `proportion`
/// is outside `(0, 1]`.
pub fn filter_by_frequency<S: AsRef<str>>(words: &[S], proportion: f64) -> Result<FilteredVocabulary> {
    let proportion = Proportion::new("proportion", proportion)?;
    let vocabulary = Vocabulary::from_words(words);
    let partition = vocabulary.partition(proportion);
    tracing::debug!(
        unique = vocabulary.len(),
        positions = vocabulary.corpus_len(),
        frequent = partition.frequent.len(),
        "vocabulary filtered"
    );
    Ok(FilteredVocabulary { vocabulary, partition })
}
