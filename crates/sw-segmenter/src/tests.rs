use crate::*;
use crate::corpus;
use crate::pass1_syllable::{mark_chunks, split_long_chunks};
use crate::reassembler::{self, collapse_artifacts, repair_letter_terminals, restore, strip_markers};
use sw_core::types::DEFAULT_VOWELS;
use sw_core::{Proportion, SubwordError};

fn syllables() -> SyllableSplitter {
    SyllableSplitter::new(DEFAULT_VOWELS, "<eos>")
}

fn characters() -> CharacterSplitter {
    CharacterSplitter::new("<eos>")
}

fn words(text: &str) -> Vec<String> {
    corpus::tokenize(text)
}

// ========== Vocabulary ==========

#[test]
fn test_vocab_counts_and_inverse() {
    let vocab = Vocabulary::from_words(&words("b a b c a b"));
    assert_eq!(vocab.len(), 3);
    assert_eq!(vocab.corpus_len(), 6);
    assert_eq!(vocab.word(0), Some("a"));
    assert_eq!(vocab.count(0), Some(2));
    assert_eq!(vocab.count(1), Some(3));
    assert_eq!(vocab.inverse(), &[1, 0, 1, 2, 0, 1]);
}

#[test]
fn test_vocab_ranking() {
    let vocab = Vocabulary::from_words(&words("b a b c a b"));
    let ranked: Vec<&str> = vocab.ranking().iter().map(|&i| vocab.word(i).unwrap()).collect();
    assert_eq!(ranked, vec!["b", "a", "c"]);
    assert_eq!(vocab.rank(vocab.index_of("b").unwrap()), Some(0));
    assert_eq!(vocab.rank(vocab.index_of("c").unwrap()), Some(2));
}

#[test]
fn test_vocab_reconstruct() {
    let input = words("der hund der katze");
    let vocab = Vocabulary::from_words(&input);
    assert_eq!(vocab.reconstruct(1), Some("hund"));
    assert_eq!(vocab.reconstruct(4), None);
    let rebuilt: Vec<&str> = vocab.corpus().collect();
    assert_eq!(rebuilt, input);
}

#[test]
fn test_vocab_index_of() {
    let vocab = Vocabulary::from_words(&words("zeta alpha mid"));
    assert_eq!(vocab.index_of("alpha"), Some(0));
    assert_eq!(vocab.index_of("zeta"), Some(2));
    assert_eq!(vocab.index_of("missing"), None);
}

#[test]
fn test_vocab_tie_break_lexicographic() {
    let vocab = Vocabulary::from_words(&words("zeta alpha mid mid"));
    let part = vocab.partition(Proportion::new("w", 0.5).unwrap());
    // 3 entries * 0.5 = 1.5 -> 2
    let frequent: Vec<&str> = part.frequent.iter().map(|(_, w)| w.as_str()).collect();
    assert_eq!(frequent, vec!["mid", "alpha"]);
    assert_eq!(part.infrequent_words(), vec!["zeta"]);
}

#[test]
fn test_vocab_tie_break_independent_of_input_order() {
    let a = Vocabulary::from_words(&words("q p r s p"));
    let b = Vocabulary::from_words(&words("s r p q p"));
    let ranked = |v: &Vocabulary| -> Vec<String> {
        v.ranking().iter().map(|&i| v.word(i).unwrap().to_string()).collect()
    };
    assert_eq!(ranked(&a), ranked(&b));
    assert_eq!(ranked(&a), vec!["p", "q", "r", "s"]);
}

#[test]
fn test_partition_half_to_even() {
    let vocab = Vocabulary::from_words(&words("a b c d e"));
    let part = vocab.partition(Proportion::new("w", 0.5).unwrap());
    assert_eq!(part.frequent.len(), 2);
    assert_eq!(part.infrequent.len(), 3);
}

#[test]
fn test_partition_full() {
    let vocab = Vocabulary::from_words(&words("a b b c"));
    let part = vocab.partition(Proportion::FULL);
    assert_eq!(part.frequent.len(), vocab.len());
    assert!(part.infrequent.is_empty());
}

#[test]
fn test_partition_conservation() {
    let vocab = Vocabulary::from_words(&words("eins zwei drei zwei vier fünf fünf fünf sechs"));
    for p in [0.1, 0.3, 0.5, 0.7, 1.0] {
        let part = vocab.partition(Proportion::new("w", p).unwrap());
        assert_eq!(part.len(), vocab.len());
        let mut indices: Vec<usize> = part.frequent.iter().chain(&part.infrequent).map(|(i, _)| *i).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), vocab.len());
        for (i, w) in part.frequent.iter().chain(&part.infrequent) {
            assert_eq!(vocab.word(*i), Some(w.as_str()));
        }
    }
}

#[test]
fn test_partition_empty() {
    let vocab = Vocabulary::from_words::<String>(&[]);
    assert!(vocab.is_empty());
    assert!(vocab.partition(Proportion::new("w", 0.5).unwrap()).is_empty());
}

#[test]
fn test_filter_rejects_bad_proportion() {
    let input = words("a b");
    assert!(matches!(filter_by_frequency(&input, 0.0), Err(SubwordError::InvalidProportion { .. })));
    assert!(matches!(filter_by_frequency(&input, 1.5), Err(SubwordError::InvalidProportion { .. })));
    assert!(filter_by_frequency(&input, f64::NAN).is_err());
}

#[test]
fn test_filter_outcome() {
    let outcome = filter_by_frequency(&words("x y y z z z"), 0.34).unwrap();
    assert_eq!(outcome.vocabulary.len(), 3);
    assert_eq!(outcome.partition.frequent, vec![(2, "z".to_string())]);
    assert_eq!(outcome.vocabulary.inverse().len(), 6);
}

// ========== Pass 1: syllable split ==========

#[test]
fn test_p1_single_char() {
    assert_eq!(syllables().chunks("a"), vec!["a"]);
    assert_eq!(syllables().split_word("a"), None);
    assert_eq!(syllables().split_word("x"), None);
}

#[test]
fn test_p1_vowel_chunks() {
    assert_eq!(syllables().chunks("lief"), vec!["li", "ef"]);
    assert_eq!(syllables().chunks("bellt"), vec!["be", "llt"]);
    assert_eq!(syllables().chunks("hund"), vec!["hu", "nd"]);
}

#[test]
fn test_p1_trailing_char_merges() {
    assert_eq!(syllables().chunks("der"), vec!["der"]);
    assert_eq!(syllables().split_word("der"), None);
}

#[test]
fn test_p1_long_chunk_cut() {
    assert_eq!(syllables().chunks("schnell"), vec!["sc", "hne", "ll"]);
    assert_eq!(syllables().split_word("schnell").unwrap(), "sc+ hne+ ll:");
}

#[test]
fn test_p1_umlauts() {
    assert_eq!(syllables().chunks("straße"), vec!["st", "ra", "ße"]);
    assert_eq!(syllables().split_word("über").unwrap(), "üb+ er:");
}

#[test]
fn test_p1_uppercase_not_vowel() {
    assert_eq!(syllables().split_word("AUTO").unwrap(), "AU+ TO:");
}

#[test]
fn test_p1_repeated_chunks_marked_by_position() {
    assert_eq!(syllables().chunks("banana"), vec!["ba", "na", "na"]);
    assert_eq!(syllables().split_word("banana").unwrap(), "ba+ na+ na:");
    assert_eq!(mark_chunks(&["na", "na"]), "na+ na:");
}

#[test]
fn test_p1_two_letter_word_unchanged() {
    assert_eq!(syllables().split_word("ab"), None);
}

#[test]
fn test_p1_placeholder_untouched() {
    assert_eq!(syllables().split_word("<eos>"), None);
}

#[test]
fn test_p1_custom_vowels() {
    let splitter = SyllableSplitter::new(['y'], "<eos>");
    assert_eq!(splitter.split_word("xyxy").unwrap(), "xy+ xy:");
}

#[test]
fn test_p1_split_long_chunks() {
    let out = split_long_chunks(vec!["abcdef".into(), "xyz".into(), "äöüß".into()]);
    assert_eq!(out, vec!["ab", "cdef", "xyz", "äö", "üß"]);
}

#[test]
fn test_p1_split_all() {
    let split = syllables().split_all(&["a", "banana", "der"]);
    assert_eq!(split.words, vec!["a", "ba+ na+ na:", "der"]);
    assert_eq!(split.marked, vec![1]);
}

#[test]
fn test_p1_roundtrip() {
    for word in ["a", "ab", "der", "lief", "schnell", "bellt", "banana", "straße", "Donaudampfschiff", "übel"] {
        let marked = syllables().split_word(word).unwrap_or_else(|| word.to_string());
        assert_eq!(strip_markers(&marked), word, "word {word}");
    }
}

// ========== Pass 2: character split ==========

#[test]
fn test_p2_two_chars() {
    assert_eq!(characters().split_token("ab"), "a+ b:");
}

#[test]
fn test_p2_full_word() {
    assert_eq!(characters().split_token("hund"), "h+ u+ n+ d:");
    assert_eq!(characters().split_token("äb"), "ä+ b:");
}

#[test]
fn test_p2_single_char() {
    assert_eq!(characters().split_token("a"), "a:");
}

#[test]
fn test_p2_terminal_fragment() {
    assert_eq!(characters().split_token("na:"), "n+ a:");
    assert_eq!(characters().split_token("llt:"), "l+ l+ t:");
}

#[test]
fn test_p2_trailing_continuation_stripped() {
    assert_eq!(characters().split_token("ba+"), "b+ a:");
    assert_eq!(characters().split_token("x+"), "x:");
}

#[test]
fn test_p2_leftover_continuation_becomes_terminal() {
    assert_eq!(characters().split_token("++"), ":");
}

#[test]
fn test_p2_char_after_embedded_continuation_kept() {
    assert_eq!(characters().split_token("a+bc"), "a+ bc:");
}

#[test]
fn test_p2_degenerate_tokens() {
    assert_eq!(characters().split_token("+"), "+");
    assert_eq!(characters().split_token(":"), ":");
    assert_eq!(characters().split_token("+:"), "+:");
}

#[test]
fn test_p2_placeholder_untouched() {
    assert_eq!(characters().split_token("<eos>"), "<eos>");
}

#[test]
fn test_p2_roundtrip() {
    for token in ["ab", "hund", "na:", "ba+", "straße", "übel"] {
        let split = characters().split_token(token);
        let expected: String = token.trim_end_matches(&['+', ':'][..]).to_string();
        assert_eq!(strip_markers(&split), expected, "token {token}");
    }
}

#[test]
fn test_p2_split_all() {
    assert_eq!(characters().split_all(&["ab", "c"]), vec!["a+ b:", "c:"]);
}

// ========== Reassembler ==========

#[test]
fn test_substitute() {
    let vocab = Vocabulary::from_words(&words("x y x"));
    let mut rewrites = Rewrites::new();
    rewrites.insert(vocab.index_of("x").unwrap(), "x1+ x2:".to_string());
    let out = reassembler::substitute(&vocab, &rewrites);
    assert_eq!(out, vec!["x1+ x2:", "y", "x1+ x2:"]);
}

#[test]
fn test_substitute_no_rewrites() {
    let input = words("eins zwei eins");
    let vocab = Vocabulary::from_words(&input);
    assert_eq!(reassembler::substitute(&vocab, &Rewrites::new()), input);
}

#[test]
fn test_flatten() {
    let out = reassembler::flatten(&["x1+ x2:", "y"]);
    assert_eq!(out, vec!["x1+", "x2:", "y"]);
}

#[test]
fn test_join() {
    assert_eq!(reassembler::join(&["a", "b+ c:"]), "a b+ c:");
    assert_eq!(reassembler::join::<&str>(&[]), "");
}

#[test]
fn test_collapse_artifacts() {
    assert_eq!(collapse_artifacts("a +: b"), "a b");
    assert_eq!(collapse_artifacts("a +: +: b"), "a b");
    assert_eq!(collapse_artifacts("a+: b"), "a+: b");
}

#[test]
fn test_repair_letter_terminals() {
    assert_eq!(repair_letter_terminals("b+ a: n+ a: x"), "b+ a+ n+ a+ x");
    assert_eq!(repair_letter_terminals("li+ ef: x"), "li+ ef: x");
    assert_eq!(repair_letter_terminals("b+ ä: x"), "b+ ä: x");
    assert_eq!(repair_letter_terminals("B+ A: x"), "B+ A: x");
    // no trailing space, no rewrite
    assert_eq!(repair_letter_terminals("b+ a:"), "b+ a:");
}

#[test]
fn test_restore_line_breaks() {
    let cleanup = Cleanup::new("<eos>").unwrap();
    assert_eq!(cleanup.restore_line_breaks("a <eos> b <eos>"), "a\nb\n");
    assert_eq!(cleanup.restore_line_breaks("a <eos> <eos> b"), "a\n\nb");
}

#[test]
fn test_cleanup_escapes_placeholder() {
    let cleanup = Cleanup::new("[EOL]").unwrap();
    assert_eq!(cleanup.apply("a [EOL] b [EOL]"), "a\nb\n");
    assert_eq!(cleanup.apply("a E b"), "a E b");
}

#[test]
fn test_cleanup_order() {
    let cleanup = Cleanup::new("<eos>").unwrap();
    let out = cleanup.apply("x +: y+ a: z <eos> w");
    assert_eq!(out, "x y+ a+ z\nw");
}

#[test]
fn test_cleanup_idempotent() {
    let cleanup = Cleanup::new("<eos>").unwrap();
    for text in [
        "der hund li+ ef: <eos> x +: +: y <eos>",
        "b+ a: n+ a: <eos> <eos> c",
        "a +: <eos> b: c",
        "",
    ] {
        let once = cleanup.apply(text);
        assert_eq!(cleanup.apply(&once), once, "input {text:?}");
    }
}

#[test]
fn test_strip_markers() {
    assert_eq!(strip_markers("sc+ hne+ ll:"), "schnell");
    assert_eq!(strip_markers("hund"), "hund");
}

#[test]
fn test_restore() {
    assert_eq!(restore("der hund li+ ef:\nder be+ llt:\n"), "der hund lief\nder bellt\n");
    assert_eq!(restore("h+ u+ n+ d: a"), "hund a");
    assert_eq!(restore(""), "");
}

// ========== Corpus ==========

#[test]
fn test_tokenize_lines() {
    let out = corpus::tokenize_lines("a b\nc\n", "<eos>");
    assert_eq!(out, vec!["a", "b", "<eos>", "c", "<eos>"]);
}

#[test]
fn test_tokenize_lines_unterminated() {
    let out = corpus::tokenize_lines("a\nb", "<eos>");
    assert_eq!(out, vec!["a", "<eos>", "b"]);
}

#[test]
fn test_tokenize_lines_blank_line() {
    let out = corpus::tokenize_lines("a\n\nb\n", "<eos>");
    assert_eq!(out, vec!["a", "<eos>", "<eos>", "b", "<eos>"]);
}

#[test]
fn test_tokenize_whitespace() {
    assert_eq!(corpus::tokenize("  a\tb \n c "), vec!["a", "b", "c"]);
    assert!(corpus::tokenize("").is_empty());
}

// ========== Observer ==========

#[test]
fn test_stage_names() {
    assert_eq!(Stage::WordFilter.as_str(), "word_filter");
    assert_eq!(Stage::Reassembly.as_str(), "reassembly");
}

#[test]
fn test_recording_observer() {
    let observer = RecordingObserver::new();
    observer.on_stage(&StageReport { stage: Stage::Flatten, items: 3, elapsed: Default::default() });
    assert_eq!(observer.stages(), vec![Stage::Flatten]);
    assert_eq!(observer.reports()[0].items, 3);
}
