//! Lexical feature extraction

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Tokens longer than this many characters count as complex words
pub const COMPLEX_WORD_MIN_CHARS: usize = 7;

lazy_static! {
    static ref SENTENCE_TERMINATORS: Regex = Regex::new(r"[.!?]+").unwrap();
}

/// Simple text statistics the heuristic scorer works from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFeatures {
    pub word_count: usize,
    pub sentence_count: usize,
    pub complex_word_ratio: f64,
}

impl TextFeatures {
    /// Extract features from raw text. Never fails.
    pub fn extract(text: &str) -> Self {
        let mut word_count = 0usize;
        let mut complex_words = 0usize;
        for word in text.split_whitespace() {
            word_count += 1;
            if word.chars().count() > COMPLEX_WORD_MIN_CHARS {
                complex_words += 1;
            }
        }

        // The segment after the last terminator counts even when empty.
        let sentence_count = SENTENCE_TERMINATORS.split(text).count();

        let complex_word_ratio = if word_count == 0 {
            0.0
        } else {
            complex_words as f64 / word_count as f64
        };

        Self {
            word_count,
            sentence_count,
            complex_word_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word() {
        let f = TextFeatures::extract("Hello");
        assert_eq!(f.word_count, 1);
        assert_eq!(f.sentence_count, 1);
        assert_eq!(f.complex_word_ratio, 0.0);
    }

    #[test]
    fn test_trailing_segment_counts() {
        // "One. Two." splits into "One", " Two", ""
        let f = TextFeatures::extract("One. Two.");
        assert_eq!(f.sentence_count, 3);
    }

    #[test]
    fn test_terminator_runs_split_once() {
        let f = TextFeatures::extract("Really?! Yes... fine");
        assert_eq!(f.sentence_count, 3);
    }

    #[test]
    fn test_words_split_on_any_whitespace() {
        let f = TextFeatures::extract("  one\ttwo\n\nthree   four ");
        assert_eq!(f.word_count, 4);
    }

    #[test]
    fn test_complex_word_ratio() {
        // "extraordinary" and "magnificent" are longer than 7 chars;
        // "lengthy" is exactly 7 and does not count
        let f = TextFeatures::extract("an extraordinary magnificent lengthy day");
        assert_eq!(f.word_count, 5);
        assert!((f.complex_word_ratio - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_punctuation_is_part_of_token_length() {
        // "rivers." is 7 chars with the period, "rivers" would be 6
        let f = TextFeatures::extract("rivers.");
        assert_eq!(f.complex_word_ratio, 0.0);
        let f = TextFeatures::extract("streams.");
        assert_eq!(f.complex_word_ratio, 1.0);
    }

    #[test]
    fn test_empty_text_has_zero_ratio() {
        let f = TextFeatures::extract("");
        assert_eq!(f.word_count, 0);
        assert_eq!(f.complex_word_ratio, 0.0);
    }

    #[test]
    fn test_education_sentence() {
        let f = TextFeatures::extract("Education matters because it empowers individuals.");
        assert_eq!(f.word_count, 6);
        assert_eq!(f.sentence_count, 2);
        // Education, empowers, individuals.
        assert!((f.complex_word_ratio - 0.5).abs() < 1e-12);
    }
}
