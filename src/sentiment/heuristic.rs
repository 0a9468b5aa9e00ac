//! Fixed word-list sentiment backend.

use super::{SentimentBackend, SentimentMethod};
use crate::parser::NormalizedText;
use std::collections::HashSet;

const POSITIVE_WORDS: &[&str] = &[
    "excited",
    "love",
    "great",
    "good",
    "happy",
    "enjoy",
    "confident",
    "passion",
    "thank",
];

const NEGATIVE_WORDS: &[&str] = &["hate", "bad", "boring", "sad", "nervous"];

const POSITIVE_COMPOUND: f64 = 0.6;
const NEGATIVE_COMPOUND: f64 = -0.3;

/// Compares how many distinct positive and negative words appear.
/// Only ever returns 0.6, -0.3 or 0.0.
pub struct HeuristicBackend;

impl HeuristicBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentBackend for HeuristicBackend {
    fn method(&self) -> SentimentMethod {
        SentimentMethod::Heuristic
    }

    fn compound(&self, text: &NormalizedText<'_>) -> f64 {
        let tokens: HashSet<&str> = text.words().iter().map(String::as_str).collect();
        let positive = POSITIVE_WORDS.iter().filter(|w| tokens.contains(*w)).count();
        let negative = NEGATIVE_WORDS.iter().filter(|w| tokens.contains(*w)).count();

        if positive > negative {
            POSITIVE_COMPOUND
        } else if negative > positive {
            NEGATIVE_COMPOUND
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TextNormalizer;

    fn compound(text: &str) -> f64 {
        HeuristicBackend::new().compound(&TextNormalizer::normalize(text))
    }

    #[test]
    fn positive_words_win() {
        assert_eq!(compound("I am so happy and excited to be here"), 0.6);
    }

    #[test]
    fn negative_words_win() {
        assert_eq!(compound("School is boring and I feel sad"), -0.3);
    }

    #[test]
    fn tie_is_neutral() {
        assert_eq!(compound("a good day turned bad"), 0.0);
        assert_eq!(compound("the table is brown"), 0.0);
    }

    #[test]
    fn repeated_words_count_once() {
        // one distinct positive vs two distinct negatives
        assert_eq!(compound("great great great, but sad and nervous"), -0.3);
    }

    #[test]
    fn inflected_forms_do_not_count() {
        // "thanks" and "loved" are not in the word list
        assert_eq!(compound("thanks, I loved it"), 0.0);
    }
}
