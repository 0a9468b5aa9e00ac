//! Transcript normalization - lowercasing, word tokens and sentence spans

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Speaking pace assumed when estimating a duration from the word count
const ESTIMATED_WORDS_PER_SECOND: f64 = 1.5;

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+").expect("word regex"))
}

fn sentence_break_regex() -> &'static Regex {
    static BREAK: OnceLock<Regex> = OnceLock::new();
    BREAK.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence break regex"))
}

/// A transcript prepared for pattern matching
#[derive(Debug, Clone)]
pub struct NormalizedText<'a> {
    original: &'a str,
    lower: String,
    words: Vec<String>,
    sentences: Vec<&'a str>,
}

impl<'a> NormalizedText<'a> {
    /// Text exactly as given
    pub fn original(&self) -> &'a str {
        self.original
    }

    /// Lowercased copy used for every pattern match
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Lowercase word tokens (`\w+` runs)
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Trimmed, non-empty spans between runs of `.`, `!` and `?`, in original case
    pub fn sentences(&self) -> &[&'a str] {
        &self.sentences
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn stats(&self) -> TranscriptStats {
        TranscriptStats {
            word_count: self.words.len(),
            sentence_count: self.sentences.len(),
            estimated_duration_seconds: (self.words.len() as f64 / ESTIMATED_WORDS_PER_SECOND)
                as u64,
        }
    }
}

/// Turns raw transcript text into a [`NormalizedText`]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn normalize(text: &str) -> NormalizedText<'_> {
        let lower = text.to_lowercase();
        let words = word_regex()
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect();
        let sentences = sentence_break_regex()
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        NormalizedText {
            original: text,
            lower,
            words,
            sentences,
        }
    }
}

/// Statistics about a transcript
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptStats {
    /// Number of word tokens
    pub word_count: usize,
    /// Number of sentence-like spans
    pub sentence_count: usize,
    /// Spoken duration estimated from the word count
    pub estimated_duration_seconds: u64,
}
