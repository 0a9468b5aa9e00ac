//! Lexicon-driven sentiment backend
//!
//! Reads a tab-separated polarity lexicon (`token<TAB>valence[<TAB>...]`,
//! the layout used by VADER's `vader_lexicon.txt`) and scores text with the
//! VADER rules (boosters, caps, negation, idioms, "but" and punctuation).

use super::{vader, SentimentBackend, SentimentMethod};
use crate::parser::NormalizedText;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid valence {value:?} on lexicon line {line}")]
    InvalidValence { line: usize, value: String },
    #[error("lexicon contains no entries")]
    Empty,
}

/// Token to valence table
pub struct LexiconBackend {
    valences: HashMap<String, f64>,
}

impl LexiconBackend {
    /// Load a lexicon file from disk
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse lexicon text. Blank lines and `#` comments are skipped; columns
    /// after the valence are ignored.
    pub fn parse(content: &str) -> Result<Self, LexiconError> {
        let mut valences = HashMap::new();

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut columns = line.split('\t');
            let token = columns.next().unwrap_or_default().trim();
            let raw = columns.next().unwrap_or_default().trim();
            let valence: f64 = raw.parse().map_err(|_| LexiconError::InvalidValence {
                line: idx + 1,
                value: raw.to_string(),
            })?;

            valences.insert(token.to_lowercase(), valence);
        }

        if valences.is_empty() {
            return Err(LexiconError::Empty);
        }

        Ok(Self { valences })
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    pub fn valence(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }
}

impl SentimentBackend for LexiconBackend {
    fn method(&self) -> SentimentMethod {
        SentimentMethod::Lexicon
    }

    fn compound(&self, text: &NormalizedText<'_>) -> f64 {
        vader::compound(&self.valences, text.original())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TextNormalizer;

    const LEXICON: &str = "\
# test lexicon
happy\t2.7\t0.9\t[3, 2, 3]
love\t3.2\t0.4\t[3, 3, 4]
sad\t-2.1\t0.7\t[-2, -2, -3]
nervous\t-1.1\t0.8\t[-1, -1, -2]

boring\t-1.3\t0.5\t[-1, -1, -2]
";

    fn backend() -> LexiconBackend {
        LexiconBackend::parse(LEXICON).unwrap()
    }

    fn compound(text: &str) -> f64 {
        backend().compound(&TextNormalizer::normalize(text))
    }

    #[test]
    fn parses_entries_and_skips_comments() {
        let lexicon = backend();
        assert_eq!(lexicon.len(), 5);
        assert_eq!(lexicon.valence("love"), Some(3.2));
        assert_eq!(lexicon.valence("test"), None);
    }

    #[test]
    fn rejects_bad_valence() {
        let err = LexiconBackend::parse("good\tvery\n").err().unwrap();
        assert!(matches!(err, LexiconError::InvalidValence { line: 1, .. }));
    }

    #[test]
    fn rejects_empty_lexicon() {
        let err = LexiconBackend::parse("# nothing here\n\n").err().unwrap();
        assert!(matches!(err, LexiconError::Empty));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = LexiconBackend::load(Path::new("/nonexistent/lexicon.txt"))
            .err()
            .unwrap();
        assert!(matches!(err, LexiconError::Io { .. }));
    }

    #[test]
    fn positive_text_scores_positive() {
        let score = compound("I love my family and I am happy");
        assert!(score > 0.5, "score = {score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn unknown_words_are_neutral() {
        assert_eq!(compound("the table is brown"), 0.0);
    }

    #[test]
    fn negation_flips_polarity() {
        assert!(compound("I am not happy") < 0.0);
        assert!(compound("school isn't boring") > 0.0);
    }

    #[test]
    fn exclamations_add_emphasis() {
        assert!(compound("I am happy!!") > compound("I am happy"));
        assert!(compound("so sad!!") < compound("so sad"));
    }

    #[test]
    fn intensity_rules_change_the_score() {
        assert_eq!(compound("I am happy"), 0.5719);
        assert_eq!(compound("I am very happy"), 0.6115);
        assert_eq!(compound("I am HAPPY"), 0.6633);
    }

    #[test]
    fn contrast_clause_outweighs_opening() {
        assert_eq!(compound("I was nervous at first but now I love it"), 0.7391);
    }

    #[test]
    fn compound_stays_in_range() {
        let text = "love ".repeat(500);
        let score = compound(&text);
        assert!(score <= 1.0 && score > 0.99);
    }
}
