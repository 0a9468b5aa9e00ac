//! Vocabulary diversity via type-token ratio.

use super::{round_to, CriterionRule, RuleInput};
use crate::{Criterion, CriterionResult, Details};
use std::collections::HashSet;

/// Rule for lexical diversity
pub struct VocabularyRule;

impl VocabularyRule {
    pub fn new() -> Self {
        Self
    }

    /// Fraction of the weight earned for a given ratio
    fn band(ttr: f64) -> f64 {
        if ttr >= 0.9 {
            1.0
        } else if ttr >= 0.7 {
            0.8
        } else if ttr >= 0.5 {
            0.6
        } else if ttr >= 0.3 {
            0.4
        } else {
            0.2
        }
    }
}

impl Default for VocabularyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionRule for VocabularyRule {
    fn criterion(&self) -> Criterion {
        Criterion::Vocabulary
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> CriterionResult {
        let words = input.text.words();
        if words.is_empty() {
            return CriterionResult::new(self.criterion(), 0.0, Details::new());
        }

        let distinct: HashSet<&String> = words.iter().collect();
        let ttr = distinct.len() as f64 / words.len() as f64;
        let score = Self::band(ttr) * self.criterion().weight();

        let mut details = Details::new();
        details.insert("ttr".into(), round_to(ttr, 2).into());
        details.insert("distinct_words".into(), distinct.len().into());
        details.insert("total_words".into(), words.len().into());

        CriterionResult::new(self.criterion(), score, details)
    }
}
