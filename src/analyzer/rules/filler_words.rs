//! Filler word rate.

use super::{round_to, CriterionRule, RuleInput};
use crate::{Criterion, CriterionResult, Details};

/// Rule for penalising filler words ("um", "you know", ...)
pub struct FillerWordsRule;

impl FillerWordsRule {
    pub fn new() -> Self {
        Self
    }

    /// Points for a filler rate given in percent; lower is better
    fn band(rate_percent: f64) -> f64 {
        if rate_percent <= 3.0 {
            15.0
        } else if rate_percent <= 6.0 {
            12.0
        } else if rate_percent <= 9.0 {
            9.0
        } else if rate_percent <= 12.0 {
            6.0
        } else {
            3.0
        }
    }
}

impl Default for FillerWordsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionRule for FillerWordsRule {
    fn criterion(&self) -> Criterion {
        Criterion::FillerWords
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> CriterionResult {
        let total_words = input.text.word_count();
        if total_words == 0 {
            return CriterionResult::new(self.criterion(), 0.0, Details::new());
        }

        let text = input.text.lower();
        let mut count = 0;
        let mut found = Vec::new();
        for filler in input.patterns.fillers() {
            let n = filler.count(text);
            if n > 0 {
                count += n;
                found.push(format!("{} ({})", filler.phrase(), n));
            }
        }

        let rate = count as f64 / total_words as f64 * 100.0;

        let mut details = Details::new();
        details.insert("rate_percent".into(), round_to(rate, 2).into());
        details.insert("count".into(), count.into());
        details.insert("found".into(), found.into());

        CriterionResult::new(self.criterion(), Self::band(rate), details)
    }
}
