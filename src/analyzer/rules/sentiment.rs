//! Sentiment, scored from the compound polarity of the selected backend.

use super::{CriterionRule, RuleInput};
use crate::sentiment::{self, SentimentBackend, SentimentMethod};
use crate::{Criterion, CriterionResult, Details};
use std::sync::Arc;

/// Rule for overall tone
pub struct SentimentRule {
    backend: Arc<dyn SentimentBackend>,
}

impl SentimentRule {
    /// Rule using the process-wide backend
    pub fn new() -> Self {
        Self::with_backend(sentiment::backend())
    }

    pub fn with_backend(backend: Arc<dyn SentimentBackend>) -> Self {
        Self { backend }
    }

    pub fn method(&self) -> SentimentMethod {
        self.backend.method()
    }

    fn band(compound: f64) -> f64 {
        if compound >= 0.5 {
            15.0
        } else if compound >= 0.3 {
            12.0
        } else if compound >= 0.0 {
            9.0
        } else if compound >= -0.2 {
            6.0
        } else {
            3.0
        }
    }
}

impl Default for SentimentRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionRule for SentimentRule {
    fn criterion(&self) -> Criterion {
        Criterion::Sentiment
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> CriterionResult {
        let compound = self.backend.compound(input.text);
        // a NaN from a misbehaving backend bands as neutral
        let compound = if compound.is_nan() { 0.0 } else { compound.clamp(-1.0, 1.0) };

        let mut details = Details::new();
        details.insert("compound".into(), compound.into());
        details.insert("method".into(), self.method().to_string().into());

        CriterionResult::new(self.criterion(), Self::band(compound), details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::test_support::run;
    use crate::parser::NormalizedText;
    use crate::sentiment::HeuristicBackend;
    use crate::DetailValue;

    struct Fixed(f64);

    impl SentimentBackend for Fixed {
        fn method(&self) -> SentimentMethod {
            SentimentMethod::Lexicon
        }

        fn compound(&self, _text: &NormalizedText<'_>) -> f64 {
            self.0
        }
    }

    fn score_for(compound: f64) -> f64 {
        run(&SentimentRule::with_backend(Arc::new(Fixed(compound))), "any", None).score
    }

    #[test]
    fn bands_on_compound() {
        assert_eq!(score_for(0.9), 15.0);
        assert_eq!(score_for(0.5), 15.0);
        assert_eq!(score_for(0.3), 12.0);
        assert_eq!(score_for(0.0), 9.0);
        assert_eq!(score_for(-0.2), 6.0);
        assert_eq!(score_for(-0.21), 3.0);
        assert_eq!(score_for(f64::NAN), 9.0);
    }

    #[test]
    fn heuristic_reports_method() {
        let rule = SentimentRule::with_backend(Arc::new(HeuristicBackend::new()));
        let result = run(&rule, "I am happy and excited", None);
        assert_eq!(result.score, 15.0);
        assert_eq!(result.details["method"], DetailValue::Text("Heuristic".into()));
        assert_eq!(result.details["compound"], DetailValue::Number(0.6));
    }

    #[test]
    fn heuristic_negative_text() {
        let rule = SentimentRule::with_backend(Arc::new(HeuristicBackend::new()));
        let result = run(&rule, "this is boring", None);
        assert_eq!(result.score, 3.0);
    }
}
