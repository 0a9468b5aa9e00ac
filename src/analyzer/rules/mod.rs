//! Criterion rules for transcript scoring

pub mod filler_words;
pub mod flow;
pub mod grammar;
pub mod keyword_presence;
pub mod salutation;
pub mod sentiment;
pub mod speech_rate;
pub mod vocabulary;

pub use filler_words::FillerWordsRule;
pub use flow::FlowRule;
pub use grammar::GrammarRule;
pub use keyword_presence::KeywordPresenceRule;
pub use salutation::SalutationRule;
pub use sentiment::SentimentRule;
pub use speech_rate::SpeechRateRule;
pub use vocabulary::VocabularyRule;

use crate::parser::{NormalizedText, PatternLibrary};
use crate::{Criterion, CriterionResult};

/// Everything a rule may look at for one transcript
pub struct RuleInput<'a> {
    pub text: &'a NormalizedText<'a>,
    pub patterns: &'a PatternLibrary,
    /// Duration as given by the caller, before any defaulting
    pub duration_seconds: Option<f64>,
}

/// Trait for criterion rules
pub trait CriterionRule: Send + Sync {
    /// Criterion this rule scores
    fn criterion(&self) -> Criterion;

    /// Score the transcript. Must return `0 <= score <= weight` for any input.
    fn evaluate(&self, input: &RuleInput<'_>) -> CriterionResult;
}

/// Round for display in details
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::parser::{global_pattern_library, TextNormalizer};

    /// Run a rule over `text` with the shared pattern library
    pub fn run(rule: &dyn CriterionRule, text: &str, duration: Option<f64>) -> CriterionResult {
        let normalized = TextNormalizer::normalize(text);
        let input = RuleInput {
            text: &normalized,
            patterns: global_pattern_library(),
            duration_seconds: duration,
        };
        rule.evaluate(&input)
    }
}
