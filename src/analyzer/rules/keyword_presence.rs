//! Keyword presence: coverage of the content an introduction should include.

use super::{CriterionRule, RuleInput};
use crate::parser::Concept;
use crate::{Criterion, CriterionResult, Details};

/// Points available from mandatory concepts
const MANDATORY_POINTS: f64 = 20.0;
/// Points available from optional concepts
const OPTIONAL_POINTS: f64 = 10.0;

/// Rule for checking which content concepts are mentioned
pub struct KeywordPresenceRule;

impl KeywordPresenceRule {
    pub fn new() -> Self {
        Self
    }

    fn found(input: &RuleInput<'_>, concepts: &[Concept]) -> Vec<String> {
        concepts
            .iter()
            .filter(|c| input.patterns.mentions(**c, input.text.lower()))
            .map(|c| c.key().to_string())
            .collect()
    }
}

impl Default for KeywordPresenceRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionRule for KeywordPresenceRule {
    fn criterion(&self) -> Criterion {
        Criterion::KeywordPresence
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> CriterionResult {
        let found_must = Self::found(input, &Concept::MANDATORY);
        let found_optional = Self::found(input, &Concept::OPTIONAL);

        let must_score =
            found_must.len() as f64 / Concept::MANDATORY.len() as f64 * MANDATORY_POINTS;
        let optional_score =
            found_optional.len() as f64 / Concept::OPTIONAL.len() as f64 * OPTIONAL_POINTS;
        let raw_score = must_score + optional_score;
        let score = raw_score.min(self.criterion().weight());

        let mut details = Details::new();
        details.insert("found_must".into(), found_must.into());
        details.insert("found_optional".into(), found_optional.into());
        details.insert("raw_score".into(), raw_score.into());

        CriterionResult::new(self.criterion(), score, details)
    }
}
