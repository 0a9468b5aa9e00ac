//! Salutation level: how the speaker opens the introduction.

use super::{CriterionRule, RuleInput};
use crate::{Criterion, CriterionResult, DetailValue, Details};

const NO_SALUTATION: &str = "No salutation detected";

/// Rule for grading the opening greeting
///
/// Tiers are checked as whole groups in precedence order (excellent, good,
/// normal); the first tier with any match wins regardless of where in the
/// text the match occurs.
pub struct SalutationRule;

impl SalutationRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SalutationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionRule for SalutationRule {
    fn criterion(&self) -> Criterion {
        Criterion::Salutation
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> CriterionResult {
        let text = input.text.lower();
        let mut details = Details::new();

        for (tier, patterns) in input.patterns.salutation_tiers() {
            if let Some(pattern) = patterns.iter().find(|p| p.is_match(text)) {
                details.insert("level".into(), tier.label().into());
                details.insert("matched".into(), pattern.source().into());
                return CriterionResult::new(self.criterion(), tier.points(), details);
            }
        }

        details.insert("level".into(), NO_SALUTATION.into());
        details.insert("matched".into(), DetailValue::Null);
        CriterionResult::new(self.criterion(), 0.0, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::test_support::run;

    fn level(result: &CriterionResult) -> String {
        result.details["level"].to_string()
    }

    #[test]
    fn excellent_beats_good_in_any_order() {
        for text in [
            "Hello everyone, I am excited to be here",
            "I am excited to be here. Hello everyone",
        ] {
            let result = run(&SalutationRule::new(), text, None);
            assert_eq!(result.score, 5.0);
            assert_eq!(level(&result), "Excellent");
        }
    }

    #[test]
    fn good_morning_is_good() {
        let result = run(&SalutationRule::new(), "Good morning, my name is Ria", None);
        assert_eq!(result.score, 4.0);
        assert_eq!(level(&result), "Good");
        assert_eq!(result.details["matched"].to_string(), "good morning");
    }

    #[test]
    fn earlier_good_not_overridden_by_later_hi() {
        let result = run(&SalutationRule::new(), "Good evening. Hi again", None);
        assert_eq!(result.score, 4.0);
    }

    #[test]
    fn bare_hi_is_normal() {
        let result = run(&SalutationRule::new(), "Hi, I am Sam", None);
        assert_eq!(result.score, 2.0);
        assert_eq!(level(&result), "Normal");
    }

    #[test]
    fn hi_inside_word_is_not_a_greeting() {
        let result = run(&SalutationRule::new(), "This is my history project", None);
        assert_eq!(result.score, 0.0);
        assert_eq!(level(&result), NO_SALUTATION);
        assert_eq!(result.details["matched"], DetailValue::Null);
    }

    #[test]
    fn weight_is_five() {
        let result = run(&SalutationRule::new(), "", None);
        assert_eq!(result.weight, 5.0);
        assert_eq!(result.name, "Salutation Level");
    }
}
