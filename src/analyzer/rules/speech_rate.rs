//! Speech rate: words per minute against the spoken duration.

use super::{round_to, CriterionRule, RuleInput};
use crate::{Criterion, CriterionResult, Details, DEFAULT_DURATION_SECONDS};

/// Rule for banding speaking pace
pub struct SpeechRateRule;

impl SpeechRateRule {
    pub fn new() -> Self {
        Self
    }

    /// Duration actually used, and whether it was substituted
    pub fn effective_duration(duration_seconds: Option<f64>) -> (f64, bool) {
        match duration_seconds {
            Some(d) if d.is_finite() && d > 0.0 => (d, false),
            _ => (DEFAULT_DURATION_SECONDS, true),
        }
    }

    /// 111-140 is ideal, 81-110 and 141-160 acceptable. Rates between 140 and
    /// 141 fall through to the lowest band.
    pub fn band(wpm: f64) -> f64 {
        if (111.0..=140.0).contains(&wpm) {
            10.0
        } else if (81.0..111.0).contains(&wpm) || (141.0..=160.0).contains(&wpm) {
            6.0
        } else {
            2.0
        }
    }
}

impl Default for SpeechRateRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionRule for SpeechRateRule {
    fn criterion(&self) -> Criterion {
        Criterion::SpeechRate
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> CriterionResult {
        let words = input.text.word_count();
        let (duration, defaulted) = Self::effective_duration(input.duration_seconds);
        let wpm = words as f64 / (duration / 60.0);

        if defaulted {
            tracing::debug!(duration, "no usable duration given; using default");
        }

        let mut details = Details::new();
        details.insert("wpm".into(), round_to(wpm, 1).into());
        details.insert("word_count".into(), words.into());
        details.insert("duration".into(), duration.into());
        details.insert("duration_defaulted".into(), defaulted.into());

        CriterionResult::new(self.criterion(), Self::band(wpm), details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::test_support::run;
    use crate::DetailValue;

    #[test]
    fn four_words_in_ten_seconds() {
        let result = run(&SpeechRateRule::new(), "one two three four", Some(10.0));
        assert_eq!(result.details["wpm"], DetailValue::Number(24.0));
        assert_eq!(result.score, 2.0);
        assert_eq!(result.details["duration_defaulted"], DetailValue::Bool(false));
    }

    #[test]
    fn missing_or_non_positive_duration_uses_default() {
        for duration in [None, Some(0.0), Some(-5.0), Some(f64::NAN)] {
            let result = run(&SpeechRateRule::new(), "one two", duration);
            assert_eq!(result.details["duration"], DetailValue::Number(52.0));
            assert_eq!(result.details["duration_defaulted"], DetailValue::Bool(true));
        }
    }

    #[test]
    fn bands() {
        assert_eq!(SpeechRateRule::band(111.0), 10.0);
        assert_eq!(SpeechRateRule::band(125.0), 10.0);
        assert_eq!(SpeechRateRule::band(140.0), 10.0);
        assert_eq!(SpeechRateRule::band(140.5), 2.0);
        assert_eq!(SpeechRateRule::band(141.0), 6.0);
        assert_eq!(SpeechRateRule::band(160.0), 6.0);
        assert_eq!(SpeechRateRule::band(81.0), 6.0);
        assert_eq!(SpeechRateRule::band(110.9), 6.0);
        assert_eq!(SpeechRateRule::band(80.9), 2.0);
        assert_eq!(SpeechRateRule::band(160.1), 2.0);
        assert_eq!(SpeechRateRule::band(0.0), 2.0);
    }

    #[test]
    fn ideal_pace() {
        // 60 words in 30 seconds = 120 wpm
        let text = "word ".repeat(60);
        let result = run(&SpeechRateRule::new(), &text, Some(30.0));
        assert_eq!(result.score, 10.0);
        assert_eq!(result.details["word_count"], DetailValue::Integer(60));
    }
}
