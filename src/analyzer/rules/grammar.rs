//! Grammar heuristics: capitalization, lowercase "i" and repeated words.
//!
//! No grammar checker is involved. Three surface errors are counted and
//! normalised per 100 words.

use super::{round_to, CriterionRule, RuleInput};
use crate::{Criterion, CriterionResult, Details};
use regex::Regex;
use std::sync::OnceLock;

/// Errors per 100 words at which the score reaches zero
const ZERO_SCORE_RATE: f64 = 10.0;
/// Words assumed per sentence when the text has no word tokens
const WORDS_PER_SENTENCE: usize = 10;

fn lowercase_i_regex() -> &'static Regex {
    static LOWER_I: OnceLock<Regex> = OnceLock::new();
    LOWER_I.get_or_init(|| Regex::new(r"\s+i\s+").expect("lowercase i regex"))
}

fn word_span_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+").expect("word span regex"))
}

/// Rule for heuristic grammar checking
pub struct GrammarRule;

impl GrammarRule {
    pub fn new() -> Self {
        Self
    }

    /// Sentences that start with a lowercase letter
    fn uncapitalized_sentences(sentences: &[&str]) -> usize {
        sentences
            .iter()
            .filter(|s| s.chars().next().is_some_and(char::is_lowercase))
            .count()
    }

    /// Standalone lowercase "i" between whitespace, non-overlapping
    fn lowercase_pronouns(original: &str) -> usize {
        let padded = format!(" {original} ");
        lowercase_i_regex().find_iter(&padded).count()
    }

    /// Words immediately followed by whitespace and the same word.
    /// Pairs do not overlap: "the the the" counts once.
    fn repeated_words(lower: &str) -> usize {
        let spans: Vec<(usize, usize)> = word_span_regex()
            .find_iter(lower)
            .map(|m| (m.start(), m.end()))
            .collect();

        let mut count = 0;
        let mut i = 0;
        while i + 1 < spans.len() {
            let (start, end) = spans[i];
            let (next_start, next_end) = spans[i + 1];
            let gap = &lower[end..next_start];
            let only_whitespace = !gap.is_empty() && gap.chars().all(char::is_whitespace);

            if only_whitespace && lower[start..end] == lower[next_start..next_end] {
                count += 1;
                i += 2;
            } else {
                i += 1;
            }
        }
        count
    }
}

impl Default for GrammarRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionRule for GrammarRule {
    fn criterion(&self) -> Criterion {
        Criterion::Grammar
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> CriterionResult {
        let text = input.text;
        let capitalization = Self::uncapitalized_sentences(text.sentences());
        let lowercase_i = Self::lowercase_pronouns(text.original());
        let repeated = Self::repeated_words(text.lower());
        let errors = capitalization + lowercase_i + repeated;

        let normaliser = match text.word_count() {
            0 => text.sentences().len().max(1) * WORDS_PER_SENTENCE,
            n => n,
        };
        let errors_per_100 = errors as f64 / normaliser as f64 * 100.0;
        let ratio = 1.0 - (errors_per_100 / ZERO_SCORE_RATE).min(1.0);
        let score = ratio * self.criterion().weight();

        let mut details = Details::new();
        details.insert("errors_detected".into(), errors.into());
        details.insert("rate_per_100".into(), round_to(errors_per_100, 2).into());
        details.insert("capitalization".into(), capitalization.into());
        details.insert("lowercase_i".into(), lowercase_i.into());
        details.insert("repeated_words".into(), repeated.into());

        CriterionResult::new(self.criterion(), score, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::test_support::run;
    use crate::DetailValue;

    #[test]
    fn clean_text_scores_full() {
        let result = run(
            &GrammarRule::new(),
            "My name is Omar. I like football. We play every Sunday.",
            None,
        );
        assert_eq!(result.details["errors_detected"], DetailValue::Integer(0));
        assert_eq!(result.score, 10.0);
    }

    #[test]
    fn counts_lowercase_sentence_starts() {
        assert_eq!(
            GrammarRule::uncapitalized_sentences(&["hello there", "Fine", "ok then"]),
            2
        );
        assert_eq!(GrammarRule::uncapitalized_sentences(&["123 go", "\"Quote\""]), 0);
    }

    #[test]
    fn counts_standalone_lowercase_i() {
        assert_eq!(GrammarRule::lowercase_pronouns("and i think i can"), 2);
        assert_eq!(GrammarRule::lowercase_pronouns("i start here"), 1);
        assert_eq!(GrammarRule::lowercase_pronouns("I am fine"), 0);
        assert_eq!(GrammarRule::lowercase_pronouns("i'm here"), 0);
        // the trailing whitespace of one match is not reused by the next
        assert_eq!(GrammarRule::lowercase_pronouns("i i"), 1);
    }

    #[test]
    fn counts_repeated_words() {
        assert_eq!(GrammarRule::repeated_words("the the cat"), 1);
        assert_eq!(GrammarRule::repeated_words("the the the"), 1);
        assert_eq!(GrammarRule::repeated_words("a a b b"), 2);
        assert_eq!(GrammarRule::repeated_words("the, the"), 0);
        assert_eq!(GrammarRule::repeated_words("the then"), 0);
        assert_eq!(GrammarRule::repeated_words(""), 0);
    }

    #[test]
    fn repeated_words_ignore_case() {
        let result = run(&GrammarRule::new(), "The the cat sat.", None);
        assert_eq!(result.details["repeated_words"], DetailValue::Integer(1));
    }

    #[test]
    fn many_errors_floor_at_zero() {
        let result = run(&GrammarRule::new(), "so so. i i. the the", None);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn no_words_uses_sentence_estimate() {
        let result = run(&GrammarRule::new(), "...!?", None);
        assert_eq!(result.score, 10.0);
        assert_eq!(result.details["rate_per_100"], DetailValue::Number(0.0));
    }

    #[test]
    fn more_errors_never_score_higher() {
        let clean = run(&GrammarRule::new(), "I like to read books every day.", None);
        let sloppy = run(&GrammarRule::new(), "i like to read read books every day.", None);
        assert!(sloppy.score <= clean.score);
    }
}
