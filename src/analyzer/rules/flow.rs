//! Flow: whether the introduction follows salutation, basic info, additional
//! info, closing.
//!
//! Each section is anchored at the average character offset of every match
//! of every pattern in its group. A pattern shared between groups pulls both
//! anchors, so collisions can skew the order.

use super::{CriterionRule, RuleInput};
use crate::parser::FlowGroup;
use crate::{Criterion, CriterionResult, Details};

/// Score when no pair can be compared but basic info is present
const SHORT_TEXT_SCORE: f64 = 3.0;

/// Rule for checking the narrative order of an introduction
pub struct FlowRule;

impl FlowRule {
    pub fn new() -> Self {
        Self
    }

    /// Average character offset of all matches in a group, if any matched
    fn anchor(input: &RuleInput<'_>, group: FlowGroup) -> Option<f64> {
        let text = input.text.lower();
        let mut starts: Vec<usize> = input
            .patterns
            .flow_group(group)
            .into_iter()
            .flat_map(|p| p.match_starts(text))
            .collect();

        if starts.is_empty() {
            return None;
        }

        starts.sort_unstable();
        let offsets = char_offsets(text, &starts);
        Some(offsets.iter().sum::<usize>() as f64 / offsets.len() as f64)
    }
}

/// Character offsets for ascending byte offsets, in a single pass over `text`
fn char_offsets(text: &str, sorted_bytes: &[usize]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(sorted_bytes.len());
    let mut chars = text.char_indices().peekable();
    let mut position = 0;

    for &byte in sorted_bytes {
        while chars.next_if(|&(b, _)| b < byte).is_some() {
            position += 1;
        }
        offsets.push(position);
    }
    offsets
}

impl Default for FlowRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionRule for FlowRule {
    fn criterion(&self) -> Criterion {
        Criterion::Flow
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> CriterionResult {
        let anchors: Vec<Option<f64>> = FlowGroup::SEQUENCE
            .iter()
            .map(|g| Self::anchor(input, *g))
            .collect();

        let mut correct_pairs = 0usize;
        let mut total_pairs = 0usize;
        for i in 0..anchors.len() {
            for j in (i + 1)..anchors.len() {
                if let (Some(earlier), Some(later)) = (anchors[i], anchors[j]) {
                    total_pairs += 1;
                    if earlier < later {
                        correct_pairs += 1;
                    }
                }
            }
        }

        let mut details = Details::new();
        if total_pairs == 0 {
            let basic_found = anchors[1].is_some();
            let (score, reason) = if basic_found {
                (SHORT_TEXT_SCORE, "Short text, basic info found")
            } else {
                (0.0, "No structure detected")
            };
            details.insert("reason".into(), reason.into());
            return CriterionResult::new(self.criterion(), score, details);
        }

        let score = correct_pairs as f64 / total_pairs as f64 * self.criterion().weight();
        details.insert("correct_pairs".into(), correct_pairs.into());
        details.insert("total_pairs".into(), total_pairs.into());
        CriterionResult::new(self.criterion(), score, details)
    }
}
