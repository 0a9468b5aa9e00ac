//! Score totals and recommendations

use crate::{Criterion, CriterionResult, EvaluationResult};

/// Criteria scoring under this fraction of their weight get a recommendation
const RECOMMENDATION_RATIO: f64 = 0.6;
/// At most this many recommendations are produced
const MAX_RECOMMENDATIONS: usize = 3;

/// Calculator for transcript totals
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Sum of the criterion scores
    pub fn total(criteria: &[CriterionResult]) -> f64 {
        criteria.iter().map(|c| c.score).sum()
    }

    /// Get a description of an overall total (0-100)
    pub fn rating_description(total: f64) -> &'static str {
        if total >= 85.0 {
            "Excellent - A confident, complete and well-paced introduction"
        } else if total >= 70.0 {
            "Good - Solid introduction with a few areas to polish"
        } else if total >= 50.0 {
            "Fair - Covers the basics but needs work"
        } else {
            "Needs improvement - Key parts of the introduction are missing"
        }
    }

    /// Advice for one criterion
    pub fn advice(criterion: Criterion) -> &'static str {
        match criterion {
            Criterion::Salutation => {
                "Open with a warm greeting such as \"Good morning everyone\" or \"I am excited to introduce myself\""
            }
            Criterion::KeywordPresence => {
                "Mention your name, age, school, class, family and hobbies; add a goal or a fun fact"
            }
            Criterion::Flow => {
                "Follow the order: greeting, basic details, interests and goals, then a closing thank you"
            }
            Criterion::SpeechRate => "Aim for a pace of roughly 110-140 words per minute",
            Criterion::Grammar => {
                "Start sentences with a capital letter, capitalize \"I\" and avoid repeating words"
            }
            Criterion::Vocabulary => "Use more varied words instead of repeating the same ones",
            Criterion::FillerWords => {
                "Cut filler words like \"um\", \"like\" and \"you know\"; pause instead"
            }
            Criterion::Sentiment => "Sound positive and enthusiastic about yourself and your interests",
        }
    }

    /// Get recommendations for the weakest criteria, lowest ratio first
    pub fn recommendations(result: &EvaluationResult) -> Vec<String> {
        let mut weak: Vec<(Criterion, f64)> = Criterion::ALL
            .into_iter()
            .filter_map(|c| result.criterion(c).map(|r| (c, r.ratio())))
            .filter(|(_, ratio)| *ratio < RECOMMENDATION_RATIO)
            .collect();
        weak.sort_by(|a, b| a.1.total_cmp(&b.1));

        weak.into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|(c, _)| Self::advice(c).to_string())
            .collect()
    }
}
