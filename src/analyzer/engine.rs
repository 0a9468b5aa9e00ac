//! Evaluation engine - runs every criterion rule over a transcript

use crate::parser::{global_pattern_library, PatternLibrary, TextNormalizer};
use crate::sentiment::{self, SentimentBackend, SentimentMethod};
use crate::{Criterion, CriterionResult, EvaluationResult, TranscriptReport};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::rules::{
    CriterionRule, FillerWordsRule, FlowRule, GrammarRule, KeywordPresenceRule, RuleInput,
    SalutationRule, SentimentRule, SpeechRateRule, VocabularyRule,
};
use super::ScoreCalculator;

/// How the spoken duration of a transcript is determined
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpokenDuration {
    /// Measured duration in seconds
    Given(f64),
    /// Estimate from the word count at 1.5 words per second
    Estimated,
    /// Let the speech-rate rule substitute its default
    Unknown,
}

impl SpokenDuration {
    /// Duration handed to the rules and reported; `None` whenever the
    /// speech-rate default applies, including unusable given values
    fn resolve(self, estimated_seconds: u64) -> Option<f64> {
        match self {
            SpokenDuration::Given(seconds) if seconds.is_finite() && seconds > 0.0 => Some(seconds),
            SpokenDuration::Given(_) => None,
            SpokenDuration::Estimated if estimated_seconds > 0 => Some(estimated_seconds as f64),
            SpokenDuration::Estimated | SpokenDuration::Unknown => None,
        }
    }
}

/// Main evaluation engine that orchestrates all rules
pub struct EvaluationEngine {
    rules: Vec<Box<dyn CriterionRule>>,
    patterns: &'static PatternLibrary,
    sentiment_method: SentimentMethod,
    /// Whether rules run on the rayon pool
    parallel: bool,
}

impl EvaluationEngine {
    /// Create an engine using the process-wide sentiment backend
    pub fn new() -> Self {
        Self::with_backend(sentiment::backend())
    }

    /// Create an engine with an explicit sentiment backend
    pub fn with_backend(backend: Arc<dyn SentimentBackend>) -> Self {
        let sentiment_method = backend.method();
        let rules: Vec<Box<dyn CriterionRule>> = vec![
            Box::new(SalutationRule::new()),
            Box::new(KeywordPresenceRule::new()),
            Box::new(FlowRule::new()),
            Box::new(SpeechRateRule::new()),
            Box::new(GrammarRule::new()),
            Box::new(VocabularyRule::new()),
            Box::new(FillerWordsRule::new()),
            Box::new(SentimentRule::with_backend(backend)),
        ];

        Self {
            rules,
            patterns: global_pattern_library(),
            sentiment_method,
            parallel: false,
        }
    }

    /// Run the rules of each evaluation in parallel
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn sentiment_method(&self) -> SentimentMethod {
        self.sentiment_method
    }

    /// Evaluate a transcript. An empty transcript scores 0 with no criteria.
    pub fn evaluate(&self, transcript: &str, duration_seconds: Option<f64>) -> EvaluationResult {
        if transcript.is_empty() {
            return EvaluationResult::default();
        }

        let text = TextNormalizer::normalize(transcript);
        let input = RuleInput {
            text: &text,
            patterns: self.patterns,
            duration_seconds,
        };

        let mut scored: Vec<(Criterion, CriterionResult)> = if self.parallel {
            use rayon::prelude::*;

            self.rules
                .par_iter()
                .map(|rule| (rule.criterion(), rule.evaluate(&input)))
                .collect()
        } else {
            self.rules
                .iter()
                .map(|rule| (rule.criterion(), rule.evaluate(&input)))
                .collect()
        };
        scored.sort_by_key(|(criterion, _)| *criterion);

        let criteria: Vec<CriterionResult> = scored.into_iter().map(|(_, r)| r).collect();
        let total = ScoreCalculator::total(&criteria);

        tracing::debug!(
            words = text.word_count(),
            total,
            parallel = self.parallel,
            "transcript evaluated"
        );

        EvaluationResult { total, criteria }
    }

    /// Evaluate transcript text read from somewhere (a file, stdin).
    /// Surrounding whitespace is trimmed first.
    pub fn evaluate_source(
        &self,
        raw: &str,
        source: &str,
        duration: SpokenDuration,
    ) -> TranscriptReport {
        let transcript = raw.trim();
        let stats = TextNormalizer::normalize(transcript).stats();
        let duration_seconds = duration.resolve(stats.estimated_duration_seconds);

        TranscriptReport {
            source: source.to_string(),
            stats,
            duration_seconds,
            sentiment_method: self.sentiment_method,
            result: self.evaluate(transcript, duration_seconds),
        }
    }

    /// Read and evaluate a transcript file
    pub fn evaluate_file(&self, path: &Path, duration: SpokenDuration) -> Result<TranscriptReport> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript: {}", path.display()))?;
        Ok(self.evaluate_source(&raw, &path.display().to_string(), duration))
    }

    /// Evaluate multiple transcript files sequentially
    pub fn evaluate_many(
        &self,
        paths: &[PathBuf],
        duration: SpokenDuration,
    ) -> Vec<Result<TranscriptReport>> {
        paths.iter().map(|p| self.evaluate_file(p, duration)).collect()
    }

    /// Evaluate multiple transcript files in parallel using rayon
    pub fn evaluate_parallel(
        &self,
        paths: &[PathBuf],
        duration: SpokenDuration,
    ) -> Vec<Result<TranscriptReport>> {
        use rayon::prelude::*;

        paths
            .par_iter()
            .map(|p| self.evaluate_file(p, duration))
            .collect()
    }

    /// Get aggregate stats from multiple reports
    pub fn aggregate_stats(reports: &[TranscriptReport]) -> AggregateStats {
        if reports.is_empty() {
            return AggregateStats::default();
        }

        let totals: Vec<f64> = reports.iter().map(|r| r.result.total).collect();
        let sum: f64 = totals.iter().sum();

        AggregateStats {
            files_evaluated: reports.len(),
            average_total: sum / reports.len() as f64,
            min_total: totals.iter().copied().fold(f64::INFINITY, f64::min),
            max_total: totals.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl Default for EvaluationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics from multiple transcript evaluations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Number of transcripts evaluated
    pub files_evaluated: usize,
    /// Average total across all transcripts
    pub average_total: f64,
    /// Lowest total
    pub min_total: f64,
    /// Highest total
    pub max_total: f64,
}
