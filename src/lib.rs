//! introscore: rubric scorer for spoken self-introduction transcripts
//!
//! This library scores a transcript against a fixed eight-criterion rubric
//! (salutation, keyword coverage, flow, speech rate, grammar, vocabulary,
//! filler words, sentiment) and returns a total out of 100 with a
//! per-criterion breakdown.

pub mod analyzer;
pub mod config;
pub mod parser;
pub mod reporter;
pub mod rubric;
pub mod sentiment;
pub mod telemetry;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use parser::TranscriptStats;
pub use sentiment::SentimentMethod;

/// Spoken duration substituted when none is given, or when it is zero or negative.
pub const DEFAULT_DURATION_SECONDS: f64 = 52.0;

/// Rubric criteria in canonical report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Criterion {
    Salutation,
    KeywordPresence,
    Flow,
    SpeechRate,
    Grammar,
    Vocabulary,
    FillerWords,
    Sentiment,
}

impl Criterion {
    /// All criteria, in the order they appear in a report
    pub const ALL: [Criterion; 8] = [
        Criterion::Salutation,
        Criterion::KeywordPresence,
        Criterion::Flow,
        Criterion::SpeechRate,
        Criterion::Grammar,
        Criterion::Vocabulary,
        Criterion::FillerWords,
        Criterion::Sentiment,
    ];

    /// Fixed weight (maximum score). Weights sum to 100.
    pub fn weight(self) -> f64 {
        match self {
            Criterion::Salutation => 5.0,
            Criterion::KeywordPresence => 30.0,
            Criterion::Flow => 5.0,
            Criterion::SpeechRate => 10.0,
            Criterion::Grammar => 10.0,
            Criterion::Vocabulary => 10.0,
            Criterion::FillerWords => 15.0,
            Criterion::Sentiment => 15.0,
        }
    }

    /// Name used in reports
    pub fn display_name(self) -> &'static str {
        match self {
            Criterion::Salutation => "Salutation Level",
            Criterion::KeywordPresence => "Keyword Presence",
            Criterion::Flow => "Flow (Order)",
            Criterion::SpeechRate => "Speech Rate (WPM)",
            Criterion::Grammar => "Grammar Errors",
            Criterion::Vocabulary => "Vocabulary (TTR)",
            Criterion::FillerWords => "Filler Word Rate",
            Criterion::Sentiment => "Sentiment",
        }
    }

    /// Look up a criterion by display name or kebab-case key (case-insensitive)
    pub fn from_label(label: &str) -> Option<Criterion> {
        let wanted = label.trim().to_lowercase();
        Criterion::ALL.into_iter().find(|c| {
            c.display_name().to_lowercase() == wanted || c.to_string() == wanted
        })
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criterion::Salutation => write!(f, "salutation"),
            Criterion::KeywordPresence => write!(f, "keyword-presence"),
            Criterion::Flow => write!(f, "flow"),
            Criterion::SpeechRate => write!(f, "speech-rate"),
            Criterion::Grammar => write!(f, "grammar"),
            Criterion::Vocabulary => write!(f, "vocabulary"),
            Criterion::FillerWords => write!(f, "filler-words"),
            Criterion::Sentiment => write!(f, "sentiment"),
        }
    }
}

/// A single diagnostic value attached to a criterion result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl From<bool> for DetailValue {
    fn from(value: bool) -> Self {
        DetailValue::Bool(value)
    }
}

impl From<usize> for DetailValue {
    fn from(value: usize) -> Self {
        DetailValue::Integer(value as i64)
    }
}

impl From<f64> for DetailValue {
    fn from(value: f64) -> Self {
        DetailValue::Number(value)
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        DetailValue::Text(value.to_string())
    }
}

impl From<String> for DetailValue {
    fn from(value: String) -> Self {
        DetailValue::Text(value)
    }
}

impl From<Vec<String>> for DetailValue {
    fn from(value: Vec<String>) -> Self {
        DetailValue::List(value)
    }
}

impl std::fmt::Display for DetailValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetailValue::Null => write!(f, "null"),
            DetailValue::Bool(b) => write!(f, "{}", b),
            DetailValue::Integer(n) => write!(f, "{}", n),
            DetailValue::Number(n) => write!(f, "{}", n),
            DetailValue::Text(s) => write!(f, "{}", s),
            DetailValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Diagnostic evidence for a criterion, keyed by name
pub type Details = BTreeMap<String, DetailValue>;

/// Score for one rubric criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    /// Display name of the criterion
    pub name: String,
    /// Points awarded (0..=weight)
    pub score: f64,
    /// Maximum points for this criterion
    pub weight: f64,
    /// Evidence behind the score; never used for control flow
    pub details: Details,
}

impl CriterionResult {
    pub fn new(criterion: Criterion, score: f64, details: Details) -> Self {
        Self {
            name: criterion.display_name().to_string(),
            score,
            weight: criterion.weight(),
            details,
        }
    }

    /// Fraction of the weight earned (0.0-1.0)
    pub fn ratio(&self) -> f64 {
        if self.weight > 0.0 {
            self.score / self.weight
        } else {
            0.0
        }
    }
}

/// Total score with the per-criterion breakdown
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Sum of all criterion scores (0-100)
    pub total: f64,
    /// Criterion results in canonical order; empty for an empty transcript
    pub criteria: Vec<CriterionResult>,
}

impl EvaluationResult {
    /// Look up a criterion result by criterion
    pub fn criterion(&self, criterion: Criterion) -> Option<&CriterionResult> {
        self.criteria
            .iter()
            .find(|c| c.name == criterion.display_name())
    }
}

/// Evaluation of one transcript together with where it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptReport {
    /// File path, or "stdin"
    pub source: String,
    /// Word/sentence counts of the transcript
    pub stats: TranscriptStats,
    /// Duration handed to the engine (None means the default was used)
    pub duration_seconds: Option<f64>,
    /// Sentiment backend that produced the sentiment score
    pub sentiment_method: SentimentMethod,
    /// The evaluation itself
    pub result: EvaluationResult,
}

/// Public API: evaluate a transcript with the process-wide engine defaults.
///
/// * `transcript` - raw transcript text
/// * `duration_seconds` - spoken duration; `None`, zero or negative uses 52 seconds
pub fn evaluate_transcript(transcript: &str, duration_seconds: Option<f64>) -> EvaluationResult {
    analyzer::EvaluationEngine::new().evaluate(transcript, duration_seconds)
}
