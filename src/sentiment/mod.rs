//! Sentiment backends for the sentiment criterion
//!
//! Two interchangeable backends produce a compound polarity in [-1, 1]:
//! a lexicon backend driven by a polarity lexicon file, and a fixed-word-list
//! heuristic used when no lexicon is available. The process-wide backend is
//! selected once ([`init_backend`]) and reused for every evaluation.

pub mod heuristic;
pub mod lexicon;
mod vader;

pub use heuristic::HeuristicBackend;
pub use lexicon::{LexiconBackend, LexiconError};

use crate::parser::NormalizedText;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Environment variable naming a lexicon file
pub const LEXICON_ENV: &str = "INTROSCORE_LEXICON";

/// Which backend produced a compound score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentMethod {
    Lexicon,
    Heuristic,
}

impl std::fmt::Display for SentimentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentMethod::Lexicon => write!(f, "Lexicon"),
            SentimentMethod::Heuristic => write!(f, "Heuristic"),
        }
    }
}

/// Source of a compound polarity score
pub trait SentimentBackend: Send + Sync {
    /// Backend identity, reported alongside the score
    fn method(&self) -> SentimentMethod;

    /// Compound polarity of the text, in [-1, 1]
    fn compound(&self, text: &NormalizedText<'_>) -> f64;
}

/// Pick a backend: the lexicon at `lexicon` (or `$INTROSCORE_LEXICON`) when it
/// loads, the heuristic otherwise. Does not touch the process-wide selection.
pub fn select_backend(lexicon: Option<&Path>) -> Arc<dyn SentimentBackend> {
    let path = lexicon
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(LEXICON_ENV).map(PathBuf::from));

    let Some(path) = path else {
        tracing::debug!("no sentiment lexicon configured; using heuristic backend");
        return Arc::new(HeuristicBackend::new());
    };

    match LexiconBackend::load(&path) {
        Ok(backend) => {
            tracing::info!(
                lexicon = %path.display(),
                entries = backend.len(),
                "sentiment lexicon loaded"
            );
            Arc::new(backend)
        }
        Err(e) => {
            tracing::warn!(error = %e, "sentiment lexicon unavailable; falling back to heuristic backend");
            Arc::new(HeuristicBackend::new())
        }
    }
}

static BACKEND: OnceLock<Arc<dyn SentimentBackend>> = OnceLock::new();

/// Select the process-wide backend. Only the first call loads anything; later
/// calls return the backend already chosen, whatever `lexicon` they pass.
pub fn init_backend(lexicon: Option<&Path>) -> Arc<dyn SentimentBackend> {
    BACKEND.get_or_init(|| select_backend(lexicon)).clone()
}

/// The process-wide backend, initialised from the environment if nobody did so yet
pub fn backend() -> Arc<dyn SentimentBackend> {
    init_backend(None)
}
