//! Analyzer module - transcript scoring engine

pub mod engine;
pub mod rules;
pub mod scoring;

pub use engine::{AggregateStats, EvaluationEngine, SpokenDuration};
pub use scoring::ScoreCalculator;
