//! Rubric table loading
//!
//! A rubric is a CSV table with `criterion` and `weight` columns, an optional
//! `description` column and any number of extra columns. It is informational:
//! the engine scores with its own fixed weights, and [`Rubric::discrepancies`]
//! reports where the table disagrees with them.

use crate::Criterion;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RubricError {
    #[error("failed to read rubric {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed rubric CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("rubric is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("invalid weight {value:?} for criterion '{criterion}' on row {row}")]
    InvalidWeight {
        row: usize,
        criterion: String,
        value: String,
    },
}

/// One row of the rubric table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RubricEntry {
    pub criterion: String,
    pub description: Option<String>,
    pub weight: f64,
    /// Columns other than criterion, description and weight
    pub extras: BTreeMap<String, String>,
}

/// A rubric row whose weight differs from the engine's fixed weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightDiscrepancy {
    pub criterion: Criterion,
    pub rubric_weight: f64,
    pub engine_weight: f64,
}

/// Parsed rubric table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rubric {
    pub entries: Vec<RubricEntry>,
}

impl Rubric {
    /// Parse rubric CSV from a reader. Headers and cells are trimmed; header
    /// names match case-insensitively.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RubricError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_lowercase())
            .collect();
        let column = |name: &'static str| headers.iter().position(|h| h == name);

        let criterion_idx = column("criterion").ok_or(RubricError::MissingColumn("criterion"))?;
        let weight_idx = column("weight").ok_or(RubricError::MissingColumn("weight"))?;
        let description_idx = column("description");

        let mut entries = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let criterion = record.get(criterion_idx).unwrap_or_default().to_string();
            if criterion.is_empty() {
                continue;
            }

            let raw_weight = record.get(weight_idx).unwrap_or_default();
            let weight: f64 = raw_weight.parse().map_err(|_| RubricError::InvalidWeight {
                row: i + 1,
                criterion: criterion.clone(),
                value: raw_weight.to_string(),
            })?;

            let description = description_idx
                .and_then(|idx| record.get(idx))
                .filter(|d| !d.is_empty())
                .map(str::to_string);

            let extras = headers
                .iter()
                .enumerate()
                .filter(|(idx, _)| {
                    *idx != criterion_idx && *idx != weight_idx && Some(*idx) != description_idx
                })
                .filter_map(|(idx, name)| record.get(idx).map(|v| (name.clone(), v.to_string())))
                .collect();

            entries.push(RubricEntry {
                criterion,
                description,
                weight,
                extras,
            });
        }

        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the weights listed in the table
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Rows that name an engine criterion but give it a different weight.
    /// Rows that name no known criterion are skipped.
    pub fn discrepancies(&self) -> Vec<WeightDiscrepancy> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let criterion = Criterion::from_label(&entry.criterion)?;
                let engine_weight = criterion.weight();
                ((entry.weight - engine_weight).abs() > f64::EPSILON).then_some(
                    WeightDiscrepancy {
                        criterion,
                        rubric_weight: entry.weight,
                        engine_weight,
                    },
                )
            })
            .collect()
    }
}

/// Load a rubric CSV file
pub fn load_rubric(path: &Path) -> Result<Rubric, RubricError> {
    let file = std::fs::File::open(path).map_err(|source| RubricError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rubric = Rubric::from_reader(file)?;
    tracing::debug!(rubric = %path.display(), rows = rubric.entries.len(), "rubric loaded");
    Ok(rubric)
}
