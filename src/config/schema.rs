//! Config schema and deserialization

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root config structure for .introscorerc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Minimum total score (exit 1 if any transcript scores below)
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Spoken duration in seconds used when none is given on the command line
    #[serde(default)]
    pub duration: Option<f64>,

    /// Sentiment lexicon file (token<TAB>valence per line)
    #[serde(default)]
    pub lexicon: Option<PathBuf>,

    /// Rubric CSV shown alongside results
    #[serde(default)]
    pub rubric: Option<PathBuf>,

    /// Run the criterion rules in parallel for each transcript
    #[serde(default)]
    pub parallel: Option<bool>,

    /// Default tracing filter, e.g. "info" or "introscore=debug"
    #[serde(default)]
    pub log_level: Option<String>,

    /// Glob patterns for files/directories to exclude from directory scans
    #[serde(default)]
    pub ignore: Vec<String>,

    /// File name suffixes treated as transcripts (default: .txt)
    #[serde(default)]
    pub transcript_patterns: Vec<String>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_threshold: Option<f64>,
        cli_duration: Option<f64>,
        cli_lexicon: Option<&Path>,
        cli_rubric: Option<&Path>,
        cli_parallel: bool,
    ) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if cli_duration.is_some() {
            self.duration = cli_duration;
        }
        if let Some(lexicon) = cli_lexicon {
            self.lexicon = Some(lexicon.to_path_buf());
        }
        if let Some(rubric) = cli_rubric {
            self.rubric = Some(rubric.to_path_buf());
        }
        if cli_parallel {
            self.parallel = Some(true);
        }
        self
    }

    /// Make file references relative to the directory holding the config
    pub(crate) fn resolve_paths(&mut self, config_dir: &Path) {
        for path in [&mut self.lexicon, &mut self.rubric].into_iter().flatten() {
            if path.is_relative() {
                *path = config_dir.join(&*path);
            }
        }
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        if self.duration.is_none() {
            self.duration = base.duration;
        }
        if self.lexicon.is_none() {
            self.lexicon = base.lexicon;
        }
        if self.rubric.is_none() {
            self.rubric = base.rubric;
        }
        if self.parallel.is_none() {
            self.parallel = base.parallel;
        }
        if self.log_level.is_none() {
            self.log_level = base.log_level;
        }

        // Merge ignore patterns
        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.transcript_patterns.is_empty() {
            self.transcript_patterns = base.transcript_patterns;
        }
    }

    /// Get transcript file suffixes
    pub fn get_transcript_patterns(&self) -> Vec<&str> {
        if self.transcript_patterns.is_empty() {
            vec![".txt"]
        } else {
            self.transcript_patterns.iter().map(|s| s.as_str()).collect()
        }
    }

    pub fn parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }
}
