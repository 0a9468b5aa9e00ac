//! JSON reporter for machine-readable output

use crate::analyzer::engine::AggregateStats;
use crate::TranscriptReport;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| fallback.to_string())
    }

    /// Report a single transcript as JSON
    pub fn report(&self, report: &TranscriptReport) -> String {
        self.render(report, "{}")
    }

    /// Report multiple transcripts as a JSON array
    pub fn report_many(&self, reports: &[TranscriptReport]) -> String {
        self.render(reports, "[]")
    }

    /// Report with summary
    pub fn report_with_summary(
        &self,
        reports: &[TranscriptReport],
        stats: &AggregateStats,
    ) -> String {
        let output = JsonOutput {
            results: reports,
            summary: stats,
        };
        self.render(&output, "{}")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [TranscriptReport],
    summary: &'a AggregateStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Criterion, CriterionResult, Details, EvaluationResult, SentimentMethod, TranscriptStats,
    };

    fn make_report(source: &str, score: f64) -> TranscriptReport {
        let mut details = Details::new();
        details.insert("level".into(), "Good".into());
        let criteria = vec![CriterionResult::new(Criterion::Salutation, score, details)];
        TranscriptReport {
            source: source.to_string(),
            stats: TranscriptStats {
                word_count: 12,
                sentence_count: 2,
                estimated_duration_seconds: 8,
            },
            duration_seconds: Some(30.0),
            sentiment_method: SentimentMethod::Heuristic,
            result: EvaluationResult {
                total: score,
                criteria,
            },
        }
    }

    #[test]
    fn test_json_single_report_has_expected_keys() {
        let json = JsonReporter::new().report(&make_report("intro.txt", 4.0));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["source"], "intro.txt");
        assert_eq!(parsed["stats"]["wordCount"], 12);
        assert_eq!(parsed["durationSeconds"], 30.0);
        assert_eq!(parsed["sentimentMethod"], "Heuristic");
        assert_eq!(parsed["result"]["total"], 4.0);

        let criterion = &parsed["result"]["criteria"][0];
        assert_eq!(criterion["name"], "Salutation Level");
        assert_eq!(criterion["score"], 4.0);
        assert_eq!(criterion["weight"], 5.0);
        assert_eq!(criterion["details"]["level"], "Good");
    }

    #[test]
    fn test_json_pretty_output() {
        let json = JsonReporter::new().pretty().report(&make_report("intro.txt", 4.0));
        assert!(json.contains('\n'), "pretty JSON should have newlines");
        assert!(json.contains("  "), "pretty JSON should have indentation");
    }

    #[test]
    fn test_json_report_many() {
        let json = JsonReporter::new().report_many(&[
            make_report("a.txt", 5.0),
            make_report("b.txt", 2.0),
        ]);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["source"], "a.txt");
        assert_eq!(arr[1]["source"], "b.txt");
    }

    #[test]
    fn test_json_report_with_summary() {
        let reports = [make_report("a.txt", 5.0), make_report("b.txt", 2.0)];
        let stats = AggregateStats {
            files_evaluated: 2,
            average_total: 3.5,
            min_total: 2.0,
            max_total: 5.0,
        };

        let json = JsonReporter::new().report_with_summary(&reports, &stats);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let summary = &parsed["summary"];
        assert_eq!(summary["filesEvaluated"], 2);
        assert_eq!(summary["averageTotal"], 3.5);
        assert_eq!(summary["minTotal"], 2.0);
        assert_eq!(summary["maxTotal"], 5.0);
        assert_eq!(parsed["results"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_json_report_many_empty() {
        let json = JsonReporter::new().report_many(&[]);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.as_array().unwrap().is_empty());
    }
}
