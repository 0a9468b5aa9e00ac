//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::rubric::Rubric;
use crate::{CriterionResult, DetailValue, TranscriptReport};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single transcript
    pub fn report(&self, report: &TranscriptReport) {
        self.print_header(report);

        if report.result.criteria.is_empty() {
            println!("   {}", "Empty transcript - nothing to score".yellow());
            println!();
            return;
        }

        self.print_score(report);
        self.print_breakdown(report);
        self.print_recommendations(report);
        println!();
    }

    /// Report multiple transcripts with summary
    pub fn report_many(&self, reports: &[TranscriptReport], stats: &AggregateStats) {
        for report in reports {
            self.report(report);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// Report in quiet mode (just the total)
    pub fn report_quiet(&self, report: &TranscriptReport) {
        println!(
            "{}: {}",
            report.source,
            self.colorize_total(report.result.total, &format!("{:.1}", report.result.total))
        );
    }

    /// Show the rubric table and where its weights differ from the engine's
    pub fn report_rubric(&self, rubric: &Rubric) {
        println!("   {}", "Rubric:".bold());
        for entry in &rubric.entries {
            let description = entry.description.as_deref().unwrap_or("");
            println!(
                "   {:>5} {} {}",
                format!("{:.0}", entry.weight),
                entry.criterion,
                description.dimmed()
            );
        }

        let discrepancies = rubric.discrepancies();
        if !discrepancies.is_empty() {
            println!(
                "   {}",
                "Rubric weights are informational; scoring uses fixed weights:".dimmed()
            );
            for d in discrepancies {
                println!(
                    "   {} {}: rubric {} vs engine {}",
                    "⚠".yellow(),
                    d.criterion.display_name(),
                    d.rubric_weight,
                    d.engine_weight
                );
            }
        }
        println!();
    }

    fn print_header(&self, report: &TranscriptReport) {
        println!();
        println!(
            "{}",
            format!("🎤 Introduction Score: {}", report.source).bold()
        );
        let duration = match report.duration_seconds {
            Some(seconds) => format!("{:.0}s", seconds),
            None => "default".to_string(),
        };
        println!(
            "   Words: {} | Sentences: {} | Duration: {} | Sentiment: {}",
            report.stats.word_count, report.stats.sentence_count, duration, report.sentiment_method
        );
        println!();
    }

    fn print_score(&self, report: &TranscriptReport) {
        let total = report.result.total;
        println!("   Score: {}", self.create_score_bar(total));
        println!(
            "   {}",
            ScoreCalculator::rating_description(total).dimmed()
        );
        println!();
    }

    fn print_breakdown(&self, report: &TranscriptReport) {
        println!("   {}", "Score Breakdown:".bold());

        for criterion in &report.result.criteria {
            let bar = self.create_mini_bar(criterion.score, criterion.weight);
            let score_str = format!("{:>4.1}/{:<2}", criterion.score, criterion.weight);
            let colored_score = if criterion.ratio() >= 0.8 {
                score_str.green()
            } else if criterion.ratio() >= 0.6 {
                score_str.yellow()
            } else {
                score_str.red()
            };
            println!("   {} {} {}", bar, colored_score, criterion.name);

            if self.verbose {
                self.print_details(criterion);
            }
        }
        println!();
    }

    fn print_details(&self, criterion: &CriterionResult) {
        for (key, value) in &criterion.details {
            let value = match value {
                DetailValue::List(items) if items.is_empty() => "none".to_string(),
                other => other.to_string(),
            };
            println!("       {} {}: {}", "↳".dimmed(), key.dimmed(), value);
        }
    }

    fn print_recommendations(&self, report: &TranscriptReport) {
        let recs = ScoreCalculator::recommendations(&report.result);
        if recs.is_empty() {
            return;
        }

        println!("   {}", "Recommendations:".bold());
        for rec in recs {
            println!("   {} {}", "→".cyan(), rec);
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Transcripts scored: {}",
            stats.files_evaluated.to_string().bold()
        );
        println!(
            "   Average total:      {}",
            self.colorize_total(stats.average_total, &format!("{:.1}", stats.average_total))
        );
        println!(
            "   Lowest / highest:   {:.1} / {:.1}",
            stats.min_total, stats.max_total
        );
        println!();
    }

    fn colorize_total(&self, total: f64, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        if total >= 80.0 {
            text.green().bold().to_string()
        } else if total >= 60.0 {
            text.yellow().to_string()
        } else {
            text.red().to_string()
        }
    }

    fn create_score_bar(&self, total: f64) -> String {
        let filled = filled_cells(total, 100.0, 20);
        let bar = format!(
            "[{}{}] {:>5.1}/100",
            "█".repeat(filled),
            "░".repeat(20 - filled),
            total
        );
        self.colorize_total(total, &bar)
    }

    fn create_mini_bar(&self, score: f64, max: f64) -> String {
        let filled = filled_cells(score, max, 10);
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(10 - filled))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of filled cells out of `width` for `value` out of `max`
fn filled_cells(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    let fraction = (value / max).clamp(0.0, 1.0);
    ((fraction * width as f64).floor() as usize).min(width)
}
