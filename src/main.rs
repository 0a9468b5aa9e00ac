//! introscore: Self-Introduction Transcript Scorer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use introscore::analyzer::{EvaluationEngine, SpokenDuration};
use introscore::config::{build_ignore_set, is_ignored, load_config, Config, CONFIG_FILENAME};
use introscore::reporter::{ConsoleReporter, JsonReporter};
use introscore::rubric::{load_rubric, Rubric};
use introscore::{sentiment, telemetry, TranscriptReport};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// introscore: score spoken self-introduction transcripts against a fixed rubric
#[derive(Parser, Debug)]
#[command(name = "introscore")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Transcript file, directory of transcripts, or "-" for stdin
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Spoken duration in seconds (default: 52, or the config value)
    #[arg(long, short)]
    duration: Option<f64>,

    /// Estimate the duration from the word count when none is given
    #[arg(long)]
    estimate_duration: bool,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Quiet mode (just the totals)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (show criterion details)
    #[arg(long, short)]
    verbose: bool,

    /// Minimum total score (exit 1 if any transcript scores below)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// Sentiment lexicon file (default: config, then $INTROSCORE_LEXICON)
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Rubric CSV to display alongside the scores
    #[arg(long)]
    rubric: Option<PathBuf>,

    /// Path to config file (default: search .introscorerc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run the criterion rules of each transcript in parallel
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .introscorerc.json with sensible defaults
    Init {
        /// Minimum total score (e.g. 70)
        #[arg(long)]
        threshold: Option<f64>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(Commands::Init { threshold, dir }) = args.command {
        return run_init(threshold, dir.as_deref());
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("A transcript path is required");
    };
    let from_stdin = path.as_os_str() == "-";

    // Resolve work directory for config search
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let work_dir = if from_stdin {
        cwd.clone()
    } else if path.is_file() {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => cwd.clone(),
        }
    } else {
        path.clone()
    };

    // Load config (CLI flags override config file)
    let config = load_config(&work_dir, args.config.as_deref())?.merge_with_cli(
        args.threshold,
        args.duration,
        args.lexicon.as_deref(),
        args.rubric.as_deref(),
        args.parallel,
    );

    telemetry::init(config.log_level.as_deref())?;

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    // Sentiment backend is chosen once, before any evaluation
    sentiment::init_backend(config.lexicon.as_deref());
    let engine = EvaluationEngine::new().with_parallel(config.parallel());

    let duration = match config.duration {
        Some(seconds) => SpokenDuration::Given(seconds),
        None if args.estimate_duration => SpokenDuration::Estimated,
        None => SpokenDuration::Unknown,
    };

    let rubric = match config.rubric.as_deref() {
        Some(path) => Some(load_rubric(path)?),
        None => None,
    };

    let (reports, had_errors) = if from_stdin {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read transcript from stdin")?;
        (vec![engine.evaluate_source(&raw, "stdin", duration)], false)
    } else {
        let files = collect_transcript_files(&path, &config)?;
        if files.is_empty() {
            eprintln!("{}: No transcript files found", "Warning".yellow());
            return Ok(ExitCode::from(2));
        }
        evaluate_files(&engine, &files, duration, args.quiet)
    };

    if reports.is_empty() {
        eprintln!("{}: All transcripts failed to evaluate", "Error".red());
        return Ok(ExitCode::from(2));
    }

    // Output results
    if args.json {
        let mut reporter = JsonReporter::new();
        if args.pretty {
            reporter = reporter.pretty();
        }
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            let stats = EvaluationEngine::aggregate_stats(&reports);
            println!("{}", reporter.report_with_summary(&reports, &stats));
        }
        if let Some(ref rubric) = rubric {
            log_discrepancies(rubric);
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for report in &reports {
            reporter.report_quiet(report);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }

        if let Some(ref rubric) = rubric {
            reporter.report_rubric(rubric);
        }

        if reports.len() == 1 {
            reporter.report(&reports[0]);
        } else {
            let stats = EvaluationEngine::aggregate_stats(&reports);
            reporter.report_many(&reports, &stats);
        }
    }

    // Check threshold (config or CLI)
    if let Some(threshold) = config.threshold {
        let failing: Vec<&TranscriptReport> = reports
            .iter()
            .filter(|r| r.result.total < threshold)
            .collect();

        if !failing.is_empty() {
            if !args.quiet && !args.json {
                for report in &failing {
                    eprintln!(
                        "\n{}: {} scored {:.1}, below threshold {}",
                        "Failed".red().bold(),
                        report.source,
                        report.result.total,
                        threshold
                    );
                }
            }
            return Ok(ExitCode::from(1));
        }
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn run_init(threshold: Option<f64>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold_value = threshold.unwrap_or(70.0);

    let json = format!(
        r#"{{
  "threshold": {},
  "parallel": false,
  "logLevel": "warn",
  "transcriptPatterns": [".txt"],
  "ignore": [
    "**/drafts/**",
    "**/archive/**"
  ]
}}
"#,
        threshold_value
    );

    std::fs::write(&config_path, json)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        config_path.display(),
        threshold_value
    );
    Ok(ExitCode::SUCCESS)
}

fn log_discrepancies(rubric: &Rubric) {
    for d in rubric.discrepancies() {
        tracing::info!(
            criterion = d.criterion.display_name(),
            rubric_weight = d.rubric_weight,
            engine_weight = d.engine_weight,
            "rubric weight differs from scoring weight"
        );
    }
}

fn collect_transcript_files(path: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    if path.is_file() {
        if let Some(ref set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let patterns = config.get_transcript_patterns();
    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if entry.file_type().is_file() && is_transcript_file(file_path, &patterns) {
            if let Some(ref set) = ignore_set {
                if is_ignored(file_path, set) {
                    continue;
                }
            }
            files.push(file_path.to_path_buf());
        }
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}

fn is_transcript_file(path: &Path, patterns: &[&str]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    patterns.iter().any(|p| name.ends_with(p))
}

/// Evaluate transcript files in parallel, reporting failures as they happen
fn evaluate_files(
    engine: &EvaluationEngine,
    files: &[PathBuf],
    duration: SpokenDuration,
    quiet: bool,
) -> (Vec<TranscriptReport>, bool) {
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    let had_errors = AtomicBool::new(false);

    let reports: Vec<_> = files
        .par_iter()
        .filter_map(|file| match engine.evaluate_file(file, duration) {
            Ok(report) => Some(report),
            Err(e) => {
                had_errors.store(true, Ordering::Relaxed);
                if !quiet {
                    eprintln!(
                        "{}: Failed to evaluate {}: {:#}",
                        "Error".red(),
                        file.display(),
                        e
                    );
                }
                None
            }
        })
        .collect();

    (reports, had_errors.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transcript_file() {
        let patterns = [".txt"];
        assert!(is_transcript_file(Path::new("intro.txt"), &patterns));
        assert!(is_transcript_file(Path::new("class9/ria.txt"), &patterns));
        assert!(is_transcript_file(Path::new("./class9/ria.txt"), &patterns));
        assert!(is_transcript_file(Path::new("../class9/ria.txt"), &patterns));
        assert!(!is_transcript_file(Path::new("intro.md"), &patterns));
        assert!(!is_transcript_file(Path::new("notes/txt"), &patterns));
    }

    #[test]
    fn test_is_transcript_file_custom_patterns() {
        let patterns = [".transcript", "_intro.md"];
        assert!(is_transcript_file(Path::new("ria.transcript"), &patterns));
        assert!(is_transcript_file(Path::new("ria_intro.md"), &patterns));
        assert!(!is_transcript_file(Path::new("ria.txt"), &patterns));
    }
}
