use clap::{Parser, Subcommand, ValueEnum};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tabled::{Table, settings::Style};

use policydrift::{
    AssessmentTableRow, ChangeAssessment, ChangeEngine, ChangeMonitor, EngineConfig,
    InMemorySnapshotStore, MonitorEntry, MonitorReport, PolicyDriftError, Snapshot, Tier,
    format_document_diff,
};

#[derive(Parser)]
#[command(name = "policydrift")]
#[command(about = "Detect significant changes in published policy documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file (YAML). Built-in defaults are used when omitted.
    #[arg(short, long, env = "POLICYDRIFT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two text extractions of the same document
    Compare {
        /// Previous extraction (the last persisted baseline)
        previous: PathBuf,

        /// Current extraction
        current: PathBuf,

        /// URL the extractions belong to (defaults to the current file path)
        #[arg(short, long)]
        url: Option<String>,

        /// Output format: table, yaml, json
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,

        /// Exit with status 1 when the change should be notified
        #[arg(long)]
        fail_on_change: bool,
    },

    /// Print the normalized form of an extraction
    Normalize {
        /// Extraction to normalize
        file: PathBuf,

        /// Print one sentence per line
        #[arg(long)]
        sentences: bool,
    },

    /// Show the sentence-level diff between two extractions
    Diff {
        /// Previous extraction
        previous: PathBuf,

        /// Current extraction
        current: PathBuf,
    },

    /// Replay a JSON array of snapshots through an in-memory snapshot store
    Replay {
        /// JSON file holding an array of snapshots
        snapshots: PathBuf,

        /// JSON file holding already persisted baseline snapshots
        #[arg(short, long)]
        baseline: Option<PathBuf>,

        /// Output format: table, yaml, json
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,

        /// Exit with status 1 when any snapshot should be notified
        #[arg(long)]
        fail_on_change: bool,
    },

    /// Print the effective engine configuration as YAML
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Yaml,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("policydrift=debug,info")
    } else {
        EnvFilter::new("policydrift=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(e);
            ExitCode::FAILURE
        }
    }
}

fn print_error(err: Box<dyn std::error::Error>) {
    if let Some(PolicyDriftError::InvalidPattern { pattern, source }) = err.downcast_ref::<PolicyDriftError>() {
        eprintln!("\n\x1b[31m✗ Invalid pattern\x1b[0m '{}'", pattern);
        eprintln!("  {}", source);
        eprintln!("\n\x1b[33mSuggestion:\x1b[0m");
        eprintln!("  Patterns use Rust regex syntax and are matched case-insensitively.");
        eprintln!();
        return;
    }

    eprintln!("\x1b[31m✗ Error:\x1b[0m {}", err);
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading engine config from {}", path.display());
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Config => {
            print!("{}", config.to_yaml()?);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Normalize { file, sentences } => {
            let engine = ChangeEngine::new(config)?;
            let content = tokio::fs::read_to_string(&file).await?;
            if sentences {
                for sentence in engine.sentences(&content) {
                    println!("{}", sentence);
                }
            } else {
                println!("{}", engine.normalizer().normalize(&content));
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Diff { previous, current } => {
            let engine = ChangeEngine::new(config)?;
            let previous = tokio::fs::read_to_string(&previous).await?;
            let current = tokio::fs::read_to_string(&current).await?;
            println!("{}", format_document_diff(&engine, &previous, &current));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Compare { previous, current, url, output, fail_on_change } => {
            let engine = ChangeEngine::new(config)?;
            let url = url.unwrap_or_else(|| current.display().to_string());
            let previous = read_snapshot(&previous, &url).await?;
            let current = read_snapshot(&current, &url).await?;

            let assessment = engine.assess(Some(&previous), &current);
            print_assessment(&current, &assessment, output)?;

            Ok(exit_code(fail_on_change && assessment.should_notify()))
        }

        Commands::Replay { snapshots, baseline, output, fail_on_change } => {
            let engine = Arc::new(ChangeEngine::new(config)?);
            let snapshots = read_snapshot_list(&snapshots).await?;
            let store = match baseline {
                Some(path) => InMemorySnapshotStore::with_snapshots(read_snapshot_list(&path).await?),
                None => InMemorySnapshotStore::new(),
            };

            info!("Replaying {} snapshots", snapshots.len());
            let monitor = ChangeMonitor::new(engine, Arc::new(store));
            let report = monitor.process_batch(snapshots).await;
            print_report(&report, output)?;

            if !report.is_clean() {
                return Err(format!("{} snapshot histories failed", report.failures.len()).into());
            }

            Ok(exit_code(fail_on_change && !report.notifications().is_empty()))
        }
    }
}

fn exit_code(changed: bool) -> ExitCode {
    if changed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

async fn read_snapshot(path: &Path, url: &str) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let content = tokio::fs::read_to_string(path).await?;
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut snapshot = Snapshot::new(url, title, content);
    if let Ok(modified) = tokio::fs::metadata(path).await.and_then(|m| m.modified()) {
        snapshot = snapshot.with_last_modified(DateTime::<Utc>::from(modified));
    }
    Ok(snapshot)
}

async fn read_snapshot_list(path: &Path) -> Result<Vec<Snapshot>, Box<dyn std::error::Error>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let snapshots: Vec<Snapshot> = serde_json::from_str(&content)?;
    Ok(snapshots)
}

fn print_assessment(
    current: &Snapshot,
    assessment: &ChangeAssessment,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(assessment)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(assessment)?),
        OutputFormat::Table => {
            let entry = MonitorEntry {
                url: current.url.clone(),
                extracted_at: current.extracted_at,
                assessment: assessment.clone(),
                persisted: assessment.should_persist(),
            };
            let mut table = Table::new(vec![AssessmentTableRow::from(&entry)]);
            table.with(Style::markdown());
            println!("{}", table);

            if let Some(signals) = &assessment.signals {
                println!("\nSignals:");
                match signals.structural_similarity {
                    Some(s) => println!("  structural similarity  {:.3}", s),
                    None => println!("  structural similarity  n/a (empty cores)"),
                }
                println!("  structural only        {}", signals.structural_only);
                println!("  added / removed        {} / {}", signals.added, signals.removed);
                match signals.policy_similarity {
                    Some(s) => println!("  policy similarity      {:.3}", s),
                    None => println!("  policy similarity      n/a (no policy text)"),
                }
                println!("  real change confirmed  {}", signals.real_change_confirmed);
                if !signals.critical_terms.is_empty() {
                    let terms: Vec<&str> = signals.critical_terms.iter().map(String::as_str).collect();
                    println!("  critical terms         {}", terms.join(", "));
                }
            }
        }
    }
    Ok(())
}

fn print_report(report: &MonitorReport, output: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(report)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            if report.entries.is_empty() {
                println!("No snapshots to display");
            } else {
                let rows: Vec<AssessmentTableRow> = report.entries.iter().map(AssessmentTableRow::from).collect();
                let mut table = Table::new(rows);
                table.with(Style::markdown());
                println!("{}", table);
            }

            let summary = report.summary();
            println!("\nSummary:");
            for tier in Tier::ALL {
                if let Some(count) = summary.get(&tier) {
                    println!("  {} {} {}", tier.symbol(), count, tier.as_str());
                }
            }
            println!("  {} notification(s), {} snapshot(s) persisted", report.notifications().len(), report.persisted_count());

            for failure in &report.failures {
                println!("  \x1b[31m✗\x1b[0m {}: {}", failure.url, failure.error);
            }
        }
    }
    Ok(())
}
