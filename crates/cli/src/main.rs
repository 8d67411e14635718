use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::organize::{organize_directory, FileOutcome, OrganizeOptions, OutcomeStatus};
use serde::Serialize;
use sorter_core::config;
use sorter_core::config::AppConfig;
use sorter_core::models::{CategoryLabel, FileDescriptor};
use sorter_core::pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; credentials may come from the config file instead.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Organize {
            dir,
            dry_run,
            json,
            conflict,
            provider,
            model,
        } => {
            apply_provider_overrides(&mut cfg, provider, model);
            if dry_run {
                cfg.organize.dry_run = true;
            }
            if let Some(conflict) = conflict {
                cfg.organize.conflict = conflict;
            }
            run_organize(cfg, dir, json).await
        }
        Commands::Classify {
            files,
            json,
            provider,
            model,
        } => {
            apply_provider_overrides(&mut cfg, provider, model);
            run_classify(cfg, files, json).await
        }
        Commands::Extract { file } => run_extract(cfg, file).await,
    }
}

#[derive(Parser)]
#[command(name = "ai-sorter")]
#[command(about = "Sorts a folder into subfolders named by an AI-assigned category", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every file directly inside DIR and move it into DIR/<category>
    Organize {
        /// Directory to sort (not recursive)
        dir: PathBuf,
        /// Only print what would happen
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// Output JSON report
        #[arg(long)]
        json: bool,
        /// Conflict policy: rename|skip|overwrite
        #[arg(long)]
        conflict: Option<String>,
        /// Override provider kind (gemini|openai|noop)
        #[arg(long)]
        provider: Option<String>,
        /// Override model name
        #[arg(long)]
        model: Option<String>,
    },
    /// Print the category of each file without moving anything
    Classify {
        /// Files to classify
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output JSON
        #[arg(long)]
        json: bool,
        /// Override provider kind (gemini|openai|noop)
        #[arg(long)]
        provider: Option<String>,
        /// Override model name
        #[arg(long)]
        model: Option<String>,
    },
    /// Print the text that would be sent to the model for FILE
    Extract { file: PathBuf },
}

fn apply_provider_overrides(cfg: &mut AppConfig, provider: Option<String>, model: Option<String>) {
    if let Some(kind) = provider {
        if kind != cfg.provider.kind {
            cfg.provider.kind = kind;
            cfg.provider.api_key = None;
            cfg.resolve_api_key();
        }
    }
    if let Some(model) = model {
        cfg.provider.model = model;
    }
}

async fn run_organize(cfg: AppConfig, dir: PathBuf, json: bool) -> Result<()> {
    let opts = OrganizeOptions::from_config(&cfg.organize)?;
    let classifier = pipeline::build_classifier(&cfg)?;

    let mut print_line = |idx: usize, total: usize, outcome: &FileOutcome| {
        if !json {
            println!("[{idx}/{total}] {}", describe(outcome));
        }
    };
    let report = organize_directory(&dir, &classifier, &opts, &mut print_line).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let s = &report.summary;
        println!(
            "{} files: {} moved, {} planned, {} skipped, {} left, {} failed",
            s.total, s.moved, s.planned, s.skipped, s.left, s.failed
        );
    }
    Ok(())
}

fn describe(outcome: &FileOutcome) -> String {
    let name = outcome
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dest = outcome
        .destination
        .as_ref()
        .map(|d| d.display().to_string())
        .unwrap_or_default();
    match outcome.status {
        OutcomeStatus::Moved => format!("{name} -> {dest}"),
        OutcomeStatus::Planned => format!("{name} => {dest} (dry run)"),
        OutcomeStatus::Skipped => format!(
            "{name}: skipped, {} already has that name",
            outcome.label.name
        ),
        OutcomeStatus::Left => format!("{name}: left in place ({})", outcome.label.name),
        OutcomeStatus::Failed => format!(
            "{name}: failed ({})",
            outcome.error.as_deref().unwrap_or("unknown error")
        ),
    }
}

#[derive(Serialize)]
struct ClassifiedFile {
    path: PathBuf,
    label: CategoryLabel,
}

async fn run_classify(cfg: AppConfig, files: Vec<PathBuf>, json: bool) -> Result<()> {
    let classifier = pipeline::build_classifier(&cfg)?;
    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file = FileDescriptor::new(path);
        let label = classifier.classify(&file).await;
        if !json {
            println!("{}\t{}", file.path.display(), label.name);
        }
        results.push(ClassifiedFile {
            path: file.path,
            label,
        });
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    Ok(())
}

async fn run_extract(cfg: AppConfig, file: PathBuf) -> Result<()> {
    let registry = sorter_core::extractor::ExtractorRegistry::with_defaults(cfg.extraction);
    let file = FileDescriptor::new(file);
    let content = tokio::task::spawn_blocking(move || registry.extract(&file)).await?;
    println!("{}", content.text);
    Ok(())
}
