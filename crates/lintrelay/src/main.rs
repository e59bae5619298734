//! lintrelay - Relay an external static analyzer's findings into editors
//!
//! lintrelay runs clang-tidy against a single source file, parses the
//! report into structured diagnostics, and renders the report through a
//! layered chain of user-defined regex filters. Editor plugins embed the
//! library; this binary drives the same pipeline from a terminal.

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use lintrelay::analyzer::ProcessInvoker;
use lintrelay::bridge::EditorBridge;
use lintrelay::config::{self, EngineConfig};
use lintrelay::engine::Engine;
use lintrelay::files::OsFiles;
use lintrelay::filters::FilterStore;
use lintrelay::sink::ConsoleSink;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "lintrelay", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Analyzer executable (default: clang-tidy next to this binary)
    #[arg(long, global = true)]
    analyzer: Option<PathBuf>,

    /// Base filter file (default: .lintrelay-filters next to this binary)
    #[arg(long, global = true)]
    base_filters: Option<PathBuf>,

    /// Show each finding as a structured record
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Subcommands
#[derive(Debug, Subcommand)]
enum Command {
    /// Run the analyzer against a file and print the filtered report
    Check {
        /// Source file to analyze
        file: PathBuf,

        /// Exit non-zero when the run produces findings
        #[arg(long)]
        deny_findings: bool,
    },
    /// Print the merged filter chain that applies to a file
    Filters {
        /// Source file the chain would apply to
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lintrelay=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let install_dir = config::install_dir()?;
    let mut config = EngineConfig::for_install_dir(&install_dir);
    if let Some(analyzer) = args.analyzer {
        config.analyzer = analyzer;
    }
    if let Some(base_filters) = args.base_filters {
        config.base_filters = base_filters;
    }

    match args.command {
        Command::Check {
            file,
            deny_findings,
        } => run_check(config, file, deny_findings, args.verbose).await,
        Command::Filters { file } => run_filters(config, file),
    }
}

async fn run_check(
    config: EngineConfig,
    file: PathBuf,
    deny_findings: bool,
    verbose: bool,
) -> Result<()> {
    if !file.exists() {
        eyre::bail!("source file not found: {}", file.display());
    }
    let file = file
        .canonicalize()
        .wrap_err_with(|| format!("failed to resolve {}", file.display()))?;

    eprintln!("{} Checking {}...", "->".blue().bold(), file.display());

    let engine = Engine::new(
        config,
        Arc::new(ProcessInvoker),
        Arc::new(OsFiles),
        Arc::new(ConsoleSink),
    );
    let bridge = EditorBridge::new(Arc::clone(&engine));

    let seen = bridge.state().generation;
    engine.request_run(Some(file.clone()));

    // Launch failures publish nothing, so completion is "the engine went
    // idle" rather than the next invalidation.
    while bridge.state().busy {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let state = bridge.state();
    if state.generation == seen {
        eyre::bail!("analyzer run failed, see output above");
    }

    let findings = bridge.diagnostics();
    if verbose {
        for record in findings.iter() {
            eprintln!(
                "   {}:{}:{}: {}: {} [{}]",
                record.file.display(),
                record.line + 1,
                record.column + 1,
                record.severity,
                record.message,
                record.check_name
            );
        }
    }

    if findings.is_empty() {
        eprintln!("{} No findings", "OK".green().bold());
    } else {
        eprintln!(
            "{} {} finding{}",
            "!!".yellow().bold(),
            findings.len(),
            if findings.len() == 1 { "" } else { "s" }
        );
    }

    if deny_findings && !findings.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_filters(config: EngineConfig, file: PathBuf) -> Result<()> {
    // The file does not have to exist to ask what would apply to it.
    let file = std::path::absolute(&file)
        .wrap_err_with(|| format!("failed to resolve {}", file.display()))?;

    let store = FilterStore::new(
        Arc::new(OsFiles),
        &config.base_filters,
        config.filters_file_name.clone(),
    );
    let chain = store.filters_for(&file);

    for problem in &chain.errors {
        eprintln!("{} {}", "!!".yellow().bold(), problem);
    }

    if chain.entries.is_empty() {
        eprintln!("No filters apply to {}", file.display());
        return Ok(());
    }

    eprintln!(
        "{} {} rule{} for {}",
        "->".blue().bold(),
        chain.entries.len(),
        if chain.entries.len() == 1 { "" } else { "s" },
        file.display()
    );
    for entry in &chain.entries {
        println!(
            "{} => {:?}  (from {})",
            entry.filter.regex.as_str(),
            entry.filter.replacement,
            entry.origin.display()
        );
    }
    Ok(())
}
