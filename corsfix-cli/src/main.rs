use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use corsfix_cli::config::{self, CliOverrides, ConfigMerger};
use corsfix_cli::{OutputFormat, execute};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "corsfix",
    version,
    about = "One-shot migration of edge-function handlers from wildcard CORS to the shared origin-aware helper."
)]
struct Cli {
    /// Project root (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Handler directory, relative to the root (default: supabase/functions).
    #[arg(long)]
    functions_dir: Option<Utf8PathBuf>,

    /// Entry file name inside each handler directory (default: index.ts).
    #[arg(long)]
    entry_file: Option<String>,

    /// Handler to migrate; repeat to list several. Replaces the configured list.
    #[arg(long = "handler", value_name = "NAME")]
    handlers: Vec<String>,

    /// Suffix for backup files (default: .bak).
    #[arg(long)]
    backup_suffix: Option<String>,

    /// Report what would change without writing anything.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Config file (default: <root>/corsfix.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(&cli.root).context("load corsfix.toml config")?,
    };
    let merged = ConfigMerger::new(file_config).merge(
        &cli.root,
        CliOverrides {
            functions_dir: cli.functions_dir,
            entry_file: cli.entry_file,
            handlers: cli.handlers,
            backup_suffix: cli.backup_suffix,
        },
    );
    debug!(
        "merged config: functions_dir={}, entry_file={}, handlers={}, backup_suffix={}",
        merged.functions_dir,
        merged.entry_file,
        merged.handlers.len(),
        merged.backup_suffix
    );

    let stdout = std::io::stdout();
    let summary = execute(&merged, cli.dry_run, cli.format, &mut stdout.lock())?;

    // Handler failures are reported, not fatal.
    if summary.has_errors() {
        info!(errors = summary.errors, "some handlers failed; see report");
    }
    Ok(())
}
