//! Library half of the `corsfix` binary: configuration and the batch run.

pub mod config;

use anyhow::Context;
use config::MergedConfig;
use corsfix_domain::Pipeline;
use corsfix_edit::{BatchOptions, BatchRunner, FsHandlerSource, FsWritePort};
use corsfix_render::{render_banner, render_handler, render_summary};
use corsfix_types::report::BatchSummary;
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Progress lines and a summary block.
    #[default]
    Text,
    /// One JSON summary document.
    Json,
}

/// Run the migration over every configured handler and write the report to `out`.
///
/// Per-handler failures are part of the returned summary. An `Err` means the run could not
/// start (invalid settings or helper names) or the report could not be written.
pub fn execute(
    merged: &MergedConfig,
    dry_run: bool,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<BatchSummary> {
    merged.validate()?;
    let pipeline = Pipeline::new(merged.helper.clone()).context("build rewrite pipeline")?;
    debug!(?pipeline, "pipeline ready");

    let source = FsHandlerSource::new(merged.functions_dir.clone(), merged.entry_file.clone());
    let opts = BatchOptions {
        dry_run,
        backup_suffix: merged.backup_suffix.clone(),
    };
    let runner = BatchRunner::new(&pipeline, &source, &FsWritePort, opts);

    let summary = match format {
        OutputFormat::Text => {
            out.write_all(render_banner(&merged.functions_dir, merged.handlers.len()).as_bytes())
                .context("write report")?;

            let mut write_err = None;
            let summary = runner.run(&merged.handlers, |report| {
                if write_err.is_some() {
                    return;
                }
                let mut chunk = render_handler(report);
                chunk.push('\n');
                if let Err(e) = out.write_all(chunk.as_bytes()) {
                    write_err = Some(e);
                }
            });
            if let Some(e) = write_err {
                return Err(e).context("write report");
            }

            out.write_all(
                render_summary(&summary, &merged.functions_dir, &merged.backup_suffix).as_bytes(),
            )
            .context("write report")?;
            summary
        }
        OutputFormat::Json => {
            let summary = runner.run(&merged.handlers, |_| {});
            serde_json::to_writer_pretty(&mut *out, &summary).context("serialize json")?;
            out.write_all(b"\n").context("write report")?;
            summary
        }
    };

    out.flush().context("write report")?;
    Ok(summary)
}
