use crate::error::HandlerError;
use crate::ports::{HandlerSource, WritePort};
use camino::{Utf8Path, Utf8PathBuf};
use corsfix_domain::{Pipeline, Transformed};
use corsfix_types::report::{BatchSummary, HandlerReport, HandlerStatus};
use diffy::PatchFormatter;
use tracing::{debug, error, info, warn};

pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Compute and report changes without writing anything.
    pub dry_run: bool,

    /// Appended to a handler's file name to form its backup path.
    pub backup_suffix: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }
}

/// `index.ts` + `.bak` -> `index.ts.bak`, next to the original.
pub fn backup_path_for(path: &Utf8Path, suffix: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{path}{suffix}"))
}

/// Runs the pipeline over a list of handlers, strictly one after another.
pub struct BatchRunner<'a> {
    pipeline: &'a Pipeline,
    source: &'a dyn HandlerSource,
    writer: &'a dyn WritePort,
    opts: BatchOptions,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        pipeline: &'a Pipeline,
        source: &'a dyn HandlerSource,
        writer: &'a dyn WritePort,
        opts: BatchOptions,
    ) -> Self {
        Self {
            pipeline,
            source,
            writer,
            opts,
        }
    }

    /// Process every handler and return the aggregated summary.
    ///
    /// `on_report` sees each handler's report as soon as it is final. A failing handler never
    /// stops the batch.
    pub fn run<F>(&self, handlers: &[String], mut on_report: F) -> BatchSummary
    where
        F: FnMut(&HandlerReport),
    {
        let mut summary = BatchSummary::new(self.opts.dry_run);

        for name in handlers {
            let report = match self.process(name) {
                Ok(report) => report,
                Err(e) => {
                    error!(handler = %name, "{e}");
                    let mut report = HandlerReport::error(name.as_str(), e.to_string());
                    report.backup_path = e.backup_path().cloned();
                    report
                }
            };
            on_report(&report);
            summary.record(report);
        }

        info!(
            fixed = summary.fixed,
            skipped = summary.skipped,
            not_found = summary.not_found,
            errors = summary.errors,
            total = summary.total,
            dry_run = summary.dry_run,
            "batch complete"
        );
        summary
    }

    /// Locate, read, transform and, when the text changed, back up and overwrite one handler.
    pub fn process(&self, name: &str) -> Result<HandlerReport, HandlerError> {
        let Some(path) = self.source.locate(name) else {
            warn!(handler = name, "handler entry file not found");
            return Ok(HandlerReport::not_found(name));
        };

        let original = self
            .source
            .read_to_string(&path)
            .map_err(|source| HandlerError::Read {
                path: path.clone(),
                source,
            })?;

        let transformed = self.pipeline.transform(&original);
        for step in transformed.missed() {
            warn!(handler = name, %step, "step needed but its anchor was not found");
        }
        let Transformed { text, steps } = transformed;

        let mut report = HandlerReport::new(name, HandlerStatus::Skipped);
        report.path = Some(path.clone());
        report.steps = steps;

        if text == original {
            debug!(handler = name, "no changes needed");
            return Ok(report);
        }

        report.status = HandlerStatus::Fixed;

        if self.opts.dry_run {
            debug!(handler = name, "dry-run: not written");
            report.patch = Some(render_patch(&path, &original, &text));
            return Ok(report);
        }

        let backup = backup_path_for(&path, &self.opts.backup_suffix);
        self.writer
            .write_file(&backup, original.as_bytes())
            .map_err(|source| HandlerError::Backup {
                backup: backup.clone(),
                source,
            })?;
        self.writer
            .write_file(&path, text.as_bytes())
            .map_err(|source| HandlerError::Overwrite {
                path: path.clone(),
                backup: backup.clone(),
                source,
            })?;

        info!(handler = name, backup = %backup, "handler migrated");
        report.backup_path = Some(backup);
        Ok(report)
    }
}

/// Unified diff of one file, with `a/` and `b/` prefixed headers.
pub fn render_patch(path: &Utf8Path, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let patch = diffy::create_patch(before, after);
    let body = PatchFormatter::new().fmt_patch(&patch).to_string();

    let mut out = format!("--- a/{0}\n+++ b/{0}\n", path);
    for line in body
        .split_inclusive('\n')
        .skip_while(|l| l.starts_with("--- ") || l.starts_with("+++ "))
    {
        out.push_str(line);
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
