//! Rendering helpers for human-readable console output.

use camino::Utf8Path;
use corsfix_types::report::{BatchSummary, HandlerReport, HandlerStatus};
use corsfix_types::step::StepOutcome;

const RULE_WIDTH: usize = 60;

pub fn render_banner(functions_dir: &Utf8Path, count: usize) -> String {
    let mut out = String::new();
    out.push_str("Starting batch CORS migration...\n");
    out.push_str(&format!("Functions directory: {}\n", functions_dir));
    out.push_str(&format!("Handlers to migrate: {}\n\n", count));
    out
}

/// One status line for the handler, followed by indented detail lines.
pub fn render_handler(report: &HandlerReport) -> String {
    let mut out = format!("{} {}\n", status_label(report.status), report.name);

    for record in &report.steps {
        match &record.outcome {
            StepOutcome::Applied { count } if *count > 1 => {
                out.push_str(&format!("    + {} (x{})\n", record.step.label(), count));
            }
            StepOutcome::Applied { .. } => {
                out.push_str(&format!("    + {}\n", record.step.label()));
            }
            StepOutcome::Missed { reason } => {
                out.push_str(&format!("    ! {}: {}\n", record.step, reason));
            }
            StepOutcome::NotApplicable => {}
        }
    }

    if let Some(backup) = &report.backup_path {
        let name = backup.file_name().unwrap_or(backup.as_str());
        out.push_str(&format!("    backup: {}\n", name));
    }
    if let Some(msg) = &report.message {
        out.push_str(&format!("    {}\n", msg));
    }
    if let Some(patch) = &report.patch {
        for line in patch.lines() {
            out.push_str(&format!("    {}\n", line));
        }
    }

    out
}

pub fn render_summary(
    summary: &BatchSummary,
    functions_dir: &Utf8Path,
    backup_suffix: &str,
) -> String {
    let processed = summary.fixed + summary.skipped + summary.errors;

    let mut out = String::new();
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("Fixed:     {}\n", summary.fixed));
    out.push_str(&format!("Skipped:   {}\n", summary.skipped));
    out.push_str(&format!("Not found: {}\n", summary.not_found));
    out.push_str(&format!("Errors:    {}\n", summary.errors));
    out.push_str(&format!("Total:     {}/{}\n\n", processed, summary.total));

    if summary.dry_run {
        out.push_str("Dry run: no files were written.\n");
        return out;
    }

    out.push_str("IMPORTANT: review changes before deploying!\n");
    out.push_str(&format!("    git diff {}\n\n", functions_dir));
    out.push_str("To restore from backups:\n");
    out.push_str(&format!("    {}\n", restore_command(functions_dir, backup_suffix)));
    out
}

/// Shell one-liner that moves every backup back over its original.
pub fn restore_command(functions_dir: &Utf8Path, backup_suffix: &str) -> String {
    let dir = shell_quote(functions_dir.as_str());
    let pattern = shell_quote(&format!("*{backup_suffix}"));
    // The suffix also lands inside the single-quoted `bash -c` script.
    let strip = backup_suffix.replace('\'', r"'\''");
    format!(
        "find {dir} -name {pattern} -exec bash -c 'mv \"$0\" \"${{0%{strip}}}\"' {{}} \\;"
    )
}

/// Single-quote `s` for a POSIX shell unless it is made only of safe characters.
fn shell_quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:,@%".contains(c));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

fn status_label(s: HandlerStatus) -> &'static str {
    match s {
        HandlerStatus::Fixed => "✓ fixed",
        HandlerStatus::Skipped => "· skipped",
        HandlerStatus::NotFound => "? not found",
        HandlerStatus::Error => "✗ error",
    }
}
