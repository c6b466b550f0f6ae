use crate::step::{StepId, StepRecord};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Final status of one handler in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerStatus {
    Fixed,
    Skipped,
    NotFound,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerReport {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Utf8PathBuf>,

    pub status: HandlerStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<Utf8PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Unified diff of the pending change (dry-run only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

impl HandlerReport {
    pub fn new(name: impl Into<String>, status: HandlerStatus) -> Self {
        Self {
            name: name.into(),
            path: None,
            status,
            steps: vec![],
            backup_path: None,
            message: None,
            patch: None,
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::new(name, HandlerStatus::NotFound)
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut report = Self::new(name, HandlerStatus::Error);
        report.message = Some(message.into());
        report
    }

    /// Ids of the steps that rewrote something.
    pub fn applied_steps(&self) -> Vec<StepId> {
        self.steps
            .iter()
            .filter(|r| r.outcome.is_applied())
            .map(|r| r.step)
            .collect()
    }
}

/// Aggregate result of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub schema: String,
    pub dry_run: bool,
    pub fixed: u64,
    pub skipped: u64,
    pub not_found: u64,
    pub errors: u64,
    pub total: u64,

    #[serde(default)]
    pub handlers: Vec<HandlerReport>,
}

impl BatchSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            schema: crate::schema::CORSFIX_SUMMARY_V1.to_string(),
            dry_run,
            fixed: 0,
            skipped: 0,
            not_found: 0,
            errors: 0,
            total: 0,
            handlers: vec![],
        }
    }

    pub fn record(&mut self, report: HandlerReport) {
        match report.status {
            HandlerStatus::Fixed => self.fixed += 1,
            HandlerStatus::Skipped => self.skipped += 1,
            HandlerStatus::NotFound => self.not_found += 1,
            HandlerStatus::Error => self.errors += 1,
        }
        self.total += 1;
        self.handlers.push(report);
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepOutcome;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_counts_each_status() {
        let mut summary = BatchSummary::new(false);
        summary.record(HandlerReport::new("a", HandlerStatus::Fixed));
        summary.record(HandlerReport::new("b", HandlerStatus::Skipped));
        summary.record(HandlerReport::not_found("c"));
        summary.record(HandlerReport::error("d", "boom"));
        summary.record(HandlerReport::new("e", HandlerStatus::Fixed));

        assert_eq!(summary.fixed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.handlers.len(), 5);
        assert!(summary.has_errors());
    }

    #[test]
    fn applied_steps_filters_misses() {
        let mut report = HandlerReport::new("a", HandlerStatus::Fixed);
        report.steps = vec![
            StepRecord {
                step: StepId::ImportHelper,
                outcome: StepOutcome::Missed {
                    reason: "no import statement".to_string(),
                },
            },
            StepRecord {
                step: StepId::RemoveWildcardConstant,
                outcome: StepOutcome::Applied { count: 1 },
            },
            StepRecord {
                step: StepId::ReplacePreflight,
                outcome: StepOutcome::NotApplicable,
            },
        ];
        assert_eq!(report.applied_steps(), vec![StepId::RemoveWildcardConstant]);
    }
}
