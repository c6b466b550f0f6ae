use serde::{Deserialize, Serialize};

/// Identifier of one detect-then-rewrite step.
///
/// Variants are declared in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    ImportHelper,
    RemoveWildcardConstant,
    InjectDynamicHeaders,
    ReplacePreflight,
}

impl StepId {
    pub const ALL: [StepId; 4] = [
        StepId::ImportHelper,
        StepId::RemoveWildcardConstant,
        StepId::InjectDynamicHeaders,
        StepId::ReplacePreflight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepId::ImportHelper => "import_helper",
            StepId::RemoveWildcardConstant => "remove_wildcard_constant",
            StepId::InjectDynamicHeaders => "inject_dynamic_headers",
            StepId::ReplacePreflight => "replace_preflight",
        }
    }

    /// Short past-tense description used in progress output.
    pub fn label(self) -> &'static str {
        match self {
            StepId::ImportHelper => "added security helper import",
            StepId::RemoveWildcardConstant => "removed hardcoded wildcard CORS definition",
            StepId::InjectDynamicHeaders => "added dynamic CORS headers in serve handler",
            StepId::ReplacePreflight => "replaced OPTIONS handler with preflight helper",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single step did to the working text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The step rewrote `count` sites.
    Applied { count: usize },
    /// Detection found nothing to do: already migrated, or the shape does not occur.
    NotApplicable,
    /// The step was needed but its anchor could not be found.
    Missed { reason: String },
}

impl StepOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, StepOutcome::Applied { .. })
    }

    pub fn is_missed(&self) -> bool {
        matches!(self, StepOutcome::Missed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: StepId,
    pub outcome: StepOutcome,
}
