use crate::error::PipelineError;
use crate::helper::CorsHelper;
use crate::steps::{Step, binding_pattern};
use corsfix_types::step::{StepId, StepOutcome};
use regex::Regex;
use tracing::debug;

/// `[export] const <binding> = { ... 'Access-Control-Allow-Origin': '*' ... };` as a whole line,
/// indentation and line ending included.
///
/// `[^}]*` on both sides of the origin entry keeps the match inside the object literal: it ends at
/// the first closing brace, so nested objects are out of reach. The origin value must be exactly
/// `*`, so `'*.example.com'` is left alone.
const WILDCARD_CONSTANT: &str = concat!(
    r"(?m)^[ \t]*(?:export\s+)?const\s+{binding}(?:\s*:[^=\n]+)?\s*=\s*\{",
    r#"[^}]*['"]Access-Control-Allow-Origin['"]\s*:\s*(?:'\*'|"\*"|\*)\s*(?:,[^}]*)?"#,
    r"\};?[ \t]*(?:\r?\n)?",
);

/// Deletes hardcoded wildcard CORS header objects.
pub struct RemoveWildcardConstant {
    pattern: Regex,
}

impl RemoveWildcardConstant {
    pub fn new(helper: &CorsHelper) -> Result<Self, PipelineError> {
        let pattern = binding_pattern(
            StepId::RemoveWildcardConstant,
            WILDCARD_CONSTANT,
            &helper.binding,
        )?;
        Ok(Self { pattern })
    }
}

impl Step for RemoveWildcardConstant {
    fn id(&self) -> StepId {
        StepId::RemoveWildcardConstant
    }

    fn apply(&self, text: &mut String) -> StepOutcome {
        let count = self.pattern.find_iter(text).count();
        if count == 0 {
            return StepOutcome::NotApplicable;
        }

        debug!(count, "removing wildcard CORS definitions");
        *text = self.pattern.replace_all(text, "").into_owned();
        StepOutcome::Applied { count }
    }
}
