use crate::error::PipelineError;
use crate::helper::CorsHelper;
use corsfix_types::step::{StepId, StepOutcome};
use regex::Regex;

mod dynamic_headers;
mod import_helper;
mod preflight;
mod wildcard_constant;

/// One detect-then-rewrite unit.
///
/// A step edits the working text in place and reports what it did. It never fails: a pattern
/// miss means "already satisfied or not applicable" and leaves the text as it was.
pub trait Step: Send + Sync {
    fn id(&self) -> StepId;

    fn apply(&self, text: &mut String) -> StepOutcome;
}

/// The four steps, in the order they must run.
pub fn builtin_steps(helper: &CorsHelper) -> Result<Vec<Box<dyn Step>>, PipelineError> {
    Ok(vec![
        Box::new(import_helper::ImportHelper::new(helper.clone())),
        Box::new(wildcard_constant::RemoveWildcardConstant::new(helper)?),
        Box::new(dynamic_headers::InjectDynamicHeaders::new(helper.clone())),
        Box::new(preflight::ReplacePreflight::new(helper)?),
    ])
}

/// Compile a pattern containing a `{binding}` placeholder.
fn binding_pattern(step: StepId, template: &str, binding: &str) -> Result<Regex, PipelineError> {
    let pattern = template.replace("{binding}", &regex::escape(binding));
    Regex::new(&pattern).map_err(|source| PipelineError::Pattern { step, source })
}

/// Leading whitespace of the line containing byte offset `at`, or `""` when anything other than
/// spaces and tabs precedes `at` on that line.
fn line_indent(text: &str, at: usize) -> &str {
    let line_start = text[..at].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &text[line_start..at];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}
