use crate::error::PipelineError;
use crate::helper::CorsHelper;
use crate::steps::{Step, binding_pattern, line_indent};
use corsfix_types::step::{StepId, StepOutcome};
use regex::{Captures, Regex};
use tracing::debug;

/// `if (req.method === 'OPTIONS') { return new Response(null, { headers: <binding> }); }`
const STATIC_PREFLIGHT: &str = concat!(
    r#"if\s*\(\s*(?P<subject>[A-Za-z_$][\w$]*)\.method\s*===?\s*(?P<quote>['"])OPTIONS['"]\s*\)\s*\{"#,
    r"\s*return\s+new\s+Response\(\s*null\s*,\s*\{\s*headers\s*:\s*{binding}\s*,?\s*\}\s*\)\s*;?",
    r"\s*\}",
);

/// Hands preflight requests to the helper.
pub struct ReplacePreflight {
    pattern: Regex,
    preflight: String,
}

impl ReplacePreflight {
    pub fn new(helper: &CorsHelper) -> Result<Self, PipelineError> {
        let pattern = binding_pattern(StepId::ReplacePreflight, STATIC_PREFLIGHT, &helper.binding)?;
        Ok(Self {
            pattern,
            preflight: helper.handle_preflight.clone(),
        })
    }
}

impl Step for ReplacePreflight {
    fn id(&self) -> StepId {
        StepId::ReplacePreflight
    }

    fn apply(&self, text: &mut String) -> StepOutcome {
        let count = self.pattern.find_iter(text).count();
        if count == 0 {
            return StepOutcome::NotApplicable;
        }

        debug!(count, "replacing static preflight responses");
        let source = text.as_str();
        let rewritten = self.pattern.replace_all(source, |caps: &Captures<'_>| {
            let start = caps.get(0).map_or(0, |m| m.start());
            let indent = line_indent(source, start);
            format!(
                "if ({subject}.method === {q}OPTIONS{q}) {{\n{indent}  return {preflight}({subject});\n{indent}}}",
                subject = &caps["subject"],
                q = &caps["quote"],
                preflight = self.preflight,
            )
        });
        *text = rewritten.into_owned();
        StepOutcome::Applied { count }
    }
}
