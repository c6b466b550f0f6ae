use crate::helper::CorsHelper;
use crate::steps::Step;
use corsfix_types::step::{StepId, StepOutcome};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

/// `serve(async (req) => {` directly followed, blank lines aside, by an OPTIONS method check.
///
/// Matches `Deno.serve(` as well. The regex engine has no backreferences, so the handler parameter
/// and the checked subject are captured separately and compared in the replacer.
static SERVE_THEN_OPTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<open>\bserve\(\s*async\s*\(\s*(?P<param>[A-Za-z_$][\w$]*)(?:\s*:\s*Request)?\s*\)\s*=>\s*\{)",
        r"[ \t]*\r?\n(?:[ \t]*\r?\n)*",
        r"(?P<indent>[ \t]*)",
        r#"(?P<check>if\s*\(\s*(?P<subject>[A-Za-z_$][\w$]*)\.method\s*===?\s*['"]OPTIONS['"])"#,
    ))
    .expect("serve handler pattern is valid")
});

/// Computes the headers from the request at the top of the handler.
pub struct InjectDynamicHeaders {
    helper: CorsHelper,
}

impl InjectDynamicHeaders {
    pub fn new(helper: CorsHelper) -> Self {
        Self { helper }
    }

    fn rewrite(&self, caps: &Captures<'_>) -> String {
        let indent = &caps["indent"];
        format!(
            "{open}\n{indent}// Resolve CORS headers for the request origin\n{indent}const {binding} = {compute}({param});\n\n{indent}{check}",
            open = &caps["open"],
            binding = self.helper.binding,
            compute = self.helper.compute_headers,
            param = &caps["param"],
            check = &caps["check"],
        )
    }
}

impl Step for InjectDynamicHeaders {
    fn id(&self) -> StepId {
        StepId::InjectDynamicHeaders
    }

    fn apply(&self, text: &mut String) -> StepOutcome {
        let mut count = 0;
        let rewritten = SERVE_THEN_OPTIONS.replace_all(text, |caps: &Captures<'_>| {
            if caps["param"] != caps["subject"] {
                debug!(
                    param = &caps["param"],
                    subject = &caps["subject"],
                    "OPTIONS check tests a different binding than the handler parameter"
                );
                return caps[0].to_string();
            }
            count += 1;
            self.rewrite(caps)
        });

        if count == 0 {
            return StepOutcome::NotApplicable;
        }
        *text = rewritten.into_owned();
        StepOutcome::Applied { count }
    }
}
