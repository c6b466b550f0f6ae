use crate::helper::CorsHelper;
use crate::steps::Step;
use corsfix_types::step::{StepId, StepOutcome};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// A top-level, single-line `import ...;` statement with its line ending.
static IMPORT_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^import\b[^\n]*;[ \t]*(?:\r?\n|\z)")
        .expect("import statement pattern is valid")
});

/// Adds the helper import after the last import statement.
pub struct ImportHelper {
    helper: CorsHelper,
}

impl ImportHelper {
    pub fn new(helper: CorsHelper) -> Self {
        Self { helper }
    }
}

impl Step for ImportHelper {
    fn id(&self) -> StepId {
        StepId::ImportHelper
    }

    fn apply(&self, text: &mut String) -> StepOutcome {
        if self.helper.is_referenced_by(text) {
            debug!(module = %self.helper.module, "helper module already imported");
            return StepOutcome::NotApplicable;
        }

        let Some((end, terminated)) = IMPORT_STATEMENT
            .find_iter(text)
            .last()
            .map(|m| (m.end(), m.as_str().ends_with('\n')))
        else {
            return StepOutcome::Missed {
                reason: "could not find an import statement to anchor the helper import"
                    .to_string(),
            };
        };

        let mut insert = String::new();
        if !terminated {
            insert.push('\n');
        }
        insert.push_str(&self.helper.import_line());
        text.insert_str(end, &insert);

        StepOutcome::Applied { count: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(text: &str) -> (String, StepOutcome) {
        let step = ImportHelper::new(CorsHelper::default());
        let mut text = text.to_string();
        let outcome = step.apply(&mut text);
        (text, outcome)
    }

    #[test]
    fn inserts_after_last_import() {
        let (text, outcome) = run(concat!(
            "import { serve } from 'https://deno.land/std/http/server.ts';\n",
            "import { createClient } from 'https://esm.sh/@supabase/supabase-js@2';\n",
            "\n",
            "const x = 1;\n",
        ));
        assert_eq!(outcome, StepOutcome::Applied { count: 1 });
        assert_eq!(
            text,
            concat!(
                "import { serve } from 'https://deno.land/std/http/server.ts';\n",
                "import { createClient } from 'https://esm.sh/@supabase/supabase-js@2';\n",
                "import { getCorsHeaders, handleCorsPrelight } from '../_shared/security.ts';\n",
                "\n",
                "const x = 1;\n",
            )
        );
    }

    #[test]
    fn skips_when_helper_already_imported() {
        let input = "import { getCorsHeaders } from \"../_shared/security.ts\";\nserve();\n";
        let (text, outcome) = run(input);
        assert_eq!(outcome, StepOutcome::NotApplicable);
        assert_eq!(text, input);
    }

    #[test]
    fn missing_anchor_is_reported_not_fatal() {
        let input = "const corsHeaders = {};\n";
        let (text, outcome) = run(input);
        assert!(outcome.is_missed());
        assert_eq!(text, input);
    }

    #[test]
    fn multi_line_import_does_not_anchor() {
        let input = "import {\n  serve,\n} from 'x';\nconst y = 2;\n";
        let (_, outcome) = run(input);
        assert!(outcome.is_missed());
    }

    #[test]
    fn indented_import_is_not_top_level() {
        let input = "import a from 'a';\nfunction f() {\n  import b from 'b';\n}\n";
        let (text, _) = run(input);
        assert!(text.starts_with(
            "import a from 'a';\nimport { getCorsHeaders, handleCorsPrelight } from '../_shared/security.ts';\n"
        ));
    }

    #[test]
    fn import_at_end_of_file_gets_a_newline() {
        let (text, outcome) = run("import a from 'a';");
        assert!(outcome.is_applied());
        assert_eq!(
            text,
            "import a from 'a';\nimport { getCorsHeaders, handleCorsPrelight } from '../_shared/security.ts';\n"
        );
    }

    #[test]
    fn crlf_line_endings_are_respected() {
        let (text, _) = run("import a from 'a';\r\nserve();\r\n");
        assert!(text.starts_with("import a from 'a';\r\nimport { getCorsHeaders"));
    }
}
