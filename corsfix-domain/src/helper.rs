use crate::error::PipelineError;
use serde::Deserialize;

/// The shared security module handlers are migrated onto.
///
/// Only its import specifier and the names of its two exports matter here; the CORS policy
/// itself lives in that module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CorsHelper {
    /// Import specifier, relative to a handler's entry file.
    pub module: String,

    /// Export computing response headers for a request.
    pub compute_headers: String,

    /// Export producing a complete preflight response for a request.
    pub handle_preflight: String,

    /// Local binding holding the headers. The removed constant and the injected assignment share
    /// this name so later references keep resolving.
    pub binding: String,
}

impl Default for CorsHelper {
    fn default() -> Self {
        Self {
            module: "../_shared/security.ts".to_string(),
            compute_headers: "getCorsHeaders".to_string(),
            // Matches the exported name, typo included.
            handle_preflight: "handleCorsPrelight".to_string(),
            binding: "corsHeaders".to_string(),
        }
    }
}

impl CorsHelper {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.module.is_empty() || self.module.contains(['\'', '"', '\n', '\r']) {
            return Err(PipelineError::InvalidModule(self.module.clone()));
        }
        for (field, value) in [
            ("compute_headers", &self.compute_headers),
            ("handle_preflight", &self.handle_preflight),
            ("binding", &self.binding),
        ] {
            if !is_identifier(value) {
                return Err(PipelineError::InvalidIdentifier {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// The import statement inserted by the first step, newline included.
    pub fn import_line(&self) -> String {
        format!(
            "import {{ {}, {} }} from '{}';\n",
            self.compute_headers, self.handle_preflight, self.module
        )
    }

    /// True when `text` already imports from the helper module, with either quote style.
    pub fn is_referenced_by(&self, text: &str) -> bool {
        text.contains(&format!("'{}'", self.module)) || text.contains(&format!("\"{}\"", self.module))
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
