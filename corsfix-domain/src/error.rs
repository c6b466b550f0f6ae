use corsfix_types::step::StepId;
use thiserror::Error;

/// Errors raised while building a [`Pipeline`](crate::Pipeline).
///
/// Transforming text never fails; only a bad helper description does.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("helper `{field}` is not a valid identifier: {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },

    #[error("helper module specifier must be non-empty and free of quotes and newlines: {0:?}")]
    InvalidModule(String),

    #[error("compile pattern for {step}: {source}")]
    Pattern {
        step: StepId,
        #[source]
        source: regex::Error,
    },
}
