//! Domain logic: rewrite one handler's text from a static wildcard CORS policy to the shared,
//! origin-aware helper.
//!
//! This crate owns *what* gets rewritten and how each rewrite is detected. It never touches the
//! filesystem; locating, backing up and writing handlers is the `corsfix-edit` crate.
//!
//! Every step is regex-based text patching over the raw source. A step whose pattern does not
//! match leaves the text untouched for that step, so partially conforming files come out
//! partially migrated rather than rejected.

mod error;
mod helper;
mod pipeline;
mod steps;

pub use error::PipelineError;
pub use helper::CorsHelper;
pub use pipeline::{Pipeline, Transformed};
pub use steps::Step;
