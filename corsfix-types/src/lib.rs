//! Shared DTOs for the corsfix workspace.
//!
//! # Design constraints
//! - These types are serialized for `--format json` output.
//! - Prefer adding optional fields over changing semantics.

pub mod report;
pub mod step;

/// Schema identifiers.
pub mod schema {
    pub const CORSFIX_SUMMARY_V1: &str = "corsfix.summary.v1";
}
