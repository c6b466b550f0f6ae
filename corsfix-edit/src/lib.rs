//! Edit engine for corsfix.
//!
//! Responsibilities:
//! - Locate handler entry files by logical name.
//! - Run the transformation pipeline over each handler, one at a time.
//! - Persist the pristine bytes to a backup, then overwrite the handler.
//! - Produce a unified diff preview instead of writing in dry-run mode.

mod batch;
mod error;
mod ports;

pub use batch::{BatchOptions, BatchRunner, DEFAULT_BACKUP_SUFFIX, backup_path_for, render_patch};
pub use error::HandlerError;
pub use ports::{FsHandlerSource, FsWritePort, HandlerSource, WritePort};
