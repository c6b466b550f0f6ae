//! Per-handler error types.
//!
//! A missing handler is not an error (it is reported as `not_found`), and neither is a step whose
//! pattern does not match. Everything here is caught at the handler boundary and counted.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler exists but could not be read.
    #[error("read {path}: {source:#}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The backup could not be written; the handler is untouched.
    #[error("write backup {backup}: {source:#}")]
    Backup {
        backup: Utf8PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The backup was written but the handler could not be overwritten.
    ///
    /// The backup is left in place and still holds the original bytes.
    #[error("overwrite {path} (original preserved in {backup}): {source:#}")]
    Overwrite {
        path: Utf8PathBuf,
        backup: Utf8PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl HandlerError {
    /// Backup left on disk by a failed run, if any.
    pub fn backup_path(&self) -> Option<&Utf8PathBuf> {
        match self {
            HandlerError::Overwrite { backup, .. } => Some(backup),
            HandlerError::Read { .. } | HandlerError::Backup { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HandlerError;

    #[test]
    fn overwrite_error_names_both_paths() {
        let err = HandlerError::Overwrite {
            path: "fns/a/index.ts".into(),
            backup: "fns/a/index.ts.bak".into(),
            source: anyhow::anyhow!("disk full"),
        };
        let msg = err.to_string();
        assert!(msg.contains("fns/a/index.ts"));
        assert!(msg.contains("fns/a/index.ts.bak"));
        assert!(msg.contains("disk full"));
        assert_eq!(
            err.backup_path().map(|p| p.as_str()),
            Some("fns/a/index.ts.bak")
        );
    }

    #[test]
    fn backup_error_leaves_nothing_behind() {
        let err = HandlerError::Backup {
            backup: "x.bak".into(),
            source: anyhow::anyhow!("read-only"),
        };
        assert!(err.backup_path().is_none());
        assert!(err.to_string().contains("write backup"));
    }
}
