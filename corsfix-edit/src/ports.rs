//! Port traits abstracting filesystem access away from the batch driver.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;

/// Read-only access to handler sources.
pub trait HandlerSource {
    /// Path of the handler's entry file, or `None` when it does not exist.
    fn locate(&self, name: &str) -> Option<Utf8PathBuf>;

    fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String>;
}

/// File write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
}

/// Handlers laid out as `<functions_dir>/<name>/<entry_file>`.
#[derive(Debug, Clone)]
pub struct FsHandlerSource {
    functions_dir: Utf8PathBuf,
    entry_file: String,
}

impl FsHandlerSource {
    pub fn new(functions_dir: Utf8PathBuf, entry_file: impl Into<String>) -> Self {
        Self {
            functions_dir,
            entry_file: entry_file.into(),
        }
    }

    pub fn functions_dir(&self) -> &Utf8Path {
        &self.functions_dir
    }

    pub fn entry_path(&self, name: &str) -> Utf8PathBuf {
        self.functions_dir.join(name).join(&self.entry_file)
    }
}

impl HandlerSource for FsHandlerSource {
    fn locate(&self, name: &str) -> Option<Utf8PathBuf> {
        let path = self.entry_path(name);
        path.is_file().then_some(path)
    }

    fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String> {
        fs::read_to_string(path).with_context(|| format!("read {}", path))
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }
}
