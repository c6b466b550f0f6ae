//! Configuration file loading for corsfix.
//!
//! Discovers and loads `corsfix.toml` from the project root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use corsfix_domain::CorsHelper;
use corsfix_edit::DEFAULT_BACKUP_SUFFIX;
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "corsfix.toml";

pub const DEFAULT_FUNCTIONS_DIR: &str = "supabase/functions";

pub const DEFAULT_ENTRY_FILE: &str = "index.ts";

/// Handlers migrated when neither the config file nor the CLI names any.
pub const DEFAULT_HANDLERS: [&str; 30] = [
    "ai-analyze-schema",
    "ai-create-schema",
    "ai-import-suggestions",
    "check-subscription",
    "composite-views-create",
    "composite-views-query",
    "composite-views-update-custom-data",
    "create-checkout",
    "create-payment-intent",
    "customer-portal",
    "evaluate-formula",
    "generate-insights",
    "generate-report",
    "generate-scheduled-report",
    "item-attachment-delete",
    "item-attachment-upload",
    "process-ocr",
    "process-voice",
    "resolve-relations",
    "rest-api",
    "scheduled-ai-analysis",
    "schema-version-create",
    "schema-version-restore",
    "send-notification",
    "stripe-webhook",
    "sync-storage",
    "telegram-generate-link-code",
    "telegram-natural-language",
    "telegram-notify",
    "trigger-webhook",
];

/// Top-level configuration from corsfix.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsfixConfig {
    /// Directory holding one subdirectory per handler, relative to the project root.
    pub functions_dir: Utf8PathBuf,

    /// Entry file name inside each handler directory.
    pub entry_file: String,

    /// Handler names, processed in order.
    pub handlers: Vec<String>,

    pub backups: BackupsConfig,

    /// Shared security helper the migrated handlers import.
    pub helper: CorsHelper,
}

impl Default for CorsfixConfig {
    fn default() -> Self {
        Self {
            functions_dir: Utf8PathBuf::from(DEFAULT_FUNCTIONS_DIR),
            entry_file: DEFAULT_ENTRY_FILE.to_string(),
            handlers: DEFAULT_HANDLERS.iter().map(|s| s.to_string()).collect(),
            backups: BackupsConfig::default(),
            helper: CorsHelper::default(),
        }
    }
}

/// Backups section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackupsConfig {
    /// Suffix appended to the entry file name.
    pub suffix: String,
}

impl Default for BackupsConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }
}

/// Discover the corsfix.toml config file.
///
/// Returns `None` if the project root has no config file.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a corsfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<CorsfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<CorsfixConfig> {
    let config: CorsfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the project root, or return the defaults if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<CorsfixConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(CorsfixConfig::default()),
    }
}

/// Everything one batch run needs, after CLI overrides.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// Functions directory resolved against the project root.
    pub functions_dir: Utf8PathBuf,
    pub entry_file: String,
    pub handlers: Vec<String>,
    pub backup_suffix: String,
    pub helper: CorsHelper,
}

impl MergedConfig {
    /// Reject settings that would make the backup-then-write sequence unsafe.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.backup_suffix.is_empty() {
            bail!("backup suffix must not be empty");
        }
        if self.backup_suffix.contains('/') {
            bail!("backup suffix must not contain '/': {}", self.backup_suffix);
        }
        if self.entry_file.is_empty() || self.entry_file.contains('/') {
            bail!("entry file must be a plain file name: '{}'", self.entry_file);
        }
        Ok(())
    }
}

/// CLI values that override the config file when present.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub functions_dir: Option<Utf8PathBuf>,
    pub entry_file: Option<String>,
    /// Non-empty replaces the configured list.
    pub handlers: Vec<String>,
    pub backup_suffix: Option<String>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: CorsfixConfig,
}

impl ConfigMerger {
    pub fn new(config: CorsfixConfig) -> Self {
        Self { config }
    }

    pub fn merge(self, root: &Utf8Path, cli: CliOverrides) -> MergedConfig {
        let functions_dir = cli.functions_dir.unwrap_or(self.config.functions_dir);
        let handlers = if cli.handlers.is_empty() {
            self.config.handlers
        } else {
            cli.handlers
        };

        MergedConfig {
            functions_dir: resolve(root, &functions_dir),
            entry_file: cli.entry_file.unwrap_or(self.config.entry_file),
            handlers,
            backup_suffix: cli.backup_suffix.unwrap_or(self.config.backups.suffix),
            helper: self.config.helper,
        }
    }
}

/// `dir` relative to `root`; `.` as root keeps the path as given.
fn resolve(root: &Utf8Path, dir: &Utf8Path) -> Utf8PathBuf {
    if root == Utf8Path::new(".") {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}
