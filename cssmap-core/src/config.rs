//! Configuration for a path audit
//!
//! Values are resolved in layers: built-in defaults, then an optional TOML
//! file, then whatever the caller overrides (the CLI feeds flags and
//! environment variables through [`AuditConfig::with_source_root`] and
//! [`AuditConfig::with_target_root`]).

use std::path::{
    Path,
    PathBuf,
};

use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{
        AuditError,
        AuditResult,
    },
    rename::{
        RenameRule,
        RenameRules,
    },
};

/// Source root used when nothing else is configured
pub const DEFAULT_SOURCE_ROOT: &str = "D:/vs/Argu";
/// Target root used when nothing else is configured
pub const DEFAULT_TARGET_ROOT: &str = "D:/vs/Debate";
/// File extension audited by default
pub const DEFAULT_EXTENSION: &str = "css";

/// Resolved audit settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Tree that is walked
    pub source_root: PathBuf,
    /// Tree the renamed paths are looked up in
    pub target_root: PathBuf,
    /// Extension (without the dot) selecting files, compared case-insensitively
    pub extension:   String,
    /// Substitutions turning a source-relative path into a candidate
    pub rules:       RenameRules,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            target_root: PathBuf::from(DEFAULT_TARGET_ROOT),
            extension:   DEFAULT_EXTENSION.to_string(),
            rules:       RenameRules::default(),
        }
    }
}

/// On-disk layout of a config file; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub source_root: Option<PathBuf>,
    pub target_root: Option<PathBuf>,
    pub extension:   Option<String>,
    /// Replaces the default rule list entirely when present
    pub rules:       Option<Vec<RenameRule>>,
}

impl AuditConfig {
    /// Parse TOML text and layer it over the defaults
    pub fn from_toml_str(content: &str) -> AuditResult<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| AuditError::Config(e.to_string()))?;
        Self::default().merge(file)
    }

    /// Load a config file, or return the defaults when `path` is `None`
    pub fn load(path: Option<&Path>) -> AuditResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        debug!(path = %path.display(), "Loading configuration file");
        let content = std::fs::read_to_string(path).map_err(|e| {
            AuditError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AuditError::Config(msg) => {
                AuditError::Config(format!("failed to parse '{}': {}", path.display(), msg))
            },
            other => other,
        })
    }

    fn merge(mut self, file: ConfigFile) -> AuditResult<Self> {
        if let Some(source_root) = file.source_root {
            self.source_root = source_root;
        }
        if let Some(target_root) = file.target_root {
            self.target_root = target_root;
        }
        if let Some(extension) = file.extension {
            let extension = extension.trim_start_matches('.').to_string();
            if extension.is_empty() {
                return Err(AuditError::Config("extension must not be empty".to_string()));
            }
            self.extension = extension;
        }
        if let Some(rules) = file.rules {
            self.rules = RenameRules::new(rules)?;
        }
        Ok(self)
    }

    /// Override the source root when a value is given
    pub fn with_source_root(mut self, source_root: Option<PathBuf>) -> Self {
        if let Some(source_root) = source_root {
            self.source_root = source_root;
        }
        self
    }

    /// Override the target root when a value is given
    pub fn with_target_root(mut self, target_root: Option<PathBuf>) -> Self {
        if let Some(target_root) = target_root {
            self.target_root = target_root;
        }
        self
    }
}
