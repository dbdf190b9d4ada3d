// urlwarden-config/src/config.rs
// ============================================================================
// Module: Urlwarden Configuration
// Description: Configuration loading and validation for Urlwarden.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: urlwarden-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path
//! limits. The pipeline section converts into the immutable
//! [`PipelineConfig`] passed to the inspection engine at construction, so
//! behavior toggles are explicit values rather than ambient lookups.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use urlwarden_core::PipelineConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "urlwarden.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "URLWARDEN_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum accepted value for the pipeline URL length limit.
pub(crate) const MAX_URL_LENGTH_LIMIT: usize = 65_536;
/// Maximum number of entries in the scheme allow-list.
pub(crate) const MAX_ALLOWED_SCHEMES: usize = 8;
/// Default server bind address.
const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Default SQLite busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem access failed.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing failed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// A value violated a validation constraint.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSection {
    /// Socket address the server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Returns the default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Inspection pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSection {
    /// Schemes accepted by the format validator.
    #[serde(default = "default_allowed_schemes")]
    pub allowed_schemes: Vec<String>,
    /// Lowest accepted port (inclusive).
    #[serde(default = "default_min_port")]
    pub min_port: u16,
    /// Highest accepted port (inclusive).
    #[serde(default = "default_max_port")]
    pub max_port: u16,
    /// Maximum accepted URL length in bytes.
    #[serde(default = "default_max_url_length")]
    pub max_url_length: usize,
    /// Whether signature matching runs.
    #[serde(default = "default_true")]
    pub check_signatures: bool,
    /// Whether reputation lookups run.
    #[serde(default = "default_true")]
    pub check_reputation: bool,
}

impl PipelineSection {
    /// Converts the section into the engine's immutable configuration.
    #[must_use]
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            allowed_schemes: self.allowed_schemes.clone(),
            min_port: self.min_port,
            max_port: self.max_port,
            max_url_length: self.max_url_length,
            check_signatures: self.check_signatures,
            check_reputation: self.check_reputation,
        }
    }
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            allowed_schemes: default_allowed_schemes(),
            min_port: default_min_port(),
            max_port: default_max_port(),
            max_url_length: default_max_url_length(),
            check_signatures: true,
            check_reputation: true,
        }
    }
}

/// Returns the default scheme allow-list.
fn default_allowed_schemes() -> Vec<String> {
    vec!["http".to_string(), "https".to_string()]
}

/// Returns the default minimum port.
const fn default_min_port() -> u16 {
    1
}

/// Returns the default maximum port.
const fn default_max_port() -> u16 {
    65535
}

/// Returns the default maximum URL length.
const fn default_max_url_length() -> usize {
    urlwarden_core::runtime::inspector::DEFAULT_MAX_URL_LENGTH
}

/// Returns `true` for defaulted boolean toggles.
const fn default_true() -> bool {
    true
}

/// Reference-store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Built-in in-memory stores.
    #[default]
    Memory,
    /// SQLite-backed stores.
    Sqlite,
}

/// Reference-store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoresSection {
    /// Store backend selection.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Database path, required for the SQLite backend.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Whether empty stores are seeded with the default reference data.
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
}

impl Default for StoresSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            path: None,
            busy_timeout_ms: default_busy_timeout_ms(),
            seed_defaults: true,
        }
    }
}

/// Returns the default SQLite busy timeout.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines to stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
}

/// Audit logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AuditSection {
    /// Audit sink selection.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log path, required for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// ============================================================================
// SECTION: Configuration Root
// ============================================================================

/// Root Urlwarden configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UrlwardenConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSection,
    /// Inspection pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineSection,
    /// Reference-store settings.
    #[serde(default)]
    pub stores: StoresSection,
    /// Audit logging settings.
    #[serde(default)]
    pub audit: AuditSection,
}

impl UrlwardenConfig {
    /// Loads configuration from the given path.
    ///
    /// Falls back to the `URLWARDEN_CONFIG` environment variable and then
    /// the default filename when no path is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized, not
    /// UTF-8, not valid TOML, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section, failing closed on the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid("server.bind must be a socket address".to_string()))?;

        if self.pipeline.allowed_schemes.is_empty() {
            return Err(ConfigError::Invalid("pipeline.allowed_schemes must not be empty".to_string()));
        }
        if self.pipeline.allowed_schemes.len() > MAX_ALLOWED_SCHEMES {
            return Err(ConfigError::Invalid("pipeline.allowed_schemes exceeds entry limit".to_string()));
        }
        for scheme in &self.pipeline.allowed_schemes {
            if scheme.is_empty() || !scheme.chars().all(|ch| ch.is_ascii_lowercase()) {
                return Err(ConfigError::Invalid(
                    "pipeline.allowed_schemes entries must be lowercase ascii".to_string(),
                ));
            }
        }
        if self.pipeline.min_port == 0 {
            return Err(ConfigError::Invalid("pipeline.min_port must be at least 1".to_string()));
        }
        if self.pipeline.min_port > self.pipeline.max_port {
            return Err(ConfigError::Invalid(
                "pipeline.min_port must not exceed pipeline.max_port".to_string(),
            ));
        }
        if self.pipeline.max_url_length == 0 || self.pipeline.max_url_length > MAX_URL_LENGTH_LIMIT
        {
            return Err(ConfigError::Invalid("pipeline.max_url_length is out of range".to_string()));
        }

        if self.stores.backend == StoreBackend::Sqlite {
            let path = self.stores.path.as_ref().ok_or_else(|| {
                ConfigError::Invalid("stores.path is required for the sqlite backend".to_string())
            })?;
            validate_path(path)?;
        }

        if self.audit.sink == AuditSinkKind::File {
            let path = self.audit.path.as_ref().ok_or_else(|| {
                ConfigError::Invalid("audit.path is required for the file sink".to_string())
            })?;
            validate_path(path)?;
        }

        Ok(())
    }

    /// Returns the engine configuration derived from the pipeline section.
    #[must_use]
    pub fn pipeline_config(&self) -> PipelineConfig {
        self.pipeline.to_pipeline_config()
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Resolves the configuration path from argument, environment, or default.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    path.map_or_else(
        || env::var(CONFIG_ENV_VAR).map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from),
        Path::to_path_buf,
    )
}

/// Applies length limits to a filesystem path.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("path exceeds total length limit".to_string()));
    }
    for component in path.components() {
        if let Component::Normal(part) = component {
            if part.len() > MAX_PATH_COMPONENT_LENGTH {
                return Err(ConfigError::Invalid("path component exceeds length limit".to_string()));
            }
        }
    }
    Ok(())
}
