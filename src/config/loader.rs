//! Configuration file loading with precedence handling.

use crate::source::http::DEFAULT_ENDPOINT;
use crate::source::paginator::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};
use crate::source::PaginatorConfig;
use crate::state::reveal::{DEFAULT_INITIAL_VISIBLE, DEFAULT_REVEAL_STEP};
use crate::state::RevealState;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "ARBRES_CONFIG";
/// Environment variable overriding the records endpoint.
pub const ENV_ENDPOINT: &str = "ARBRES_ENDPOINT";
/// Environment variable overriding the page size.
pub const ENV_PAGE_SIZE: &str = "ARBRES_PAGE_SIZE";

/// Default number of description characters shown before "See more".
pub const DEFAULT_DESCRIPTION_PREVIEW: usize = 120;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/arbres/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Records endpoint of the open-data collection.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Records requested per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Hard cap on pages requested in one ingestion.
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// Records shown before the first "load more".
    #[serde(default)]
    pub initial_visible: Option<usize>,

    /// Records added per "load more".
    #[serde(default)]
    pub reveal_step: Option<usize>,

    /// Description characters shown while collapsed.
    #[serde(default)]
    pub description_preview: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Records endpoint.
    pub endpoint: String,
    /// Records per page.
    pub page_size: NonZeroUsize,
    /// Hard page cap.
    pub max_pages: usize,
    /// Initial reveal window size.
    pub initial_visible: usize,
    /// Reveal window growth.
    pub reveal_step: NonZeroUsize,
    /// Collapsed description length.
    pub description_preview: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            initial_visible: DEFAULT_INITIAL_VISIBLE,
            reveal_step: NonZeroUsize::new(DEFAULT_REVEAL_STEP).unwrap_or(NonZeroUsize::MIN),
            description_preview: DEFAULT_DESCRIPTION_PREVIEW,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Paginator settings derived from this config.
    pub fn paginator(&self) -> PaginatorConfig {
        PaginatorConfig {
            page_size: self.page_size,
            max_pages: self.max_pages,
        }
    }

    /// Fresh reveal window derived from this config.
    pub fn reveal(&self) -> RevealState {
        RevealState::new(self.initial_visible, self.reveal_step.get())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/arbres/arbres.log` on Unix-like systems,
/// or the platform state directory elsewhere.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("arbres").join("arbres.log")
    } else {
        PathBuf::from("arbres.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/arbres/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("arbres").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ARBRES_CONFIG` environment variable
/// 3. Default path `~/.config/arbres/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use
/// the default. Zero page sizes and reveal steps fall back to defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        endpoint: config.endpoint.unwrap_or(defaults.endpoint),
        page_size: non_zero_or("page_size", config.page_size, defaults.page_size),
        max_pages: config.max_pages.unwrap_or(defaults.max_pages),
        initial_visible: config.initial_visible.unwrap_or(defaults.initial_visible),
        reveal_step: non_zero_or("reveal_step", config.reveal_step, defaults.reveal_step),
        description_preview: config
            .description_preview
            .unwrap_or(defaults.description_preview),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

fn non_zero_or(field: &str, value: Option<usize>, default: NonZeroUsize) -> NonZeroUsize {
    match value {
        Some(n) => NonZeroUsize::new(n).unwrap_or_else(|| {
            warn!(field, "Zero is not a valid value, using default");
            default
        }),
        None => default,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `ARBRES_ENDPOINT`: Override endpoint
/// - `ARBRES_PAGE_SIZE`: Override page size (ignored unless a positive integer)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(endpoint) = std::env::var(ENV_ENDPOINT) {
        config.endpoint = endpoint;
    }

    if let Ok(raw) = std::env::var(ENV_PAGE_SIZE) {
        match raw.trim().parse::<NonZeroUsize>() {
            Ok(page_size) => config.page_size = page_size,
            Err(_) => warn!(value = %raw, "Ignoring invalid ARBRES_PAGE_SIZE"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    endpoint_override: Option<String>,
    page_size_override: Option<NonZeroUsize>,
) -> ResolvedConfig {
    if let Some(endpoint) = endpoint_override {
        config.endpoint = endpoint;
    }

    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
