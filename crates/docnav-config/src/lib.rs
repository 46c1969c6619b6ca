//! Navigation configuration for documentation sites.
//!
//! Describes site identity (title, description, base path) and the sidebar
//! tree an external site tool renders. Configuration files are parsed with
//! serde and auto-discovered in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## File Formats
//!
//! The format follows the file extension:
//!
//! - `.toml` - default, `docnav.toml` is the discovered file name
//! - `.json` - same keys the site tool consumes
//! - `.yaml` / `.yml`
//!
//! Unknown keys are logged and ignored. Missing or mistyped fields fail the
//! load, and so does any validation error (see
//! [`NavigationConfig::validate`]).

mod format;
mod sidebar;
mod validate;

use std::path::{Path, PathBuf};

pub use format::{Decoded, Format, decode};
pub use sidebar::{NavigationConfig, SidebarGroup, SidebarItem};
pub use validate::{Issue, Location, Rule, Severity, ValidationReport};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docnav.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site base path.
    pub base_path: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// No configuration file given and none discovered.
    #[error("No docnav.toml found in {} or its parents", .0.display())]
    NotDiscovered(PathBuf),
    /// Extension does not map to a known format.
    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Encoder rejected the value.
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Validation failed.
    #[error("Invalid navigation configuration:\n{0}")]
    Invalid(ValidationReport),
}

impl NavigationConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied before validation, so an override can fix
    /// (or break) the file's values.
    ///
    /// # Errors
    ///
    /// Returns error if the file is missing, cannot be parsed, or fails
    /// validation with at least one error-severity issue.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::load_with_report(config_path, cli_settings)?.0)
    }

    /// Like [`NavigationConfig::load`], but also returns the full report so
    /// callers can surface warnings.
    ///
    /// # Errors
    ///
    /// Same as [`NavigationConfig::load`].
    pub fn load_with_report(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<(Self, ValidationReport), ConfigError> {
        let path = resolve_config_path(config_path)?;
        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        let report = config.validate();
        if report.has_errors() {
            return Err(ConfigError::Invalid(report));
        }
        for warning in report.warnings() {
            tracing::warn!(path = %path.display(), "{warning}");
        }

        Ok((config, report))
    }

    /// Load and parse a file without validating it.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let format = Format::from_path(path)?;
        tracing::debug!(path = %path.display(), %format, "Loading navigation config");

        let content = std::fs::read_to_string(path)?;
        Self::from_str_with(format, &content)
    }

    /// Apply CLI settings to the configuration.
    pub fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_path) = &settings.base_path {
            self.base_path.clone_from(base_path);
        }
    }
}

/// Use the explicit config path, or discover one from the current directory.
///
/// # Errors
///
/// Returns `ConfigError::NotDiscovered` if no path is given and no
/// `docnav.toml` exists in the current directory or its parents.
pub fn resolve_config_path(config_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = config_path {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    discover_config(&cwd).ok_or(ConfigError::NotDiscovered(cwd))
}

/// Search for the config file in `start` and its parents.
#[must_use]
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "Discovered navigation config");
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
