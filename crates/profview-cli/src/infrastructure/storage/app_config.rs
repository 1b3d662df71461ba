//! TOML configuration for the profview tool itself.
//!
//! This is separate from the settings file: it configures *how the tool
//! runs*, not which views the user has saved.  It is optional; when the file
//! does not exist every value takes its default.
//!
//! ```toml
//! [general]
//! log_level = "debug"
//! settings_file = "/home/me/profiles/views.json"
//!
//! [web]
//! base_url = "http://localhost:8080/ui/"
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file, and whole
//! sections may be omitted via `#[serde(default)]` on the section.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config_dir;

/// File name of the tool config inside the config directory.
pub const APP_CONFIG_FILE_NAME: &str = "profview.toml";

/// Error type for tool configuration files.
#[derive(Debug, Error)]
pub enum AppConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Overrides the settings file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebConfig {
    /// Page URL that view links and menus are built against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}
fn default_base_url() -> String {
    "http://localhost:8080/ui/".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            settings_file: None,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Resolves the default tool config path, if the platform has a config
/// directory.
pub fn app_config_file_path() -> Option<PathBuf> {
    config_dir().ok().map(|dir| dir.join(APP_CONFIG_FILE_NAME))
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`AppConfigError::Io`] for file-system errors other than "not
/// found", and [`AppConfigError::Parse`] if the TOML is malformed.
pub fn load_app_config(path: &Path) -> Result<AppConfig, AppConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(AppConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
