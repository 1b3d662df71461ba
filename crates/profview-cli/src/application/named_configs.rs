//! Named view configurations: save, remove, list, and the view menu.
//!
//! A *named config* is a snapshot of the persisted fields of a
//! [`ViewConfig`] stored under a user-chosen name.  The web UI offers them in
//! a drop-down menu; picking one navigates to a URL whose query encodes the
//! snapshot.
//!
//! # Read-modify-write (for beginners)
//!
//! Every mutation follows the same three steps:
//!
//! ```text
//! load settings  ──►  change one entry  ──►  store settings
//! ```
//!
//! Nothing is cached between calls, so two processes sharing a settings file
//! see each other's changes on the next call.  When a mutation fails (for
//! example, removing a name that does not exist) the store step is skipped
//! and the file is left exactly as it was.
//!
//! The storage backend is reached only through the [`SettingsRepository`]
//! trait.  Production code plugs in the JSON file adapter from
//! `infrastructure::storage`; tests use the in-memory one.

use std::path::PathBuf;
use std::sync::Arc;

use profview_core::{
    decode_from_url, encode_to_url, DecodeError, NamedConfig, QueryParams, Settings, ViewConfig,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use super::current_config::CurrentConfig;

/// Query parameter carrying the name in a save request.
pub const CONFIG_NAME_PARAM: &str = "config";

/// Name of the built-in entry at the top of the view menu.
pub const DEFAULT_CONFIG_NAME: &str = "Default";

/// Error type for settings persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON, or could not be written as JSON.
    #[error("malformed settings file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error type for the named config use cases.
#[derive(Debug, Error)]
pub enum NamedConfigError {
    /// A save was requested without a config name.
    #[error("invalid config name")]
    MissingName,

    /// No named config with this name exists.
    #[error("config {0:?} not found")]
    NotFound(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Abstraction over where the settings live.
///
/// Implementations read and write the *whole* settings value; callers never
/// see partial updates.
pub trait SettingsRepository: Send + Sync {
    /// Loads the settings.  A store that has never been written yields
    /// [`Settings::default`].
    fn load(&self) -> Result<Settings, StorageError>;

    /// Replaces the stored settings with `settings`.
    fn store(&self, settings: &Settings) -> Result<(), StorageError>;
}

/// One entry of the view menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigMenuEntry {
    pub name: String,
    /// Path-relative link (`/ui/?n=40`) that selects this view.
    pub url: String,
    /// True for the entry that matches the page the menu was built for.
    pub current: bool,
    /// False only for the built-in `Default` entry.
    #[serde(rename = "userConfig")]
    pub user_config: bool,
}

/// Use cases over the named configs stored in `R`.
pub struct NamedConfigs<R> {
    repo: R,
    current: Arc<CurrentConfig>,
}

impl<R: SettingsRepository> NamedConfigs<R> {
    pub fn new(repo: R, current: Arc<CurrentConfig>) -> Self {
        Self { repo, current }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns every named config.
    ///
    /// Transient fields are never stored, so each snapshot gets the live
    /// values for them before it is returned.
    pub fn list(&self) -> Result<Vec<NamedConfig>, NamedConfigError> {
        let mut settings = self.repo.load()?;
        let live = self.current.read();
        settings.reset_transient(&live);
        Ok(settings.configs)
    }

    /// Stores `config` under `name`, replacing any entry with that name.
    pub fn save(&self, name: &str, config: ViewConfig) -> Result<(), NamedConfigError> {
        if name.is_empty() {
            return Err(NamedConfigError::MissingName);
        }
        let mut settings = self.repo.load()?;
        let replaced = settings.get(name).is_some();
        settings.upsert(name, config);
        self.repo.store(&settings)?;
        info!(name, replaced, "saved named config");
        Ok(())
    }

    /// Saves the view described by a request URL.
    ///
    /// The name comes from the `config` query parameter.  The snapshot is the
    /// live configuration with the request's view parameters applied on top;
    /// the live configuration itself is not modified.
    pub fn save_from_request(&self, request: &Url) -> Result<(), NamedConfigError> {
        let params = QueryParams::from_url(request);
        let name = match params.get(CONFIG_NAME_PARAM) {
            Some(name) if !name.is_empty() => name,
            _ => return Err(NamedConfigError::MissingName),
        };

        let mut cfg = self.current.read();
        decode_from_url(&mut cfg, self.current.registry(), &params)?;
        self.save(name, cfg)
    }

    /// Deletes the config saved under `name`.
    pub fn remove(&self, name: &str) -> Result<(), NamedConfigError> {
        let mut settings = self.repo.load()?;
        if settings.remove(name).is_none() {
            return Err(NamedConfigError::NotFound(name.to_string()));
        }
        self.repo.store(&settings)?;
        info!(name, "removed named config");
        Ok(())
    }

    /// Builds the view menu for the page at `page`.
    ///
    /// The built-in `Default` view comes first, followed by the user's
    /// configs in stored order.  Each entry's URL is `page` re-encoded with
    /// that view.  The *last* entry whose encoding leaves `page` unchanged is
    /// marked current.
    ///
    /// Settings that cannot be read are logged and treated as empty, so the
    /// menu always has at least the `Default` entry.
    pub fn menu(&self, page: &Url) -> Vec<ConfigMenuEntry> {
        let mut configs = vec![NamedConfig {
            name: DEFAULT_CONFIG_NAME.to_string(),
            config: ViewConfig::default(),
        }];
        match self.repo.load() {
            Ok(settings) => configs.extend(settings.configs),
            Err(e) => warn!(error = %e, "could not read settings; menu shows built-in views only"),
        }

        let registry = self.current.registry();
        let mut current = None;
        let mut entries: Vec<ConfigMenuEntry> = configs
            .into_iter()
            .enumerate()
            .map(|(i, named)| {
                let (url, changed) = encode_to_url(&named.config, registry, page);
                if !changed {
                    current = Some(i);
                }
                ConfigMenuEntry {
                    name: named.name,
                    url: menu_link(&url),
                    current: false,
                    user_config: i != 0,
                }
            })
            .collect();

        if let Some(i) = current {
            entries[i].current = true;
        }
        entries
    }
}

/// Renders `url` without scheme and host; an empty query gets no `?`.
fn menu_link(url: &Url) -> String {
    match url.query() {
        Some(query) if !query.is_empty() => format!("{}?{query}", url.path()),
        _ => url.path().to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
