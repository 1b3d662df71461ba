//! JSON settings file holding the user's named views.
//!
//! The file lives at `<config dir>/settings.json` unless overridden, and
//! looks like this:
//!
//! ```json
//! {
//!   "configs": [
//!     {
//!       "name": "hot paths",
//!       "sort": "cum",
//!       "nodecount": 40,
//!       "trim": true
//!     }
//!   ]
//! }
//! ```
//!
//! A file that does not exist yet reads as empty settings.  Writing creates
//! the directory first; on Unix the directory is private to the user (mode
//! `0700`).

use std::path::{Path, PathBuf};

use profview_core::Settings;
use tracing::debug;

use super::config_dir;
use crate::application::named_configs::{SettingsRepository, StorageError};

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Resolves the default settings file path.
///
/// # Errors
///
/// Returns [`StorageError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn settings_file_path() -> Result<PathBuf, StorageError> {
    Ok(config_dir()?.join(SETTINGS_FILE_NAME))
}

/// A [`SettingsRepository`] reading and writing one JSON file.
#[derive(Debug, Clone)]
pub struct JsonSettingsFile {
    path: PathBuf,
}

impl JsonSettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the settings file at the platform default location.
    pub fn at_default_location() -> Result<Self, StorageError> {
        Ok(Self::new(settings_file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
        move |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl SettingsRepository for JsonSettingsFile {
    fn load(&self) -> Result<Settings, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "settings file absent; using empty settings");
                return Ok(Settings::default());
            }
            Err(e) => return Err(Self::io_error(&self.path)(e)),
        };

        serde_json::from_str(&content).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn store(&self, settings: &Settings) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            create_private_dir(dir).map_err(Self::io_error(dir))?;
        }

        let content =
            serde_json::to_string_pretty(settings).map_err(|source| StorageError::Format {
                path: self.path.clone(),
                source,
            })?;
        std::fs::write(&self.path, content).map_err(Self::io_error(&self.path))?;
        debug!(path = %self.path.display(), configs = settings.configs.len(), "settings written");
        Ok(())
    }
}

/// Creates `dir` and its parents, readable only by the current user on Unix.
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
