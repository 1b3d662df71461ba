//! Storage infrastructure: settings and tool configuration persistence.
//!
//! - `settings_file` – the JSON settings file holding named views.
//! - `memory` – an in-memory settings store for tests.
//! - `app_config` – the optional TOML file configuring the tool itself.
//!
//! Both files live in the same platform-appropriate directory, resolved by
//! [`config_dir`]:
//! - Windows:  `%APPDATA%\profview\`
//! - Linux:    `$XDG_CONFIG_HOME/profview/` or `~/.config/profview/`
//! - macOS:    `~/Library/Application Support/profview/`

use std::path::PathBuf;

use crate::application::named_configs::StorageError;

pub mod app_config;
pub mod memory;
pub mod settings_file;

/// Name of the per-user directory under the platform config directory.
const APP_DIR: &str = "profview";

/// Determines the platform-appropriate directory for profview's files.
///
/// # Errors
///
/// Returns [`StorageError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, StorageError> {
    platform_config_dir()
        .map(|base| base.join(APP_DIR))
        .ok_or(StorageError::NoPlatformConfigDir)
}

/// Resolves the platform config base directory without the `profview`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}
