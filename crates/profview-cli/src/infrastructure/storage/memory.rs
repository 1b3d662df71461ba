//! In-memory settings store.
//!
//! Lets tests exercise the named config use cases without touching the file
//! system.

use std::sync::{Mutex, PoisonError};

use profview_core::Settings;

use crate::application::named_configs::{SettingsRepository, StorageError};

/// A [`SettingsRepository`] backed by a mutex-guarded [`Settings`] value.
#[derive(Default)]
pub struct InMemorySettings {
    settings: Mutex<Settings>,
    store_count: Mutex<u32>,
}

impl InMemorySettings {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(settings),
            store_count: Mutex::new(0),
        }
    }

    /// Returns the number of times [`SettingsRepository::store`] was called.
    pub fn store_count(&self) -> u32 {
        *self.store_count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SettingsRepository for InMemorySettings {
    fn load(&self) -> Result<Settings, StorageError> {
        Ok(self
            .settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, settings: &Settings) -> Result<(), StorageError> {
        *self.settings.lock().unwrap_or_else(PoisonError::into_inner) = settings.clone();
        *self.store_count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
