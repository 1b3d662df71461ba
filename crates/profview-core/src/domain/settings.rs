//! Named views as persisted in the settings file.
//!
//! On disk the settings look like this:
//!
//! ```json
//! {
//!   "configs": [
//!     { "name": "hot paths", "sort": "cum", "nodecount": 40, "trim": true },
//!     { "name": "allocs", "focus": "malloc", "granularity": "lines" }
//!   ]
//! }
//! ```
//!
//! Each entry inlines the persisted fields of a [`ViewConfig`] next to its
//! name.  Names are unique within a [`Settings`] value; replacing and removing
//! go by exact name match.

use serde::{Deserialize, Serialize};

use crate::domain::config::ViewConfig;

/// A [`ViewConfig`] snapshot saved under a user-chosen name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedConfig {
    pub name: String,
    #[serde(flatten)]
    pub config: ViewConfig,
}

/// The complete contents of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub configs: Vec<NamedConfig>,
}

impl Settings {
    /// Returns the view saved under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&NamedConfig> {
        self.configs.iter().find(|c| c.name == name)
    }

    /// Stores `config` under `name`.
    ///
    /// An existing entry with the same name is replaced in place, keeping
    /// its position; otherwise the view is appended.
    pub fn upsert(&mut self, name: &str, config: ViewConfig) {
        match self.configs.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.config = config,
            None => self.configs.push(NamedConfig {
                name: name.to_string(),
                config,
            }),
        }
    }

    /// Removes and returns the view saved under `name`.
    ///
    /// Returns `None`, leaving the list untouched, if no such view exists.
    pub fn remove(&mut self, name: &str) -> Option<NamedConfig> {
        let index = self.configs.iter().position(|c| c.name == name)?;
        Some(self.configs.remove(index))
    }

    /// Overwrites the transient fields of every view with those of `live`.
    pub fn reset_transient(&mut self, live: &ViewConfig) {
        for named in &mut self.configs {
            named.config.reset_transient(live);
        }
    }
}
