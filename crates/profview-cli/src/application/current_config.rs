//! The live view configuration shared across handlers.
//!
//! [`CurrentConfig`] holds the one configuration value that command-line
//! assignments, interactive `name=value` commands and URL decoding all
//! mutate.  It is created once at startup and handed to every consumer as an
//! `Arc<CurrentConfig>`; there is no hidden global.
//!
//! # Locking
//!
//! All access goes through a single `std::sync::Mutex`.  The lock is held
//! only long enough to copy the value out or to assign one field, never
//! across I/O.  Callers that need to run the codec take a copy with
//! [`CurrentConfig::read`] and work on that.
//!
//! A poisoned lock is recovered rather than propagated: every mutation is a
//! single field assignment, so the value behind the lock is always a valid
//! configuration.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use profview_core::domain::field::parse_flag;
use profview_core::{FieldError, FieldRegistry, ViewConfig};
use tracing::debug;

/// Process-wide mutable view configuration.
pub struct CurrentConfig {
    registry: Arc<FieldRegistry>,
    value: Mutex<ViewConfig>,
}

impl CurrentConfig {
    /// Creates a store holding [`ViewConfig::default`].
    pub fn new(registry: Arc<FieldRegistry>) -> Self {
        Self::with_value(registry, ViewConfig::default())
    }

    pub fn with_value(registry: Arc<FieldRegistry>, value: ViewConfig) -> Self {
        Self {
            registry,
            value: Mutex::new(value),
        }
    }

    /// The field registry this store resolves names against.
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Returns a copy of the live configuration.
    pub fn read(&self) -> ViewConfig {
        self.lock().clone()
    }

    /// Replaces the live configuration as a whole.
    pub fn replace(&self, cfg: ViewConfig) {
        *self.lock() = cfg;
    }

    /// Assigns `value` to the field identified by `name`.
    ///
    /// `name` may be a canonical field name (`nodecount=80`) or one of a
    /// multi-choice field's values used as a flag (`cum=true` sets `sort`
    /// to `cum`).
    ///
    /// # Errors
    ///
    /// - [`FieldError::UnknownField`] if `name` is not configurable, or is a
    ///   choice assigned anything other than a true flag.
    /// - Any error from [`profview_core::FieldDescriptor::set`].
    pub fn configure(&self, name: &str, value: &str) -> Result<(), FieldError> {
        let mut cfg = self.lock();
        let field = self
            .registry
            .lookup(name)
            .ok_or_else(|| FieldError::UnknownField(name.to_string()))?;

        if field.name() == name {
            field.set(&mut cfg, value)?;
        } else if parse_flag(value) == Some(true) {
            // `name` is one of the field's choices.
            field.set(&mut cfg, name)?;
        } else {
            return Err(FieldError::UnknownField(name.to_string()));
        }
        debug!(name, value, field = field.name(), "configured");
        Ok(())
    }

    /// Overwrites the transient fields of `cfg` with the live values.
    pub fn reset_transient(&self, cfg: &mut ViewConfig) {
        let live = self.lock();
        cfg.reset_transient(&live);
    }

    fn lock(&self) -> MutexGuard<'_, ViewConfig> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
