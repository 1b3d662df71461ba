//! Infrastructure layer for the profview tool.
//!
//! Contains the file-system adapters behind the application layer's
//! [`SettingsRepository`](crate::application::named_configs::SettingsRepository)
//! trait, plus the tool's own TOML configuration.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `profview_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod storage;
