//! # profview-core
//!
//! Shared library for profview containing the view configuration record, the
//! field registry that describes it, and the codec that maps a configuration
//! to and from URL query parameters.
//!
//! It has zero dependencies on the file system, global state, or any UI.
//!
//! # Architecture overview (for beginners)
//!
//! profview lets a user tune how a profile is displayed (sort order, node
//! thresholds, focus/ignore patterns, ...), save those tunings as named
//! "views", and share them as bookmarkable URLs.
//!
//! This crate (`profview-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – The [`ViewConfig`] record, the [`FieldRegistry`] that
//!   knows every configurable field (its URL parameter, its allowed choices,
//!   its default), and the records persisted in the settings file.
//!
//! - **`query`** – How a configuration travels through a URL.  Fields that
//!   still hold their default value are left out, booleans are shortened to a
//!   single `t`/`f`, and the URL is only rewritten when something actually
//!   changed.

pub mod domain;
pub mod query;

// Re-export the most-used types at the crate root so callers can write
// `profview_core::ViewConfig` instead of `profview_core::domain::config::ViewConfig`.
pub use domain::config::ViewConfig;
pub use domain::field::{FieldAccessor, FieldDescriptor, FieldError, FieldKind};
pub use domain::registry::{FieldRegistry, FieldSpec, RegistryError};
pub use domain::settings::{NamedConfig, Settings};
pub use query::codec::{decode_from_url, encode_to_url, DecodeError};
pub use query::params::QueryParams;
