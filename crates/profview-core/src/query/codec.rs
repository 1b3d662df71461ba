//! Codec between a [`ViewConfig`] and URL query parameters.
//!
//! Link format:
//! ```text
//! http://host/ui/?n=40&sort=cum&trim=f&f=runtime%5C.malloc
//! ```
//! Only fields that differ from [`ViewConfig::default`] appear in a URL.
//! Boolean fields are written as a single `t` or `f`.
//!
//! Both directions walk the [`FieldRegistry`] in its fixed order, so error
//! messages and partially applied decodes are reproducible.

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::domain::config::ViewConfig;
use crate::domain::field::{FieldError, FieldKind};
use crate::domain::registry::FieldRegistry;
use crate::query::params::QueryParams;

/// A URL parameter could not be applied to its field.
#[derive(Debug, Error, PartialEq)]
#[error("error setting config field {field}: {source}")]
pub struct DecodeError {
    /// Canonical name of the field that failed.
    pub field: &'static str,
    #[source]
    pub source: FieldError,
}

/// Applies the URL parameters in `params` to `cfg`.
///
/// Every field with a URL parameter is considered, in registry order.  A
/// parameter that is absent or empty leaves its field untouched; it does not
/// reset the field to its default.
///
/// # Errors
///
/// Stops at the first parameter that fails to parse and returns a
/// [`DecodeError`] naming the field.  Fields assigned before the failing one
/// keep their new values.
///
/// # Examples
///
/// ```rust
/// use profview_core::{decode_from_url, FieldRegistry, QueryParams, ViewConfig};
///
/// let registry = FieldRegistry::new();
/// let mut cfg = ViewConfig::default();
/// decode_from_url(&mut cfg, &registry, &QueryParams::parse("n=5&trim=f")).unwrap();
/// assert_eq!(cfg.node_count, 5);
/// assert!(!cfg.trim);
/// ```
pub fn decode_from_url(
    cfg: &mut ViewConfig,
    registry: &FieldRegistry,
    params: &QueryParams,
) -> Result<(), DecodeError> {
    for field in registry.fields() {
        let Some(param) = field.url_param() else {
            continue;
        };
        let value = match params.get(param) {
            Some(value) if !value.is_empty() => value,
            _ => continue,
        };
        field.set(cfg, value).map_err(|source| DecodeError {
            field: field.name(),
            source,
        })?;
        debug!(field = field.name(), param, value, "applied URL parameter");
    }
    Ok(())
}

/// Writes the persisted fields of `cfg` into the query of `base`.
///
/// Returns the resulting URL and whether any parameter changed.  When nothing
/// changed the original URL is returned as-is, so comparing a view against
/// the current page URL costs no rewriting.
///
/// # Examples
///
/// ```rust
/// use profview_core::{encode_to_url, FieldRegistry, ViewConfig};
/// use url::Url;
///
/// let registry = FieldRegistry::new();
/// let base = Url::parse("http://localhost/ui/").unwrap();
///
/// let (same, changed) = encode_to_url(&ViewConfig::default(), &registry, &base);
/// assert!(!changed);
/// assert_eq!(same, base);
///
/// let cfg = ViewConfig { node_count: 5, ..ViewConfig::default() };
/// let (url, changed) = encode_to_url(&cfg, &registry, &base);
/// assert!(changed);
/// assert_eq!(url.as_str(), "http://localhost/ui/?n=5");
/// ```
pub fn encode_to_url(cfg: &ViewConfig, registry: &FieldRegistry, base: &Url) -> (Url, bool) {
    let mut params = QueryParams::from_url(base);
    let mut changed = false;

    for field in registry.fields() {
        let Some(param) = field.url_param() else {
            continue;
        };
        if !field.is_saved() {
            continue;
        }

        let mut value = field.get(cfg);
        if value == field.default_value() {
            // Defaults are represented by the parameter's absence.
            value.clear();
        } else if field.kind() == FieldKind::Boolean {
            value.truncate(1);
        }

        if params.get(param).unwrap_or("") == value {
            continue;
        }
        changed = true;
        if value.is_empty() {
            params.remove(param);
        } else {
            params.set(param, &value);
        }
    }

    if !changed {
        return (base.clone(), false);
    }

    let mut url = base.clone();
    if params.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&params.encode()));
    }
    debug!(url = %url, "view encoded into URL");
    (url, true)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
