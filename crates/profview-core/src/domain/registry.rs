//! The field registry: every configurable field of [`ViewConfig`], in order.
//!
//! The registry is built once at startup from an explicit table of
//! [`FieldSpec`]s and is immutable afterwards, so it can be shared freely
//! (typically behind an `Arc`) without locking.
//!
//! # Name lookup and choice groups
//!
//! Some fields take one of a bounded set of values, for example `sort` is
//! either `cum` or `flat`.  Each such value is also registered as a lookup
//! key for its field, so `sort`, `cum` and `flat` all resolve to the `sort`
//! descriptor.  This lets a user type `cum` instead of `sort=cum`.
//!
//! # URL parameters are a compatibility surface
//!
//! The short URL parameter names in [`builtin_fields`] appear in every
//! bookmark and shared link ever produced.  Renaming one breaks those links.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::domain::config::ViewConfig;
use crate::domain::field::{FieldAccessor, FieldDescriptor, FieldKind};

/// Errors detected while building a registry from a field table.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    /// Two fields, or a field and a choice, share the same lookup name.
    #[error("duplicate config name {0:?}")]
    DuplicateName(&'static str),

    /// Choices were declared on a field that does not hold a string.
    #[error("field {0:?} declares choices but is not a string field")]
    ChoicesOnNonString(&'static str),
}

/// One row of the field table fed to [`FieldRegistry::build`].
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub url_param: Option<&'static str>,
    pub saved: bool,
    pub choices: &'static [&'static str],
    pub accessor: FieldAccessor,
}

impl FieldSpec {
    /// A field saved in named views and carried in URLs as `url_param`.
    pub fn saved(name: &'static str, url_param: &'static str, accessor: FieldAccessor) -> Self {
        Self {
            name,
            url_param: Some(url_param),
            saved: true,
            choices: &[],
            accessor,
        }
    }

    /// A session-only field: never saved, and not in URLs unless
    /// [`Self::with_url_param`] is applied.
    pub fn transient(name: &'static str, accessor: FieldAccessor) -> Self {
        Self {
            name,
            url_param: None,
            saved: false,
            choices: &[],
            accessor,
        }
    }

    pub fn with_url_param(mut self, url_param: &'static str) -> Self {
        self.url_param = Some(url_param);
        self
    }

    pub fn with_choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }
}

macro_rules! accessor {
    ($variant:ident, $field:ident) => {
        FieldAccessor::$variant {
            get: |cfg| &cfg.$field,
            get_mut: |cfg| &mut cfg.$field,
        }
    };
}

/// The field table for [`ViewConfig`], in registry order.
pub fn builtin_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::transient("output", accessor!(Text, output)),
        FieldSpec::saved("call_tree", "calltree", accessor!(Flag, call_tree)),
        FieldSpec::saved("relative_percentages", "rel", accessor!(Flag, relative_percentages)),
        FieldSpec::saved("unit", "unit", accessor!(Text, unit)),
        FieldSpec::saved("compact_labels", "compact", accessor!(Flag, compact_labels)),
        FieldSpec::transient("source_path", accessor!(Text, source_path)),
        FieldSpec::transient("trim_path", accessor!(Text, trim_path)),
        FieldSpec::saved("intel_syntax", "intel", accessor!(Flag, intel_syntax)),
        FieldSpec::saved("mean", "mean", accessor!(Flag, mean)),
        // Not saved in named views, but accepted from URLs.
        FieldSpec::transient("sample_index", accessor!(Text, sample_index)).with_url_param("si"),
        FieldSpec::transient("divide_by", accessor!(Float, divide_by)),
        FieldSpec::saved("normalize", "norm", accessor!(Flag, normalize)),
        FieldSpec::saved("sort", "sort", accessor!(Text, sort)).with_choices(&["cum", "flat"]),
        FieldSpec::saved("drop_negative", "dropneg", accessor!(Flag, drop_negative)),
        FieldSpec::saved("nodecount", "n", accessor!(Integer, node_count)),
        FieldSpec::saved("nodefraction", "nf", accessor!(Float, node_fraction)),
        FieldSpec::saved("edgefraction", "ef", accessor!(Float, edge_fraction)),
        FieldSpec::saved("trim", "trim", accessor!(Flag, trim)),
        FieldSpec::saved("focus", "f", accessor!(Text, focus)),
        FieldSpec::saved("ignore", "i", accessor!(Text, ignore)),
        FieldSpec::saved("prune_from", "prunefrom", accessor!(Text, prune_from)),
        FieldSpec::saved("hide", "h", accessor!(Text, hide)),
        FieldSpec::saved("show", "s", accessor!(Text, show)),
        FieldSpec::saved("show_from", "sf", accessor!(Text, show_from)),
        FieldSpec::saved("tagfocus", "tf", accessor!(Text, tag_focus)),
        FieldSpec::saved("tagignore", "ti", accessor!(Text, tag_ignore)),
        FieldSpec::saved("tagshow", "ts", accessor!(Text, tag_show)),
        FieldSpec::saved("taghide", "th", accessor!(Text, tag_hide)),
        FieldSpec::saved("noinlines", "noinlines", accessor!(Flag, no_inlines)),
        FieldSpec::saved("granularity", "g", accessor!(Text, granularity)).with_choices(&[
            "functions",
            "filefunctions",
            "files",
            "lines",
            "addresses",
        ]),
    ]
}

/// Ordered, immutable set of [`FieldDescriptor`]s plus a name lookup table.
#[derive(Debug)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
    /// Canonical names and choice values, mapped to an index into `fields`.
    by_name: HashMap<&'static str, usize>,
}

impl FieldRegistry {
    /// Builds the registry for the built-in [`ViewConfig`] field table.
    pub fn new() -> Self {
        // The built-in table is a compile-time constant covered by tests, so
        // a failure here is a programming error.
        Self::build(builtin_fields()).expect("built-in field table must be consistent")
    }

    /// Builds a registry from an explicit field table.
    ///
    /// Rows with an empty name are not configurable and are skipped.  Each
    /// descriptor's default value is read from [`ViewConfig::default`].
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateName`] if a field name or choice value is
    ///   registered twice.
    /// - [`RegistryError::ChoicesOnNonString`] if a non-string field declares
    ///   choices.
    pub fn build(specs: Vec<FieldSpec>) -> Result<Self, RegistryError> {
        let defaults = ViewConfig::default();
        let mut fields = Vec::with_capacity(specs.len());
        let mut by_name = HashMap::new();

        for spec in specs {
            if spec.name.is_empty() {
                continue;
            }
            if !spec.choices.is_empty() && spec.accessor.kind() != FieldKind::String {
                return Err(RegistryError::ChoicesOnNonString(spec.name));
            }

            let mut descriptor = FieldDescriptor {
                name: spec.name,
                url_param: spec.url_param,
                saved: spec.saved,
                choices: spec.choices,
                accessor: spec.accessor,
                default_value: String::new(),
            };
            descriptor.default_value = descriptor.get(&defaults);

            let index = fields.len();
            for key in std::iter::once(spec.name).chain(spec.choices.iter().copied()) {
                if by_name.insert(key, index).is_some() {
                    return Err(RegistryError::DuplicateName(key));
                }
            }
            fields.push(descriptor);
        }

        debug!(fields = fields.len(), names = by_name.len(), "field registry built");
        Ok(Self { fields, by_name })
    }

    /// All descriptors in registry order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Resolves a canonical field name or a choice value to its descriptor.
    pub fn lookup(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&index| &self.fields[index])
    }

    /// Returns `true` if `name` is a field name or a valid choice of one.
    pub fn is_configurable(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Returns `true` if `name` can be used as a bare flag: either a boolean
    /// field, or one of the choices of a multi-choice field.
    pub fn is_bool_config(&self, name: &str) -> bool {
        match self.lookup(name) {
            Some(field) if field.name() != name => true,
            Some(field) => field.kind() == FieldKind::Boolean,
            None => false,
        }
    }

    /// Returns every configurable name starting with `prefix`, sorted.
    pub fn complete(&self, prefix: &str) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .by_name
            .keys()
            .copied()
            .filter(|name| name.starts_with(prefix))
            .collect();
        names.sort_unstable();
        names
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
