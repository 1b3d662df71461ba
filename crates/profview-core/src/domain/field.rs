//! Field descriptors and typed access to a single [`ViewConfig`] field.
//!
//! Every configurable field is described by a [`FieldDescriptor`]: its
//! canonical name, the URL parameter that carries it, whether it is saved in
//! named views, its allowed choices, and its default value rendered as text.
//!
//! # Reading and writing fields as text
//!
//! Command lines, URLs and interactive prompts all deal in strings, while
//! [`ViewConfig`] stores typed values.  [`FieldDescriptor::get`] renders the
//! current value as a canonical string and [`FieldDescriptor::set`] parses a
//! string back into the field.  The typed plumbing lives in
//! [`FieldAccessor`]: a closed set of `get`/`get_mut` function pointer pairs,
//! one variant per supported value type.

use thiserror::Error;

use crate::domain::config::ViewConfig;

/// Errors produced when assigning a field by name or by value.
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    /// The name matches neither a field nor one of a field's choices.
    #[error("unknown config field {0:?}")]
    UnknownField(String),

    /// The value is not one of the field's declared choices.
    #[error("invalid {field:?} value {value:?}")]
    InvalidChoice { field: &'static str, value: String },

    /// The value could not be parsed as the field's type.
    #[error("invalid {kind} value {value:?} for {field:?}")]
    Parse {
        field: &'static str,
        kind: FieldKind,
        value: String,
    },
}

/// The value type of a configurable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Typed accessor pair for one field of [`ViewConfig`].
///
/// Only the four supported value types have a variant, so a field of any
/// other type cannot be registered at all.
#[derive(Clone, Copy)]
pub enum FieldAccessor {
    Text {
        get: fn(&ViewConfig) -> &String,
        get_mut: fn(&mut ViewConfig) -> &mut String,
    },
    Integer {
        get: fn(&ViewConfig) -> &i64,
        get_mut: fn(&mut ViewConfig) -> &mut i64,
    },
    Float {
        get: fn(&ViewConfig) -> &f64,
        get_mut: fn(&mut ViewConfig) -> &mut f64,
    },
    Flag {
        get: fn(&ViewConfig) -> &bool,
        get_mut: fn(&mut ViewConfig) -> &mut bool,
    },
}

impl FieldAccessor {
    /// Returns the value type this accessor reads and writes.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldAccessor::Text { .. } => FieldKind::String,
            FieldAccessor::Integer { .. } => FieldKind::Integer,
            FieldAccessor::Float { .. } => FieldKind::Float,
            FieldAccessor::Flag { .. } => FieldKind::Boolean,
        }
    }
}

impl std::fmt::Debug for FieldAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FieldAccessor::{:?}", self.kind())
    }
}

/// Static metadata for one configurable field.
///
/// Descriptors are created once by [`crate::FieldRegistry`] and never change
/// afterwards.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub(crate) name: &'static str,
    pub(crate) url_param: Option<&'static str>,
    pub(crate) saved: bool,
    pub(crate) choices: &'static [&'static str],
    pub(crate) accessor: FieldAccessor,
    pub(crate) default_value: String,
}

impl FieldDescriptor {
    /// Canonical field name, also the key used in the settings file.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// URL query parameter carrying this field, if it is ever placed in URLs.
    pub fn url_param(&self) -> Option<&'static str> {
        self.url_param
    }

    /// Whether the field is persisted in named views (and encoded into URLs).
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Allowed values; empty means unrestricted.
    pub fn choices(&self) -> &'static [&'static str] {
        self.choices
    }

    /// The field's value in [`ViewConfig::default`], rendered by [`Self::get`].
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn kind(&self) -> FieldKind {
        self.accessor.kind()
    }

    /// Renders the field's current value in `cfg` as a canonical string.
    ///
    /// Booleans render as `"true"`/`"false"`; numbers use the shortest
    /// form that round-trips (`0.005`, `1`, `-1`).  Floats switch to
    /// exponent notation outside `1e-4 <= |v| < 1e6` (`1e-07`,
    /// `2.5e+06`), matching links produced by existing bookmarks.
    pub fn get(&self, cfg: &ViewConfig) -> String {
        match self.accessor {
            FieldAccessor::Text { get, .. } => get(cfg).clone(),
            FieldAccessor::Integer { get, .. } => get(cfg).to_string(),
            FieldAccessor::Float { get, .. } => format_float(*get(cfg)),
            FieldAccessor::Flag { get, .. } => get(cfg).to_string(),
        }
    }

    /// Parses `value` and stores it into the field of `cfg`.
    ///
    /// # Errors
    ///
    /// - [`FieldError::InvalidChoice`] if the field has choices and `value`
    ///   is not one of them.
    /// - [`FieldError::Parse`] if `value` is not a valid integer, float or
    ///   boolean for a numeric/boolean field.
    ///
    /// `cfg` is left unchanged on error.
    pub fn set(&self, cfg: &mut ViewConfig, value: &str) -> Result<(), FieldError> {
        match self.accessor {
            FieldAccessor::Text { get_mut, .. } => {
                if !self.choices.is_empty() && !self.choices.iter().any(|c| *c == value) {
                    return Err(FieldError::InvalidChoice {
                        field: self.name,
                        value: value.to_string(),
                    });
                }
                *get_mut(cfg) = value.to_string();
            }
            FieldAccessor::Integer { get_mut, .. } => {
                *get_mut(cfg) = value.parse().map_err(|_| self.parse_error(value))?;
            }
            FieldAccessor::Float { get_mut, .. } => {
                *get_mut(cfg) = value.parse().map_err(|_| self.parse_error(value))?;
            }
            FieldAccessor::Flag { get_mut, .. } => {
                *get_mut(cfg) = string_to_bool(value).ok_or_else(|| self.parse_error(value))?;
            }
        }
        tracing::trace!(field = self.name, value, "config field assigned");
        Ok(())
    }

    fn parse_error(&self, value: &str) -> FieldError {
        FieldError::Parse {
            field: self.name,
            kind: self.kind(),
            value: value.to_string(),
        }
    }
}

/// Shortest round-trip rendering of `v` in `%g` style.
///
/// Exponent form is used when the decimal exponent is below -4 or at least
/// 6; the exponent always carries a sign and at least two digits.
fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `1.5e-7`.
    let scientific = format!("{v:e}");
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return v.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if v == 0.0 || (-4..6).contains(&exp) {
        return v.to_string();
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

/// Lenient boolean parsing used for field values.
///
/// An empty string counts as `true` so that a bare flag (`-o trim`) enables it.
fn string_to_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Strict boolean parsing used when a choice name is assigned as a flag.
///
/// Accepts the same spellings as most command-line flag parsers:
/// `1`, `t`, `T`, `TRUE`, `true`, `True` and their `false` counterparts.
pub fn parse_flag(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(
        name: &'static str,
        choices: &'static [&'static str],
        accessor: FieldAccessor,
    ) -> FieldDescriptor {
        FieldDescriptor {
            name,
            url_param: None,
            saved: true,
            choices,
            accessor,
            default_value: String::new(),
        }
    }

    fn sort_field() -> FieldDescriptor {
        descriptor(
            "sort",
            &["cum", "flat"],
            FieldAccessor::Text {
                get: |cfg| &cfg.sort,
                get_mut: |cfg| &mut cfg.sort,
            },
        )
    }

    fn node_count_field() -> FieldDescriptor {
        descriptor(
            "nodecount",
            &[],
            FieldAccessor::Integer {
                get: |cfg| &cfg.node_count,
                get_mut: |cfg| &mut cfg.node_count,
            },
        )
    }

    fn node_fraction_field() -> FieldDescriptor {
        descriptor(
            "nodefraction",
            &[],
            FieldAccessor::Float {
                get: |cfg| &cfg.node_fraction,
                get_mut: |cfg| &mut cfg.node_fraction,
            },
        )
    }

    fn trim_field() -> FieldDescriptor {
        descriptor(
            "trim",
            &[],
            FieldAccessor::Flag {
                get: |cfg| &cfg.trim,
                get_mut: |cfg| &mut cfg.trim,
            },
        )
    }

    // ── get ───────────────────────────────────────────────────────────────────

    #[test]
    fn test_get_renders_each_kind_canonically() {
        let cfg = ViewConfig::default();
        assert_eq!(sort_field().get(&cfg), "flat");
        assert_eq!(node_count_field().get(&cfg), "-1");
        assert_eq!(node_fraction_field().get(&cfg), "0.005");
        assert_eq!(trim_field().get(&cfg), "true");
    }

    #[test]
    fn test_get_renders_whole_float_without_fraction() {
        let cfg = ViewConfig {
            node_fraction: 1.0,
            ..ViewConfig::default()
        };
        assert_eq!(node_fraction_field().get(&cfg), "1");
    }

    #[test]
    fn test_get_renders_extreme_floats_in_exponent_form() {
        let field = node_fraction_field();
        for (value, expected) in [
            (1e-7, "1e-07"),
            (0.00001, "1e-05"),
            (0.0001, "0.0001"),
            (123456.0, "123456"),
            (1234567.0, "1.234567e+06"),
            (-2.5e10, "-2.5e+10"),
            (1e100, "1e+100"),
            (0.0, "0"),
        ] {
            let cfg = ViewConfig {
                node_fraction: value,
                ..ViewConfig::default()
            };
            assert_eq!(field.get(&cfg), expected, "value {value}");
        }
    }

    #[test]
    fn test_exponent_form_parses_back_to_same_value() {
        let field = node_fraction_field();
        let mut cfg = ViewConfig::default();
        field.set(&mut cfg, "1e-07").expect("valid float");
        assert_eq!(cfg.node_fraction, 1e-7);
        assert_eq!(field.get(&cfg), "1e-07");
    }

    // ── set: choices ──────────────────────────────────────────────────────────

    #[test]
    fn test_set_accepts_declared_choice() {
        // Arrange
        let mut cfg = ViewConfig::default();

        // Act
        let result = sort_field().set(&mut cfg, "cum");

        // Assert
        assert!(result.is_ok());
        assert_eq!(cfg.sort, "cum");
    }

    #[test]
    fn test_set_rejects_undeclared_choice_and_keeps_previous_value() {
        // Arrange
        let mut cfg = ViewConfig::default();

        // Act
        let result = sort_field().set(&mut cfg, "alphabetical");

        // Assert
        assert_eq!(
            result,
            Err(FieldError::InvalidChoice {
                field: "sort",
                value: "alphabetical".to_string(),
            })
        );
        assert_eq!(cfg.sort, "flat");
    }

    // ── set: numbers ──────────────────────────────────────────────────────────

    #[test]
    fn test_set_parses_integer() {
        let mut cfg = ViewConfig::default();
        node_count_field().set(&mut cfg, "80").expect("valid integer");
        assert_eq!(cfg.node_count, 80);
    }

    #[test]
    fn test_set_rejects_malformed_integer_and_keeps_previous_value() {
        // Arrange
        let mut cfg = ViewConfig::default();

        // Act
        let result = node_count_field().set(&mut cfg, "eighty");

        // Assert
        assert!(matches!(
            result,
            Err(FieldError::Parse {
                field: "nodecount",
                kind: FieldKind::Integer,
                ..
            })
        ));
        assert_eq!(cfg.node_count, -1);
    }

    #[test]
    fn test_set_rejects_fractional_value_for_integer_field() {
        let mut cfg = ViewConfig::default();
        assert!(node_count_field().set(&mut cfg, "1.5").is_err());
    }

    #[test]
    fn test_set_parses_float() {
        let mut cfg = ViewConfig::default();
        node_fraction_field().set(&mut cfg, "0.25").expect("valid float");
        assert_eq!(cfg.node_fraction, 0.25);
    }

    #[test]
    fn test_set_rejects_malformed_float() {
        let mut cfg = ViewConfig::default();
        let result = node_fraction_field().set(&mut cfg, "1/2");
        assert!(matches!(result, Err(FieldError::Parse { kind: FieldKind::Float, .. })));
        assert_eq!(cfg.node_fraction, 0.005);
    }

    // ── set: booleans ─────────────────────────────────────────────────────────

    #[test]
    fn test_set_bool_accepts_short_and_long_forms() {
        let field = trim_field();
        let mut cfg = ViewConfig::default();

        for (input, expected) in [
            ("f", false),
            ("t", true),
            ("false", false),
            ("TRUE", true),
            ("no", false),
            ("y", true),
            ("0", false),
            ("", true),
        ] {
            field.set(&mut cfg, input).expect("valid boolean");
            assert_eq!(cfg.trim, expected, "input {input:?}");
        }
    }

    #[test]
    fn test_set_bool_rejects_unknown_spelling() {
        let mut cfg = ViewConfig::default();
        let result = trim_field().set(&mut cfg, "maybe");
        assert!(matches!(result, Err(FieldError::Parse { kind: FieldKind::Boolean, .. })));
        assert!(cfg.trim);
    }

    // ── parse_flag ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_flag_is_stricter_than_field_parsing() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("T"), Some(true));
        assert_eq!(parse_flag("False"), Some(false));
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_field_error_messages_name_the_field() {
        let err = FieldError::InvalidChoice {
            field: "granularity",
            value: "modules".to_string(),
        };
        assert_eq!(err.to_string(), "invalid \"granularity\" value \"modules\"");
    }
}
