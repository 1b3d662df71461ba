//! The view configuration record.
//!
//! [`ViewConfig`] holds every display and filter option of a profile view.
//! Its fields fall into two groups:
//!
//! - **Persisted fields** are written to the settings file and reflected in
//!   URLs (sort order, node thresholds, focus/ignore patterns, ...).
//! - **Transient fields** belong to the current session only (output
//!   destination, source path, trim prefix, sample index, divisor).  They are
//!   never written to the settings file.  Whenever a named view is loaded its
//!   transient fields are copied from the live configuration, see
//!   [`ViewConfig::reset_transient`].
//!
//! # Serde and zero values
//!
//! Persisted fields are annotated with `#[serde(default, skip_serializing_if = ...)]`.
//! A field holding its type's zero value (`false`, `0`, `""`) is left out of
//! the JSON, and a field missing from the JSON reads back as that zero value,
//! **not** as the value from [`ViewConfig::default`].  This keeps files
//! written by older versions readable and keeps new files small.

use serde::{Deserialize, Serialize};

/// Display and filter options for one profile view.
///
/// `ViewConfig::default()` is the fixed baseline configuration.  It never
/// depends on command-line flags or interactive assignments; the field
/// registry uses it to compute each field's default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Filename for file-based output formats, stdout when empty.
    #[serde(skip)]
    pub output: String,

    // ── Display options ───────────────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "is_false")]
    pub call_tree: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub relative_percentages: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub compact_labels: bool,
    /// Search path for source files.
    #[serde(skip)]
    pub source_path: String,
    /// Path prefix trimmed from source paths before lookup.
    #[serde(skip)]
    pub trim_path: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub intel_syntax: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub mean: bool,
    /// Which sample value to display; empty means the profile's default.
    #[serde(skip)]
    pub sample_index: String,
    /// Divisor applied to every sample value.
    #[serde(skip)]
    pub divide_by: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub normalize: bool,
    /// One of `cum` or `flat`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sort: String,

    // ── Filtering options ─────────────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "is_false")]
    pub drop_negative: bool,
    /// Maximum number of nodes to show; `-1` means no limit.
    #[serde(default, rename = "nodecount", skip_serializing_if = "is_zero_i64")]
    pub node_count: i64,
    #[serde(default, rename = "nodefraction", skip_serializing_if = "is_zero_f64")]
    pub node_fraction: f64,
    #[serde(default, rename = "edgefraction", skip_serializing_if = "is_zero_f64")]
    pub edge_fraction: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub trim: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub focus: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ignore: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prune_from: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hide: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub show: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub show_from: String,
    #[serde(default, rename = "tagfocus", skip_serializing_if = "String::is_empty")]
    pub tag_focus: String,
    #[serde(default, rename = "tagignore", skip_serializing_if = "String::is_empty")]
    pub tag_ignore: String,
    #[serde(default, rename = "tagshow", skip_serializing_if = "String::is_empty")]
    pub tag_show: String,
    #[serde(default, rename = "taghide", skip_serializing_if = "String::is_empty")]
    pub tag_hide: String,
    #[serde(default, rename = "noinlines", skip_serializing_if = "is_false")]
    pub no_inlines: bool,

    // ── Output granularity ────────────────────────────────────────────────────
    /// One of `functions`, `filefunctions`, `files`, `lines`, `addresses`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub granularity: String,
}

impl ViewConfig {
    /// Overwrites every transient field with the value held by `live`.
    ///
    /// Named views never carry transient fields, so after loading one the
    /// session-specific values (output file, source path, ...) must come
    /// from the configuration currently in use.
    pub fn reset_transient(&mut self, live: &ViewConfig) {
        self.output.clone_from(&live.output);
        self.source_path.clone_from(&live.source_path);
        self.trim_path.clone_from(&live.trim_path);
        self.divide_by = live.divide_by;
        self.sample_index.clone_from(&live.sample_index);
    }
}

impl Default for ViewConfig {
    /// Returns the baseline configuration.
    ///
    /// | Field          | Default       |
    /// |----------------|---------------|
    /// | unit           | `minimum`     |
    /// | node_count     | `-1`          |
    /// | node_fraction  | `0.005`       |
    /// | edge_fraction  | `0.001`       |
    /// | trim           | `true`        |
    /// | divide_by      | `1.0`         |
    /// | sort           | `flat`        |
    /// | granularity    | `functions`   |
    ///
    /// Every other field holds its zero value.
    fn default() -> Self {
        Self {
            output: String::new(),
            call_tree: false,
            relative_percentages: false,
            unit: "minimum".to_string(),
            compact_labels: false,
            source_path: String::new(),
            trim_path: String::new(),
            intel_syntax: false,
            mean: false,
            sample_index: String::new(),
            divide_by: 1.0,
            normalize: false,
            sort: "flat".to_string(),
            drop_negative: false,
            node_count: -1,
            node_fraction: 0.005,
            edge_fraction: 0.001,
            trim: true,
            focus: String::new(),
            ignore: String::new(),
            prune_from: String::new(),
            hide: String::new(),
            show: String::new(),
            show_from: String::new(),
            tag_focus: String::new(),
            tag_ignore: String::new(),
            tag_show: String::new(),
            tag_hide: String::new(),
            no_inlines: false,
            granularity: "functions".to_string(),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero_i64(value: &i64) -> bool {
    *value == 0
}

fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_expected_thresholds() {
        // Arrange / Act
        let cfg = ViewConfig::default();

        // Assert
        assert_eq!(cfg.node_count, -1);
        assert_eq!(cfg.node_fraction, 0.005);
        assert_eq!(cfg.edge_fraction, 0.001);
        assert!(cfg.trim);
    }

    #[test]
    fn test_default_config_has_expected_choices() {
        let cfg = ViewConfig::default();
        assert_eq!(cfg.sort, "flat");
        assert_eq!(cfg.granularity, "functions");
        assert_eq!(cfg.unit, "minimum");
        assert_eq!(cfg.divide_by, 1.0);
    }

    // ── JSON shape ────────────────────────────────────────────────────────────

    #[test]
    fn test_serialize_omits_transient_fields() {
        // Arrange
        let cfg = ViewConfig {
            output: "out.svg".to_string(),
            source_path: "/src".to_string(),
            sample_index: "alloc_space".to_string(),
            ..ViewConfig::default()
        };

        // Act
        let json = serde_json::to_string(&cfg).expect("serialize");

        // Assert
        assert!(!json.contains("output"));
        assert!(!json.contains("source_path"));
        assert!(!json.contains("trim_path"));
        assert!(!json.contains("sample_index"));
        assert!(!json.contains("divide_by"));
    }

    #[test]
    fn test_serialize_omits_zero_values_and_uses_compact_names() {
        // Arrange
        let cfg = ViewConfig::default();

        // Act
        let json = serde_json::to_value(&cfg).expect("serialize");

        // Assert – zero-valued booleans and strings are left out
        let obj = json.as_object().expect("object");
        assert!(!obj.contains_key("call_tree"));
        assert!(!obj.contains_key("focus"));
        assert_eq!(obj["nodecount"], -1);
        assert_eq!(obj["nodefraction"], 0.005);
        assert_eq!(obj["trim"], true);
        assert_eq!(obj["sort"], "flat");
    }

    #[test]
    fn test_deserialize_missing_fields_yields_zero_values_not_defaults() {
        // Arrange: `trim` defaults to true but is absent here
        let json = r#"{"sort": "cum"}"#;

        // Act
        let cfg: ViewConfig = serde_json::from_str(json).expect("deserialize");

        // Assert
        assert_eq!(cfg.sort, "cum");
        assert!(!cfg.trim);
        assert_eq!(cfg.node_count, 0);
        assert_eq!(cfg.granularity, "");
    }

    #[test]
    fn test_deserialize_ignores_transient_fields_in_input() {
        let json = r#"{"output": "leak.svg", "divide_by": 7.0, "focus": "main"}"#;
        let cfg: ViewConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(cfg.output, "");
        assert_eq!(cfg.divide_by, 0.0);
        assert_eq!(cfg.focus, "main");
    }

    // ── reset_transient ───────────────────────────────────────────────────────

    #[test]
    fn test_reset_transient_copies_only_session_fields() {
        // Arrange
        let live = ViewConfig {
            output: "graph.pdf".to_string(),
            source_path: "/home/dev/src".to_string(),
            trim_path: "/build".to_string(),
            sample_index: "inuse_space".to_string(),
            divide_by: 1024.0,
            focus: "live-focus".to_string(),
            ..ViewConfig::default()
        };
        let mut snapshot = ViewConfig {
            focus: "saved-focus".to_string(),
            ..ViewConfig::default()
        };

        // Act
        snapshot.reset_transient(&live);

        // Assert
        assert_eq!(snapshot.output, "graph.pdf");
        assert_eq!(snapshot.source_path, "/home/dev/src");
        assert_eq!(snapshot.trim_path, "/build");
        assert_eq!(snapshot.sample_index, "inuse_space");
        assert_eq!(snapshot.divide_by, 1024.0);
        assert_eq!(snapshot.focus, "saved-focus", "persisted fields must be kept");
    }
}
