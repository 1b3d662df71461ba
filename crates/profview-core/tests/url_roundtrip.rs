//! Integration tests for the profview-core URL codec.
//!
//! These tests drive the public API end to end: the field registry, the
//! value accessor, and the encode/decode pair working together on realistic
//! bookmark URLs.

use profview_core::{
    decode_from_url, encode_to_url, FieldError, FieldRegistry, QueryParams, ViewConfig,
};
use url::Url;

fn default_url() -> Url {
    Url::parse("http://localhost:8080/ui/flamegraph").expect("valid URL")
}

/// Decodes the query of `url` into a copy of `start`.
fn decode_url(start: &ViewConfig, url: &Url) -> ViewConfig {
    let registry = FieldRegistry::new();
    let mut cfg = start.clone();
    decode_from_url(&mut cfg, &registry, &QueryParams::from_url(url)).expect("decode must succeed");
    cfg
}

#[test]
fn test_roundtrip_default_config_is_a_no_op() {
    // Arrange
    let registry = FieldRegistry::new();
    let cfg = ViewConfig::default();

    // Act
    let (url, changed) = encode_to_url(&cfg, &registry, &default_url());
    let decoded = decode_url(&cfg, &url);

    // Assert
    assert!(!changed);
    assert_eq!(decoded, cfg);
}

#[test]
fn test_roundtrip_every_saved_field_survives() {
    // Arrange: move every persisted field away from its default
    let registry = FieldRegistry::new();
    let cfg = ViewConfig {
        call_tree: true,
        relative_percentages: true,
        unit: "ms".to_string(),
        compact_labels: true,
        intel_syntax: true,
        mean: true,
        normalize: true,
        sort: "cum".to_string(),
        drop_negative: true,
        node_count: 120,
        node_fraction: 0.01,
        edge_fraction: 0.002,
        trim: false,
        focus: "runtime\\.mallocgc".to_string(),
        ignore: "testing".to_string(),
        prune_from: "main".to_string(),
        hide: "fmt".to_string(),
        show: "net/http".to_string(),
        show_from: "serve".to_string(),
        tag_focus: "bytes=1kb:".to_string(),
        tag_ignore: "thread=idle".to_string(),
        tag_show: "key1".to_string(),
        tag_hide: "key2".to_string(),
        no_inlines: true,
        granularity: "addresses".to_string(),
        ..ViewConfig::default()
    };

    // Act
    let (url, changed) = encode_to_url(&cfg, &registry, &default_url());
    let decoded = decode_url(&ViewConfig::default(), &url);

    // Assert
    assert!(changed);
    assert_eq!(decoded, cfg);
}

#[test]
fn test_roundtrip_second_encode_reports_no_change() {
    let registry = FieldRegistry::new();
    let cfg = ViewConfig {
        node_count: 5,
        focus: "a b&c".to_string(),
        ..ViewConfig::default()
    };

    let (first, _) = encode_to_url(&cfg, &registry, &default_url());
    let (second, changed) = encode_to_url(&cfg, &registry, &first);

    assert!(!changed);
    assert_eq!(second, first);
}

#[test]
fn test_node_count_bookmark_scenario() {
    // Arrange
    let registry = FieldRegistry::new();
    let bookmark = Url::parse("http://localhost:8080/ui/?n=5").unwrap();

    // Act – open the bookmark, then encode against a fresh page URL
    let cfg = decode_url(&ViewConfig::default(), &bookmark);
    let (url, changed) = encode_to_url(&cfg, &registry, &default_url());

    // Assert
    assert_eq!(cfg.node_count, 5);
    assert!(changed);
    assert_eq!(url.as_str(), "http://localhost:8080/ui/flamegraph?n=5");
}

#[test]
fn test_explicit_default_in_bookmark_matches_default_view() {
    // Arrange
    let registry = FieldRegistry::new();
    let bookmark = Url::parse("http://localhost:8080/ui/?n=-1").unwrap();

    // Act
    let cfg = decode_url(&ViewConfig::default(), &bookmark);
    let (url, changed) = encode_to_url(&cfg, &registry, &default_url());

    // Assert – the value equals the default, so it is omitted
    assert_eq!(cfg.node_count, -1);
    assert!(!changed);
    assert_eq!(url, default_url());
}

#[test]
fn test_encoding_against_bookmark_with_explicit_default_drops_it() {
    // Arrange
    let registry = FieldRegistry::new();
    let bookmark = Url::parse("http://localhost:8080/ui/?n=-1").unwrap();
    let cfg = decode_url(&ViewConfig::default(), &bookmark);

    // Act
    let (url, changed) = encode_to_url(&cfg, &registry, &bookmark);

    // Assert – the default is represented by the parameter's absence
    assert_eq!(cfg, ViewConfig::default());
    assert!(changed);
    assert_eq!(url.query(), None);
    assert_eq!(url.as_str(), "http://localhost:8080/ui/");
}

#[test]
fn test_boolean_true_encodes_as_t_and_decodes_back() {
    // Arrange
    let registry = FieldRegistry::new();
    let cfg = ViewConfig {
        no_inlines: true,
        ..ViewConfig::default()
    };

    // Act
    let (url, _) = encode_to_url(&cfg, &registry, &default_url());
    let decoded = decode_url(&ViewConfig::default(), &url);

    // Assert
    assert_eq!(QueryParams::from_url(&url).get("noinlines"), Some("t"));
    assert!(decoded.no_inlines);
}

#[test]
fn test_decode_f_turns_off_flag_that_defaults_to_true() {
    let url = Url::parse("http://localhost:8080/ui/?trim=f").unwrap();
    let cfg = decode_url(&ViewConfig::default(), &url);
    assert!(!cfg.trim);
}

#[test]
fn test_invalid_choice_in_url_is_rejected_with_field_name() {
    // Arrange
    let registry = FieldRegistry::new();
    let url = Url::parse("http://localhost:8080/ui/?sort=alphabetical").unwrap();
    let mut cfg = ViewConfig::default();

    // Act
    let err = decode_from_url(&mut cfg, &registry, &QueryParams::from_url(&url)).unwrap_err();

    // Assert
    assert_eq!(err.field, "sort");
    assert_eq!(
        err.source,
        FieldError::InvalidChoice {
            field: "sort",
            value: "alphabetical".to_string(),
        }
    );
    assert_eq!(cfg.sort, "flat");
}
