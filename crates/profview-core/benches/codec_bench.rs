//! Criterion benchmarks for the view URL codec.
//!
//! The web UI encodes every saved view against the current page URL each time
//! the view menu is rendered, so `encode_to_url` sits on a hot path.
//!
//! Run with:
//! ```bash
//! cargo bench --package profview-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use profview_core::{decode_from_url, encode_to_url, FieldRegistry, QueryParams, ViewConfig};
use url::Url;

fn busy_config() -> ViewConfig {
    ViewConfig {
        call_tree: true,
        sort: "cum".to_string(),
        node_count: 80,
        node_fraction: 0.01,
        trim: false,
        focus: "runtime\\.mallocgc".to_string(),
        ignore: "testing".to_string(),
        tag_focus: "bytes=1kb:".to_string(),
        granularity: "lines".to_string(),
        ..ViewConfig::default()
    }
}

fn bench_registry_build(c: &mut Criterion) {
    c.bench_function("registry_build", |b| b.iter(|| black_box(FieldRegistry::new())));
}

fn bench_encode(c: &mut Criterion) {
    let registry = FieldRegistry::new();
    let base = Url::parse("http://localhost:8080/ui/?si=alloc_space").unwrap();
    let cfg = busy_config();
    let (encoded, _) = encode_to_url(&cfg, &registry, &base);

    let mut group = c.benchmark_group("encode_to_url");
    group.bench_function("default_unchanged", |b| {
        b.iter(|| encode_to_url(black_box(&ViewConfig::default()), &registry, black_box(&base)))
    });
    group.bench_function("busy_changed", |b| {
        b.iter(|| encode_to_url(black_box(&cfg), &registry, black_box(&base)))
    });
    group.bench_function("busy_unchanged", |b| {
        b.iter(|| encode_to_url(black_box(&cfg), &registry, black_box(&encoded)))
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let registry = FieldRegistry::new();
    let (url, _) = encode_to_url(
        &busy_config(),
        &registry,
        &Url::parse("http://localhost:8080/ui/").unwrap(),
    );
    let params = QueryParams::from_url(&url);

    c.bench_function("decode_from_url", |b| {
        b.iter(|| {
            let mut cfg = ViewConfig::default();
            decode_from_url(&mut cfg, &registry, black_box(&params)).unwrap();
            cfg
        })
    });
}

criterion_group!(benches, bench_registry_build, bench_encode, bench_decode);
criterion_main!(benches);
