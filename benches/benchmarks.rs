//! Performance benchmarks for the widget hot paths.
//!
//! Measures what runs on every pointer move or keystroke:
//! - RGB <-> HSB conversion
//! - Color text parsing
//! - Pointer-to-value mapping
//! - Form and stylesheet rebuilds

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use palette::Srgb;
use fieldkit::color::{Hsba, hsb_to_rgb, rgb_to_hsb};
use fieldkit::config::{Breakpoints, PanelConfig};
use fieldkit::form::{FormData, stylesheet};
use fieldkit::mapper::{Range, Track, map_drag};
use fieldkit::registry::Registry;

/// Benchmark sRGB -> HSB for 256 colors.
fn bench_rgb_to_hsb(c: &mut Criterion) {
    let colors: Vec<Srgb<u8>> = (0u8..=255)
        .map(|i: u8| Srgb::new(i, i.wrapping_mul(97), i.wrapping_mul(193)))
        .collect();

    c.bench_function("rgb_to_hsb_256", |b| {
        b.iter(|| {
            for &color in &colors {
                black_box(rgb_to_hsb(color));
            }
        })
    });
}

/// Benchmark HSB -> sRGB across the hue wheel.
fn bench_hsb_to_rgb(c: &mut Criterion) {
    let hues: Vec<f64> = (0..360).map(f64::from).collect();

    c.bench_function("hsb_to_rgb_360", |b| {
        b.iter(|| {
            for &hue in &hues {
                black_box(hsb_to_rgb(hue, 80.0, 90.0));
            }
        })
    });
}

/// Benchmark parsing the text forms a color input accepts.
fn bench_parse(c: &mut Criterion) {
    let inputs = ["#3b82f6", "#3b82f680", "rgba(59, 130, 246, 0.5)", "transparent"];

    c.bench_function("hsba_parse_4", |b| {
        b.iter(|| {
            for input in inputs {
                black_box(Hsba::parse(black_box(input)));
            }
        })
    });
}

/// Benchmark a full drag across a 400px track.
fn bench_map_drag(c: &mut Criterion) {
    let track = Track::new(12.0, 400.0);
    let range = Range::new(0.0, 100.0, 0.5);

    c.bench_function("map_drag_400", |b| {
        b.iter(|| {
            for x in 0..400 {
                black_box(map_drag(track, f64::from(x), range));
            }
        })
    });
}

/// Benchmark rebuilding form data and stylesheet for the built-in panel.
fn bench_form_rebuild(c: &mut Criterion) {
    let mut registry = Registry::from_config(&PanelConfig::builtin()).expect("builtin panel");
    registry
        .set_value(
            "custom_css",
            r#"{"wrapper":{"normal":{"desktop":"padding: 10px; color: red","tablet":"padding: 6px"},"hover":{"desktop":"color: blue"}}}"#,
        )
        .expect("custom css");

    c.bench_function("form_from_registry", |b| {
        b.iter(|| black_box(FormData::from_registry(black_box(&registry))))
    });

    c.bench_function("stylesheet", |b| {
        b.iter(|| black_box(stylesheet(&registry, "fk-module", Breakpoints::default())))
    });
}

criterion_group!(
    benches,
    bench_rgb_to_hsb,
    bench_hsb_to_rgb,
    bench_parse,
    bench_map_drag,
    bench_form_rebuild,
);

criterion_main!(benches);
