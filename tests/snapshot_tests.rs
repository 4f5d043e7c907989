//! Snapshot tests for serialized panel output.
//!
//! Inline insta snapshots pin the exact text a server would receive: form
//! JSON, the scoped stylesheet and color reports. A diff here means the
//! submitted format changed.

use insta::{assert_snapshot, assert_yaml_snapshot};
use serde::Serialize;

use fieldkit::color::{describe, hsb_to_rgb};
use fieldkit::config::{
    Breakpoints, ColorOptions, CustomCssOptions, FieldOptions, FieldSpec, RangeOptions,
    ToggleOptions,
};
use fieldkit::form::{FormData, stylesheet};
use fieldkit::registry::Registry;

fn small_panel() -> Registry {
    let mut registry = Registry::new();
    let specs = [
        FieldSpec::new("enabled", FieldOptions::Toggle(ToggleOptions::default())).value("on"),
        FieldSpec::new("size", FieldOptions::Range(RangeOptions::default())).value("12px"),
        FieldSpec::new("accent", FieldOptions::Color(ColorOptions::default()))
            .value("rgba(255,0,0,0.5)"),
        FieldSpec::new(
            "custom_css",
            FieldOptions::CustomCss(CustomCssOptions::default()),
        ),
    ];
    for spec in &specs {
        registry.create(spec).unwrap();
    }
    registry
}

#[test]
fn snapshot_form_json() {
    let mut registry = small_panel();
    registry.dispose("custom_css").unwrap();
    let form = FormData::from_registry(&registry);
    assert_snapshot!(form.to_json().unwrap(), @r#"
    {
      "accent": "rgba(255, 0, 0, 0.5)",
      "enabled": "1",
      "size": "12px"
    }
    "#);
}

#[test]
fn snapshot_stylesheet() {
    let mut registry = small_panel();
    registry
        .set_value(
            "custom_css",
            r#"{"wrapper":{"normal":{"desktop":"padding: 10px; color: #333","mobile":"padding: 4px"},"hover":{"desktop":"color: #000"}},"content":{"normal":{"tablet":"font-size: 14px"}}}"#,
        )
        .unwrap();
    let css = stylesheet(&registry, "fk-module", Breakpoints::default());
    assert_snapshot!(css, @r"
    #fk-module .module-wrapper {
      padding: 10px;
      color: #333;
    }
    #fk-module .module-wrapper:hover {
      color: #000;
    }
    @media (max-width: 767px) {
    #fk-module .module-wrapper {
      padding: 4px;
    }
    }
    @media (max-width: 980px) {
    #fk-module .module-content {
      font-size: 14px;
    }
    }
    ");
}

#[test]
fn snapshot_color_report() {
    let report = describe("red").unwrap();
    assert_snapshot!(serde_json::to_string_pretty(&report).unwrap(), @r##"
    {
      "input": "red",
      "css": "#ff0000",
      "hex": "#ff0000",
      "rgba": [
        255,
        0,
        0,
        255
      ],
      "hue": 0.0,
      "saturation": 100.0,
      "brightness": 100.0,
      "alpha": 100.0
    }
    "##);
}

#[derive(Serialize)]
struct HueStop {
    hue: u32,
    red: u8,
    green: u8,
    blue: u8,
}

#[test]
fn snapshot_hue_wheel() {
    let stops: Vec<HueStop> = (0..6)
        .map(|i| {
            let hue = i * 60;
            let rgb = hsb_to_rgb(f64::from(hue), 100.0, 100.0);
            HueStop {
                hue,
                red: rgb.red,
                green: rgb.green,
                blue: rgb.blue,
            }
        })
        .collect();
    assert_yaml_snapshot!(stops, @r"
    - hue: 0
      red: 255
      green: 0
      blue: 0
    - hue: 60
      red: 255
      green: 255
      blue: 0
    - hue: 120
      red: 0
      green: 255
      blue: 0
    - hue: 180
      red: 0
      green: 255
      blue: 255
    - hue: 240
      red: 0
      green: 0
      blue: 255
    - hue: 300
      red: 255
      green: 0
      blue: 255
    ");
}
