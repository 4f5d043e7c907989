use fieldkit::config::{
    BreakpointOverrides, ConfigError, ConfigOverrides, FieldOptions, PanelConfig, PanelOverrides,
};
use fieldkit::fields::Placement;

#[test]
fn test_default_config() {
    let config = PanelConfig::default();
    assert_eq!(config.panel.title, "Module Settings");
    assert_eq!(config.panel.selector_id, "fk-module");
    assert_eq!(config.breakpoints.tablet, 980);
    assert_eq!(config.breakpoints.mobile, 767);
    assert_eq!(config.tooltip.show_delay_ms, 300);
    assert!(config.sections.is_empty());
}

#[test]
fn test_builtin_panel_is_valid() {
    let config = PanelConfig::builtin();
    assert!(config.validate().is_ok());
    assert_eq!(config.sections.len(), 3);
    assert!(!config.sections[2].open);
}

#[test]
fn test_parse_toml() {
    let toml_str = r##"
[panel]
title = "Hero"
selector_id = "hero-1"

[breakpoints]
tablet = 1024

[[sections]]
title = "Layout"

[[sections.fields]]
name = "width"
type = "range"
max = 200.0
unit = "%"
value = "50%"
tooltip = "Share of the row"
tooltip_position = "right"

[[sections.fields]]
name = "accent"
type = "color"
show_alpha = false

[[sections.fields]]
name = "device"
type = "responsive-tabs"
"##;

    let config: PanelConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.panel.title, "Hero");
    assert_eq!(config.breakpoints.tablet, 1024);
    // Unset keys keep their defaults
    assert_eq!(config.breakpoints.mobile, 767);

    let fields = &config.sections[0].fields;
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].value.as_deref(), Some("50%"));
    assert_eq!(fields[0].tooltip_position, Placement::Right);
    let FieldOptions::Range(range) = &fields[0].options else {
        panic!("width should be a range");
    };
    assert_eq!(range.max, 200.0);
    assert_eq!(range.unit, "%");
    assert!(matches!(&fields[1].options, FieldOptions::Color(c) if !c.show_alpha));
    assert_eq!(fields[2].options, FieldOptions::ResponsiveTabs);
}

#[test]
fn test_unknown_field_type_is_rejected() {
    let toml_str = r##"
[[sections]]
[[sections.fields]]
name = "x"
type = "slider"
"##;
    assert!(toml::from_str::<PanelConfig>(toml_str).is_err());
}

#[test]
fn test_validate_breakpoint_order() {
    let mut config = PanelConfig::builtin();
    config.breakpoints.mobile = 980;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_duplicate_names() {
    let mut config = PanelConfig::builtin();
    let duplicate = config.sections[0].fields[0].clone();
    config.sections[1].fields.push(duplicate);
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate field name 'heading'"));

    let mut config = PanelConfig::builtin();
    config.sections[0].fields[0].name.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_save_and_load_roundtrip() {
    let path = std::env::temp_dir().join(format!("fieldkit-roundtrip-{}.toml", std::process::id()));
    let config = PanelConfig::builtin();
    config.save(&path).unwrap();
    let loaded = PanelConfig::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, config);
}

#[test]
fn test_layered_overrides_win() {
    let overrides = ConfigOverrides {
        panel: PanelOverrides {
            title: Some("From CLI".to_string()),
            selector_id: None,
        },
        breakpoints: BreakpointOverrides {
            tablet: None,
            mobile: Some(600),
        },
    };
    let config = PanelConfig::load_layered(None, &overrides).unwrap();
    assert_eq!(config.panel.title, "From CLI");
    assert_eq!(config.panel.selector_id, "fk-module");
    assert_eq!(config.breakpoints.mobile, 600);
    assert_eq!(config.breakpoints.tablet, 980);
    // Without a file the built-in panel stays
    assert_eq!(config.sections.len(), 3);
}

#[test]
fn test_layered_rejects_bad_overrides() {
    let overrides = ConfigOverrides {
        breakpoints: BreakpointOverrides {
            tablet: Some(500),
            mobile: None,
        },
        ..ConfigOverrides::default()
    };
    assert!(PanelConfig::load_layered(None, &overrides).is_err());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let path = std::path::Path::new("/definitely/not/here.toml");
    assert!(matches!(
        PanelConfig::load_layered(Some(path), &ConfigOverrides::default()),
        Err(ConfigError::Io(_))
    ));
}
