use fieldkit::config::{
    FieldOptions, FieldSpec, PanelConfig, RangeOptions, SectionConfig, ToggleOptions,
};
use fieldkit::fields::{AnyField, Device, Field, HiddenInput};
use fieldkit::registry::{Registry, RegistryError};

fn builtin() -> Registry {
    Registry::from_config(&PanelConfig::builtin()).unwrap()
}

#[test]
fn test_builtin_registry_layout() {
    let registry = builtin();
    let names = registry.names();
    assert_eq!(names.len(), 14);
    assert_eq!(names[0], "section-0");
    assert_eq!(names[1], "heading");
    assert_eq!(names[4], "section-1");
    assert_eq!(names[10], "section-2");

    let entry = registry.entry("border_radius").unwrap();
    assert_eq!(entry.meta.label, "Border Radius");
    assert_eq!(entry.meta.section.as_deref(), Some("section-1"));

    let Some(AnyField::Collapsible(advanced)) = registry.get("section-2") else {
        panic!("section-2 should be a collapsible");
    };
    assert!(!advanced.is_open());
    assert_eq!(advanced.children(), ["typography", "animation", "custom_css"]);
}

#[test]
fn test_sections_and_tabs_submit_nothing() {
    let registry = builtin();
    let inputs = registry.hidden_inputs();
    assert!(inputs.iter().all(|i| !i.name.starts_with("section-")));
    assert!(inputs.iter().all(|i| i.name != "device"));
    assert!(inputs.contains(&HiddenInput::new("spacing_unit", "px")));
    assert!(inputs.contains(&HiddenInput::new("background_color", "#3b82f6")));
}

#[test]
fn test_create_rejects_duplicates() {
    let mut registry = Registry::new();
    let spec = FieldSpec::new("flag", FieldOptions::Toggle(ToggleOptions::default()));
    registry.create(&spec).unwrap();
    assert!(matches!(
        registry.create(&spec),
        Err(RegistryError::Duplicate(name)) if name == "flag"
    ));
    assert!(matches!(
        registry.create_kind("text", "flag"),
        Err(RegistryError::Duplicate(_))
    ));
}

#[test]
fn test_create_kind_by_type_name() {
    let mut registry = Registry::new();
    for (index, kind) in ["toggle", "range", "color", "button-group", "custom-css"]
        .iter()
        .enumerate()
    {
        let field = registry.create_kind(kind, &format!("f{index}")).unwrap();
        assert_eq!(field.kind().as_str(), *kind);
    }
    assert!(matches!(
        registry.create_kind("slider", "nope"),
        Err(RegistryError::Field(_))
    ));
    assert_eq!(registry.len(), 5);
}

#[test]
fn test_set_value_reports_change() {
    let mut registry = builtin();
    let change = registry.set_value("border_radius", "20px").unwrap();
    assert_eq!(change.name, "border_radius");
    assert_eq!(change.inputs, vec![HiddenInput::new("border_radius", "20px")]);

    assert!(matches!(
        registry.set_value("missing", "1"),
        Err(RegistryError::NotFound(_))
    ));
    assert!(matches!(
        registry.set_value("border_radius", "wide"),
        Err(RegistryError::Field(_))
    ));
}

#[test]
fn test_device_tabs_propagate() {
    let mut registry = builtin();
    registry.set_value("device", "phone").unwrap();

    let Some(AnyField::CustomCss(css)) = registry.get("custom_css") else {
        panic!("custom_css should be a custom CSS field");
    };
    assert_eq!(css.device(), Device::Mobile);
    let Some(AnyField::Spacing(spacing)) = registry.get("spacing") else {
        panic!("spacing should be a spacing box");
    };
    assert_eq!(spacing.device(), Device::Mobile);
}

#[test]
fn test_replace_stores_edited_copy() {
    let mut registry = builtin();
    let Some(AnyField::Toggle(toggle)) = registry.get("show_button") else {
        panic!("show_button should be a toggle");
    };
    let mut edited = toggle.clone();
    edited.toggle();
    let expected = edited.value();

    let change = registry.replace(edited.into()).unwrap();
    assert_eq!(change.inputs, vec![HiddenInput::new("show_button", expected.as_str())]);
    assert_eq!(registry.get("show_button").unwrap().value(), expected);

    let Some(AnyField::ResponsiveTabs(tabs)) = registry.get("device") else {
        panic!("device should be responsive tabs");
    };
    let mut tabs = tabs.clone();
    tabs.set_active(Device::Tablet);
    registry.replace(tabs.into()).unwrap();
    let Some(AnyField::Spacing(spacing)) = registry.get("spacing") else {
        panic!("spacing should be a spacing box");
    };
    assert_eq!(spacing.device(), Device::Tablet);

    let stray = fieldkit::fields::Toggle::new("nope", true);
    assert!(matches!(
        registry.replace(stray.into()),
        Err(RegistryError::NotFound(_))
    ));
}

#[test]
fn test_reset_restores_default_once() {
    let mut registry = builtin();
    let button = registry.reset_button("border_radius").unwrap();
    assert!(button.is_visible());

    let change = registry.reset("border_radius").unwrap().unwrap();
    assert_eq!(change.inputs, vec![HiddenInput::new("border_radius", "0px")]);
    assert!(registry.reset("border_radius").unwrap().is_none());

    // Sections have nothing to restore
    assert!(registry.reset("section-0").unwrap().is_none());
    assert!(registry.reset("nope").is_err());
}

#[test]
fn test_dispose_removes_from_sections() {
    let mut registry = builtin();
    let field = registry.dispose("heading").unwrap();
    assert_eq!(field.name(), "heading");
    assert!(!registry.contains("heading"));

    let Some(AnyField::Collapsible(content)) = registry.get("section-0") else {
        panic!("section-0 should be a collapsible");
    };
    assert!(!content.children().iter().any(|c| c == "heading"));
    assert!(matches!(
        registry.dispose("heading"),
        Err(RegistryError::NotFound(_))
    ));

    registry.dispose_all();
    assert!(registry.is_empty());
}

#[test]
fn test_initial_value_is_loaded_over_default() {
    let config = PanelConfig {
        sections: vec![SectionConfig {
            fields: vec![
                FieldSpec::new(
                    "width",
                    FieldOptions::Range(RangeOptions {
                        max: 200.0,
                        unit: "%".to_string(),
                        ..RangeOptions::default()
                    }),
                )
                .default_value("50")
                .value("75"),
            ],
            ..SectionConfig::default()
        }],
        ..PanelConfig::default()
    };
    let registry = Registry::from_config(&config).unwrap();
    let width = registry.get("width").unwrap();
    assert_eq!(width.value(), "75%");
    assert_eq!(width.default_value().as_deref(), Some("50%"));
}
