use fieldkit::config::{Breakpoints, CustomCssOptions, FieldOptions, FieldSpec, PanelConfig};
use fieldkit::fields::{FieldChange, HiddenInput};
use fieldkit::form::{FormData, stylesheet};
use fieldkit::registry::Registry;

const WRAPPER_CSS: &str = r#"{"wrapper":{"normal":{"desktop":"color: red; margin:0","tablet":"color: blue"},"hover":{"desktop":"color: green"}}}"#;

fn css_registry(value: &str) -> Registry {
    let mut registry = Registry::new();
    registry
        .create(&FieldSpec::new(
            "custom_css",
            FieldOptions::CustomCss(CustomCssOptions::default()),
        ))
        .unwrap();
    registry.set_value("custom_css", value).unwrap();
    registry
}

#[test]
fn test_stylesheet_orders_desktop_hover_then_media() {
    let registry = css_registry(WRAPPER_CSS);
    let css = stylesheet(&registry, "m", Breakpoints::default());
    assert_eq!(
        css,
        "#m .module-wrapper {\n  color: red;\n  margin: 0;\n}\n\
         #m .module-wrapper:hover {\n  color: green;\n}\n\
         @media (max-width: 980px) {\n#m .module-wrapper {\n  color: blue;\n}\n}\n"
    );
}

#[test]
fn test_stylesheet_uses_configured_breakpoints() {
    let registry = css_registry(
        r#"{"content":{"normal":{"mobile":"display: none"},"hover":{"mobile":"opacity: 0.5"}}}"#,
    );
    let css = stylesheet(
        &registry,
        "hero",
        Breakpoints {
            tablet: 1024,
            mobile: 600,
        },
    );
    assert_eq!(
        css,
        "@media (max-width: 600px) {\n\
         #hero .module-content {\n  display: none;\n}\n\
         #hero .module-content:hover {\n  opacity: 0.5;\n}\n}\n"
    );
}

#[test]
fn test_stylesheet_strips_markup_characters() {
    let registry = css_registry(
        r#"{"wrapper":{"normal":{"desktop":"content: '</style>'"},"hover":{}}}"#,
    );
    let css = stylesheet(&registry, "m", Breakpoints::default());
    assert_eq!(css, "#m .module-wrapper {\n  content: /style;\n}\n");
}

#[test]
fn test_empty_custom_css_renders_nothing() {
    let registry = Registry::from_config(&PanelConfig::builtin()).unwrap();
    assert_eq!(stylesheet(&registry, "fk-module", Breakpoints::default()), "");
}

#[test]
fn test_form_from_builtin_registry() {
    let registry = Registry::from_config(&PanelConfig::builtin()).unwrap();
    let form = FormData::from_registry(&registry);

    assert_eq!(form.get("heading"), Some("Welcome"));
    assert_eq!(form.get("heading_level"), Some("h2"));
    assert_eq!(form.get("show_button"), Some("1"));
    assert_eq!(form.get("border_radius"), Some("8px"));
    assert_eq!(form.get("text_align"), Some("left"));
    assert_eq!(form.get("spacing_unit"), Some("px"));
    assert_eq!(form.get("device"), None);

    // Keys come out sorted
    let keys: Vec<&str> = form.iter().map(|(k, _)| k).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
}

#[test]
fn test_form_apply_overwrites_inputs() {
    let mut form = FormData::new();
    assert!(form.is_empty());
    form.apply(&FieldChange {
        name: "size".to_string(),
        inputs: vec![HiddenInput::new("size", "12px")],
    });
    form.apply(&FieldChange {
        name: "size".to_string(),
        inputs: vec![HiddenInput::new("size", "14px")],
    });
    assert_eq!(form.len(), 1);
    assert_eq!(form.get("size"), Some("14px"));
    assert_eq!(form.to_json().unwrap(), "{\n  \"size\": \"14px\"\n}");
    assert_eq!(form.to_yaml().unwrap(), "size: 14px\n");
}
