//! Submitted form values and the custom-CSS stylesheet.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::config::Breakpoints;
use crate::fields::{AnyField, Device, FieldChange, PerDevice};
use crate::registry::Registry;

/// Hidden input name → value, as the panel would submit it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormData {
    values: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_registry(registry: &Registry) -> Self {
        let mut form = Self::new();
        for input in registry.hidden_inputs() {
            form.values.insert(input.name, input.value);
        }
        form
    }

    /// Fold a widget's change message into the form.
    pub fn apply(&mut self, change: &FieldChange) {
        for input in &change.inputs {
            self.values.insert(input.name.clone(), input.value.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Render every custom-CSS field in the registry as scoped rules.
///
/// Per target: the desktop rule, its `:hover` rule, then tablet and mobile
/// rules wrapped in `max-width` media queries. Empty blocks are omitted.
pub fn stylesheet(registry: &Registry, selector_id: &str, breakpoints: Breakpoints) -> String {
    let mut css = String::new();
    for entry in registry.iter() {
        let AnyField::CustomCss(field) = &entry.field else {
            continue;
        };
        for target in field.targets() {
            let Some(styles) = field.styles().get(&target.key) else {
                continue;
            };
            if target.selector.is_empty() {
                continue;
            }
            let selector = format!("#{} {}", selector_id, target.selector);
            let hover = format!("{selector}:hover");

            css.push_str(&rule(&selector, styles.normal.raw(Device::Desktop)));
            css.push_str(&rule(&hover, styles.hover.raw(Device::Desktop)));

            for (device, width) in [
                (Device::Tablet, breakpoints.tablet),
                (Device::Mobile, breakpoints.mobile),
            ] {
                let body = device_rules(&selector, &hover, &styles.normal, &styles.hover, device);
                if !body.is_empty() {
                    let _ = write!(css, "@media (max-width: {width}px) {{\n{body}}}\n");
                }
            }
        }
    }
    css
}

fn device_rules(
    selector: &str,
    hover: &str,
    normal: &PerDevice,
    hovered: &PerDevice,
    device: Device,
) -> String {
    let mut body = rule(selector, normal.raw(device));
    body.push_str(&rule(hover, hovered.raw(device)));
    body
}

/// One `selector { prop: value; }` block from free-form declarations.
fn rule(selector: &str, declarations: &str) -> String {
    let props: Vec<String> = declarations
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim();
            let value = sanitize(value.trim());
            (!property.is_empty() && !value.is_empty()).then(|| format!("{property}: {value}"))
        })
        .collect();
    if props.is_empty() {
        return String::new();
    }
    format!("{} {{\n  {};\n}}\n", selector, props.join(";\n  "))
}

/// Strip characters that could close the style element or a string.
fn sanitize(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '<' | '>' | '"' | '\'')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_joins_declarations() {
        assert_eq!(
            rule("#m .a", "color: red;  ; margin:0 auto"),
            "#m .a {\n  color: red;\n  margin: 0 auto;\n}\n"
        );
    }

    #[test]
    fn rule_skips_empty_and_valueless() {
        assert_eq!(rule("#m .a", ""), "");
        assert_eq!(rule("#m .a", "color:; junk"), "");
    }

    #[test]
    fn sanitize_strips_quotes_and_angles() {
        assert_eq!(sanitize("url('x')<b>\""), "url(x)b");
    }
}
