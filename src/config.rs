//! TOML panel schema and layered configuration.
//!
//! Layers, lowest first: the built-in demo panel, the `--config` file, then
//! flags given on the command line.

use std::path::Path;

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::fields::{Choice, ChoiceGroup, CssTarget, Placement, TooltipTiming};
use crate::mapper::Range;

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading/writing file
    Io(std::io::Error),
    /// Layered extraction failed (bad TOML, wrong types)
    Extract(Box<figment::Error>),
    /// TOML parsing error
    Parse(toml::de::Error),
    /// TOML serialization error
    Serialize(toml::ser::Error),
    /// Schema is well-formed but unusable
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Extract(e) => write!(f, "Configuration error: {}", e),
            Self::Parse(e) => write!(f, "TOML parse error: {}", e),
            Self::Serialize(e) => write!(f, "TOML serialize error: {}", e),
            Self::Invalid(s) => write!(f, "Invalid panel schema: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(Box::new(e))
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

/// Root of a panel schema file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub panel: PanelMeta,
    pub breakpoints: Breakpoints,
    pub tooltip: TooltipConfig,
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelMeta {
    /// Heading shown above the panel
    pub title: String,
    /// Element id custom CSS is scoped to (`#<id> .selector`)
    pub selector_id: String,
}

impl Default for PanelMeta {
    fn default() -> Self {
        Self {
            title: "Module Settings".to_string(),
            selector_id: "fk-module".to_string(),
        }
    }
}

/// `max-width` media query breakpoints, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub tablet: u32,
    pub mobile: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet: 980,
            mobile: 767,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub show_delay_ms: u64,
    pub hide_delay_ms: u64,
    pub gap: f64,
    pub margin: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: 300,
            hide_delay_ms: 100,
            gap: crate::fields::DEFAULT_GAP,
            margin: crate::fields::DEFAULT_MARGIN,
        }
    }
}

impl TooltipConfig {
    pub fn timing(&self) -> TooltipTiming {
        TooltipTiming {
            show_delay: std::time::Duration::from_millis(self.show_delay_ms),
            hide_delay: std::time::Duration::from_millis(self.hide_delay_ms),
        }
    }
}

/// Collapsible group of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub open: bool,
    pub fields: Vec<FieldSpec>,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            title: crate::fields::DEFAULT_SECTION_TITLE.to_string(),
            icon: None,
            open: true,
            fields: Vec::new(),
        }
    }
}

/// One widget in the schema.
///
/// `value` and `default` are the widget's serialized text: `"12px"` for a
/// range, `"#ff0000"` for a color, a JSON object for the composite panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub tooltip_position: Placement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(flatten)]
    pub options: FieldOptions,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, options: FieldOptions) -> Self {
        Self {
            name: name.into(),
            label: None,
            description: None,
            tooltip: None,
            tooltip_position: Placement::Top,
            value: None,
            default: None,
            options,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Type-specific options, tagged by the widget type string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldOptions {
    Toggle(ToggleOptions),
    Select(SelectOptions),
    Range(RangeOptions),
    Color(ColorOptions),
    ButtonGroup(ButtonGroupOptions),
    ResponsiveTabs,
    Collapsible(CollapsibleOptions),
    Spacing(SpacingOptions),
    Animation,
    Typography,
    CustomCss(CustomCssOptions),
    Text(TextOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleOptions {
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOptions {
    pub options: Vec<Choice>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ChoiceGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub searchable: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            groups: Vec::new(),
            placeholder: None,
            searchable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<String>,
    pub show_unit: bool,
}

impl Default for RangeOptions {
    fn default() -> Self {
        let range = Range::default();
        Self {
            min: range.min,
            max: range.max,
            step: range.step,
            unit: "px".to_string(),
            units: Vec::new(),
            show_unit: true,
        }
    }
}

impl RangeOptions {
    pub fn range(&self) -> Range {
        Range::new(self.min, self.max, self.step)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    pub show_alpha: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub swatches: Vec<String>,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            show_alpha: true,
            swatches: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonGroupOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Choice>,
    /// Named option set used when `options` is empty (`text-align`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapsibleOptions {
    pub title: String,
    pub open: bool,
}

impl Default for CollapsibleOptions {
    fn default() -> Self {
        Self {
            title: crate::fields::DEFAULT_SECTION_TITLE.to_string(),
            open: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingOptions {
    pub linked: bool,
    pub show_responsive: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<String>,
}

impl Default for SpacingOptions {
    fn default() -> Self {
        Self {
            linked: true,
            show_responsive: true,
            units: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomCssOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<CssTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
}

/// Command-line values layered over the file. Unset flags serialize to nothing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "PanelOverrides::is_empty")]
    pub panel: PanelOverrides,
    #[serde(skip_serializing_if = "BreakpointOverrides::is_empty")]
    pub breakpoints: BreakpointOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PanelOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector_id: Option<String>,
}

impl PanelOverrides {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.selector_id.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BreakpointOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablet: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<u32>,
}

impl BreakpointOverrides {
    fn is_empty(&self) -> bool {
        self.tablet.is_none() && self.mobile.is_none()
    }
}

impl PanelConfig {
    /// Demo panel used when no schema file is given.
    pub fn builtin() -> Self {
        Self {
            panel: PanelMeta::default(),
            breakpoints: Breakpoints::default(),
            tooltip: TooltipConfig::default(),
            sections: builtin_sections(),
        }
    }

    /// Merge built-in defaults, an optional TOML file and CLI overrides.
    pub fn figment(path: Option<&Path>, overrides: &ConfigOverrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::builtin()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file_exact(path));
        }
        figment.merge(Serialized::defaults(overrides))
    }

    pub fn load_layered(
        path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = path
            && !path.exists()
        {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file not found: {}", path.display()),
            )));
        }
        let config: Self = Self::figment(path, overrides).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load a schema file on its own, without defaults or overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Breakpoints must be ordered and field names unique across sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.breakpoints.mobile >= self.breakpoints.tablet {
            return Err(ConfigError::Invalid(format!(
                "mobile breakpoint ({}px) must be below tablet ({}px)",
                self.breakpoints.mobile, self.breakpoints.tablet
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for field in self.sections.iter().flat_map(|s| &s.fields) {
            if field.name.is_empty() {
                return Err(ConfigError::Invalid("field with empty name".to_string()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate field name '{}'",
                    field.name
                )));
            }
        }
        Ok(())
    }
}

fn builtin_sections() -> Vec<SectionConfig> {
    let section = |title: &str, icon: &str, open: bool, fields: Vec<FieldSpec>| SectionConfig {
        title: title.to_string(),
        icon: Some(icon.to_string()),
        open,
        fields,
    };

    vec![
        section(
            "Content",
            "✎",
            true,
            vec![
                FieldSpec::new("heading", FieldOptions::Text(TextOptions::default()))
                    .label("Heading")
                    .value("Welcome")
                    .default_value("Welcome"),
                FieldSpec::new(
                    "heading_level",
                    FieldOptions::Select(SelectOptions {
                        options: crate::fields::choices(&[
                            ("h1", "Heading 1"),
                            ("h2", "Heading 2"),
                            ("h3", "Heading 3"),
                            ("h4", "Heading 4"),
                        ]),
                        ..SelectOptions::default()
                    }),
                )
                .label("Heading Level")
                .value("h2")
                .default_value("h2"),
                FieldSpec::new("show_button", FieldOptions::Toggle(ToggleOptions::default()))
                    .label("Show Button")
                    .tooltip("Display a call-to-action button")
                    .value("1")
                    .default_value("1"),
            ],
        ),
        section(
            "Design",
            "◐",
            true,
            vec![
                FieldSpec::new("device", FieldOptions::ResponsiveTabs).label("Device"),
                FieldSpec::new(
                    "text_align",
                    FieldOptions::ButtonGroup(ButtonGroupOptions {
                        options: Vec::new(),
                        preset: Some("text-align".to_string()),
                    }),
                )
                .label("Alignment")
                .value("left")
                .default_value("left"),
                FieldSpec::new(
                    "border_radius",
                    FieldOptions::Range(RangeOptions {
                        max: 50.0,
                        ..RangeOptions::default()
                    }),
                )
                .label("Border Radius")
                .tooltip("Corner rounding")
                .value("8px")
                .default_value("0px"),
                FieldSpec::new("background_color", FieldOptions::Color(ColorOptions::default()))
                    .label("Background")
                    .value("#3b82f6")
                    .default_value("#3b82f6"),
                FieldSpec::new("spacing", FieldOptions::Spacing(SpacingOptions::default()))
                    .label("Spacing"),
            ],
        ),
        section(
            "Advanced",
            "⚙",
            false,
            vec![
                FieldSpec::new("typography", FieldOptions::Typography).label("Typography"),
                FieldSpec::new("animation", FieldOptions::Animation).label("Animation"),
                FieldSpec::new(
                    "custom_css",
                    FieldOptions::CustomCss(CustomCssOptions::default()),
                )
                .label("Custom CSS"),
            ],
        ),
    ]
}
