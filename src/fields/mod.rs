//! Headless property-panel widgets.
//!
//! Every widget here is a plain state machine: no drawing, no terminal
//! events. The TUI components wrap them for rendering and input, and the CLI
//! drives them directly. Each widget synchronizes its state into one or more
//! [`HiddenInput`]s, and reports edits as a [`FieldChange`] message.

mod animation;
mod button_group;
mod collapsible;
mod color_picker;
mod custom_css;
mod range;
mod reset;
mod responsive;
mod select;
mod spacing;
mod text;
mod toggle;
mod tooltip;
mod typography;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use animation::{
    ANIMATION_DIRECTIONS, ANIMATION_EASINGS, ANIMATION_ITERATIONS, ANIMATION_STYLES,
    ANIMATION_TRIGGERS, AnimationField, AnimationPreview, AnimationProperty, AnimationValue,
    TIMING_RANGE,
};
pub use button_group::{ButtonGroup, text_align_choices};
pub use collapsible::{CollapsibleSection, DEFAULT_TITLE as DEFAULT_SECTION_TITLE};
pub use color_picker::{ColorPicker, DEFAULT_SWATCHES};
pub use custom_css::{CssTarget, CustomCssField, CustomCssValue, StateStyles, default_css_targets};
pub use range::{DEFAULT_UNITS, RangeSlider};
pub use reset::ResetButton;
pub use responsive::ResponsiveTabs;
pub use select::{ChoiceGroup, Select, SelectKey};
pub use spacing::{BoxSide, SPACING_UNITS, Sides, SpacingBox, SpacingTarget};
pub use text::TextInput;
pub use toggle::Toggle;
pub use tooltip::{
    DEFAULT_GAP, DEFAULT_MARGIN, Placement, Point, Rect, Size, TooltipController, TooltipTiming,
    TooltipTrigger, place_tooltip,
};
pub use typography::{
    FONT_FAMILIES, FONT_STYLES, FONT_WEIGHTS, PerDevice, StateColors, TEXT_ALIGNS,
    TEXT_DECORATIONS, TEXT_TRANSFORMS, TypographyField, TypographyProperty, TypographyValue,
};

/// A named string value submitted with the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiddenInput {
    pub name: String,
    pub value: String,
}

impl HiddenInput {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Message emitted by a widget whenever its submitted value changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub name: String,
    pub inputs: Vec<HiddenInput>,
}

/// One entry of a select, button group or option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Build a choice list from `(value, label)` pairs.
pub fn choices(pairs: &[(&str, &str)]) -> Vec<Choice> {
    pairs
        .iter()
        .map(|(value, label)| Choice::new(*value, *label))
        .collect()
}

/// Responsive breakpoint targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Device {
    pub const ALL: [Device; 3] = [Device::Desktop, Device::Tablet, Device::Mobile];

    pub fn as_str(self) -> &'static str {
        match self {
            Device::Desktop => "desktop",
            Device::Tablet => "tablet",
            Device::Mobile => "mobile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Device::Desktop => "Desktop",
            Device::Tablet => "Tablet",
            Device::Mobile => "Mobile",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(Device::Desktop),
            "tablet" => Ok(Device::Tablet),
            // Server-side templates call it "phone"
            "mobile" | "phone" => Ok(Device::Mobile),
            other => Err(FieldError::invalid("device", other, "expected desktop, tablet or mobile")),
        }
    }
}

/// Interaction state a style applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleState {
    #[default]
    Normal,
    Hover,
}

impl StyleState {
    pub fn toggled(self) -> Self {
        match self {
            StyleState::Normal => StyleState::Hover,
            StyleState::Hover => StyleState::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StyleState::Normal => "normal",
            StyleState::Hover => "hover",
        }
    }
}

/// Widget type names, as used in panel schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Toggle,
    Select,
    Range,
    Color,
    ButtonGroup,
    ResponsiveTabs,
    Collapsible,
    Spacing,
    Animation,
    Typography,
    CustomCss,
    Text,
}

impl FieldKind {
    pub const ALL: [FieldKind; 12] = [
        FieldKind::Toggle,
        FieldKind::Select,
        FieldKind::Range,
        FieldKind::Color,
        FieldKind::ButtonGroup,
        FieldKind::ResponsiveTabs,
        FieldKind::Collapsible,
        FieldKind::Spacing,
        FieldKind::Animation,
        FieldKind::Typography,
        FieldKind::CustomCss,
        FieldKind::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Toggle => "toggle",
            FieldKind::Select => "select",
            FieldKind::Range => "range",
            FieldKind::Color => "color",
            FieldKind::ButtonGroup => "button-group",
            FieldKind::ResponsiveTabs => "responsive-tabs",
            FieldKind::Collapsible => "collapsible",
            FieldKind::Spacing => "spacing",
            FieldKind::Animation => "animation",
            FieldKind::Typography => "typography",
            FieldKind::CustomCss => "custom-css",
            FieldKind::Text => "text",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FieldError::UnknownKind(s.to_string()))
    }
}

/// Error type for loading values into widgets.
#[derive(Debug)]
pub enum FieldError {
    /// Schema named a widget type that does not exist
    UnknownKind(String),
    /// Value text could not be interpreted by the widget
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Structured value was not valid JSON for the widget
    Json(serde_json::Error),
}

impl FieldError {
    pub fn invalid(field: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(kind) => write!(f, "Unknown field type: {}", kind),
            Self::InvalidValue {
                field,
                value,
                reason,
            } => write!(f, "Invalid value '{}' for {}: {}", value, field, reason),
            Self::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for FieldError {}

impl From<serde_json::Error> for FieldError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Behavior shared by every widget.
pub trait Field {
    fn name(&self) -> &str;

    fn kind(&self) -> FieldKind;

    /// Primary serialized value, the one the reset button compares.
    fn value(&self) -> String;

    /// Replace state from serialized text.
    fn load(&mut self, value: &str) -> Result<(), FieldError>;

    /// Value restored by the reset button, if the widget has one.
    fn default_value(&self) -> Option<String> {
        None
    }

    /// Follow the panel's responsive device switch.
    fn set_device(&mut self, _device: Device) {}

    fn hidden_inputs(&self) -> Vec<HiddenInput> {
        vec![HiddenInput::new(self.name(), self.value())]
    }

    fn change(&self) -> FieldChange {
        FieldChange {
            name: self.name().to_string(),
            inputs: self.hidden_inputs(),
        }
    }
}

/// Any widget, for heterogeneous storage in the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyField {
    Toggle(Toggle),
    Select(Select),
    Range(RangeSlider),
    Color(ColorPicker),
    ButtonGroup(ButtonGroup),
    ResponsiveTabs(ResponsiveTabs),
    Collapsible(CollapsibleSection),
    Spacing(SpacingBox),
    Animation(AnimationField),
    Typography(TypographyField),
    CustomCss(CustomCssField),
    Text(TextInput),
}

macro_rules! dispatch {
    ($self:expr, $f:ident => $body:expr) => {
        match $self {
            AnyField::Toggle($f) => $body,
            AnyField::Select($f) => $body,
            AnyField::Range($f) => $body,
            AnyField::Color($f) => $body,
            AnyField::ButtonGroup($f) => $body,
            AnyField::ResponsiveTabs($f) => $body,
            AnyField::Collapsible($f) => $body,
            AnyField::Spacing($f) => $body,
            AnyField::Animation($f) => $body,
            AnyField::Typography($f) => $body,
            AnyField::CustomCss($f) => $body,
            AnyField::Text($f) => $body,
        }
    };
}

impl Field for AnyField {
    fn name(&self) -> &str {
        dispatch!(self, f => f.name())
    }

    fn kind(&self) -> FieldKind {
        dispatch!(self, f => f.kind())
    }

    fn value(&self) -> String {
        dispatch!(self, f => f.value())
    }

    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        dispatch!(self, f => f.load(value))
    }

    fn default_value(&self) -> Option<String> {
        dispatch!(self, f => f.default_value())
    }

    fn set_device(&mut self, device: Device) {
        dispatch!(self, f => f.set_device(device))
    }

    fn hidden_inputs(&self) -> Vec<HiddenInput> {
        dispatch!(self, f => f.hidden_inputs())
    }
}

macro_rules! into_any {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for AnyField {
                fn from(field: $ty) -> Self {
                    AnyField::$variant(field)
                }
            }
        )*
    };
}

into_any!(
    Toggle(Toggle),
    Select(Select),
    Range(RangeSlider),
    Color(ColorPicker),
    ButtonGroup(ButtonGroup),
    ResponsiveTabs(ResponsiveTabs),
    Collapsible(CollapsibleSection),
    Spacing(SpacingBox),
    Animation(AnimationField),
    Typography(TypographyField),
    CustomCss(CustomCssField),
    Text(TextInput),
);
