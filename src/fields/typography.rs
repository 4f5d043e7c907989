//! Typography panel: font, size, spacing, alignment and colors.
//!
//! Size, line height, letter spacing and alignment are stored per device.
//! Tablet and mobile values are optional; reads fall back to desktop.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ColorPicker, Device, Field, FieldError, FieldKind, HiddenInput, StyleState};

pub const FONT_FAMILIES: &[(&str, &str)] = &[
    ("inherit", "Inherit"),
    ("system-ui, -apple-system, sans-serif", "System UI"),
    ("Arial, Helvetica, sans-serif", "Arial"),
    ("Georgia, serif", "Georgia"),
    ("Times New Roman, serif", "Times New Roman"),
    ("Verdana, sans-serif", "Verdana"),
    ("Trebuchet MS, sans-serif", "Trebuchet MS"),
    ("Courier New, monospace", "Courier New"),
    ("Roboto, sans-serif", "Roboto"),
    ("Open Sans, sans-serif", "Open Sans"),
    ("Lato, sans-serif", "Lato"),
    ("Montserrat, sans-serif", "Montserrat"),
    ("Poppins, sans-serif", "Poppins"),
    ("Inter, sans-serif", "Inter"),
    ("Playfair Display, serif", "Playfair Display"),
    ("Merriweather, serif", "Merriweather"),
];

pub const FONT_WEIGHTS: &[(&str, &str)] = &[
    ("100", "Thin (100)"),
    ("200", "Extra Light (200)"),
    ("300", "Light (300)"),
    ("400", "Regular (400)"),
    ("500", "Medium (500)"),
    ("600", "Semi Bold (600)"),
    ("700", "Bold (700)"),
    ("800", "Extra Bold (800)"),
    ("900", "Black (900)"),
];

pub const FONT_STYLES: &[(&str, &str)] = &[("normal", "Normal"), ("italic", "Italic")];

pub const TEXT_TRANSFORMS: &[(&str, &str)] = &[
    ("none", "None"),
    ("uppercase", "UPPERCASE"),
    ("lowercase", "lowercase"),
    ("capitalize", "Capitalize"),
];

pub const TEXT_DECORATIONS: &[(&str, &str)] = &[
    ("none", "None"),
    ("underline", "Underline"),
    ("line-through", "Line Through"),
];

pub const TEXT_ALIGNS: &[(&str, &str)] = &[
    ("left", "Left"),
    ("center", "Center"),
    ("right", "Right"),
    ("justify", "Justify"),
];

/// One string per device. Empty means "inherit from desktop".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerDevice {
    pub desktop: String,
    pub tablet: String,
    pub mobile: String,
}

impl PerDevice {
    pub fn desktop(value: impl Into<String>) -> Self {
        Self {
            desktop: value.into(),
            ..Self::default()
        }
    }

    /// Raw value stored for `device`.
    pub fn raw(&self, device: Device) -> &str {
        match device {
            Device::Desktop => &self.desktop,
            Device::Tablet => &self.tablet,
            Device::Mobile => &self.mobile,
        }
    }

    /// Value for `device`, falling back to desktop when empty.
    pub fn get(&self, device: Device) -> &str {
        match self.raw(device) {
            "" => &self.desktop,
            value => value,
        }
    }

    pub fn set(&mut self, device: Device, value: impl Into<String>) {
        let slot = match device {
            Device::Desktop => &mut self.desktop,
            Device::Tablet => &mut self.tablet,
            Device::Mobile => &mut self.mobile,
        };
        *slot = value.into();
    }

    /// Whether `device` carries its own value.
    pub fn has(&self, device: Device) -> bool {
        !self.raw(device).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        Device::ALL.iter().all(|d| !self.has(*d))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateColors {
    pub normal: String,
    pub hover: String,
}

impl StateColors {
    pub fn get(&self, state: StyleState) -> &str {
        match state {
            StyleState::Normal => &self.normal,
            StyleState::Hover => &self.hover,
        }
    }

    fn get_mut(&mut self, state: StyleState) -> &mut String {
        match state {
            StyleState::Normal => &mut self.normal,
            StyleState::Hover => &mut self.hover,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographyValue {
    pub font_family: String,
    pub font_size: PerDevice,
    pub font_weight: String,
    pub font_style: String,
    pub line_height: PerDevice,
    pub letter_spacing: PerDevice,
    pub text_align: PerDevice,
    pub text_transform: String,
    pub text_decoration: String,
    pub color: StateColors,
}

impl Default for TypographyValue {
    fn default() -> Self {
        Self {
            font_family: "inherit".into(),
            font_size: PerDevice::desktop("16px"),
            font_weight: "400".into(),
            font_style: "normal".into(),
            line_height: PerDevice::desktop("1.5"),
            letter_spacing: PerDevice::desktop("0px"),
            text_align: PerDevice::desktop("left"),
            text_transform: "none".into(),
            text_decoration: "none".into(),
            color: StateColors::default(),
        }
    }
}

/// One editable row of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypographyProperty {
    FontFamily,
    FontSize,
    FontWeight,
    FontStyle,
    LineHeight,
    LetterSpacing,
    TextAlign,
    TextTransform,
    TextDecoration,
    Color,
}

impl TypographyProperty {
    pub const ALL: [TypographyProperty; 10] = [
        TypographyProperty::FontFamily,
        TypographyProperty::FontSize,
        TypographyProperty::FontWeight,
        TypographyProperty::FontStyle,
        TypographyProperty::LineHeight,
        TypographyProperty::LetterSpacing,
        TypographyProperty::TextAlign,
        TypographyProperty::TextTransform,
        TypographyProperty::TextDecoration,
        TypographyProperty::Color,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TypographyProperty::FontFamily => "Font Family",
            TypographyProperty::FontSize => "Font Size",
            TypographyProperty::FontWeight => "Font Weight",
            TypographyProperty::FontStyle => "Font Style",
            TypographyProperty::LineHeight => "Line Height",
            TypographyProperty::LetterSpacing => "Letter Spacing",
            TypographyProperty::TextAlign => "Text Align",
            TypographyProperty::TextTransform => "Transform",
            TypographyProperty::TextDecoration => "Decoration",
            TypographyProperty::Color => "Color",
        }
    }

    pub fn options(self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            TypographyProperty::FontFamily => Some(FONT_FAMILIES),
            TypographyProperty::FontWeight => Some(FONT_WEIGHTS),
            TypographyProperty::FontStyle => Some(FONT_STYLES),
            TypographyProperty::TextAlign => Some(TEXT_ALIGNS),
            TypographyProperty::TextTransform => Some(TEXT_TRANSFORMS),
            TypographyProperty::TextDecoration => Some(TEXT_DECORATIONS),
            _ => None,
        }
    }

    /// Rows edited as free text for the active device.
    pub fn is_responsive(self) -> bool {
        matches!(
            self,
            TypographyProperty::FontSize
                | TypographyProperty::LineHeight
                | TypographyProperty::LetterSpacing
                | TypographyProperty::TextAlign
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypographyField {
    name: String,
    value: TypographyValue,
    device: Device,
    state: StyleState,
    picker: ColorPicker,
}

impl TypographyField {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let picker = ColorPicker::new(format!("{name}_color"), "");
        Self {
            name,
            value: TypographyValue::default(),
            device: Device::Desktop,
            state: StyleState::Normal,
            picker,
        }
    }

    pub fn with_value(mut self, value: TypographyValue) -> Self {
        self.value = value;
        self.sync_picker();
        self
    }

    pub fn typography(&self) -> &TypographyValue {
        &self.value
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn state(&self) -> StyleState {
        self.state
    }

    pub fn picker(&self) -> &ColorPicker {
        &self.picker
    }

    fn per_device(&self, property: TypographyProperty) -> Option<&PerDevice> {
        match property {
            TypographyProperty::FontSize => Some(&self.value.font_size),
            TypographyProperty::LineHeight => Some(&self.value.line_height),
            TypographyProperty::LetterSpacing => Some(&self.value.letter_spacing),
            TypographyProperty::TextAlign => Some(&self.value.text_align),
            _ => None,
        }
    }

    fn per_device_mut(&mut self, property: TypographyProperty) -> Option<&mut PerDevice> {
        match property {
            TypographyProperty::FontSize => Some(&mut self.value.font_size),
            TypographyProperty::LineHeight => Some(&mut self.value.line_height),
            TypographyProperty::LetterSpacing => Some(&mut self.value.letter_spacing),
            TypographyProperty::TextAlign => Some(&mut self.value.text_align),
            _ => None,
        }
    }

    fn scalar_mut(&mut self, property: TypographyProperty) -> Option<&mut String> {
        match property {
            TypographyProperty::FontFamily => Some(&mut self.value.font_family),
            TypographyProperty::FontWeight => Some(&mut self.value.font_weight),
            TypographyProperty::FontStyle => Some(&mut self.value.font_style),
            TypographyProperty::TextTransform => Some(&mut self.value.text_transform),
            TypographyProperty::TextDecoration => Some(&mut self.value.text_decoration),
            _ => None,
        }
    }

    /// Effective value of a row for the active device and state.
    pub fn get(&self, property: TypographyProperty) -> &str {
        if let Some(values) = self.per_device(property) {
            let value = values.get(self.device);
            return match (property, value) {
                (TypographyProperty::TextAlign, "") => "left",
                (_, value) => value,
            };
        }
        match property {
            TypographyProperty::FontFamily => &self.value.font_family,
            TypographyProperty::FontWeight => &self.value.font_weight,
            TypographyProperty::FontStyle => &self.value.font_style,
            TypographyProperty::TextTransform => &self.value.text_transform,
            TypographyProperty::TextDecoration => &self.value.text_decoration,
            _ => self.value.color.get(self.state),
        }
    }

    /// Set a row. Responsive rows write the active device only.
    pub fn set(&mut self, property: TypographyProperty, value: &str) -> bool {
        let device = self.device;
        if let Some(values) = self.per_device_mut(property) {
            values.set(device, value);
        } else if let Some(slot) = self.scalar_mut(property) {
            *slot = value.to_string();
        } else {
            return self.set_color(value);
        }
        debug!(field = %self.name, ?property, value, device = %device, "typography edited");
        true
    }

    /// Step a select row to the next / previous option.
    pub fn cycle(&mut self, property: TypographyProperty, forward: bool) -> bool {
        let Some(options) = property.options() else {
            return false;
        };
        let current = self.get(property);
        let len = options.len();
        let next = match (options.iter().position(|(v, _)| *v == current), forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(len - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        let value = options[next].0;
        self.set(property, value)
    }

    /// Set the color for the current state through the embedded picker.
    pub fn set_color(&mut self, text: &str) -> bool {
        if !self.picker.set_text(text) {
            return false;
        }
        self.store_picker();
        true
    }

    /// Run an edit against the embedded picker and keep the value in sync.
    pub fn edit_color<F: FnOnce(&mut ColorPicker) -> bool>(&mut self, edit: F) -> bool {
        let changed = edit(&mut self.picker);
        if changed {
            self.store_picker();
        }
        changed
    }

    fn store_picker(&mut self) {
        *self.value.color.get_mut(self.state) = self.picker.value();
    }

    fn sync_picker(&mut self) {
        let color = self.value.color.get(self.state).to_string();
        self.picker.set_text(&color);
    }

    /// Switch the color picker between the normal and hover color.
    pub fn toggle_hover(&mut self) -> StyleState {
        self.state = self.state.toggled();
        self.sync_picker();
        self.state
    }
}

impl Field for TypographyField {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Typography
    }

    fn value(&self) -> String {
        serde_json::to_string(&self.value).unwrap_or_default()
    }

    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        let mut merged = serde_json::to_value(&self.value)?;
        let patch: serde_json::Value = serde_json::from_str(value)?;
        let (Some(target), serde_json::Value::Object(patch)) = (merged.as_object_mut(), patch) else {
            return Err(FieldError::invalid(&self.name, value, "expected a JSON object"));
        };
        for (key, val) in patch {
            target.insert(key, val);
        }
        self.value = serde_json::from_value(merged)?;
        self.sync_picker();
        Ok(())
    }

    fn default_value(&self) -> Option<String> {
        serde_json::to_string(&TypographyValue::default()).ok()
    }

    fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    fn hidden_inputs(&self) -> Vec<HiddenInput> {
        vec![
            HiddenInput::new(self.name.clone(), self.value()),
            HiddenInput::new(self.picker.name(), self.value.color.get(self.state)),
        ]
    }
}
