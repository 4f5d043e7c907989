//! Owned repository of live widgets, keyed by field name.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::config::{FieldOptions, FieldSpec, PanelConfig};
use crate::fields::{
    AnimationField, AnyField, ButtonGroup, CollapsibleSection, ColorPicker, CustomCssField, Device,
    Field, FieldChange, FieldError, FieldKind, HiddenInput, Placement, RangeSlider, ResetButton,
    ResponsiveTabs, Select, SpacingBox, TextInput, Toggle, TypographyField, text_align_choices,
};
use crate::mapper::{Range, parse_leading_number};

/// Error type for registry operations.
#[derive(Debug)]
pub enum RegistryError {
    /// A field with this name already exists
    Duplicate(String),
    /// No field with this name
    NotFound(String),
    /// The field rejected its value or options
    Field(FieldError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(name) => write!(f, "Field '{}' already exists", name),
            Self::NotFound(name) => write!(f, "No field named '{}'", name),
            Self::Field(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<FieldError> for RegistryError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

/// Presentation data that travels with a widget but is not part of its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMeta {
    pub label: String,
    pub description: Option<String>,
    pub tooltip: Option<String>,
    pub tooltip_position: Placement,
    /// Name of the collapsible section entry this field belongs to
    pub section: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub meta: FieldMeta,
    pub field: AnyField,
}

impl Entry {
    pub fn name(&self) -> &str {
        self.field.name()
    }
}

/// Ordered set of widgets. Iteration follows creation order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One collapsible entry per section (`section-<index>`), followed by its fields.
    pub fn from_config(config: &PanelConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for (index, section) in config.sections.iter().enumerate() {
            let section_name = format!("section-{index}");
            let mut collapsible = CollapsibleSection::new(&section_name)
                .with_title(&section.title)
                .with_open(section.open);
            collapsible.icon = section.icon.clone();
            for spec in &section.fields {
                collapsible.push_child(&spec.name);
            }
            registry.insert(
                FieldMeta {
                    label: section.title.clone(),
                    ..FieldMeta::default()
                },
                AnyField::Collapsible(collapsible),
            )?;

            for spec in &section.fields {
                registry.create(spec)?;
                if let Some(entry) = registry.entry_mut(&spec.name) {
                    entry.meta.section = Some(section_name.clone());
                }
            }
        }
        info!(fields = registry.len(), "registry built from config");
        Ok(registry)
    }

    /// Build and register the widget described by `spec`.
    pub fn create(&mut self, spec: &FieldSpec) -> Result<&mut AnyField, RegistryError> {
        if self.contains(&spec.name) {
            return Err(RegistryError::Duplicate(spec.name.clone()));
        }
        let mut field = build_field(spec)?;
        if let Some(value) = &spec.value {
            field.load(value)?;
        }
        let meta = FieldMeta {
            label: spec.label.clone().unwrap_or_else(|| spec.name.clone()),
            description: spec.description.clone(),
            tooltip: spec.tooltip.clone(),
            tooltip_position: spec.tooltip_position,
            section: None,
        };
        self.insert(meta, field)
    }

    /// Register a widget of the named type with default options.
    pub fn create_kind(&mut self, kind: &str, name: &str) -> Result<&mut AnyField, RegistryError> {
        let kind = FieldKind::from_str(kind)?;
        if self.contains(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        let meta = FieldMeta {
            label: name.to_string(),
            ..FieldMeta::default()
        };
        self.insert(meta, default_field(kind, name))
    }

    fn insert(&mut self, meta: FieldMeta, field: AnyField) -> Result<&mut AnyField, RegistryError> {
        if self.contains(field.name()) {
            return Err(RegistryError::Duplicate(field.name().to_string()));
        }
        debug!(name = field.name(), kind = %field.kind(), "field created");
        self.entries.push(Entry { meta, field });
        let last = self.entries.len() - 1;
        Ok(&mut self.entries[last].field)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    pub fn get(&self, name: &str) -> Option<&AnyField> {
        self.entry(name).map(|e| &e.field)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AnyField> {
        self.entry_mut(name).map(|e| &mut e.field)
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn entry_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.name() == name)
    }

    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entry_at_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.entries.get_mut(index)
    }

    /// Remove a widget. It is also dropped from any section listing it.
    pub fn dispose(&mut self, name: &str) -> Result<AnyField, RegistryError> {
        let index = self
            .position(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        let entry = self.entries.remove(index);
        for other in &mut self.entries {
            if let AnyField::Collapsible(section) = &mut other.field {
                section.remove_child(name);
            }
        }
        debug!(name, "field disposed");
        Ok(entry.field)
    }

    pub fn dispose_all(&mut self) {
        debug!(count = self.entries.len(), "disposing all fields");
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name().to_string()).collect()
    }

    /// Load `text` into the named widget and report its new hidden inputs.
    ///
    /// Loading a responsive-tabs widget also switches the panel device.
    pub fn set_value(&mut self, name: &str, text: &str) -> Result<FieldChange, RegistryError> {
        let field = self
            .get_mut(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        field.load(text)?;
        let change = field.change();
        let device = match field {
            AnyField::ResponsiveTabs(tabs) => Some(tabs.active()),
            _ => None,
        };
        if let Some(device) = device {
            self.set_active_device(device);
        }
        debug!(name, value = text, "value set");
        Ok(change)
    }

    /// Store an edited copy of a widget in place of the one with its name.
    ///
    /// Like [`Registry::set_value`], responsive tabs switch the panel device.
    pub fn replace(&mut self, field: AnyField) -> Result<FieldChange, RegistryError> {
        let slot = self
            .get_mut(field.name())
            .ok_or_else(|| RegistryError::NotFound(field.name().to_string()))?;
        *slot = field;
        let change = slot.change();
        if let AnyField::ResponsiveTabs(tabs) = slot {
            let device = tabs.active();
            self.set_active_device(device);
        }
        debug!(name = %change.name, "field replaced");
        Ok(change)
    }

    /// Propagate a device switch to every device-aware widget.
    pub fn set_active_device(&mut self, device: Device) {
        for entry in &mut self.entries {
            entry.field.set_device(device);
        }
        debug!(%device, "active device changed");
    }

    /// Reset button for a widget, when it has a default.
    pub fn reset_button(&self, name: &str) -> Option<ResetButton> {
        let field = self.get(name)?;
        field
            .default_value()
            .map(|default| ResetButton::new(default, field.value()))
    }

    /// Restore the widget's default. `None` when there is nothing to restore.
    pub fn reset(&mut self, name: &str) -> Result<Option<FieldChange>, RegistryError> {
        let Some(button) = self.reset_button(name) else {
            if self.contains(name) {
                return Ok(None);
            }
            return Err(RegistryError::NotFound(name.to_string()));
        };
        if !button.is_visible() {
            return Ok(None);
        }
        let default = button.activate();
        self.set_value(name, &default).map(Some)
    }

    pub fn hidden_inputs(&self) -> Vec<HiddenInput> {
        self.entries
            .iter()
            .flat_map(|e| e.field.hidden_inputs())
            .collect()
    }
}

fn default_field(kind: FieldKind, name: &str) -> AnyField {
    match kind {
        FieldKind::Toggle => AnyField::Toggle(Toggle::new(name, false)),
        FieldKind::Select => AnyField::Select(Select::new(name, Vec::new())),
        FieldKind::Range => AnyField::Range(RangeSlider::new(name, Range::default(), 0.0)),
        FieldKind::Color => AnyField::Color(ColorPicker::new(name, "")),
        FieldKind::ButtonGroup => {
            AnyField::ButtonGroup(ButtonGroup::new(name, text_align_choices(), "left"))
        }
        FieldKind::ResponsiveTabs => AnyField::ResponsiveTabs(ResponsiveTabs::new(name)),
        FieldKind::Collapsible => AnyField::Collapsible(CollapsibleSection::new(name)),
        FieldKind::Spacing => AnyField::Spacing(SpacingBox::new(name)),
        FieldKind::Animation => AnyField::Animation(AnimationField::new(name)),
        FieldKind::Typography => AnyField::Typography(TypographyField::new(name)),
        FieldKind::CustomCss => AnyField::CustomCss(CustomCssField::new(name, Vec::new())),
        FieldKind::Text => AnyField::Text(TextInput::new(name, "")),
    }
}

fn build_field(spec: &FieldSpec) -> Result<AnyField, FieldError> {
    let name = spec.name.as_str();
    let default = spec.default.as_deref();

    let field = match &spec.options {
        FieldOptions::Toggle(opts) => {
            let mut toggle = Toggle::new(name, false)
                .with_label(spec.label.clone().unwrap_or_default());
            if let Some(default) = default {
                toggle.load(default)?;
            }
            toggle.disabled = opts.disabled;
            AnyField::Toggle(toggle)
        }
        FieldOptions::Select(opts) => {
            let mut select = if opts.groups.is_empty() {
                Select::new(name, opts.options.clone())
            } else {
                Select::grouped(name, opts.groups.clone())
            };
            if let Some(placeholder) = &opts.placeholder {
                select.placeholder = placeholder.clone();
            }
            select.searchable = opts.searchable;
            if let Some(default) = default {
                select = select.with_value(default).with_default(default);
            }
            AnyField::Select(select)
        }
        FieldOptions::Range(opts) => {
            let range = opts.range();
            if range.max < range.min || range.step <= 0.0 {
                return Err(FieldError::invalid(
                    name,
                    &format!("{}..{} step {}", range.min, range.max, range.step),
                    "range needs min <= max and a positive step",
                ));
            }
            let mut slider = RangeSlider::new(name, range, range.min)
                .with_unit(&opts.unit)
                .with_units(opts.units.clone());
            slider.show_unit = opts.show_unit;
            if let Some(default) = default {
                let (number, _) = parse_leading_number(default)
                    .ok_or_else(|| FieldError::invalid(name, default, "expected a number"))?;
                slider = slider.with_default(number);
                slider.load(default)?;
            }
            AnyField::Range(slider)
        }
        FieldOptions::Color(opts) => {
            let mut picker = ColorPicker::new(name, default.unwrap_or(""))
                .with_swatches(opts.swatches.clone());
            if let Some(default) = default {
                picker = picker.with_default(default);
            }
            picker.show_alpha = opts.show_alpha;
            AnyField::Color(picker)
        }
        FieldOptions::ButtonGroup(opts) => {
            let options = match (opts.options.is_empty(), opts.preset.as_deref()) {
                (false, _) => opts.options.clone(),
                (true, Some("text-align") | None) => text_align_choices(),
                (true, Some(other)) => {
                    return Err(FieldError::invalid(name, other, "unknown button preset"));
                }
            };
            let initial = default
                .map(str::to_string)
                .or_else(|| options.first().map(|c| c.value.clone()))
                .unwrap_or_default();
            let mut group = ButtonGroup::new(name, options, initial);
            if let Some(default) = default {
                group = group.with_default(default);
            }
            AnyField::ButtonGroup(group)
        }
        FieldOptions::ResponsiveTabs => AnyField::ResponsiveTabs(ResponsiveTabs::new(name)),
        FieldOptions::Collapsible(opts) => AnyField::Collapsible(
            CollapsibleSection::new(name)
                .with_title(&opts.title)
                .with_open(opts.open),
        ),
        FieldOptions::Spacing(opts) => {
            let mut spacing = SpacingBox::new(name).with_linked(opts.linked);
            spacing.show_responsive = opts.show_responsive;
            if !opts.units.is_empty() {
                spacing.units = opts.units.clone();
            }
            if let Some(default) = default {
                spacing.load(default)?;
            }
            AnyField::Spacing(spacing)
        }
        FieldOptions::Animation => {
            let mut animation = AnimationField::new(name);
            if let Some(default) = default {
                animation.load(default)?;
            }
            AnyField::Animation(animation)
        }
        FieldOptions::Typography => {
            let mut typography = TypographyField::new(name);
            if let Some(default) = default {
                typography.load(default)?;
            }
            AnyField::Typography(typography)
        }
        FieldOptions::CustomCss(opts) => {
            AnyField::CustomCss(CustomCssField::new(name, opts.targets.clone()))
        }
        FieldOptions::Text(opts) => {
            let mut text = TextInput::new(name, default.unwrap_or(""))
                .with_placeholder(&opts.placeholder);
            if let Some(default) = default {
                text = text.with_default(default);
            }
            AnyField::Text(text)
        }
    };
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RangeOptions, TextOptions};

    #[test]
    fn range_options_are_validated() {
        let spec = FieldSpec::new(
            "bad",
            FieldOptions::Range(RangeOptions {
                step: 0.0,
                ..RangeOptions::default()
            }),
        );
        assert!(build_field(&spec).is_err());
    }

    #[test]
    fn text_default_seeds_value() {
        let spec = FieldSpec::new("t", FieldOptions::Text(TextOptions::default())).default_value("hi");
        let field = build_field(&spec).unwrap();
        assert_eq!(field.value(), "hi");
        assert_eq!(field.default_value().as_deref(), Some("hi"));
    }
}
