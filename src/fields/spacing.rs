//! Margin / padding box model editor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Device, Field, FieldError, FieldKind, HiddenInput};

pub const SPACING_UNITS: &[&str] = &["px", "%", "em", "rem"];

/// Four integer sides, serialized as `{"top":..,"right":..,"bottom":..,"left":..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sides {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Sides {
    pub fn uniform(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn get(&self, side: BoxSide) -> i32 {
        match side {
            BoxSide::Top => self.top,
            BoxSide::Right => self.right,
            BoxSide::Bottom => self.bottom,
            BoxSide::Left => self.left,
        }
    }

    pub fn set(&mut self, side: BoxSide, value: i32) {
        match side {
            BoxSide::Top => self.top = value,
            BoxSide::Right => self.right = value,
            BoxSide::Bottom => self.bottom = value,
            BoxSide::Left => self.left = value,
        }
    }

    /// CSS shorthand (`"1px 2px 3px 4px"`).
    pub fn to_css(&self, unit: &str) -> String {
        format!(
            "{}{unit} {}{unit} {}{unit} {}{unit}",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl BoxSide {
    pub const ALL: [BoxSide; 4] = [BoxSide::Top, BoxSide::Right, BoxSide::Bottom, BoxSide::Left];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpacingTarget {
    Margin,
    Padding,
}

/// Structured value, as loaded from or reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SpacingValue {
    #[serde(default)]
    margin: Option<Sides>,
    #[serde(default)]
    padding: Option<Sides>,
    #[serde(default)]
    unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpacingBox {
    name: String,
    margin: Sides,
    padding: Sides,
    unit: String,
    pub units: Vec<String>,
    linked: bool,
    pub show_responsive: bool,
    device: Device,
}

impl SpacingBox {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            margin: Sides::default(),
            padding: Sides::default(),
            unit: "px".to_string(),
            units: SPACING_UNITS.iter().map(|u| u.to_string()).collect(),
            linked: true,
            show_responsive: true,
            device: Device::Desktop,
        }
    }

    pub fn with_linked(mut self, linked: bool) -> Self {
        self.linked = linked;
        self
    }

    pub fn margin(&self) -> Sides {
        self.margin
    }

    pub fn padding(&self) -> Sides {
        self.padding
    }

    pub fn sides(&self, target: SpacingTarget) -> Sides {
        match target {
            SpacingTarget::Margin => self.margin,
            SpacingTarget::Padding => self.padding,
        }
    }

    fn sides_mut(&mut self, target: SpacingTarget) -> &mut Sides {
        match target {
            SpacingTarget::Margin => &mut self.margin,
            SpacingTarget::Padding => &mut self.padding,
        }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// Typed side value. Non-numeric text counts as 0.
    ///
    /// While linked, all four sides of the edited box take the value.
    pub fn input(&mut self, target: SpacingTarget, side: BoxSide, text: &str) {
        let value = leading_int(text);
        self.set_side(target, side, value);
    }

    pub fn set_side(&mut self, target: SpacingTarget, side: BoxSide, value: i32) {
        let linked = self.linked;
        let sides = self.sides_mut(target);
        if linked {
            *sides = Sides::uniform(value);
        } else {
            sides.set(side, value);
        }
        debug!(field = %self.name, ?target, ?side, value, linked, "spacing edited");
    }

    /// Adjust one side by `delta` (keyboard nudging). Honors linking.
    pub fn nudge(&mut self, target: SpacingTarget, side: BoxSide, delta: i32) {
        let current = self.sides(target).get(side);
        self.set_side(target, side, current.saturating_add(delta));
    }

    /// Flip linking. Does not emit; existing values are kept.
    pub fn toggle_link(&mut self) -> bool {
        self.linked = !self.linked;
        self.linked
    }

    pub fn set_unit(&mut self, unit: &str) -> bool {
        if !self.units.iter().any(|u| u == unit) {
            return false;
        }
        self.unit = unit.to_string();
        true
    }

    pub fn cycle_unit(&mut self) -> bool {
        let len = self.units.len();
        if len == 0 {
            return false;
        }
        let next = self
            .units
            .iter()
            .position(|u| *u == self.unit)
            .map_or(0, |i| (i + 1) % len);
        self.unit = self.units[next].clone();
        true
    }

    fn to_json(&self) -> String {
        let value = SpacingValue {
            margin: Some(self.margin),
            padding: Some(self.padding),
            unit: Some(self.unit.clone()),
        };
        serde_json::to_string(&value).unwrap_or_default()
    }
}

/// `parseInt(text) || 0`.
fn leading_int(text: &str) -> i32 {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digits = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    text[..sign_len + digits].parse().unwrap_or(0)
}

impl Field for SpacingBox {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Spacing
    }

    /// `{"margin":{..},"padding":{..},"unit":".."}`
    fn value(&self) -> String {
        self.to_json()
    }

    /// Partial objects only replace the keys they carry.
    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        let parsed: SpacingValue = serde_json::from_str(value)?;
        if let Some(margin) = parsed.margin {
            self.margin = margin;
        }
        if let Some(padding) = parsed.padding {
            self.padding = padding;
        }
        if let Some(unit) = parsed.unit {
            if !self.units.contains(&unit) {
                return Err(FieldError::invalid(&self.name, &unit, "unknown unit"));
            }
            self.unit = unit;
        }
        Ok(())
    }

    fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    fn hidden_inputs(&self) -> Vec<HiddenInput> {
        let json = |sides: &Sides| serde_json::to_string(sides).unwrap_or_default();
        vec![
            HiddenInput::new(format!("{}_margin", self.name), json(&self.margin)),
            HiddenInput::new(format!("{}_padding", self.name), json(&self.padding)),
            HiddenInput::new(format!("{}_unit", self.name), self.unit.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_defaults_to_zero() {
        assert_eq!(leading_int("12px"), 12);
        assert_eq!(leading_int("-4"), -4);
        assert_eq!(leading_int("abc"), 0);
        assert_eq!(leading_int(""), 0);
        assert_eq!(leading_int("-"), 0);
    }
}
