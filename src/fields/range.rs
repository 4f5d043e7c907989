//! Slider with a number input and unit selector.

use float_cmp::approx_eq;
use tracing::debug;

use super::{Field, FieldError, FieldKind};
use crate::mapper::{self, Range, RangedValue, Track, parse_leading_number};

pub const DEFAULT_UNITS: &[&str] = &["px", "%", "em", "rem", "vw", "vh"];

/// A numeric slider submitted as `"<value><unit>"`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSlider {
    name: String,
    value: RangedValue,
    pub units: Vec<String>,
    pub show_unit: bool,
    default: f64,
    dragging: bool,
}

impl RangeSlider {
    /// Slider over `range` starting at `value` (clamped).
    ///
    /// The reset target defaults to `range.min`.
    pub fn new(name: impl Into<String>, range: Range, value: f64) -> Self {
        Self {
            name: name.into(),
            value: RangedValue::new(value, range, "px"),
            units: DEFAULT_UNITS.iter().map(|u| u.to_string()).collect(),
            show_unit: true,
            default: range.min,
            dragging: false,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.value.unit = unit.into();
        self
    }

    pub fn with_units(mut self, units: Vec<String>) -> Self {
        if !units.is_empty() {
            self.units = units;
        }
        self
    }

    pub fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }

    pub fn range(&self) -> Range {
        self.value.range
    }

    pub fn number(&self) -> f64 {
        self.value.value()
    }

    pub fn unit(&self) -> &str {
        &self.value.unit
    }

    pub fn default_number(&self) -> f64 {
        self.default
    }

    /// Thumb offset in percent of the track.
    pub fn percent(&self) -> f64 {
        self.value.percent()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_default(&self) -> bool {
        approx_eq!(f64, self.number(), self.default, ulps = 2)
    }

    /// Set an already-validated value. Returns whether it changed.
    pub fn set_number(&mut self, value: f64) -> bool {
        let changed = self.value.set(value);
        if changed {
            debug!(field = %self.name, value = self.number(), "range value");
        }
        changed
    }

    pub fn start_drag(&mut self) {
        self.dragging = true;
    }

    pub fn stop_drag(&mut self) {
        self.dragging = false;
    }

    /// Pointer moved while dragging the thumb.
    pub fn drag_to(&mut self, track: Track, coord: f64) -> bool {
        if !self.dragging {
            return false;
        }
        self.set_number(mapper::map_drag(track, coord, self.range()))
    }

    /// Click on the track (not the thumb).
    pub fn click_at(&mut self, track: Track, coord: f64) -> bool {
        self.set_number(mapper::map_click(track, coord, self.range()))
    }

    /// Typed number input. Text that does not start with a number is ignored.
    pub fn input(&mut self, text: &str) -> bool {
        match parse_leading_number(text) {
            Some((number, _)) => self.set_number(self.range().clamp(number)),
            None => false,
        }
    }

    pub fn step_down(&mut self) -> bool {
        self.set_number(self.range().step_down(self.number()))
    }

    pub fn step_up(&mut self) -> bool {
        self.set_number(self.range().step_up(self.number()))
    }

    /// Move by `steps` increments at once (negative moves down).
    pub fn step_by(&mut self, steps: i32) -> bool {
        let range = self.range();
        let target = self.number() + f64::from(steps) * range.step;
        self.set_number(range.clamp(target))
    }

    pub fn home(&mut self) -> bool {
        self.set_number(self.range().min)
    }

    pub fn end(&mut self) -> bool {
        self.set_number(self.range().max)
    }

    pub fn reset(&mut self) -> bool {
        self.set_number(self.default)
    }

    /// Switch unit. Unknown units are refused.
    pub fn set_unit(&mut self, unit: &str) -> bool {
        if self.value.unit == unit || !self.units.iter().any(|u| u == unit) {
            return false;
        }
        self.value.unit = unit.to_string();
        true
    }

    pub fn cycle_unit(&mut self, forward: bool) -> bool {
        let len = self.units.len();
        if len == 0 {
            return false;
        }
        let current = self.units.iter().position(|u| *u == self.value.unit);
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        let unit = self.units[next].clone();
        self.set_unit(&unit)
    }
}

impl Field for RangeSlider {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Range
    }

    fn value(&self) -> String {
        self.value.to_string()
    }

    /// Accepts `"12"`, `"12px"` or `"1.5em"`; a known unit suffix replaces the unit.
    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        let (number, suffix) = parse_leading_number(value)
            .ok_or_else(|| FieldError::invalid(&self.name, value, "expected a number"))?;
        self.value.set(number);
        let suffix = suffix.trim();
        if !suffix.is_empty() {
            if !self.units.iter().any(|u| u == suffix) {
                return Err(FieldError::invalid(&self.name, value, format!("unknown unit '{suffix}'")));
            }
            self.value.unit = suffix.to_string();
        }
        Ok(())
    }

    fn default_value(&self) -> Option<String> {
        Some(format!("{}{}", self.default, self.value.unit))
    }
}
