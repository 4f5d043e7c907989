//! Pointer-to-value mapping for sliders, strips and the color spectrum.
//!
//! A pointer coordinate inside a track is normalized, scaled into
//! `[min, max]`, snapped to `step` and clamped. The inverse turns a value back
//! into a percent offset for drawing the thumb.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::round_half_up;

/// Numeric bounds and increment for a ranged control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for Range {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
        }
    }
}

impl Range {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamp into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Snap to the nearest multiple of `step`.
    ///
    /// Non-positive steps disable snapping.
    #[inline]
    pub fn quantize(&self, value: f64) -> f64 {
        if self.step > 0.0 {
            round_half_up(value / self.step) * self.step
        } else {
            value
        }
    }

    /// Value at a normalized position (0.0 = min, 1.0 = max), unclamped.
    #[inline]
    pub fn lerp(&self, ratio: f64) -> f64 {
        self.min + ratio * (self.max - self.min)
    }

    /// Percent offset (0-100) of `value` within the range.
    ///
    /// An empty range reports 0.
    pub fn percent(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            0.0
        } else {
            (value - self.min) / span * 100.0
        }
    }

    pub fn step_down(&self, value: f64) -> f64 {
        self.min.max(value - self.step)
    }

    pub fn step_up(&self, value: f64) -> f64 {
        self.max.min(value + self.step)
    }
}

/// One-dimensional hit area in the same units as pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub start: f64,
    pub size: f64,
}

impl Track {
    pub fn new(start: f64, size: f64) -> Self {
        Self { start, size }
    }

    /// Relative position of `coord`, unclamped. Zero-sized tracks report 0.
    #[inline]
    pub fn ratio(&self, coord: f64) -> f64 {
        if self.size == 0.0 {
            0.0
        } else {
            (coord - self.start) / self.size
        }
    }

    /// Relative position of `coord`, clamped to `[0, 1]`.
    #[inline]
    pub fn clamped_ratio(&self, coord: f64) -> f64 {
        self.ratio(coord).clamp(0.0, 1.0)
    }

    pub fn contains(&self, coord: f64) -> bool {
        coord >= self.start && coord < self.start + self.size
    }
}

/// Map a drag position to a value.
///
/// The position is clamped to the track before scaling, then the snapped
/// value is clamped again, so the result is always within `[min, max]`.
pub fn map_drag(track: Track, coord: f64, range: Range) -> f64 {
    let raw = range.lerp(track.clamped_ratio(coord));
    range.clamp(range.quantize(raw))
}

/// Map a click on the track to a value.
///
/// Unlike [`map_drag`] the position is not clamped first; only the snapped
/// value is.
pub fn map_click(track: Track, coord: f64, range: Range) -> f64 {
    let raw = range.lerp(track.ratio(coord));
    range.clamp(range.quantize(raw))
}

/// Map a drag position onto a continuous `[0, scale]` axis without snapping.
///
/// Used by the hue strip (scale 360) and the alpha strip (scale 100).
pub fn map_strip(track: Track, coord: f64, scale: f64) -> f64 {
    (track.ratio(coord) * scale).clamp(0.0, scale)
}

/// Map a pointer inside the saturation/brightness spectrum.
///
/// Saturation grows to the right, brightness grows upward. Both are percent.
pub fn map_spectrum(x_track: Track, y_track: Track, x: f64, y: f64) -> (f64, f64) {
    let saturation = (x_track.ratio(x) * 100.0).clamp(0.0, 100.0);
    let brightness = (100.0 - y_track.ratio(y) * 100.0).clamp(0.0, 100.0);
    (saturation, brightness)
}

/// A value with its bounds and display unit, serialized as `"<value><unit>"`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangedValue {
    value: f64,
    pub range: Range,
    pub unit: String,
}

impl RangedValue {
    pub fn new(value: f64, range: Range, unit: impl Into<String>) -> Self {
        Self {
            value: range.clamp(value),
            range,
            unit: unit.into(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set a value, clamping it. Returns whether it changed.
    pub fn set(&mut self, value: f64) -> bool {
        let next = self.range.clamp(value);
        let changed = next != self.value;
        self.value = next;
        changed
    }

    pub fn percent(&self) -> f64 {
        self.range.percent(self.value)
    }
}

impl fmt::Display for RangedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Parse the leading number of a string the way form inputs do (`"12px"` → 12).
///
/// Returns the number and the remaining suffix.
pub fn parse_leading_number(text: &str) -> Option<(f64, &str)> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .take_while(|&(i, c)| {
            c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+')) || c == 'e'
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    (1..=end)
        .rev()
        .find_map(|cut| text[..cut].parse::<f64>().ok().map(|n| (n, &text[cut..])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_ignores_non_positive_step() {
        let range = Range::new(0.0, 10.0, 0.0);
        assert_eq!(range.quantize(3.3), 3.3);
    }

    #[test]
    fn zero_sized_track_reports_origin() {
        let track = Track::new(5.0, 0.0);
        assert_eq!(track.ratio(100.0), 0.0);
    }

    #[test]
    fn leading_number_keeps_suffix() {
        assert_eq!(parse_leading_number("12px"), Some((12.0, "px")));
        assert_eq!(parse_leading_number("-1.5em"), Some((-1.5, "em")));
        assert_eq!(parse_leading_number("1e"), Some((1.0, "e")));
        assert_eq!(parse_leading_number("px"), None);
    }
}
