//! Color picker: spectrum, hue strip, alpha strip, text inputs and swatches.

use float_cmp::approx_eq;
use palette::Srgb;
use tracing::{debug, warn};

use super::{Field, FieldError, FieldKind};
use crate::color::Hsba;
use crate::mapper::{self, Track};

/// Preset swatches offered by every picker, in display order.
pub const DEFAULT_SWATCHES: [&str; 16] = [
    "#ef4444", "#f97316", "#f59e0b", "#eab308", "#84cc16", "#22c55e", "#10b981", "#14b8a6",
    "#06b6d4", "#0ea5e9", "#3b82f6", "#6366f1", "#8b5cf6", "#a855f7", "#d946ef", "#ec4899",
];

/// Which pointer surface is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Spectrum,
    Hue,
    Alpha,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorPicker {
    name: String,
    color: Hsba,
    pub show_alpha: bool,
    pub swatches: Vec<String>,
    default: String,
    open: bool,
    cleared: bool,
    drag: Option<Drag>,
    /// Unwrapped hue from the last strip drag, so the right edge reads 360
    hue_cursor: Option<f64>,
}

impl ColorPicker {
    /// Picker starting from `value`. Unreadable text keeps the initial red.
    pub fn new(name: impl Into<String>, value: &str) -> Self {
        let mut picker = Self {
            name: name.into(),
            color: Hsba::default(),
            show_alpha: true,
            swatches: DEFAULT_SWATCHES.iter().map(|s| s.to_string()).collect(),
            default: String::new(),
            open: false,
            cleared: value.is_empty(),
            drag: None,
            hue_cursor: None,
        };
        picker.color.apply(value);
        picker
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_swatches(mut self, swatches: Vec<String>) -> Self {
        if !swatches.is_empty() {
            self.swatches = swatches;
        }
        self
    }

    pub fn color(&self) -> Hsba {
        self.color
    }

    pub fn rgb(&self) -> Srgb<u8> {
        self.color.into_srgb()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Swatches including the default value (when set and not already listed).
    pub fn palette(&self) -> Vec<String> {
        let mut all = self.swatches.clone();
        if !self.default.is_empty() && !all.contains(&self.default) {
            all.push(self.default.clone());
        }
        all
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.drag = None;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    fn edited(&mut self) -> bool {
        self.cleared = false;
        debug!(field = %self.name, color = %self.color, "color changed");
        true
    }

    /// Replace the whole color. Returns false (and keeps state) for unreadable text.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.color.apply(text) {
            self.cleared = text.is_empty();
            true
        } else {
            warn!(field = %self.name, text, "ignoring unrecognized color");
            false
        }
    }

    pub fn set_hsba(&mut self, color: Hsba) -> bool {
        self.color = color;
        self.edited()
    }

    pub fn start_spectrum_drag(&mut self) {
        self.drag = Some(Drag::Spectrum);
    }

    pub fn start_hue_drag(&mut self) {
        self.drag = Some(Drag::Hue);
    }

    pub fn start_alpha_drag(&mut self) {
        if self.show_alpha {
            self.drag = Some(Drag::Alpha);
        }
    }

    pub fn stop_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer inside the saturation (x) / brightness (y) square.
    pub fn spectrum_at(&mut self, x_track: Track, y_track: Track, x: f64, y: f64) -> bool {
        let (saturation, brightness) = mapper::map_spectrum(x_track, y_track, x, y);
        self.color.set_saturation(saturation);
        self.color.set_brightness(brightness);
        self.edited()
    }

    pub fn hue_at(&mut self, track: Track, x: f64) -> bool {
        let hue = mapper::map_strip(track, x, 360.0);
        self.color.set_hue(hue);
        self.hue_cursor = Some(hue);
        self.edited()
    }

    /// Where the hue strip cursor sits, in `0..=360`. Equals the color's hue
    /// except after dragging to the right edge, where it stays at 360.
    pub fn hue_position(&self) -> f64 {
        let hue = self.color.hue();
        match self.hue_cursor {
            Some(cursor) if approx_eq!(f64, cursor.rem_euclid(360.0), hue, ulps = 2) => cursor,
            _ => hue,
        }
    }

    pub fn alpha_at(&mut self, track: Track, x: f64) -> bool {
        self.color.set_alpha(mapper::map_strip(track, x, 100.0));
        self.edited()
    }

    /// Continue whichever drag is active.
    pub fn drag_to(&mut self, x_track: Track, y_track: Track, x: f64, y: f64) -> bool {
        match self.drag {
            Some(Drag::Spectrum) => self.spectrum_at(x_track, y_track, x, y),
            Some(Drag::Hue) => self.hue_at(x_track, x),
            Some(Drag::Alpha) => self.alpha_at(x_track, x),
            None => false,
        }
    }

    /// Hex input: exactly six hex digits, `#` optional. Anything else is ignored.
    pub fn input_hex(&mut self, text: &str) -> bool {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }
        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).unwrap_or(0);
        self.color.set_rgb(Srgb::new(channel(0), channel(2), channel(4)));
        self.edited()
    }

    /// RGB inputs. Non-numeric text counts as 0; out-of-range channels reject
    /// the whole edit.
    pub fn input_rgb(&mut self, r: &str, g: &str, b: &str) -> bool {
        let parse = |s: &str| leading_int(s).unwrap_or(0);
        let (r, g, b) = (parse(r), parse(g), parse(b));
        let valid = |c: i64| (0..=255).contains(&c);
        if !(valid(r) && valid(g) && valid(b)) {
            return false;
        }
        self.color.set_rgb(Srgb::new(r as u8, g as u8, b as u8));
        self.edited()
    }

    /// Opacity input in percent, clamped. Non-numeric text counts as 0.
    pub fn input_opacity(&mut self, text: &str) -> bool {
        self.color.set_alpha(leading_int(text).unwrap_or(0) as f64);
        self.edited()
    }

    pub fn pick_swatch(&mut self, swatch: &str) -> bool {
        if self.color.apply(swatch) {
            self.edited()
        } else {
            false
        }
    }

    /// Drop the value. The picker keeps its hue but becomes fully transparent.
    pub fn clear(&mut self) -> bool {
        self.color.set_alpha(0.0);
        self.cleared = true;
        true
    }

    /// Restore the default, if one is configured.
    pub fn reset(&mut self) -> bool {
        if self.default.is_empty() {
            return false;
        }
        let default = self.default.clone();
        self.pick_swatch(&default)
    }
}

/// Integer prefix of a form input (`"12abc"` → 12, `"abc"` → None).
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digits = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}

impl Field for ColorPicker {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Color
    }

    fn value(&self) -> String {
        if self.cleared {
            String::new()
        } else {
            self.color.to_css()
        }
    }

    /// Unrecognized text keeps the previous color.
    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        self.set_text(value);
        Ok(())
    }

    fn default_value(&self) -> Option<String> {
        (!self.default.is_empty()).then(|| self.default.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_parses_prefix() {
        assert_eq!(leading_int("12abc"), Some(12));
        assert_eq!(leading_int(" -3"), Some(-3));
        assert_eq!(leading_int("abc"), None);
        assert_eq!(leading_int(""), None);
    }
}
