//! HSB color model used by the color picker.
//!
//! Provides:
//! - RGB ↔ HSB conversion (`rgb_to_hsb`, `hsb_to_rgb`)
//! - Parsing of `#rrggbb`, `#rrggbbaa`, `rgb()` and `rgba()` text
//! - Serialization back to hex (opaque) or `rgba()` (translucent)
//!
//! Hue is kept in degrees, saturation / brightness / alpha in percent.

use std::fmt;
use std::str::FromStr;

use csscolorparser::Color as CssColor;
use palette::Srgb;
use serde::Serialize;

/// Round half away from negative infinity, matching browser `Math.round`.
///
/// `f64::round` rounds half away from zero, which differs for negative
/// halves (`-0.5` rounds to `-1` instead of `0`).
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Hue, saturation and brightness without alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    /// Hue in degrees, 0-360
    pub hue: f64,
    /// Saturation in percent, 0-100
    pub saturation: f64,
    /// Brightness in percent, 0-100
    pub brightness: f64,
}

/// Convert an 8-bit RGB color to HSB.
///
/// Hue is picked by whichever channel is maximal (red wins ties, then green).
/// Achromatic colors get hue 0.
pub fn rgb_to_hsb(color: Srgb<u8>) -> Hsb {
    let r = f64::from(color.red) / 255.0;
    let g = f64::from(color.green) / 255.0;
    let b = f64::from(color.blue) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let saturation = if max == 0.0 { 0.0 } else { d / max * 100.0 };
    let brightness = max * 100.0;

    let hue = if d == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / d + if g < b { 6.0 } else { 0.0 }) * 60.0
    } else if max == g {
        ((b - r) / d + 2.0) * 60.0
    } else {
        ((r - g) / d + 4.0) * 60.0
    };

    Hsb {
        hue,
        saturation,
        brightness,
    }
}

/// Convert HSB (degrees, percent, percent) to an 8-bit RGB color.
///
/// Sector based: chroma `c = b·s`, `x = c·(1 - |((h/60) mod 2) - 1|)` and
/// `m = b - c`; each 60° sector decides which channels take `c` and `x`.
pub fn hsb_to_rgb(hue: f64, saturation: f64, brightness: f64) -> Srgb<u8> {
    let s = saturation / 100.0;
    let v = brightness / 100.0;

    let c = v * s;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if (0.0..60.0).contains(&hue) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&hue) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&hue) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&hue) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&hue) {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Srgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

#[inline]
fn to_channel(unit: f64) -> u8 {
    round_half_up(unit * 255.0).clamp(0.0, 255.0) as u8
}

/// Format an 8-bit color as lowercase `#rrggbb`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Color picker state: HSB plus alpha.
///
/// Invariants: hue wraps into `[0, 360)`; saturation, brightness and alpha
/// stay within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsba {
    hue: f64,
    saturation: f64,
    brightness: f64,
    alpha: f64,
}

impl Default for Hsba {
    /// Fully saturated opaque red, the picker's initial state.
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 100.0,
            brightness: 100.0,
            alpha: 100.0,
        }
    }
}

impl Hsba {
    pub fn new(hue: f64, saturation: f64, brightness: f64, alpha: f64) -> Self {
        let mut color = Self::default();
        color.set_hue(hue);
        color.set_saturation(saturation);
        color.set_brightness(brightness);
        color.set_alpha(alpha);
        color
    }

    /// The fully transparent white used for empty input.
    pub fn transparent() -> Self {
        Self {
            hue: 0.0,
            saturation: 0.0,
            brightness: 100.0,
            alpha: 0.0,
        }
    }

    pub fn from_srgb(color: Srgb<u8>, alpha: f64) -> Self {
        let hsb = rgb_to_hsb(color);
        Self::new(hsb.hue, hsb.saturation, hsb.brightness, alpha)
    }

    pub fn into_srgb(self) -> Srgb<u8> {
        hsb_to_rgb(self.hue, self.saturation, self.brightness)
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn hsb(&self) -> Hsb {
        Hsb {
            hue: self.hue,
            saturation: self.saturation,
            brightness: self.brightness,
        }
    }

    pub fn set_hue(&mut self, hue: f64) {
        self.hue = if hue.is_finite() {
            hue.rem_euclid(360.0)
        } else {
            0.0
        };
    }

    pub fn set_saturation(&mut self, saturation: f64) {
        self.saturation = clamp_percent(saturation);
    }

    pub fn set_brightness(&mut self, brightness: f64) {
        self.brightness = clamp_percent(brightness);
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = clamp_percent(alpha);
    }

    /// Replace hue, saturation and brightness from an RGB color, keeping alpha.
    pub fn set_rgb(&mut self, color: Srgb<u8>) {
        let hsb = rgb_to_hsb(color);
        self.set_hue(hsb.hue);
        self.set_saturation(hsb.saturation);
        self.set_brightness(hsb.brightness);
    }

    /// Parse picker input text.
    ///
    /// Accepts empty / `transparent`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`
    /// and `rgba(r, g, b, a)`. Anything else yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() || text == "transparent" {
            return Some(Self::transparent());
        }

        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex);
        }

        parse_rgb_function(text)
    }

    /// Load text into this color, leaving it untouched if unrecognized.
    ///
    /// Returns whether the text was understood.
    pub fn apply(&mut self, text: &str) -> bool {
        match Self::parse(text) {
            Some(parsed) => {
                *self = parsed;
                true
            }
            None => false,
        }
    }

    /// Lowercase hex of the opaque color, ignoring alpha.
    pub fn to_hex(&self) -> String {
        to_hex(self.into_srgb())
    }

    /// Serialize as `#rrggbb` when opaque, otherwise `rgba(r, g, b, a)`.
    pub fn to_css(&self) -> String {
        let rgb = self.into_srgb();
        if self.alpha < 100.0 {
            format!(
                "rgba({}, {}, {}, {})",
                rgb.red,
                rgb.green,
                rgb.blue,
                self.alpha / 100.0
            )
        } else {
            to_hex(rgb)
        }
    }
}

impl fmt::Display for Hsba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Hsba {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unrecognized color '{s}'"))
    }
}

#[inline]
fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn parse_hex(hex: &str) -> Option<Hsba> {
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let byte = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    let rgb = Srgb::new(byte(0)?, byte(2)?, byte(4)?);
    let alpha = if hex.len() == 8 {
        f64::from(byte(6)?) / 255.0 * 100.0
    } else {
        100.0
    };

    Some(Hsba::from_srgb(rgb, alpha))
}

/// Find the first `rgb(` / `rgba(` call anywhere in the text.
///
/// Grammar: `rgba?\(D+,\s*D+,\s*D+(,\s*[D.]+)?\)` with no whitespace after
/// the opening parenthesis. Channels above 255 are clamped.
fn parse_rgb_function(text: &str) -> Option<Hsba> {
    let mut search = text;
    while let Some(at) = search.find("rgb") {
        let candidate = &search[at + 3..];
        if let Some(parsed) = parse_rgb_args(candidate) {
            return Some(parsed);
        }
        search = candidate;
    }
    None
}

fn parse_rgb_args(rest: &str) -> Option<Hsba> {
    let mut cursor = Cursor::new(rest);
    cursor.eat('a');
    cursor.expect('(')?;

    let r = cursor.digits()?;
    cursor.expect(',')?;
    cursor.skip_whitespace();
    let g = cursor.digits()?;
    cursor.expect(',')?;
    cursor.skip_whitespace();
    let b = cursor.digits()?;

    let alpha = if cursor.eat(',') {
        cursor.skip_whitespace();
        let raw = cursor.take_while(|c| c.is_ascii_digit() || c == '.')?;
        leading_float(raw)? * 100.0
    } else {
        100.0
    };
    cursor.expect(')')?;

    let channel = |digits: &str| -> u8 { digits.parse::<u32>().map_or(255, |v| v.min(255) as u8) };
    Some(Hsba::from_srgb(
        Srgb::new(channel(r), channel(g), channel(b)),
        alpha,
    ))
}

/// Longest prefix of `raw` that parses as a float (`"0.5.1"` → `0.5`).
fn leading_float(raw: &str) -> Option<f64> {
    (1..=raw.len())
        .rev()
        .find_map(|end| raw[..end].parse::<f64>().ok())
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(rest: &'a str) -> Self {
        Self { rest }
    }

    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, c: char) -> Option<()> {
        self.eat(c).then_some(())
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> Option<&'a str> {
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest.len(), |(i, _)| i);
        if end == 0 {
            return None;
        }
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(taken)
    }

    fn digits(&mut self) -> Option<&'a str> {
        self.take_while(|c| c.is_ascii_digit())
    }
}

/// Every notation of one color, for `--convert`.
#[derive(Debug, Clone, Serialize)]
pub struct ColorReport {
    pub input: String,
    pub css: String,
    pub hex: String,
    pub rgba: [u8; 4],
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub alpha: f64,
}

/// Describe any CSS color (named, `hsl()`, short hex, ...) in picker terms.
pub fn describe(text: &str) -> Result<ColorReport, String> {
    let parsed = CssColor::from_str(text.trim()).map_err(|e| e.to_string())?;
    let [r, g, b, a] = parsed.to_rgba8();
    let color = Hsba::from_srgb(Srgb::new(r, g, b), f64::from(a) / 255.0 * 100.0);

    Ok(ColorReport {
        input: text.to_string(),
        css: color.to_css(),
        hex: color.to_hex(),
        rgba: [r, g, b, a],
        hue: color.hue(),
        saturation: color.saturation(),
        brightness: color.brightness(),
        alpha: color.alpha(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_half_up_matches_browser_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-0.5), 0.0);
    }

    #[test]
    fn leading_float_takes_longest_prefix() {
        assert_eq!(leading_float("0.5.1"), Some(0.5));
        assert_eq!(leading_float("1"), Some(1.0));
        assert_eq!(leading_float("."), None);
    }

    #[test]
    fn cursor_rejects_space_after_paren() {
        assert!(parse_rgb_args("( 1,2,3)").is_none());
        assert!(parse_rgb_args("(1,2,3)").is_some());
    }
}
