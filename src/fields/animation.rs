//! Entrance animation panel.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Field, FieldError, FieldKind};
use crate::mapper::Range;

pub const ANIMATION_STYLES: &[(&str, &str)] = &[
    ("none", "None"),
    ("fade", "Fade In"),
    ("slide-up", "Slide Up"),
    ("slide-down", "Slide Down"),
    ("slide-left", "Slide Left"),
    ("slide-right", "Slide Right"),
    ("zoom-in", "Zoom In"),
    ("zoom-out", "Zoom Out"),
    ("bounce", "Bounce"),
    ("flip", "Flip"),
    ("rotate", "Rotate"),
    ("pulse", "Pulse"),
];

pub const ANIMATION_EASINGS: &[(&str, &str)] = &[
    ("ease", "Ease"),
    ("ease-in", "Ease In"),
    ("ease-out", "Ease Out"),
    ("ease-in-out", "Ease In Out"),
    ("linear", "Linear"),
];

pub const ANIMATION_ITERATIONS: &[(&str, &str)] =
    &[("1", "1"), ("2", "2"), ("3", "3"), ("infinite", "Infinite")];

pub const ANIMATION_DIRECTIONS: &[(&str, &str)] = &[
    ("normal", "Normal"),
    ("reverse", "Reverse"),
    ("alternate", "Alternate"),
];

pub const ANIMATION_TRIGGERS: &[(&str, &str)] = &[
    ("load", "On Load"),
    ("scroll", "On Scroll"),
    ("hover", "On Hover"),
];

/// Duration and delay sliders, in milliseconds.
pub const TIMING_RANGE: Range = Range {
    min: 0.0,
    max: 3000.0,
    step: 50.0,
};

/// Extra time the preview stays applied after the last iteration.
const PREVIEW_TAIL_MS: u64 = 100;
const MAX_TIMING_MS: u32 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: u32,
    pub delay: u32,
    pub easing: String,
    pub iteration: String,
    pub direction: String,
    pub trigger: String,
}

impl Default for AnimationValue {
    fn default() -> Self {
        Self {
            kind: "none".into(),
            duration: 300,
            delay: 0,
            easing: "ease".into(),
            iteration: "1".into(),
            direction: "normal".into(),
            trigger: "load".into(),
        }
    }
}

/// Partial update; missing keys keep their current value.
#[derive(Debug, Default, Deserialize)]
struct AnimationPatch {
    #[serde(rename = "type")]
    kind: Option<String>,
    duration: Option<u32>,
    delay: Option<u32>,
    easing: Option<String>,
    iteration: Option<String>,
    direction: Option<String>,
    trigger: Option<String>,
}

/// A playable preview of the current settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationPreview {
    /// CSS `animation` shorthand
    pub css: String,
    /// How long the preview stays applied; `None` loops until replaced
    pub duration_ms: Option<u64>,
}

/// One editable row of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationProperty {
    Style,
    Duration,
    Delay,
    Easing,
    Iteration,
    Direction,
    Trigger,
}

impl AnimationProperty {
    pub const ALL: [AnimationProperty; 7] = [
        AnimationProperty::Style,
        AnimationProperty::Duration,
        AnimationProperty::Delay,
        AnimationProperty::Easing,
        AnimationProperty::Iteration,
        AnimationProperty::Direction,
        AnimationProperty::Trigger,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnimationProperty::Style => "Animation Style",
            AnimationProperty::Duration => "Duration",
            AnimationProperty::Delay => "Delay",
            AnimationProperty::Easing => "Easing",
            AnimationProperty::Iteration => "Iteration",
            AnimationProperty::Direction => "Direction",
            AnimationProperty::Trigger => "Trigger",
        }
    }

    /// Option list for select rows, `None` for the sliders.
    pub fn options(self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            AnimationProperty::Style => Some(ANIMATION_STYLES),
            AnimationProperty::Easing => Some(ANIMATION_EASINGS),
            AnimationProperty::Iteration => Some(ANIMATION_ITERATIONS),
            AnimationProperty::Direction => Some(ANIMATION_DIRECTIONS),
            AnimationProperty::Trigger => Some(ANIMATION_TRIGGERS),
            AnimationProperty::Duration | AnimationProperty::Delay => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationField {
    name: String,
    value: AnimationValue,
    playing: Option<(AnimationPreview, Instant)>,
}

impl AnimationField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: AnimationValue::default(),
            playing: None,
        }
    }

    pub fn with_value(mut self, value: AnimationValue) -> Self {
        self.value = value;
        self
    }

    pub fn animation(&self) -> &AnimationValue {
        &self.value
    }

    fn text_mut(&mut self, property: AnimationProperty) -> Option<&mut String> {
        match property {
            AnimationProperty::Style => Some(&mut self.value.kind),
            AnimationProperty::Easing => Some(&mut self.value.easing),
            AnimationProperty::Iteration => Some(&mut self.value.iteration),
            AnimationProperty::Direction => Some(&mut self.value.direction),
            AnimationProperty::Trigger => Some(&mut self.value.trigger),
            AnimationProperty::Duration | AnimationProperty::Delay => None,
        }
    }

    /// Display text of a row.
    pub fn display(&self, property: AnimationProperty) -> String {
        let text = |value: &str| {
            property
                .options()
                .and_then(|opts| opts.iter().find(|(v, _)| *v == value))
                .map_or_else(|| value.to_string(), |(_, label)| label.to_string())
        };
        match property {
            AnimationProperty::Style => text(&self.value.kind),
            AnimationProperty::Duration => format!("{}ms", self.value.duration),
            AnimationProperty::Delay => format!("{}ms", self.value.delay),
            AnimationProperty::Easing => text(&self.value.easing),
            AnimationProperty::Iteration => text(&self.value.iteration),
            AnimationProperty::Direction => text(&self.value.direction),
            AnimationProperty::Trigger => text(&self.value.trigger),
        }
    }

    /// Pick an option on a select row. Unknown values are refused.
    pub fn set_option(&mut self, property: AnimationProperty, value: &str) -> bool {
        let Some(options) = property.options() else {
            return false;
        };
        if !options.iter().any(|(v, _)| *v == value) {
            return false;
        }
        if let Some(slot) = self.text_mut(property) {
            *slot = value.to_string();
        }
        debug!(field = %self.name, ?property, value, "animation option");
        true
    }

    /// Slider position, snapped to 50 ms and clamped to 0..=3000.
    pub fn set_timing(&mut self, property: AnimationProperty, millis: f64) -> bool {
        let snapped = TIMING_RANGE.clamp(TIMING_RANGE.quantize(millis)) as u32;
        let slot = match property {
            AnimationProperty::Duration => &mut self.value.duration,
            AnimationProperty::Delay => &mut self.value.delay,
            _ => return false,
        };
        *slot = snapped;
        true
    }

    /// Step a row: next / previous option, or one slider step.
    pub fn cycle(&mut self, property: AnimationProperty, forward: bool) -> bool {
        match property {
            AnimationProperty::Duration | AnimationProperty::Delay => {
                let current = f64::from(match property {
                    AnimationProperty::Duration => self.value.duration,
                    _ => self.value.delay,
                });
                let next = if forward {
                    TIMING_RANGE.step_up(current)
                } else {
                    TIMING_RANGE.step_down(current)
                };
                self.set_timing(property, next)
            }
            _ => {
                let Some(options) = property.options() else {
                    return false;
                };
                let current = self
                    .text_mut(property)
                    .map(|s| s.clone())
                    .unwrap_or_default();
                let len = options.len();
                let index = options.iter().position(|(v, _)| *v == current);
                let next = match (index, forward) {
                    (None, _) => 0,
                    (Some(i), true) => (i + 1).min(len - 1),
                    (Some(i), false) => i.saturating_sub(1),
                };
                self.set_option(property, options[next].0)
            }
        }
    }

    /// Preview descriptor, or `None` when no animation is selected.
    pub fn preview(&self) -> Option<AnimationPreview> {
        let v = &self.value;
        if v.kind == "none" {
            return None;
        }
        let css = format!(
            "fk-anim-{} {}ms {} {}ms {} {}",
            v.kind, v.duration, v.easing, v.delay, v.iteration, v.direction
        );
        let duration_ms = (v.iteration != "infinite").then(|| {
            let iterations = v.iteration.parse::<u64>().ok().filter(|n| *n > 0).unwrap_or(1);
            (u64::from(v.duration) + u64::from(v.delay))
                .saturating_mul(iterations)
                .saturating_add(PREVIEW_TAIL_MS)
        });
        Some(AnimationPreview { css, duration_ms })
    }

    /// Start the preview. Replaces one already running.
    pub fn play(&mut self, now: Instant) -> bool {
        self.playing = self.preview().map(|preview| (preview, now));
        self.playing.is_some()
    }

    /// The preview still running at `now`, if any.
    pub fn playing(&self, now: Instant) -> Option<&AnimationPreview> {
        let (preview, started) = self.playing.as_ref()?;
        match preview.duration_ms {
            Some(ms) if now.duration_since(*started) >= Duration::from_millis(ms) => None,
            _ => Some(preview),
        }
    }

    pub fn stop(&mut self) {
        self.playing = None;
    }
}

impl Field for AnimationField {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Animation
    }

    fn value(&self) -> String {
        serde_json::to_string(&self.value).unwrap_or_default()
    }

    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        let patch: AnimationPatch = serde_json::from_str(value)?;
        let v = &mut self.value;
        if let Some(kind) = patch.kind {
            v.kind = kind;
        }
        if let Some(duration) = patch.duration {
            v.duration = duration.min(MAX_TIMING_MS);
        }
        if let Some(delay) = patch.delay {
            v.delay = delay.min(MAX_TIMING_MS);
        }
        if let Some(easing) = patch.easing {
            v.easing = easing;
        }
        if let Some(iteration) = patch.iteration {
            v.iteration = iteration;
        }
        if let Some(direction) = patch.direction {
            v.direction = direction;
        }
        if let Some(trigger) = patch.trigger {
            v.trigger = trigger;
        }
        Ok(())
    }

    fn default_value(&self) -> Option<String> {
        serde_json::to_string(&AnimationValue::default()).ok()
    }
}
