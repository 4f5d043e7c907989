//! Hover tooltips: delayed show/hide timing and viewport-aware placement.
//!
//! The controller is owned by whoever composes the panel and is driven with
//! explicit instants, so it works the same under a terminal event loop and
//! in tests.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

pub const DEFAULT_GAP: f64 = 8.0;
pub const DEFAULT_MARGIN: f64 = 8.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Top-left corner for a tooltip of `size` next to `anchor`.
///
/// The result is kept at least `margin` away from the viewport edges; when
/// the tooltip does not fit, the top/left margin wins.
pub fn place_tooltip(
    anchor: Rect,
    size: Size,
    viewport: Size,
    placement: Placement,
    gap: f64,
    margin: f64,
) -> Point {
    let centered_x = anchor.x + (anchor.width - size.width) / 2.0;
    let centered_y = anchor.y + (anchor.height - size.height) / 2.0;

    let (x, y) = match placement {
        Placement::Top => (centered_x, anchor.y - size.height - gap),
        Placement::Bottom => (centered_x, anchor.bottom() + gap),
        Placement::Left => (anchor.x - size.width - gap, centered_y),
        Placement::Right => (anchor.right() + gap, centered_y),
    };

    Point {
        x: margin.max((viewport.width - size.width - margin).min(x)),
        y: margin.max((viewport.height - size.height - margin).min(y)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipTiming {
    pub show_delay: Duration,
    pub hide_delay: Duration,
}

impl Default for TooltipTiming {
    fn default() -> Self {
        Self {
            show_delay: Duration::from_millis(300),
            hide_delay: Duration::from_millis(100),
        }
    }
}

/// What a trigger shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipTrigger {
    /// Identifies the element the tooltip is anchored to
    pub anchor: String,
    pub text: String,
    pub placement: Placement,
}

impl TooltipTrigger {
    pub fn new(anchor: impl Into<String>, text: impl Into<String>, placement: Placement) -> Self {
        Self {
            anchor: anchor.into(),
            text: text.into(),
            placement,
        }
    }
}

#[derive(Debug, Clone)]
enum Pending {
    Show(TooltipTrigger, Instant),
    Hide(Instant),
}

/// Single shared tooltip surface.
#[derive(Debug, Clone, Default)]
pub struct TooltipController {
    pub timing: TooltipTiming,
    current: Option<TooltipTrigger>,
    pending: Option<Pending>,
}

impl TooltipController {
    pub fn new(timing: TooltipTiming) -> Self {
        Self {
            timing,
            current: None,
            pending: None,
        }
    }

    /// The tooltip currently on screen.
    pub fn visible(&self) -> Option<&TooltipTrigger> {
        self.current.as_ref()
    }

    /// When [`tick`](Self::tick) next needs to run.
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.pending {
            Some(Pending::Show(_, at) | Pending::Hide(at)) => Some(*at),
            None => None,
        }
    }

    /// Pointer entered a trigger. Cancels a pending hide and schedules a show.
    pub fn hover_enter(&mut self, trigger: TooltipTrigger, now: Instant) {
        self.pending = Some(Pending::Show(trigger, now + self.timing.show_delay));
    }

    /// Pointer left the trigger. Cancels a pending show and schedules a hide.
    pub fn hover_leave(&mut self, now: Instant) {
        self.pending = Some(Pending::Hide(now + self.timing.hide_delay));
    }

    /// Keyboard focus shows immediately.
    pub fn focus(&mut self, trigger: TooltipTrigger) {
        self.pending = None;
        self.show(trigger);
    }

    /// Losing focus hides immediately.
    pub fn blur(&mut self) {
        self.pending = None;
        self.current = None;
    }

    /// Fire a due timer. Returns whether the visible tooltip changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = match &self.pending {
            Some(Pending::Show(_, at) | Pending::Hide(at)) => *at <= now,
            None => false,
        };
        if !due {
            return false;
        }
        let before = self.current.clone();
        match self.pending.take() {
            Some(Pending::Show(trigger, _)) => self.show(trigger),
            Some(Pending::Hide(_)) => self.current = None,
            None => {}
        }
        before != self.current
    }

    /// Empty text never shows and leaves the current tooltip alone.
    fn show(&mut self, trigger: TooltipTrigger) {
        if !trigger.text.is_empty() {
            self.current = Some(trigger);
        }
    }
}
