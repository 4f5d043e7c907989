//! tui-realm components driving one field each.
//!
//! A component owns a working copy of its widget. Edits go back to the model
//! as [`Msg::Edited`]; the activity remounts components when the model changes
//! a widget on its own (reset, device switch).

pub mod animation;
pub mod button_group;
pub mod collapsible;
pub mod color_picker;
pub mod custom_css;
pub mod help;
pub mod responsive;
pub mod select;
pub mod slider;
pub mod spacing;
pub mod text;
pub mod toggle;
pub mod tooltip;
pub mod typography;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{
    Component, Event,
    event::{Key, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    props::{AttrValue, Attribute, Props},
};

use crate::fields::{AnyField, Field, ResetButton};
use crate::mapper::Track;
use crate::registry::FieldMeta;
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, handle_global_app_events};

pub use help::{FORM_PREVIEW_FOOTER_ACTIONS, MAIN_FOOTER_ACTIONS, format_footer, render_help};
pub use tooltip::render_tooltip;

/// Width of the label column.
pub const LABEL_WIDTH: u16 = 18;

/// Component for a widget, by kind.
pub fn for_field(field: AnyField, meta: FieldMeta) -> Box<dyn Component<Msg, UserEvent>> {
    let chrome = Chrome::new(meta);
    match field {
        AnyField::Toggle(f) => Box::new(toggle::ToggleView::new(f, chrome)),
        AnyField::Select(f) => Box::new(select::SelectView::new(f, chrome)),
        AnyField::Range(f) => Box::new(slider::SliderView::new(f, chrome)),
        AnyField::Color(f) => Box::new(color_picker::ColorPickerView::new(f, chrome)),
        AnyField::ButtonGroup(f) => Box::new(button_group::ButtonGroupView::new(f, chrome)),
        AnyField::ResponsiveTabs(f) => Box::new(responsive::ResponsiveView::new(f, chrome)),
        AnyField::Collapsible(f) => Box::new(collapsible::CollapsibleView::new(f, chrome)),
        AnyField::Spacing(f) => Box::new(spacing::SpacingView::new(f, chrome)),
        AnyField::Animation(f) => Box::new(animation::AnimationView::new(f, chrome)),
        AnyField::Typography(f) => Box::new(typography::TypographyView::new(f, chrome)),
        AnyField::CustomCss(f) => Box::new(custom_css::CustomCssView::new(f, chrome)),
        AnyField::Text(f) => Box::new(text::TextView::new(f, chrome)),
    }
}

/// Props, label and pointer bookkeeping shared by every field component.
pub struct Chrome {
    props: Props,
    pub meta: FieldMeta,
    /// Everything drawn last frame
    area: Rect,
    hovered: bool,
}

/// An event after [`Chrome::route`] has filtered it for one component.
pub enum Input {
    Key(KeyEvent),
    /// Left press inside the component
    Press(MouseEvent),
    /// Drag or release, wherever it happens; the component knows if it holds
    /// a drag
    Pointer(MouseEvent),
    /// Handled by the chrome itself
    Msg(Msg),
}

impl Chrome {
    pub fn new(meta: FieldMeta) -> Self {
        Self {
            props: Props::default(),
            meta,
            area: Rect::default(),
            hovered: false,
        }
    }

    pub fn focused(&self) -> bool {
        self.props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag()
    }

    /// False while the activity keeps the field off screen.
    pub fn displayed(&self) -> bool {
        self.props
            .get_or(Attribute::Display, AttrValue::Flag(true))
            .unwrap_flag()
    }

    /// `Height` reports the rows the component needs right now.
    pub fn query(&self, attr: Attribute, height: u16) -> Option<AttrValue> {
        match attr {
            Attribute::Height => Some(AttrValue::Size(height)),
            other => self.props.get(other),
        }
    }

    /// Store an attribute. Returns true when focus was just taken away.
    pub fn attr(&mut self, attr: Attribute, value: AttrValue) -> bool {
        let blurred =
            attr == Attribute::Focus && matches!(value, AttrValue::Flag(false)) && self.focused();
        self.props.set(attr, value);
        blurred
    }

    /// Draw the label column and return the control area.
    ///
    /// The label carries a `↺` marker while the field can be reset.
    pub fn label_row(&mut self, frame: &mut Frame, area: Rect, field: &impl Field) -> Rect {
        self.area = area;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(10)])
            .split(area);

        let mut spans = vec![Span::styled(
            format!("{}:", self.meta.label),
            label_style(self.focused()),
        )];
        if can_reset(field) {
            spans.push(Span::styled(" ↺", dim()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), cols[0]);
        cols[1]
    }

    /// Record the area of a component that draws without a label column.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Filter an event for this component.
    ///
    /// Keys reach only the focused component. Every component sees pointer
    /// events and claims the ones inside its own area.
    pub fn route(&mut self, ev: Event<UserEvent>, name: &str) -> Option<Input> {
        match ev {
            Event::Keyboard(key) if self.focused() => Some(Input::Key(key)),
            Event::Mouse(mouse) if self.displayed() => self.route_mouse(mouse, name),
            _ => None,
        }
    }

    fn route_mouse(&mut self, mouse: MouseEvent, name: &str) -> Option<Input> {
        let inside = contains(self.area, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved if inside != self.hovered => {
                self.hovered = inside;
                Some(Input::Msg(Msg::Hover {
                    name: name.to_string(),
                    inside,
                }))
            }
            MouseEventKind::ScrollUp if inside => Some(Input::Msg(Msg::ScrollUp)),
            MouseEventKind::ScrollDown if inside => Some(Input::Msg(Msg::ScrollDown)),
            MouseEventKind::Down(MouseButton::Left) if inside => Some(Input::Press(mouse)),
            MouseEventKind::Drag(_) | MouseEventKind::Up(_) => Some(Input::Pointer(mouse)),
            _ => None,
        }
    }
}

/// Whether a widget differs from its default.
pub fn can_reset(field: &impl Field) -> bool {
    field
        .default_value()
        .is_some_and(|default| ResetButton::new(default, field.value()).is_visible())
}

/// Edit message carrying the widget's new state.
pub fn edited(field: impl Into<AnyField>) -> Option<Msg> {
    Some(Msg::Edited(Box::new(field.into())))
}

/// [`edited`] when `did_change`, nothing otherwise.
pub fn edited_if(did_change: bool, field: impl Into<AnyField>) -> Option<Msg> {
    if did_change { edited(field) } else { None }
}

/// What a press that edited nothing still does: focus the field.
pub fn pressed(name: &str, msg: Option<Msg>) -> Option<Msg> {
    msg.or_else(|| Some(Msg::Focus(name.to_string())))
}

/// Shared handling for actions a component did not claim.
pub fn fallback(name: &str, action: &AppAction) -> Option<Msg> {
    match action {
        AppAction::Reset => Some(Msg::Reset(name.to_string())),
        other => handle_global_app_events(other),
    }
}

/// Keys every field answers the same way before dispatch.
pub fn global_key(key: &KeyEvent) -> Option<Msg> {
    match key.code {
        Key::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Msg::DoExport),
        Key::PageUp => Some(Msg::ScrollUp),
        Key::PageDown => Some(Msg::ScrollDown),
        _ => None,
    }
}

/// A printable character typed without Ctrl/Alt.
pub fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        Key::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

pub fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn value_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

pub fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Row `index` of `area`, clipped to it.
pub fn row(area: Rect, index: u16) -> Rect {
    Rect {
        x: area.x,
        y: area.y.saturating_add(index),
        width: area.width,
        height: u16::from(index < area.height),
    }
}

/// Pointer track spanning the cell centers of `rect`, first to last column.
pub fn track_x(rect: Rect) -> Track {
    Track::new(
        f64::from(rect.x) + 0.5,
        f64::from(rect.width.saturating_sub(1).max(1)),
    )
}

/// Vertical counterpart of [`track_x`].
pub fn track_y(rect: Rect) -> Track {
    Track::new(
        f64::from(rect.y) + 0.5,
        f64::from(rect.height.saturating_sub(1).max(1)),
    )
}

pub fn cell_center(coord: u16) -> f64 {
    f64::from(coord) + 0.5
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Horizontal slider track: `●` thumb, `━` filled, `─` empty.
pub fn track_spans(width: usize, percent: f64, focused: bool) -> Vec<Span<'static>> {
    let (filled_style, empty_style, handle_style) = if focused {
        (
            Style::default().fg(Color::Cyan),
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::White),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::Gray),
        )
    };

    let pos = (percent / 100.0 * width.saturating_sub(1) as f64).round() as usize;
    (0..width)
        .map(|i| {
            if i == pos {
                Span::styled("●", handle_style)
            } else if i < pos {
                Span::styled("━", filled_style)
            } else {
                Span::styled("─", empty_style)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_spans_cover_width() {
        let spans = track_spans(10, 100.0, false);
        assert_eq!(spans.len(), 10);
        assert_eq!(spans[9].content, "●");
        assert_eq!(track_spans(10, 0.0, true)[0].content, "●");
    }

    #[test]
    fn cell_tracks_map_edges_to_ends() {
        let rect = Rect::new(10, 0, 11, 1);
        let track = track_x(rect);
        assert_eq!(track.ratio(cell_center(10)), 0.0);
        assert_eq!(track.ratio(cell_center(20)), 1.0);
    }

    #[test]
    fn row_clips_to_area() {
        let area = Rect::new(0, 5, 20, 2);
        assert_eq!(row(area, 1).y, 6);
        assert_eq!(row(area, 2).height, 0);
    }
}
