//! Range slider with number entry and unit selector.

use std::time::{Duration, Instant};

use crossterm_actions::{NavigationEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection, Position},
    event::{Key, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    props::{AttrValue, Attribute},
};

use super::{
    Chrome, Input, cell_center, contains, dim, edited_if, fallback, global_key, pressed,
    track_spans, track_x, typed_char, value_style,
};
use crate::fields::{Field, RangeSlider};
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher};

const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// Steps moved by `{` / `}`.
const LARGE_STEP: i32 = 10;

pub struct SliderView {
    field: RangeSlider,
    chrome: Chrome,
    track: Rect,
    value_area: Rect,
    unit_area: Rect,
    /// Digits typed but not yet committed
    entry: Option<String>,
    last_click: Option<Instant>,
}

impl SliderView {
    pub fn new(field: RangeSlider, chrome: Chrome) -> Self {
        Self {
            field,
            chrome,
            track: Rect::default(),
            value_area: Rect::default(),
            unit_area: Rect::default(),
            entry: None,
            last_click: None,
        }
    }

    fn commit(&mut self, cmd: Cmd) -> Option<Msg> {
        let did_change = matches!(self.perform(cmd), CmdResult::Changed(_));
        edited_if(did_change, self.field.clone())
    }

    fn emit(&self, did_change: bool) -> Option<Msg> {
        edited_if(did_change, self.field.clone())
    }

    fn value_text(&self) -> String {
        match &self.entry {
            Some(entry) => format!(" {entry}▏"),
            None => format!(" {}", self.field.number()),
        }
    }

    /// Number entry. `None` when the key is not part of an entry.
    fn on_entry(&mut self, key: &KeyEvent) -> Option<Option<Msg>> {
        if let Some(c) = typed_char(key)
            && (c.is_ascii_digit() || c == '.' || (c == '-' && self.entry.is_none()))
        {
            self.entry.get_or_insert_with(String::new).push(c);
            return Some(None);
        }
        let entry = self.entry.as_mut()?;
        match key.code {
            Key::Backspace => {
                entry.pop();
                Some(None)
            }
            Key::Enter => {
                let text = self.entry.take().unwrap_or_default();
                let did_change = self.field.input(&text);
                Some(self.emit(did_change))
            }
            Key::Esc => {
                self.entry = None;
                Some(None)
            }
            _ => {
                self.entry = None;
                None
            }
        }
    }

    fn on_press(&mut self, mouse: MouseEvent) -> Option<Msg> {
        if contains(self.track, mouse.column, mouse.row) {
            self.field.start_drag();
            let did_change = self
                .field
                .click_at(track_x(self.track), cell_center(mouse.column));
            return pressed(self.field.name(), self.emit(did_change));
        }
        if self.field.show_unit && contains(self.unit_area, mouse.column, mouse.row) {
            let msg = self.commit(Cmd::Change);
            return pressed(self.field.name(), msg);
        }
        if contains(self.value_area, mouse.column, mouse.row) {
            let now = Instant::now();
            let double = self
                .last_click
                .is_some_and(|last| now.duration_since(last) <= DOUBLE_CLICK);
            self.last_click = Some(now);
            if double {
                self.last_click = None;
                return Some(Msg::Reset(self.field.name().to_string()));
            }
        }
        pressed(self.field.name(), None)
    }

    fn on_pointer(&mut self, mouse: MouseEvent) -> Option<Msg> {
        match mouse.kind {
            MouseEventKind::Drag(MouseButton::Left) if self.field.is_dragging() => {
                let did_change = self
                    .field
                    .drag_to(track_x(self.track), cell_center(mouse.column));
                self.emit(did_change)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.field.stop_drag();
                None
            }
            _ => None,
        }
    }
}

impl MockComponent for SliderView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let control = self.chrome.label_row(frame, area, &self.field);
        let focused = self.chrome.focused();

        let unit_width = if self.field.show_unit {
            self.field.unit().chars().count() as u16 + 4
        } else {
            0
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(6),
                Constraint::Length(8),
                Constraint::Length(unit_width),
            ])
            .split(control);
        self.track = cols[0];
        self.value_area = cols[1];
        self.unit_area = cols[2];

        let mut track = track_spans(
            usize::from(self.track.width.saturating_sub(1)),
            self.field.percent(),
            focused || self.field.is_dragging(),
        );
        track.push(Span::raw(" "));
        frame.render_widget(Paragraph::new(Line::from(track)), self.track);

        let number_style = if self.entry.is_some() {
            Style::default().fg(Color::Yellow)
        } else {
            value_style(focused)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(self.value_text(), number_style)),
            self.value_area,
        );

        if self.field.show_unit {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("‹", dim()),
                    Span::styled(self.field.unit().to_string(), value_style(focused)),
                    Span::styled("›", dim()),
                ])),
                self.unit_area,
            );
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.chrome.query(attr, 1)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        if self.chrome.attr(attr, value) {
            self.entry = None;
            self.field.stop_drag();
        }
    }

    fn state(&self) -> State {
        State::One(StateValue::F64(self.field.number()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        let did_change = match cmd {
            Cmd::Move(CmdDirection::Left | CmdDirection::Down) => self.field.step_down(),
            Cmd::Move(CmdDirection::Right | CmdDirection::Up) => self.field.step_up(),
            Cmd::Scroll(CmdDirection::Down) => self.field.step_by(-LARGE_STEP),
            Cmd::Scroll(CmdDirection::Up) => self.field.step_by(LARGE_STEP),
            Cmd::GoTo(Position::Begin) => self.field.home(),
            Cmd::GoTo(Position::End) => self.field.end(),
            Cmd::Change if self.field.show_unit => self.field.cycle_unit(true),
            _ => false,
        };
        if did_change {
            CmdResult::Changed(self.state())
        } else {
            CmdResult::None
        }
    }
}

impl Component<Msg, UserEvent> for SliderView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) => {
                if let Some(msg) = self.on_entry(&key) {
                    return msg;
                }
                match key.code {
                    Key::Home => return self.commit(Cmd::GoTo(Position::Begin)),
                    Key::End => return self.commit(Cmd::GoTo(Position::End)),
                    _ => {}
                }
                if let Some(msg) = global_key(&key) {
                    return Some(msg);
                }
                match dispatcher().dispatch(&key)? {
                    AppAction::Tui(TuiEvent::Navigation(
                        NavigationEvent::Left | NavigationEvent::Down,
                    ))
                    | AppAction::ValueDecrementSmall => {
                        self.commit(Cmd::Move(CmdDirection::Left))
                    }
                    AppAction::Tui(TuiEvent::Navigation(
                        NavigationEvent::Right | NavigationEvent::Up,
                    ))
                    | AppAction::ValueIncrementSmall => {
                        self.commit(Cmd::Move(CmdDirection::Right))
                    }
                    AppAction::ValueDecrementLarge => self.commit(Cmd::Scroll(CmdDirection::Down)),
                    AppAction::ValueIncrementLarge => self.commit(Cmd::Scroll(CmdDirection::Up)),
                    AppAction::CycleUnit => self.commit(Cmd::Change),
                    other => fallback(self.field.name(), &other),
                }
            }
            Input::Press(mouse) => self.on_press(mouse),
            Input::Pointer(mouse) => self.on_pointer(mouse),
            Input::Msg(msg) => Some(msg),
        }
    }
}
