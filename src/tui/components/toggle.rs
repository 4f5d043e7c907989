//! On/off switch.

use crossterm_actions::{InputEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    event::Key,
    props::{AttrValue, Attribute},
};

use super::{Chrome, Input, contains, dim, edited_if, fallback, global_key, pressed};
use crate::fields::{Field, Toggle};
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher};

pub struct ToggleView {
    field: Toggle,
    chrome: Chrome,
    switch_area: Rect,
}

impl ToggleView {
    pub fn new(field: Toggle, chrome: Chrome) -> Self {
        Self {
            field,
            chrome,
            switch_area: Rect::default(),
        }
    }

    fn flip(&mut self) -> Option<Msg> {
        let did_change = matches!(self.perform(Cmd::Toggle), CmdResult::Changed(_));
        edited_if(did_change, self.field.clone())
    }
}

impl MockComponent for ToggleView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let control = self.chrome.label_row(frame, area, &self.field);
        self.switch_area = Rect {
            width: control.width.min(10),
            ..control
        };

        let (knob, state, style) = if self.field.is_checked() {
            ("( ●)", " On", Style::default().fg(Color::Green))
        } else {
            ("(● )", " Off", Style::default().fg(Color::Gray))
        };
        let style = if self.field.disabled { dim() } else { style };
        let mut spans = vec![Span::styled(knob, style), Span::styled(state, style)];
        if !self.field.label.is_empty() && self.field.label != self.chrome.meta.label {
            spans.push(Span::styled(format!("  {}", self.field.label), dim()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), control);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.chrome.query(attr, 1)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.chrome.attr(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Bool(self.field.is_checked()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Toggle if self.field.toggle() => CmdResult::Changed(self.state()),
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for ToggleView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) => {
                if key.code == Key::Char(' ') {
                    return self.flip();
                }
                if let Some(msg) = global_key(&key) {
                    return Some(msg);
                }
                match dispatcher().dispatch(&key)? {
                    AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => self.flip(),
                    other => fallback(self.field.name(), &other),
                }
            }
            Input::Press(mouse) => {
                let msg = if contains(self.switch_area, mouse.column, mouse.row) {
                    self.flip()
                } else {
                    None
                };
                pressed(self.field.name(), msg)
            }
            Input::Pointer(_) => None,
            Input::Msg(msg) => Some(msg),
        }
    }
}
