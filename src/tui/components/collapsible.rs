//! Section header that shows or hides its child fields.

use crossterm_actions::{InputEvent, NavigationEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    event::Key,
    props::{AttrValue, Attribute},
};

use super::{Chrome, Input, dim, edited, fallback, global_key};
use crate::fields::{CollapsibleSection, Field};
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher};

pub struct CollapsibleView {
    field: CollapsibleSection,
    chrome: Chrome,
}

impl CollapsibleView {
    pub fn new(field: CollapsibleSection, chrome: Chrome) -> Self {
        Self { field, chrome }
    }

    fn toggled(&mut self) -> Option<Msg> {
        self.perform(Cmd::Toggle);
        edited(self.field.clone())
    }
}

impl MockComponent for CollapsibleView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        self.chrome.set_area(area);

        let arrow = if self.field.is_open() { "▾ " } else { "▸ " };
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        if self.chrome.focused() {
            style = style.fg(Color::Cyan);
        }
        let mut spans = vec![Span::styled(arrow, style)];
        if let Some(icon) = &self.field.icon {
            spans.push(Span::styled(format!("{icon} "), style));
        }
        spans.push(Span::styled(self.field.title.clone(), style));
        if !self.field.is_open() {
            spans.push(Span::styled(
                format!("  ({} hidden)", self.field.children().len()),
                dim(),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.chrome.query(attr, 1)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.chrome.attr(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Bool(self.field.is_open()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Toggle => {
                self.field.toggle();
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for CollapsibleView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) => {
                if key.code == Key::Char(' ') {
                    return self.toggled();
                }
                if let Some(msg) = global_key(&key) {
                    return Some(msg);
                }
                let open = self.field.is_open();
                match dispatcher().dispatch(&key)? {
                    AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => self.toggled(),
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) if open => {
                        self.toggled()
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) if !open => {
                        self.toggled()
                    }
                    other => fallback(self.field.name(), &other),
                }
            }
            // The whole header is the hit area
            Input::Press(_) => self.toggled(),
            Input::Pointer(_) => None,
            Input::Msg(msg) => Some(msg),
        }
    }
}
