//! Desktop / tablet / mobile tabs.

use crossterm_actions::{NavigationEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    props::{AttrValue, Attribute},
};

use super::{Chrome, Input, contains, edited, fallback, global_key, pressed, value_style};
use crate::fields::{Device, Field, ResponsiveTabs};
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher};

fn icon(device: Device) -> &'static str {
    match device {
        Device::Desktop => "🖥",
        Device::Tablet => "▭",
        Device::Mobile => "▯",
    }
}

pub struct ResponsiveView {
    field: ResponsiveTabs,
    chrome: Chrome,
    tabs: Vec<(Rect, Device)>,
}

impl ResponsiveView {
    pub fn new(field: ResponsiveTabs, chrome: Chrome) -> Self {
        Self {
            field,
            chrome,
            tabs: Vec::new(),
        }
    }

    fn switched(&mut self, direction: CmdDirection) -> Option<Msg> {
        self.perform(Cmd::Move(direction));
        edited(self.field.clone())
    }
}

impl MockComponent for ResponsiveView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let control = self.chrome.label_row(frame, area, &self.field);
        let focused = self.chrome.focused();
        self.tabs.clear();

        let mut x = control.x;
        let mut spans = Vec::new();
        for &device in self.field.devices() {
            let dot = if self.field.has_value(device) { "•" } else { "" };
            let text = format!(" {} {}{dot} ", icon(device), device.label());
            let width = text.chars().count() as u16;
            self.tabs.push((Rect::new(x, control.y, width, 1), device));
            x = x.saturating_add(width + 1);

            let style = if device == self.field.active() {
                value_style(focused)
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
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
        State::One(StateValue::String(self.field.active().as_str().to_string()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Move(CmdDirection::Left) => self.field.prev(),
            Cmd::Move(CmdDirection::Right) => self.field.next(),
            _ => return CmdResult::None,
        }
        CmdResult::Changed(self.state())
    }
}

impl Component<Msg, UserEvent> for ResponsiveView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) => {
                if let Some(msg) = global_key(&key) {
                    return Some(msg);
                }
                match dispatcher().dispatch(&key)? {
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => {
                        self.switched(CmdDirection::Left)
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => {
                        self.switched(CmdDirection::Right)
                    }
                    other => fallback(self.field.name(), &other),
                }
            }
            Input::Press(mouse) => {
                let hit = self
                    .tabs
                    .iter()
                    .find(|(rect, _)| contains(*rect, mouse.column, mouse.row))
                    .map(|(_, device)| *device);
                let msg = hit.and_then(|device| {
                    self.field.set_active(device);
                    edited(self.field.clone())
                });
                pressed(self.field.name(), msg)
            }
            Input::Pointer(_) => None,
            Input::Msg(msg) => Some(msg),
        }
    }
}
