//! Row of mutually exclusive buttons.

use crossterm_actions::{NavigationEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection, Position},
    event::Key,
    props::{AttrValue, Attribute},
};

use super::{Chrome, Input, contains, dim, edited_if, fallback, global_key, pressed, value_style};
use crate::fields::{ButtonGroup, Choice, Field};
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher};

fn button_text(choice: &Choice) -> String {
    match &choice.icon {
        Some(icon) => format!("[{icon} {}]", choice.label),
        None => format!("[{}]", choice.label),
    }
}

fn layout(group: &ButtonGroup, control: Rect) -> Vec<Rect> {
    let mut x = control.x;
    let right = control.x.saturating_add(control.width);
    group
        .options()
        .iter()
        .map(|choice| {
            let width = (button_text(choice).chars().count() as u16).min(right.saturating_sub(x));
            let rect = Rect::new(x, control.y, width, control.height);
            x = x.saturating_add(width + 1).min(right);
            rect
        })
        .collect()
}

pub struct ButtonGroupView {
    field: ButtonGroup,
    chrome: Chrome,
    buttons: Vec<Rect>,
}

impl ButtonGroupView {
    pub fn new(field: ButtonGroup, chrome: Chrome) -> Self {
        Self {
            field,
            chrome,
            buttons: Vec::new(),
        }
    }

    fn commit(&mut self, cmd: Cmd) -> Option<Msg> {
        let did_change = matches!(self.perform(cmd), CmdResult::Changed(_));
        edited_if(did_change, self.field.clone())
    }
}

impl MockComponent for ButtonGroupView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let control = self.chrome.label_row(frame, area, &self.field);
        self.buttons = layout(&self.field, control);
        let focused = self.chrome.focused();

        let active = self.field.active_index();
        let mut spans = Vec::new();
        for (i, choice) in self.field.options().iter().enumerate() {
            let style = if active == Some(i) {
                value_style(focused).add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            spans.push(Span::styled(button_text(choice), style));
            spans.push(Span::raw(" "));
        }
        if self.field.options().is_empty() {
            spans.push(Span::styled("(no options)", dim()));
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
        match self.field.active_index() {
            Some(index) => State::One(StateValue::Usize(index)),
            None => State::None,
        }
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        let did_change = match cmd {
            Cmd::Move(CmdDirection::Left) => self.field.move_left(),
            Cmd::Move(CmdDirection::Right) => self.field.move_right(),
            Cmd::GoTo(Position::Begin) => self.field.select_index(0),
            Cmd::GoTo(Position::End) => self
                .field
                .select_index(self.field.options().len().saturating_sub(1)),
            Cmd::GoTo(Position::At(index)) => self.field.select_index(index),
            _ => false,
        };
        if did_change {
            CmdResult::Changed(self.state())
        } else {
            CmdResult::None
        }
    }
}

impl Component<Msg, UserEvent> for ButtonGroupView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) => {
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
                        NavigationEvent::Left | NavigationEvent::Up,
                    )) => self.commit(Cmd::Move(CmdDirection::Left)),
                    AppAction::Tui(TuiEvent::Navigation(
                        NavigationEvent::Right | NavigationEvent::Down,
                    )) => self.commit(Cmd::Move(CmdDirection::Right)),
                    other => fallback(self.field.name(), &other),
                }
            }
            Input::Press(mouse) => {
                let msg = self
                    .buttons
                    .iter()
                    .position(|rect| contains(*rect, mouse.column, mouse.row))
                    .and_then(|index| self.commit(Cmd::GoTo(Position::At(index))));
                pressed(self.field.name(), msg)
            }
            Input::Pointer(_) => None,
            Input::Msg(msg) => Some(msg),
        }
    }
}
