//! Typography panel: font rows plus a normal / hover color.

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
    command::{Cmd, CmdResult, Direction as CmdDirection},
    event::{Key, KeyEvent},
    props::{AttrValue, Attribute},
};

use super::color_picker::swatch_spans;
use super::{
    Chrome, Input, LABEL_WIDTH, contains, dim, edited_if, fallback, global_key, pressed, row,
    typed_char, value_style,
};
use crate::fields::{Field, StyleState, TypographyField, TypographyProperty};
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher};

const ROWS: u16 = TypographyProperty::ALL.len() as u16;

pub struct TypographyView {
    field: TypographyField,
    chrome: Chrome,
    selected: usize,
    /// Text being typed into a free-form row
    entry: Option<String>,
    rows: Vec<Rect>,
}

impl TypographyView {
    pub fn new(field: TypographyField, chrome: Chrome) -> Self {
        Self {
            field,
            chrome,
            selected: 0,
            entry: None,
            rows: Vec::new(),
        }
    }

    fn commit(&mut self, cmd: Cmd) -> Option<Msg> {
        let did_change = matches!(self.perform(cmd), CmdResult::Changed(_));
        edited_if(did_change, self.field.clone())
    }

    /// Keys while a free-form row is being typed into.
    fn on_entry(&mut self, key: &KeyEvent) -> Option<Msg> {
        let entry = self.entry.as_mut()?;
        match key.code {
            Key::Enter => {
                let text = self.entry.take().unwrap_or_default();
                let did_change = self.field.set(self.property(), &text);
                return edited_if(did_change, self.field.clone());
            }
            Key::Esc => self.entry = None,
            Key::Backspace => {
                entry.pop();
            }
            _ => {
                if let Some(c) = typed_char(key) {
                    entry.push(c);
                }
            }
        }
        None
    }

    fn on_press(&mut self, column: u16, row: u16) -> Option<Msg> {
        let Some(index) = self.rows.iter().position(|rect| contains(*rect, column, row)) else {
            return pressed(self.field.name(), None);
        };
        if index == self.selected && self.entry.is_none() {
            let msg = self.commit(Cmd::Move(CmdDirection::Right));
            return pressed(self.field.name(), msg);
        }
        self.selected = index;
        self.entry = None;
        pressed(self.field.name(), None)
    }

    fn property(&self) -> TypographyProperty {
        TypographyProperty::ALL[self.selected]
    }

    fn value_spans(
        &self,
        typography: &TypographyField,
        property: TypographyProperty,
        selected: bool,
    ) -> Vec<Span<'static>> {
        if selected && let Some(entry) = &self.entry {
            return vec![Span::styled(
                format!("{entry}▏"),
                Style::default().fg(Color::Yellow),
            )];
        }
        if property == TypographyProperty::Color {
            return swatch_spans(typography.picker(), selected);
        }
        let value = typography.get(property);
        let shown = property
            .options()
            .and_then(|opts| opts.iter().find(|(v, _)| *v == value))
            .map_or_else(|| value.to_string(), |(_, label)| label.to_string());
        match (property.options().is_some(), shown.is_empty()) {
            (true, _) => vec![Span::styled(format!("‹ {shown} ›"), value_style(selected))],
            (false, true) => vec![Span::styled("(inherit)", dim())],
            (false, false) => vec![Span::styled(shown, value_style(selected))],
        }
    }
}

impl MockComponent for TypographyView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let header = self.chrome.label_row(frame, row(area, 0), &self.field);
        self.chrome.set_area(area);
        let focused = self.chrome.focused();
        let typography = &self.field;
        let state = match typography.state() {
            StyleState::Normal => "Normal",
            StyleState::Hover => "Hover",
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("[{}]", typography.device().label()), dim()),
                Span::styled(format!("  color: {state}"), dim()),
            ])),
            header,
        );

        self.rows.clear();
        let name_width = usize::from(LABEL_WIDTH - 4);
        for (i, property) in TypographyProperty::ALL.into_iter().enumerate() {
            let line = row(area, 1 + i as u16);
            let line = Rect {
                x: line.x + 2,
                width: line.width.saturating_sub(2),
                ..line
            };
            self.rows.push(line);

            let selected = focused && i == self.selected;
            let name_style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                dim()
            };
            let device_mark = if property.is_responsive() { "◧" } else { " " };
            let mut spans = vec![Span::styled(
                format!(
                    "{}{:<name_width$}{device_mark} ",
                    if selected { "› " } else { "  " },
                    property.label()
                ),
                name_style,
            )];
            spans.extend(self.value_spans(typography, property, selected));
            frame.render_widget(Paragraph::new(Line::from(spans)), line);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.chrome.query(attr, 1 + ROWS)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        if self.chrome.attr(attr, value) {
            self.entry = None;
        }
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.field.value()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        let property = self.property();
        let did_change = match cmd {
            Cmd::Move(CmdDirection::Up) => {
                self.selected = self.selected.saturating_sub(1);
                false
            }
            Cmd::Move(CmdDirection::Down) => {
                self.selected = (self.selected + 1).min(TypographyProperty::ALL.len() - 1);
                false
            }
            Cmd::Move(CmdDirection::Left) => self.field.cycle(property, false),
            Cmd::Move(CmdDirection::Right) => self.field.cycle(property, true),
            Cmd::Submit if property.options().is_none() => {
                self.entry = Some(self.field.get(property).to_string());
                false
            }
            Cmd::Toggle => {
                self.field.toggle_hover();
                false
            }
            Cmd::Cancel if property == TypographyProperty::Color => {
                self.field.edit_color(|picker| picker.clear())
            }
            _ => false,
        };
        if did_change {
            CmdResult::Changed(self.state())
        } else {
            CmdResult::None
        }
    }
}

impl Component<Msg, UserEvent> for TypographyView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) => {
                if self.entry.is_some() {
                    return self.on_entry(&key);
                }
                if let Some(msg) = global_key(&key) {
                    return Some(msg);
                }
                match dispatcher().dispatch(&key)? {
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                        self.commit(Cmd::Move(CmdDirection::Up))
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                        self.commit(Cmd::Move(CmdDirection::Down))
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left))
                    | AppAction::ValueDecrementSmall => self.commit(Cmd::Move(CmdDirection::Left)),
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right))
                    | AppAction::ValueIncrementSmall => {
                        self.commit(Cmd::Move(CmdDirection::Right))
                    }
                    AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => {
                        self.commit(Cmd::Submit)
                    }
                    AppAction::ToggleState => self.commit(Cmd::Toggle),
                    AppAction::Clear => self.commit(Cmd::Cancel),
                    other => fallback(self.field.name(), &other),
                }
            }
            Input::Press(mouse) => self.on_press(mouse.column, mouse.row),
            Input::Pointer(_) => None,
            Input::Msg(msg) => Some(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldMeta;
    use tuirealm::event::KeyModifiers;

    fn key(code: Key) -> Event<UserEvent> {
        Event::Keyboard(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn free_rows_edit_through_entry() {
        let mut view = TypographyView::new(TypographyField::new("type"), Chrome::new(FieldMeta::default()));
        view.attr(Attribute::Focus, AttrValue::Flag(true));
        view.selected = 1;
        assert_eq!(view.property(), TypographyProperty::FontSize);

        view.on(key(Key::Enter));
        assert!(view.entry.is_some());
        view.entry = Some(String::new());
        for c in "24px".chars() {
            assert!(view.on(key(Key::Char(c))).is_none());
        }
        let Some(Msg::Edited(_)) = view.on(key(Key::Enter)) else {
            panic!("enter should commit the entry");
        };
        assert_eq!(view.field.get(TypographyProperty::FontSize), "24px");
    }
}
