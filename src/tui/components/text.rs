//! Single-line text input.

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

use super::{Chrome, Input, dim, edited_if, fallback, global_key, pressed, typed_char, value_style};
use crate::fields::{Field, TextInput};
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::dispatcher;

pub struct TextView {
    field: TextInput,
    chrome: Chrome,
}

/// Text split around the cursor, scrolled so the cursor stays in `width`.
fn visible_parts(input: &TextInput, width: usize) -> (String, String, String) {
    let chars: Vec<char> = input.text().chars().collect();
    let cursor = input.cursor().min(chars.len());
    let start = (cursor + 1).saturating_sub(width.max(1));
    let before: String = chars[start..cursor].iter().collect();
    let at = chars.get(cursor).map_or(" ".to_string(), char::to_string);
    let after: String = chars
        .iter()
        .skip(cursor + 1)
        .take(width.saturating_sub(cursor - start + 1))
        .collect();
    (before, at, after)
}

impl TextView {
    pub fn new(field: TextInput, chrome: Chrome) -> Self {
        Self { field, chrome }
    }

    fn commit(&mut self, cmd: Cmd) -> Option<Msg> {
        let did_change = matches!(self.perform(cmd), CmdResult::Changed(_));
        edited_if(did_change, self.field.clone())
    }
}

impl MockComponent for TextView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let control = self.chrome.label_row(frame, area, &self.field);
        let focused = self.chrome.focused();

        let line = if self.field.text().is_empty() && !focused {
            Line::from(Span::styled(self.field.placeholder.clone(), dim()))
        } else if focused {
            let (before, at, after) = visible_parts(&self.field, usize::from(control.width));
            Line::from(vec![
                Span::styled(before, value_style(true)),
                Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
                Span::styled(after, value_style(true)),
            ])
        } else {
            Line::from(self.field.text().to_string())
        };
        frame.render_widget(Paragraph::new(line), control);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.chrome.query(attr, 1)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.chrome.attr(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.field.text().to_string()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        let did_change = match cmd {
            Cmd::Type(c) => {
                self.field.insert(c);
                true
            }
            Cmd::Delete => self.field.backspace(),
            Cmd::Cancel => self.field.delete(),
            Cmd::Move(CmdDirection::Left) => {
                self.field.move_left();
                false
            }
            Cmd::Move(CmdDirection::Right) => {
                self.field.move_right();
                false
            }
            Cmd::GoTo(Position::Begin) => {
                self.field.home();
                false
            }
            Cmd::GoTo(Position::End) => {
                self.field.end();
                false
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

impl Component<Msg, UserEvent> for TextView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) => {
                // Raw key input first: letters are text here, not actions
                if let Some(c) = typed_char(&key) {
                    return self.commit(Cmd::Type(c));
                }
                match key.code {
                    Key::Backspace => self.commit(Cmd::Delete),
                    Key::Delete => self.commit(Cmd::Cancel),
                    Key::Left => self.commit(Cmd::Move(CmdDirection::Left)),
                    Key::Right => self.commit(Cmd::Move(CmdDirection::Right)),
                    Key::Home => self.commit(Cmd::GoTo(Position::Begin)),
                    Key::End => self.commit(Cmd::GoTo(Position::End)),
                    _ => global_key(&key).or_else(|| {
                        let action = dispatcher().dispatch(&key)?;
                        fallback(self.field.name(), &action)
                    }),
                }
            }
            Input::Press(_) => pressed(self.field.name(), None),
            Input::Pointer(_) => None,
            Input::Msg(msg) => Some(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldMeta;
    use tuirealm::event::{KeyEvent, KeyModifiers};

    #[test]
    fn cursor_stays_visible() {
        let mut input = TextInput::new("t", "abcdefghij");
        input.end();
        let (before, at, after) = visible_parts(&input, 4);
        assert_eq!(before, "hij");
        assert_eq!(at, " ");
        assert_eq!(after, "");

        input.home();
        let (before, at, after) = visible_parts(&input, 4);
        assert_eq!(before, "");
        assert_eq!(at, "a");
        assert_eq!(after, "bcd");
    }

    #[test]
    fn typed_letters_edit_instead_of_dispatching() {
        let mut view = TextView::new(TextInput::new("t", ""), Chrome::new(FieldMeta::default()));
        let key = Event::Keyboard(KeyEvent::new(Key::Char('q'), KeyModifiers::NONE));

        // Unfocused components ignore keys
        assert!(view.on(key.clone()).is_none());

        view.attr(Attribute::Focus, AttrValue::Flag(true));
        let Some(Msg::Edited(field)) = view.on(key) else {
            panic!("typing should edit the field");
        };
        assert_eq!(field.value(), "q");
    }
}
