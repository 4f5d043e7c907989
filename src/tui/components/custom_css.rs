//! Per-target CSS editor.

use crossterm_actions::{InputEvent, NavigationEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection, Position},
    event::{Key, KeyEvent},
    props::{AttrValue, Attribute},
};

use super::{
    Chrome, Input, contains, dim, edited_if, fallback, global_key, pressed, row, typed_char,
    value_style,
};
use crate::fields::{CustomCssField, Field, StyleState};
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher};

const EDITOR_ROWS: u16 = 4;

pub struct CustomCssView {
    field: CustomCssField,
    chrome: Chrome,
    editing: bool,
    tabs: Vec<Rect>,
    state_area: Rect,
    editor: Rect,
}

fn flush(lines: &mut [Vec<Span<'static>>], current: &mut String) {
    if let Some(line) = lines.last_mut() {
        line.push(Span::raw(std::mem::take(current)));
    }
}

/// Editor lines with the cursor drawn in, scrolled to keep it visible.
fn editor_lines(css: &str, cursor: usize, show_cursor: bool, rows: usize) -> Vec<Line<'static>> {
    let cursor_style = Style::default().add_modifier(Modifier::REVERSED);
    let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    let mut cursor_line = 0;
    let mut current = String::new();

    for (i, c) in css.chars().chain(std::iter::once('\n')).enumerate() {
        let at_cursor = show_cursor && i == cursor;
        if at_cursor {
            flush(&mut lines, &mut current);
            cursor_line = lines.len() - 1;
            let shown = if c == '\n' { ' ' } else { c };
            if let Some(line) = lines.last_mut() {
                line.push(Span::styled(shown.to_string(), cursor_style));
            }
        }
        if c == '\n' {
            flush(&mut lines, &mut current);
            lines.push(Vec::new());
        } else if !at_cursor {
            current.push(c);
        }
    }
    lines.pop();

    let skip = (cursor_line + 1).saturating_sub(rows);
    lines
        .into_iter()
        .skip(skip)
        .take(rows)
        .map(Line::from)
        .collect()
}

impl CustomCssView {
    pub fn new(field: CustomCssField, chrome: Chrome) -> Self {
        Self {
            field,
            chrome,
            editing: false,
            tabs: Vec::new(),
            state_area: Rect::default(),
            editor: Rect::default(),
        }
    }

    /// Apply an editing key. `None` when the key does not edit.
    fn edit(field: &mut CustomCssField, key: &KeyEvent) -> Option<bool> {
        if let Some(c) = typed_char(key) {
            field.insert(c);
            return Some(true);
        }
        match key.code {
            Key::Enter => field.insert('\n'),
            Key::Tab => field.insert_tab(),
            Key::Backspace => {
                let before = field.cursor();
                field.backspace();
                return Some(before != field.cursor());
            }
            Key::Left => {
                field.move_left();
                return Some(false);
            }
            Key::Right => {
                field.move_right();
                return Some(false);
            }
            Key::End => {
                field.cursor_to_end();
                return Some(false);
            }
            _ => return None,
        }
        Some(true)
    }

    fn start_editing(&mut self) {
        self.field.cursor_to_end();
        self.editing = true;
    }

    fn on_editing_key(&mut self, key: &KeyEvent) -> Option<Msg> {
        if key.code == Key::Esc {
            self.editing = false;
            return None;
        }
        match Self::edit(&mut self.field, key) {
            Some(did_change) => edited_if(did_change, self.field.clone()),
            None => global_key(key).or_else(|| {
                let action = dispatcher().dispatch(key)?;
                fallback(self.field.name(), &action)
            }),
        }
    }

    fn on_press(&mut self, column: u16, row: u16) -> Option<Msg> {
        if let Some(index) = self.tabs.iter().position(|rect| contains(*rect, column, row)) {
            self.perform(Cmd::GoTo(Position::At(index)));
        } else if contains(self.state_area, column, row) {
            self.perform(Cmd::Toggle);
        } else if contains(self.editor, column, row) {
            self.start_editing();
        }
        pressed(self.field.name(), None)
    }
}

impl MockComponent for CustomCssView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let header = self.chrome.label_row(frame, row(area, 0), &self.field);
        self.chrome.set_area(area);
        let focused = self.chrome.focused();
        let css = &self.field;

        self.tabs.clear();
        let mut x = header.x;
        let mut spans = Vec::new();
        for (i, target) in css.targets().iter().enumerate() {
            let text = format!(" {} ", target.label);
            let width = text.chars().count() as u16;
            self.tabs.push(Rect::new(x, header.y, width, 1));
            x = x.saturating_add(width + 1);
            let style = if i == css.active_index() {
                value_style(focused).add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        let state = match css.state() {
            StyleState::Normal => "Normal",
            StyleState::Hover => "Hover",
        };
        let state_text = format!(" {state} ");
        self.state_area = Rect::new(x + 1, header.y, state_text.chars().count() as u16, 1);
        spans.push(Span::raw(" "));
        spans.push(Span::styled(state_text, Style::default().fg(Color::Magenta)));
        spans.push(Span::styled(format!(" [{}]", css.device().label()), dim()));
        frame.render_widget(Paragraph::new(Line::from(spans)), header);

        self.editor = Rect {
            x: header.x,
            y: area.y + 1,
            width: header.width,
            height: (EDITOR_ROWS + 2).min(area.height.saturating_sub(1)),
        };
        let border = if self.editing && focused {
            Style::default().fg(Color::Yellow)
        } else {
            dim()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(
                format!(" {} ", css.active_target().selector),
                dim(),
            ));
        let text = css.active_css();
        let body = if text.is_empty() && !self.editing {
            vec![Line::from(Span::styled(
                "Enter CSS declarations, e.g. color: red;",
                dim().add_modifier(Modifier::ITALIC),
            ))]
        } else {
            editor_lines(
                text,
                css.cursor(),
                self.editing && focused,
                usize::from(EDITOR_ROWS),
            )
        };
        frame.render_widget(
            Paragraph::new(body).style(Style::default().fg(Color::Green)).block(block),
            self.editor,
        );
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.chrome.query(attr, 1 + EDITOR_ROWS + 2)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        if self.chrome.attr(attr, value) {
            self.editing = false;
        }
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.field.active_css().to_string()))
    }

    /// Target and state switches change what is shown, not the value.
    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Move(CmdDirection::Left) => {
                let len = self.field.targets().len();
                self.field.select_target((self.field.active_index() + len - 1) % len);
            }
            Cmd::Move(CmdDirection::Right) => {
                self.field.next_target();
            }
            Cmd::GoTo(Position::At(index)) => {
                self.field.select_target(index);
            }
            Cmd::Toggle => {
                self.field.toggle_state();
            }
            _ => {}
        }
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for CustomCssView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) if self.editing => self.on_editing_key(&key),
            Input::Key(key) => {
                if let Some(msg) = global_key(&key) {
                    return Some(msg);
                }
                match dispatcher().dispatch(&key)? {
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => {
                        self.perform(Cmd::Move(CmdDirection::Left));
                        None
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => {
                        self.perform(Cmd::Move(CmdDirection::Right));
                        None
                    }
                    AppAction::ToggleState => {
                        self.perform(Cmd::Toggle);
                        None
                    }
                    AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => {
                        self.start_editing();
                        None
                    }
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
    use crate::fields::default_css_targets;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn editor_lines_place_cursor() {
        let lines = editor_lines("a: b;\nc: d;", 2, true, 4);
        assert_eq!(lines.len(), 2);
        assert_eq!(plain(&lines[0]), "a: b;");
        assert_eq!(plain(&lines[1]), "c: d;");

        let at_end = editor_lines("ab", 2, true, 4);
        assert_eq!(plain(&at_end[0]), "ab ");
    }

    #[test]
    fn editor_scrolls_to_cursor() {
        let css = "1\n2\n3\n4\n5\n6";
        let lines = editor_lines(css, css.chars().count(), true, 4);
        assert_eq!(plain(&lines[0]), "3");
        assert_eq!(plain(&lines[3]), "6 ");
    }

    #[test]
    fn typing_emits_while_editing() {
        use crate::registry::FieldMeta;
        use tuirealm::event::KeyModifiers;

        let key = |code| Event::Keyboard(KeyEvent::new(code, KeyModifiers::NONE));
        let field = CustomCssField::new("css", default_css_targets());
        let mut view = CustomCssView::new(field, Chrome::new(FieldMeta::default()));
        view.attr(Attribute::Focus, AttrValue::Flag(true));

        assert!(view.on(key(Key::Char('x'))).is_none());
        view.on(key(Key::Enter));
        assert!(view.editing);
        let Some(Msg::Edited(_)) = view.on(key(Key::Char('x'))) else {
            panic!("typing should edit while the editor is open");
        };
        assert_eq!(view.field.active_css(), "x");

        // Focus leaving closes the editor
        view.attr(Attribute::Focus, AttrValue::Flag(false));
        assert!(!view.editing);
    }
}
