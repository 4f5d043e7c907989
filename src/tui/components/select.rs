//! Dropdown with optional search and option groups.

use crossterm_actions::{InputEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection, Position},
    event::Key,
    props::{AttrValue, Attribute},
};

use super::{
    Chrome, Input, contains, dim, edited_if, fallback, global_key, pressed, row, typed_char,
    value_style,
};
use crate::fields::{Field, Select, SelectKey};
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher};

/// Dropdown rows shown at most.
const MAX_ROWS: u16 = 8;

const NO_RESULTS: &str = "No results found";

/// One drawn dropdown line.
enum DropRow<'a> {
    Group(&'a str),
    Option { index: usize, label: &'a str },
}

fn drop_rows(select: &Select) -> Vec<DropRow<'_>> {
    let mut rows = Vec::new();
    let mut index = 0;
    for (label, members) in select.visible_groups() {
        if let Some(label) = label {
            rows.push(DropRow::Group(label));
        }
        for choice in members {
            rows.push(DropRow::Option {
                index,
                label: &choice.label,
            });
            index += 1;
        }
    }
    rows
}

pub struct SelectView {
    field: Select,
    chrome: Chrome,
    header: Rect,
    /// Screen row → visible option index
    option_rows: Vec<(u16, usize)>,
}

impl SelectView {
    pub fn new(field: Select, chrome: Chrome) -> Self {
        Self {
            field,
            chrome,
            header: Rect::default(),
            option_rows: Vec::new(),
        }
    }

    fn dropdown_height(select: &Select) -> u16 {
        let search = u16::from(select.searchable);
        let rows = if select.visible_len() == 0 {
            1
        } else {
            (drop_rows(select).len() as u16).min(MAX_ROWS)
        };
        search + rows
    }

    fn commit(&mut self, cmd: Cmd) -> Option<Msg> {
        let did_change = matches!(self.perform(cmd), CmdResult::Changed(_));
        edited_if(did_change, self.field.clone())
    }
}

impl MockComponent for SelectView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let control = self.chrome.label_row(frame, row(area, 0), &self.field);
        self.chrome.set_area(area);
        let focused = self.chrome.focused();
        let select = &self.field;
        self.header = control;
        self.option_rows.clear();

        let arrow = if select.is_open() { "▴ " } else { "▾ " };
        let display_style = if select.shows_placeholder() {
            dim()
        } else {
            value_style(focused)
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(arrow, value_style(focused)),
                Span::styled(select.display().to_string(), display_style),
            ])),
            control,
        );

        if !select.is_open() {
            return;
        }

        let drop_area = Rect {
            x: control.x,
            width: control.width,
            ..area
        };
        let mut y = 1;
        if select.searchable {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("  ⌕ ", dim()),
                    Span::raw(select.query().to_string()),
                    Span::styled("▏", Style::default().fg(Color::Cyan)),
                ])),
                row(drop_area, y),
            );
            y += 1;
        }

        if select.visible_len() == 0 {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  {NO_RESULTS}"),
                    dim().add_modifier(Modifier::ITALIC),
                )),
                row(drop_area, y),
            );
            return;
        }

        let rows = drop_rows(select);
        // Keep the highlighted option in view
        let highlight_row = select.highlighted().and_then(|h| {
            rows.iter()
                .position(|r| matches!(r, DropRow::Option { index, .. } if *index == h))
        });
        let visible = usize::from(MAX_ROWS);
        let skip = highlight_row.map_or(0, |r| (r + 1).saturating_sub(visible));

        for drop_row in rows.iter().skip(skip).take(visible) {
            let line_area = row(drop_area, y);
            match drop_row {
                DropRow::Group(label) => frame.render_widget(
                    Paragraph::new(Span::styled(
                        format!("  {label}"),
                        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
                    )),
                    line_area,
                ),
                DropRow::Option { index, label } => {
                    let selected = select
                        .selected_option()
                        .is_some_and(|choice| &choice.label == label);
                    let style = if select.highlighted() == Some(*index) {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else if selected {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    };
                    let marker = if selected { "✓ " } else { "  " };
                    frame.render_widget(
                        Paragraph::new(Span::styled(format!("  {marker}{label}"), style)),
                        line_area,
                    );
                    self.option_rows.push((line_area.y, *index));
                }
            }
            y += 1;
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        let height = if self.field.is_open() {
            1 + Self::dropdown_height(&self.field)
        } else {
            1
        };
        self.chrome.query(attr, height)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        if self.chrome.attr(attr, value) {
            self.field.close();
        }
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.field.value()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        let did_change = match cmd {
            Cmd::Move(CmdDirection::Down) => self.field.key(SelectKey::Down),
            Cmd::Move(CmdDirection::Up) => self.field.key(SelectKey::Up),
            Cmd::Submit => self.field.key(SelectKey::Enter),
            Cmd::Cancel => self.field.key(SelectKey::Escape),
            Cmd::Toggle => {
                self.field.toggle();
                false
            }
            Cmd::Type(c) => {
                self.field.push_query(c);
                false
            }
            Cmd::Delete => {
                self.field.pop_query();
                false
            }
            Cmd::GoTo(Position::At(index)) => self.field.select_visible(index),
            _ => false,
        };
        if did_change {
            CmdResult::Changed(self.state())
        } else {
            CmdResult::None
        }
    }
}

impl Component<Msg, UserEvent> for SelectView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) => {
                if self.field.is_open() {
                    if key.code == Key::Backspace {
                        return self.commit(Cmd::Delete);
                    }
                    if self.field.searchable
                        && let Some(c) = typed_char(&key)
                        && c != ' '
                    {
                        return self.commit(Cmd::Type(c));
                    }
                }
                match key.code {
                    Key::Char(' ') => return self.commit(Cmd::Submit),
                    Key::Esc => return self.commit(Cmd::Cancel),
                    _ => {}
                }
                if let Some(msg) = global_key(&key) {
                    return Some(msg);
                }
                match dispatcher().dispatch(&key)? {
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                        self.commit(Cmd::Move(CmdDirection::Down))
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                        self.commit(Cmd::Move(CmdDirection::Up))
                    }
                    AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => {
                        self.commit(Cmd::Submit)
                    }
                    AppAction::Tui(TuiEvent::Input(InputEvent::Cancel)) => {
                        self.commit(Cmd::Cancel)
                    }
                    action @ AppAction::Tui(TuiEvent::Selection(
                        SelectionEvent::Next | SelectionEvent::Prev,
                    )) => {
                        self.field.close();
                        fallback(self.field.name(), &action)
                    }
                    other => fallback(self.field.name(), &other),
                }
            }
            Input::Press(mouse) => {
                if contains(self.header, mouse.column, mouse.row) {
                    self.perform(Cmd::Toggle);
                    return pressed(self.field.name(), None);
                }
                let msg = self
                    .option_rows
                    .iter()
                    .find(|(y, _)| *y == mouse.row)
                    .map(|(_, index)| *index)
                    .and_then(|index| self.commit(Cmd::GoTo(Position::At(index))));
                pressed(self.field.name(), msg)
            }
            Input::Pointer(_) => None,
            Input::Msg(msg) => Some(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Choice;
    use crate::registry::FieldMeta;
    use tuirealm::event::{KeyEvent, KeyModifiers};

    fn key(code: Key) -> Event<UserEvent> {
        Event::Keyboard(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn open_dropdown_grows_the_component() {
        let choices = vec![Choice::new("a", "Alpha"), Choice::new("b", "Beta")];
        let mut view = SelectView::new(Select::new("pick", choices), Chrome::new(FieldMeta::default()));
        assert_eq!(view.query(Attribute::Height), Some(AttrValue::Size(1)));

        view.attr(Attribute::Focus, AttrValue::Flag(true));
        assert!(view.on(key(Key::Char(' '))).is_none());
        assert!(view.field.is_open());
        // Search line plus both options
        assert_eq!(view.query(Attribute::Height), Some(AttrValue::Size(4)));

        // Blur closes it again
        view.attr(Attribute::Focus, AttrValue::Flag(false));
        assert_eq!(view.query(Attribute::Height), Some(AttrValue::Size(1)));
    }
}
