//! Margin / padding editor: one row per box, four side cells each.

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
    event::{Key, KeyEvent},
    props::{AttrValue, Attribute},
};

use super::{
    Chrome, Input, contains, dim, edited, edited_if, fallback, global_key, pressed, row,
    typed_char, value_style,
};
use crate::fields::{BoxSide, Field, SpacingBox, SpacingTarget};
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher};

const CELL_WIDTH: u16 = 7;
const TARGET_WIDTH: u16 = 9;
const BIG_NUDGE: i32 = 10;

/// Cell order: margin T R B L, then padding T R B L.
fn cell(index: usize) -> (SpacingTarget, BoxSide) {
    let target = if index < 4 {
        SpacingTarget::Margin
    } else {
        SpacingTarget::Padding
    };
    (target, BoxSide::ALL[index % 4])
}

fn side_initial(side: BoxSide) -> &'static str {
    match side {
        BoxSide::Top => "T",
        BoxSide::Right => "R",
        BoxSide::Bottom => "B",
        BoxSide::Left => "L",
    }
}

pub struct SpacingView {
    field: SpacingBox,
    chrome: Chrome,
    selected: usize,
    entry: Option<String>,
    cells: Vec<Rect>,
    link_area: Rect,
    unit_area: Rect,
}

impl SpacingView {
    pub fn new(field: SpacingBox, chrome: Chrome) -> Self {
        Self {
            field,
            chrome,
            selected: 0,
            entry: None,
            cells: Vec::new(),
            link_area: Rect::default(),
            unit_area: Rect::default(),
        }
    }

    /// Write the pending entry into the selected cell.
    fn commit_entry(&mut self) -> bool {
        let Some(text) = self.entry.take() else {
            return false;
        };
        let (target, side) = cell(self.selected);
        self.field.input(target, side, &text);
        true
    }

    fn commit(&mut self, cmd: Cmd) -> Option<Msg> {
        let did_change = matches!(self.perform(cmd), CmdResult::Changed(_));
        edited_if(did_change, self.field.clone())
    }

    fn nudged(&mut self, delta: i32) -> Option<Msg> {
        let (target, side) = cell(self.selected);
        self.field.nudge(target, side, delta);
        edited(self.field.clone())
    }

    /// Number entry. `None` when the key is not part of an entry.
    fn on_entry(&mut self, key: &KeyEvent) -> Option<Option<Msg>> {
        if let Some(c) = typed_char(key)
            && (c.is_ascii_digit() || (c == '-' && self.entry.is_none()))
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
            Key::Esc => {
                self.entry = None;
                Some(None)
            }
            Key::Enter => Some(edited_if(self.commit_entry(), self.field.clone())),
            // Moving away commits what was typed
            _ => edited_if(self.commit_entry(), self.field.clone()).map(Some),
        }
    }

    fn on_press(&mut self, column: u16, row: u16) -> Option<Msg> {
        if contains(self.link_area, column, row) {
            self.field.toggle_link();
            return pressed(self.field.name(), None);
        }
        if contains(self.unit_area, column, row) {
            let msg = self.commit(Cmd::Change);
            return pressed(self.field.name(), msg);
        }
        let msg = self
            .cells
            .iter()
            .position(|rect| contains(*rect, column, row))
            .and_then(|index| {
                let committed = self.commit_entry();
                self.selected = index;
                edited_if(committed, self.field.clone())
            });
        pressed(self.field.name(), msg)
    }
}

impl MockComponent for SpacingView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let header = self.chrome.label_row(frame, row(area, 0), &self.field);
        self.chrome.set_area(area);
        let focused = self.chrome.focused();
        let spacing = &self.field;

        let link = if spacing.is_linked() { "🔗 linked" } else { "⛓ unlinked" };
        let unit = format!("‹{}›", spacing.unit());
        self.unit_area = Rect::new(header.x, header.y, unit.chars().count() as u16, 1);
        self.link_area = Rect::new(
            header.x + self.unit_area.width + 2,
            header.y,
            link.chars().count() as u16,
            1,
        );
        let mut spans = vec![
            Span::styled(unit, value_style(focused)),
            Span::raw("  "),
            Span::styled(link, Style::default().fg(Color::Gray)),
        ];
        if spacing.show_responsive {
            spans.push(Span::styled(format!("  [{}]", spacing.device().label()), dim()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), header);

        self.cells.clear();
        for (line, target) in [(1, SpacingTarget::Margin), (2, SpacingTarget::Padding)] {
            let line_area = Rect {
                x: header.x,
                width: header.width,
                ..row(area, line)
            };
            let title = match target {
                SpacingTarget::Margin => "Margin",
                SpacingTarget::Padding => "Padding",
            };
            let mut spans = vec![Span::styled(format!("{title:<8} "), dim())];
            let sides = spacing.sides(target);
            for (i, side) in BoxSide::ALL.into_iter().enumerate() {
                let index = if target == SpacingTarget::Margin { i } else { 4 + i };
                let selected = focused && index == self.selected;
                let text = match (&self.entry, selected) {
                    (Some(entry), true) => format!("{entry}▏"),
                    _ => sides.get(side).to_string(),
                };
                let style = if selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!("{} ", side_initial(side)), dim()));
                spans.push(Span::styled(format!("{text:>4}"), style));
                spans.push(Span::raw(" "));
                self.cells.push(Rect::new(
                    line_area.x + TARGET_WIDTH + (i as u16) * CELL_WIDTH,
                    line_area.y,
                    CELL_WIDTH - 1,
                    line_area.height,
                ));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.chrome.query(attr, 3)
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
        match cmd {
            Cmd::Move(CmdDirection::Left) => self.selected = (self.selected + 7) % 8,
            Cmd::Move(CmdDirection::Right) => self.selected = (self.selected + 1) % 8,
            Cmd::Change if self.field.cycle_unit() => return CmdResult::Changed(self.state()),
            _ => {}
        }
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for SpacingView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) => {
                if let Some(msg) = self.on_entry(&key) {
                    return msg;
                }
                if let Some(msg) = global_key(&key) {
                    return Some(msg);
                }
                match dispatcher().dispatch(&key)? {
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => {
                        self.commit(Cmd::Move(CmdDirection::Left))
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => {
                        self.commit(Cmd::Move(CmdDirection::Right))
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up))
                    | AppAction::ValueIncrementSmall => self.nudged(1),
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down))
                    | AppAction::ValueDecrementSmall => self.nudged(-1),
                    AppAction::ValueIncrementLarge => self.nudged(BIG_NUDGE),
                    AppAction::ValueDecrementLarge => self.nudged(-BIG_NUDGE),
                    // Linking changes no value
                    AppAction::ToggleLink => {
                        self.field.toggle_link();
                        None
                    }
                    AppAction::CycleUnit => self.commit(Cmd::Change),
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

    #[test]
    fn cells_run_margin_then_padding() {
        assert_eq!(cell(0), (SpacingTarget::Margin, BoxSide::Top));
        assert_eq!(cell(3), (SpacingTarget::Margin, BoxSide::Left));
        assert_eq!(cell(4), (SpacingTarget::Padding, BoxSide::Top));
        assert_eq!(cell(7), (SpacingTarget::Padding, BoxSide::Left));
    }

    #[test]
    fn typed_value_commits_on_enter() {
        use crate::registry::FieldMeta;
        use tuirealm::event::KeyModifiers;

        let key = |code| Event::Keyboard(KeyEvent::new(code, KeyModifiers::NONE));
        let mut view = SpacingView::new(SpacingBox::new("spacing"), Chrome::new(FieldMeta::default()));
        view.attr(Attribute::Focus, AttrValue::Flag(true));
        for c in ['1', '2'] {
            assert!(view.on(key(Key::Char(c))).is_none());
        }
        let Some(Msg::Edited(field)) = view.on(key(Key::Enter)) else {
            panic!("enter should commit the entry");
        };
        assert_eq!(field.value(), view.field.value());
        assert_eq!(view.field.margin(), crate::fields::Sides::uniform(12));
    }
}
