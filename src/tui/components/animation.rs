//! Entrance animation panel with a live preview line.

use std::time::Instant;

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
    event::{Key, MouseButton, MouseEvent, MouseEventKind},
    props::{AttrValue, Attribute},
};

use super::{
    Chrome, Input, LABEL_WIDTH, cell_center, contains, dim, edited_if, fallback, global_key,
    pressed, row, track_spans, track_x, value_style,
};
use crate::fields::{AnimationField, AnimationProperty, Field, TIMING_RANGE};
use crate::mapper::map_click;
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher};

const ROWS: u16 = AnimationProperty::ALL.len() as u16;

pub struct AnimationView {
    field: AnimationField,
    chrome: Chrome,
    selected: usize,
    /// Timing tracks from the last frame
    tracks: Vec<(Rect, AnimationProperty)>,
    rows: Vec<(Rect, usize)>,
}

fn timing(animation: &AnimationField, property: AnimationProperty) -> f64 {
    let value = animation.animation();
    f64::from(match property {
        AnimationProperty::Delay => value.delay,
        _ => value.duration,
    })
}

fn preview_line(animation: &AnimationField, now: Instant) -> Line<'static> {
    if let Some(preview) = animation.playing(now) {
        return Line::from(vec![
            Span::styled("▶ ", Style::default().fg(Color::Green)),
            Span::styled(preview.css.clone(), Style::default().fg(Color::Green)),
        ]);
    }
    match animation.preview() {
        Some(preview) => Line::from(vec![
            Span::styled("▷ ", dim()),
            Span::styled(preview.css, dim()),
            Span::styled("  (p to play)", dim().add_modifier(Modifier::ITALIC)),
        ]),
        None => Line::from(Span::styled("No animation", dim())),
    }
}

impl AnimationView {
    pub fn new(field: AnimationField, chrome: Chrome) -> Self {
        Self {
            field,
            chrome,
            selected: 0,
            tracks: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn commit(&mut self, cmd: Cmd) -> Option<Msg> {
        let did_change = matches!(self.perform(cmd), CmdResult::Changed(_));
        edited_if(did_change, self.field.clone())
    }

    /// Set a timing from a pointer over one of the tracks.
    fn timing_at(&mut self, mouse: MouseEvent) -> Option<Msg> {
        let (track, property) = *self
            .tracks
            .iter()
            .find(|(rect, _)| contains(*rect, mouse.column, mouse.row))?;
        let millis = map_click(track_x(track), cell_center(mouse.column), TIMING_RANGE);
        let did_change = self.field.set_timing(property, millis);
        edited_if(did_change, self.field.clone())
    }

    fn on_press(&mut self, mouse: MouseEvent) -> Option<Msg> {
        if let Some(index) = self
            .rows
            .iter()
            .find(|(rect, _)| contains(*rect, mouse.column, mouse.row))
            .map(|(_, index)| *index)
        {
            self.selected = index;
        }
        let msg = self.timing_at(mouse);
        pressed(self.field.name(), msg)
    }
}

impl MockComponent for AnimationView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let header = self.chrome.label_row(frame, row(area, 0), &self.field);
        self.chrome.set_area(area);
        let focused = self.chrome.focused();
        let animation = &self.field;
        frame.render_widget(Paragraph::new(preview_line(animation, Instant::now())), header);

        self.tracks.clear();
        self.rows.clear();
        let indent = area.x + 2;
        for (i, property) in AnimationProperty::ALL.into_iter().enumerate() {
            let line = row(area, 1 + i as u16);
            let line = Rect {
                x: indent,
                width: line.width.saturating_sub(2),
                ..line
            };
            self.rows.push((line, i));

            let selected = focused && i == self.selected;
            let name_style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                dim()
            };
            let marker = if selected { "› " } else { "  " };
            let name_width = LABEL_WIDTH.saturating_sub(2);
            let mut spans = vec![Span::styled(
                format!("{marker}{:<width$}", property.label(), width = usize::from(name_width - 2)),
                name_style,
            )];

            if property.options().is_some() {
                spans.push(Span::styled(
                    format!("‹ {} ›", animation.display(property)),
                    value_style(selected),
                ));
            } else {
                let width = line.width.saturating_sub(name_width + 10).min(30);
                let track = Rect::new(line.x + name_width, line.y, width, 1);
                self.tracks.push((track, property));
                spans.extend(track_spans(
                    usize::from(width),
                    TIMING_RANGE.percent(timing(animation, property)),
                    selected,
                ));
                spans.push(Span::styled(
                    format!(" {}", animation.display(property)),
                    value_style(selected),
                ));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), line);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.chrome.query(attr, 2 + ROWS)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        if self.chrome.attr(attr, value) {
            self.field.stop();
        }
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.field.value()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        let property = AnimationProperty::ALL[self.selected];
        let did_change = match cmd {
            Cmd::Move(CmdDirection::Up) => {
                self.selected = self.selected.saturating_sub(1);
                false
            }
            Cmd::Move(CmdDirection::Down) => {
                self.selected = (self.selected + 1).min(AnimationProperty::ALL.len() - 1);
                false
            }
            Cmd::Move(CmdDirection::Left) => self.field.cycle(property, false),
            Cmd::Move(CmdDirection::Right) => self.field.cycle(property, true),
            Cmd::Submit => {
                self.field.play(Instant::now());
                false
            }
            Cmd::Cancel => {
                self.field.stop();
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

impl Component<Msg, UserEvent> for AnimationView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) => {
                if key.code == Key::Esc {
                    return self.commit(Cmd::Cancel);
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
                    AppAction::Play | AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => {
                        self.commit(Cmd::Submit)
                    }
                    AppAction::Tui(TuiEvent::Input(InputEvent::Cancel)) => {
                        self.commit(Cmd::Cancel)
                    }
                    other => fallback(self.field.name(), &other),
                }
            }
            Input::Press(mouse) => self.on_press(mouse),
            Input::Pointer(mouse) if matches!(mouse.kind, MouseEventKind::Drag(MouseButton::Left)) => {
                self.timing_at(mouse)
            }
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
    fn play_keeps_the_value_and_escape_stops() {
        let mut view = AnimationView::new(AnimationField::new("anim"), Chrome::new(FieldMeta::default()));
        view.attr(Attribute::Focus, AttrValue::Flag(true));
        let before = view.field.value();

        let play = Event::Keyboard(KeyEvent::new(Key::Char('p'), KeyModifiers::NONE));
        assert!(view.on(play).is_none());
        assert_eq!(view.field.value(), before);

        let esc = Event::Keyboard(KeyEvent::new(Key::Esc, KeyModifiers::NONE));
        assert!(view.on(esc).is_none());
        assert!(view.field.playing(Instant::now()).is_none());
    }
}
