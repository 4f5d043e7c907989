//! Color picker: swatch button plus an inline panel with spectrum, hue and
//! alpha strips, preset swatches and a text entry.

use crossterm_actions::{InputEvent, NavigationEvent, SelectionEvent, TuiEvent};
use palette::Srgb;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    event::{Key, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    props::{AttrValue, Attribute},
};

use super::{
    Chrome, Input, cell_center, contains, dim, edited_if, fallback, global_key, pressed, row,
    track_x, track_y, typed_char, value_style,
};
use crate::color::{Hsba, hsb_to_rgb};
use crate::fields::{ColorPicker, Field};
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher};

const SPECTRUM_ROWS: u16 = 6;
const SPECTRUM_WIDTH: u16 = 32;

/// Background the alpha strip fades into.
const CHECKER: Srgb<u8> = Srgb::new(48, 48, 48);

pub fn cell_color(rgb: Srgb<u8>) -> Color {
    Color::Rgb(rgb.red, rgb.green, rgb.blue)
}

/// Colored block plus the serialized value, `░░` when cleared.
pub fn swatch_spans(picker: &ColorPicker, focused: bool) -> Vec<Span<'static>> {
    if picker.is_cleared() {
        return vec![Span::styled("░░", dim()), Span::styled(" none", dim())];
    }
    vec![
        Span::styled("██", Style::default().fg(cell_color(picker.rgb()))),
        Span::styled(format!(" {}", picker.value()), value_style(focused)),
    ]
}

/// Surface a drag started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    Spectrum,
    Hue,
    Alpha,
}

pub struct ColorPickerView {
    field: ColorPicker,
    chrome: Chrome,
    button: Rect,
    spectrum: Rect,
    hue: Rect,
    alpha: Rect,
    /// Screen column → swatch index
    swatch_cells: Vec<(Rect, String)>,
    entry: Option<String>,
    drag: Option<Surface>,
    swatch_cursor: usize,
}

/// Rows of the open panel below the button row.
fn panel_height(picker: &ColorPicker) -> u16 {
    SPECTRUM_ROWS + 1 + u16::from(picker.show_alpha) + 2
}

fn blend(top: Srgb<u8>, bottom: Srgb<u8>, alpha: f64) -> Srgb<u8> {
    let mix = |a: u8, b: u8| (f64::from(a) * alpha + f64::from(b) * (1.0 - alpha)).round() as u8;
    Srgb::new(
        mix(top.red, bottom.red),
        mix(top.green, bottom.green),
        mix(top.blue, bottom.blue),
    )
}

fn draw_spectrum(buf: &mut Buffer, area: Rect, color: Hsba) {
    let w = f64::from(area.width.saturating_sub(1).max(1));
    let h = f64::from(area.height.saturating_sub(1).max(1));
    let marker_x = (color.saturation() / 100.0 * w).round() as u16;
    let marker_y = ((100.0 - color.brightness()) / 100.0 * h).round() as u16;
    for dy in 0..area.height {
        for dx in 0..area.width {
            let s = f64::from(dx) / w * 100.0;
            let b = 100.0 - f64::from(dy) / h * 100.0;
            let rgb = hsb_to_rgb(color.hue(), s, b);
            let cell = &mut buf[(area.x + dx, area.y + dy)];
            cell.set_bg(cell_color(rgb));
            if dx == marker_x && dy == marker_y {
                let fg = if color.brightness() > 50.0 { Color::Black } else { Color::White };
                cell.set_char('◎').set_fg(fg);
            } else {
                cell.set_char(' ');
            }
        }
    }
}

fn draw_strip(buf: &mut Buffer, area: Rect, marker: f64, paint: impl Fn(f64) -> Srgb<u8>) {
    let w = f64::from(area.width.saturating_sub(1).max(1));
    let marker_x = (marker * w).round() as u16;
    for dx in 0..area.width {
        let cell = &mut buf[(area.x + dx, area.y)];
        cell.set_bg(cell_color(paint(f64::from(dx) / w)));
        if dx == marker_x {
            cell.set_char('┃').set_fg(Color::White);
        } else {
            cell.set_char(' ');
        }
    }
}

impl ColorPickerView {
    pub fn new(field: ColorPicker, chrome: Chrome) -> Self {
        Self {
            field,
            chrome,
            button: Rect::default(),
            spectrum: Rect::default(),
            hue: Rect::default(),
            alpha: Rect::default(),
            swatch_cells: Vec::new(),
            entry: None,
            drag: None,
            swatch_cursor: 0,
        }
    }

    fn emit(&self, did_change: bool) -> Option<Msg> {
        edited_if(did_change, self.field.clone())
    }

    /// Commit typed text: `#rrggbb`, `r,g,b` or `NN%` opacity.
    fn commit(picker: &mut ColorPicker, entry: &str) -> bool {
        let entry = entry.trim();
        if let Some(percent) = entry.strip_suffix('%') {
            picker.input_opacity(percent)
        } else if entry.contains(',') {
            let mut parts = entry.splitn(3, ',');
            let r = parts.next().unwrap_or("");
            let g = parts.next().unwrap_or("");
            let b = parts.next().unwrap_or("");
            picker.input_rgb(r, g, b)
        } else {
            picker.input_hex(entry)
        }
    }

    fn nudge(&mut self, edit: impl FnOnce(&mut Hsba)) -> bool {
        let mut color = self.field.color();
        edit(&mut color);
        self.field.set_hsba(color)
    }

    /// Text entry while the panel is open. `None` when the key is not part
    /// of an entry.
    fn on_entry(&mut self, key: &KeyEvent) -> Option<Option<Msg>> {
        if !self.field.is_open() {
            return None;
        }
        if let Some(c) = typed_char(key)
            && (c.is_ascii_hexdigit() || matches!(c, '#' | ',' | '%'))
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
            Key::Enter => {
                let text = self.entry.take().unwrap_or_default();
                let did_change = Self::commit(&mut self.field, &text);
                Some(self.emit(did_change))
            }
            Key::Esc => {
                self.entry = None;
                Some(None)
            }
            _ => {
                self.entry = None;
                None
            }
        }
    }

    fn on_closed_key(&mut self, key: &KeyEvent) -> Option<Msg> {
        if key.code == Key::Char(' ') {
            self.perform(Cmd::Toggle);
            return None;
        }
        match dispatcher().dispatch(key)? {
            AppAction::Tui(
                TuiEvent::Input(InputEvent::Confirm)
                | TuiEvent::Navigation(NavigationEvent::Down),
            ) => {
                self.perform(Cmd::Toggle);
                None
            }
            AppAction::Clear => {
                let did_change = self.field.clear();
                self.emit(did_change)
            }
            other => fallback(self.field.name(), &other),
        }
    }

    fn on_open_key(&mut self, key: &KeyEvent) -> Option<Msg> {
        if matches!(key.code, Key::Char(' ') | Key::Esc) {
            self.perform(Cmd::Cancel);
            return None;
        }
        let alpha = self.field.show_alpha;
        let did_change = match dispatcher().dispatch(key)? {
            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm | InputEvent::Cancel)) => {
                self.perform(Cmd::Cancel);
                false
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => {
                self.nudge(|c| c.set_saturation(c.saturation() - 1.0))
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => {
                self.nudge(|c| c.set_saturation(c.saturation() + 1.0))
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.nudge(|c| c.set_brightness(c.brightness() + 1.0))
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.nudge(|c| c.set_brightness(c.brightness() - 1.0))
            }
            AppAction::ValueDecrementSmall => self.nudge(|c| c.set_hue(c.hue() - 1.0)),
            AppAction::ValueIncrementSmall => self.nudge(|c| c.set_hue(c.hue() + 1.0)),
            AppAction::ValueDecrementLarge if alpha => {
                self.nudge(|c| c.set_alpha(c.alpha() - 5.0))
            }
            AppAction::ValueIncrementLarge if alpha => {
                self.nudge(|c| c.set_alpha(c.alpha() + 5.0))
            }
            AppAction::NextSwatch => {
                let palette = self.field.palette();
                if palette.is_empty() {
                    false
                } else {
                    self.swatch_cursor = (self.swatch_cursor + 1) % palette.len();
                    self.field.pick_swatch(&palette[self.swatch_cursor])
                }
            }
            AppAction::Clear => self.field.clear(),
            action @ AppAction::Tui(TuiEvent::Selection(
                SelectionEvent::Next | SelectionEvent::Prev,
            )) => {
                self.perform(Cmd::Cancel);
                return fallback(self.field.name(), &action);
            }
            other => return fallback(self.field.name(), &other),
        };
        self.emit(did_change)
    }

    fn on_press(&mut self, mouse: MouseEvent) -> Option<Msg> {
        let (x, y) = (cell_center(mouse.column), cell_center(mouse.row));
        let hit = |rect: Rect| contains(rect, mouse.column, mouse.row);
        let picker = &mut self.field;

        if hit(self.button) {
            picker.toggle();
            return pressed(picker.name(), None);
        }
        if !picker.is_open() {
            return pressed(picker.name(), None);
        }
        let did_change = if hit(self.spectrum) {
            self.drag = Some(Surface::Spectrum);
            picker.start_spectrum_drag();
            picker.spectrum_at(track_x(self.spectrum), track_y(self.spectrum), x, y)
        } else if hit(self.hue) {
            self.drag = Some(Surface::Hue);
            picker.start_hue_drag();
            picker.hue_at(track_x(self.hue), x)
        } else if picker.show_alpha && hit(self.alpha) {
            self.drag = Some(Surface::Alpha);
            picker.start_alpha_drag();
            picker.alpha_at(track_x(self.alpha), x)
        } else if let Some((_, swatch)) = self.swatch_cells.iter().find(|(r, _)| hit(*r)) {
            picker.pick_swatch(swatch)
        } else {
            false
        };
        pressed(self.field.name(), self.emit(did_change))
    }

    fn on_pointer(&mut self, mouse: MouseEvent) -> Option<Msg> {
        let (x, y) = (cell_center(mouse.column), cell_center(mouse.row));
        let did_change = match mouse.kind {
            MouseEventKind::Drag(MouseButton::Left) => {
                let surface = match self.drag? {
                    Surface::Spectrum => self.spectrum,
                    Surface::Hue => self.hue,
                    Surface::Alpha => self.alpha,
                };
                self.field.drag_to(track_x(surface), track_y(surface), x, y)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag = None;
                self.field.stop_drag();
                false
            }
            _ => false,
        };
        self.emit(did_change)
    }
}

impl MockComponent for ColorPickerView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let control = self.chrome.label_row(frame, row(area, 0), &self.field);
        self.chrome.set_area(area);
        let focused = self.chrome.focused();
        let picker = &self.field;
        self.button = control;
        frame.render_widget(
            Paragraph::new(Line::from(swatch_spans(picker, focused))),
            control,
        );

        self.swatch_cells.clear();
        if !picker.is_open() {
            return;
        }

        let color = picker.color();
        let width = control.width.min(SPECTRUM_WIDTH);
        let panel = Rect {
            x: control.x,
            width,
            ..area
        };

        self.spectrum = Rect {
            y: panel.y + 1,
            height: SPECTRUM_ROWS,
            ..panel
        };
        draw_spectrum(frame.buffer_mut(), self.spectrum, color);

        let mut y = 1 + SPECTRUM_ROWS;
        self.hue = row(panel, y);
        draw_strip(frame.buffer_mut(), self.hue, picker.hue_position() / 360.0, |t| {
            hsb_to_rgb(t * 360.0, 100.0, 100.0)
        });
        y += 1;

        if picker.show_alpha {
            self.alpha = row(panel, y);
            let opaque = color.into_srgb();
            draw_strip(frame.buffer_mut(), self.alpha, color.alpha() / 100.0, |t| {
                blend(opaque, CHECKER, t)
            });
            y += 1;
        } else {
            self.alpha = Rect::default();
        }

        // Swatches, two cells each
        let swatch_row = row(Rect { width: control.width, ..panel }, y);
        let mut spans = Vec::new();
        for (i, swatch) in picker.palette().into_iter().enumerate() {
            let x = swatch_row.x + (i as u16) * 2;
            if x + 2 > swatch_row.x + swatch_row.width {
                break;
            }
            let rgb = Hsba::parse(&swatch).map_or(Srgb::new(0, 0, 0), Hsba::into_srgb);
            let glyph = if focused && i == self.swatch_cursor { "▣ " } else { "■ " };
            spans.push(Span::styled(glyph, Style::default().fg(cell_color(rgb))));
            self.swatch_cells.push((Rect::new(x, swatch_row.y, 2, 1), swatch));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), swatch_row);
        y += 1;

        let rgb = color.into_srgb();
        let entry_line = match &self.entry {
            Some(entry) => Line::from(vec![
                Span::styled("› ", Style::default().fg(Color::Yellow)),
                Span::styled(entry.clone(), Style::default().fg(Color::Yellow)),
                Span::styled("▏", Style::default().fg(Color::Yellow)),
            ]),
            None => Line::from(vec![
                Span::styled(color.to_hex(), value_style(focused)),
                Span::styled(
                    format!("  rgb {} {} {}", rgb.red, rgb.green, rgb.blue),
                    dim(),
                ),
                Span::styled(
                    format!("  α {}%", color.alpha().round()),
                    dim().add_modifier(if picker.show_alpha {
                        Modifier::empty()
                    } else {
                        Modifier::CROSSED_OUT
                    }),
                ),
            ]),
        };
        frame.render_widget(
            Paragraph::new(entry_line),
            row(Rect { width: control.width, ..panel }, y),
        );
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        let height = if self.field.is_open() {
            1 + panel_height(&self.field)
        } else {
            1
        };
        self.chrome.query(attr, height)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        if self.chrome.attr(attr, value) {
            self.entry = None;
            self.drag = None;
            self.field.stop_drag();
            self.field.close();
        }
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.field.value()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Toggle => self.field.toggle(),
            Cmd::Cancel => self.field.close(),
            _ => {}
        }
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for ColorPickerView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match self.chrome.route(ev, self.field.name())? {
            Input::Key(key) => {
                if let Some(msg) = self.on_entry(&key) {
                    return msg;
                }
                if let Some(msg) = global_key(&key) {
                    return Some(msg);
                }
                if self.field.is_open() {
                    self.on_open_key(&key)
                } else {
                    self.on_closed_key(&key)
                }
            }
            Input::Press(mouse) => self.on_press(mouse),
            Input::Pointer(mouse) => self.on_pointer(mouse),
            Input::Msg(msg) => Some(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_interpolates_channels() {
        let white = Srgb::new(255, 255, 255);
        let black = Srgb::new(0, 0, 0);
        assert_eq!(blend(white, black, 1.0), white);
        assert_eq!(blend(white, black, 0.0), black);
        assert_eq!(blend(white, black, 0.5), Srgb::new(128, 128, 128));
    }

    #[test]
    fn commit_routes_by_shape() {
        let mut picker = ColorPicker::new("c", "#000000");
        assert!(ColorPickerView::commit(&mut picker, "#ff0000"));
        assert_eq!(picker.value(), "#ff0000");
        assert!(ColorPickerView::commit(&mut picker, "0,0,255"));
        assert_eq!(picker.value(), "#0000ff");
        assert!(ColorPickerView::commit(&mut picker, "50%"));
        assert_eq!(picker.value(), "rgba(0, 0, 255, 0.5)");
    }
}
