//! Form preview activity - shows the submitted form and generated stylesheet.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use crossterm_actions::{NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Frame, Terminal,
    crossterm::event::{self, Event as TermEvent, KeyCode},
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tracing::warn;
use tuirealm::{
    Application, Component, Event, EventListenerCfg, MockComponent, PollStrategy, State,
    StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection, Position},
    event::{Key, MouseEventKind},
    props::{AttrValue, Attribute, Props},
};

use crate::tui::Model;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{FORM_PREVIEW_FOOTER_ACTIONS, format_footer, render_help};
use crate::tui::highlighting::Highlighter;
use crate::tui::{AppAction, dispatcher, handle_global_app_events};

const PAGE_UP: &str = "page-up";
const PAGE_DOWN: &str = "page-down";

// ============================================================================
// Component identifiers (scoped to FormPreviewActivity)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    CodeView,
}

// ============================================================================
// Messages (scoped to FormPreviewActivity)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    Back,
    ShowHelp,
    NextOutput,
    PrevOutput,
    Scrolled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

/// One rendering of the current form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Json,
    Yaml,
    Stylesheet,
}

impl Output {
    pub const ALL: [Output; 3] = [Output::Json, Output::Yaml, Output::Stylesheet];

    pub fn display_name(self) -> &'static str {
        match self {
            Output::Json => "Form Data (JSON)",
            Output::Yaml => "Form Data (YAML)",
            Output::Stylesheet => "Stylesheet",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Output::Json => "json",
            Output::Yaml => "yaml",
            Output::Stylesheet => "css",
        }
    }

    /// Source text for this output.
    pub fn render(self, model: &Model) -> String {
        let text = match self {
            Output::Json => model.form.to_json().map_err(|e| e.to_string()),
            Output::Yaml => model.form.to_yaml().map_err(|e| e.to_string()),
            Output::Stylesheet => Ok(model.stylesheet()),
        };
        match text {
            Ok(text) if text.trim().is_empty() => "/* empty */".to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, output = ?self, "failed to render form");
                format!("/* {e} */")
            }
        }
    }
}

// ============================================================================
// CodeView Component
// ============================================================================

/// Colors for the code view from the highlighting theme.
struct CodeViewColors {
    background: Color,
    gutter_fg: Color,
    border: Color,
}

/// Scrollable, line-numbered code pane.
struct CodeView {
    props: Props,
    lines: Vec<Line<'static>>,
    scroll: usize,
    visible_height: usize,
    colors: CodeViewColors,
}

impl CodeView {
    fn new(colors: CodeViewColors, lines: Vec<Line<'static>>) -> Self {
        Self {
            props: Props::default(),
            lines,
            scroll: 0,
            visible_height: 20,
            colors,
        }
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.visible_height)
    }

    fn page(&self) -> usize {
        self.visible_height.saturating_sub(1).max(1)
    }

    fn scroll_up(&mut self, by: usize) {
        self.scroll = self.scroll.saturating_sub(by);
    }

    fn scroll_down(&mut self, by: usize) {
        self.scroll = (self.scroll + by).min(self.max_scroll());
    }

    fn scrolled(&mut self, cmd: Cmd) -> Option<Msg> {
        match self.perform(cmd) {
            CmdResult::Changed(_) => Some(Msg::Scrolled),
            _ => None,
        }
    }
}

impl MockComponent for CodeView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let bg_style = Style::default().bg(self.colors.background);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(bg_style.fg(self.colors.border))
            .style(bg_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let gutter = Style::default()
            .fg(self.colors.gutter_fg)
            .bg(self.colors.background);
        let visible_lines: Vec<Line> = self
            .lines
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(self.visible_height)
            .map(|(i, line)| {
                let mut spans = vec![Span::styled(format!("{:4} ", i + 1), gutter)];
                spans.extend(line.spans.clone());
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(visible_lines).style(bg_style), inner);

        if self.lines.len() > self.visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
            let mut state = ScrollbarState::new(self.max_scroll()).position(self.scroll);
            frame.render_stateful_widget(scrollbar, area, &mut state);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(self.scroll))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        let before = self.scroll;
        match cmd {
            Cmd::Scroll(CmdDirection::Up) => self.scroll_up(1),
            Cmd::Scroll(CmdDirection::Down) => self.scroll_down(1),
            Cmd::Custom(PAGE_UP) => self.scroll_up(self.page()),
            Cmd::Custom(PAGE_DOWN) => self.scroll_down(self.page()),
            Cmd::GoTo(Position::Begin) => self.scroll = 0,
            Cmd::GoTo(Position::End) => self.scroll = self.max_scroll(),
            _ => return CmdResult::None,
        }
        if self.scroll == before {
            CmdResult::None
        } else {
            CmdResult::Changed(self.state())
        }
    }
}

impl Component<Msg, UserEvent> for CodeView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let key_event = match ev {
            Event::Keyboard(key_event) => key_event,
            Event::Mouse(mouse) => {
                return match mouse.kind {
                    MouseEventKind::ScrollUp => self.scrolled(Cmd::Scroll(CmdDirection::Up)),
                    MouseEventKind::ScrollDown => self.scrolled(Cmd::Scroll(CmdDirection::Down)),
                    _ => None,
                };
            }
            _ => return None,
        };

        // Keys the dispatcher leaves unmapped
        match key_event.code {
            Key::Esc => return Some(Msg::Back),
            Key::Home => return self.scrolled(Cmd::GoTo(Position::Begin)),
            Key::End => return self.scrolled(Cmd::GoTo(Position::End)),
            Key::PageUp => return self.scrolled(Cmd::Custom(PAGE_UP)),
            Key::PageDown => return self.scrolled(Cmd::Custom(PAGE_DOWN)),
            _ => {}
        }

        let action = dispatcher().dispatch(&key_event)?;
        match action {
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.scrolled(Cmd::Scroll(CmdDirection::Up))
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.scrolled(Cmd::Scroll(CmdDirection::Down))
            }

            // Output switching (Tab/Shift+Tab)
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::NextOutput),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::PrevOutput),

            other => match handle_global_app_events(&other)? {
                super::Msg::Quit => Some(Msg::Quit),
                super::Msg::ShowHelp => Some(Msg::ShowHelp),
                // The preview key toggles back
                super::Msg::SwitchToFormPreview => Some(Msg::Back),
                _ => None,
            },
        }
    }
}

// ============================================================================
// FormPreviewActivity
// ============================================================================

#[derive(Default)]
pub struct FormPreviewActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
    highlighter: Highlighter,
    current: usize,
    needs_clear: bool,
}

impl FormPreviewActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    fn output(&self) -> Output {
        Output::ALL[self.current % Output::ALL.len()]
    }

    fn code_view(&self) -> CodeView {
        let colors = CodeViewColors {
            background: self.highlighter.background_color(),
            gutter_fg: self.highlighter.gutter_color(),
            border: Color::DarkGray,
        };
        let lines = self
            .context
            .as_ref()
            .map(|context| {
                let output = self.output();
                self.highlighter
                    .highlight(&output.render(&context.model), output.extension())
            })
            .unwrap_or_default();
        CodeView::new(colors, lines)
    }

    fn mount_code_view(&mut self) {
        let code_view = self.code_view();
        if let Some(ref mut app) = self.app {
            let _ = app.umount(&Id::CodeView);
            let _ = app.mount(Id::CodeView, Box::new(code_view), vec![]);
            let _ = app.active(&Id::CodeView);
        }
    }

    fn switch(&mut self, forward: bool) {
        let len = Output::ALL.len();
        self.current = if forward {
            (self.current + 1) % len
        } else {
            (self.current + len - 1) % len
        };
        self.needs_clear = true;
        self.mount_code_view();
    }
}

impl Activity for FormPreviewActivity {
    fn on_create(&mut self, context: Context) {
        self.context = Some(context);
        self.app = Some(Self::create_application());
        self.mount_code_view();
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        // Force full redraw when switching outputs to prevent ghost text
        if self.needs_clear {
            terminal.clear()?;
            self.needs_clear = false;
        }

        let output = self.output();
        let model = &mut self
            .context
            .as_mut()
            .ok_or_else(|| eyre!("form preview drawn without context"))?
            .model;
        let app = self
            .app
            .as_mut()
            .ok_or_else(|| eyre!("form preview drawn without application"))?;

        terminal.draw(|frame| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Title
                    Constraint::Min(3),    // Code
                    Constraint::Length(1), // Status
                ])
                .split(frame.area());

            let title = format!(" Form Preview - [{}]", output.display_name());
            frame.render_widget(
                Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD)),
                rows[0],
            );

            app.view(&Id::CodeView, frame, rows[1]);

            let status = model.message.clone().unwrap_or_else(|| {
                format_footer(FORM_PREVIEW_FOOTER_ACTIONS, &[("back", "Esc")])
            });
            frame.render_widget(
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM)),
                rows[2],
            );

            if model.show_help {
                render_help(frame);
            }
        })?;

        // Handle help modal events separately (intercepts all input when visible)
        if model.show_help {
            if let TermEvent::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                        model.show_help = false;
                    }
                    _ => {}
                }
            }
            return Ok(());
        }

        // Process events through tui-realm
        let Ok(messages) = app.tick(PollStrategy::Once) else {
            // Timeout, continue
            return Ok(());
        };
        for msg in messages {
            match msg {
                Msg::Quit => {
                    self.exit_reason = Some(ExitReason::Quit);
                    return Ok(());
                }
                Msg::Back => {
                    self.exit_reason = Some(ExitReason::SwitchToMain);
                    return Ok(());
                }
                Msg::ShowHelp => {
                    if let Some(context) = self.context.as_mut() {
                        context.model.show_help = true;
                    }
                }
                Msg::NextOutput => self.switch(true),
                Msg::PrevOutput => self.switch(false),
                Msg::Scrolled => {
                    // Already handled in component
                }
            }
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuirealm::event::{KeyEvent, KeyModifiers};

    fn code_view(lines: usize) -> CodeView {
        let colors = CodeViewColors {
            background: Color::Reset,
            gutter_fg: Color::Reset,
            border: Color::Reset,
        };
        let mut code = CodeView::new(colors, (0..lines).map(|i| Line::from(i.to_string())).collect());
        code.visible_height = 3;
        code
    }

    #[test]
    fn switching_wraps_through_outputs() {
        let mut activity = FormPreviewActivity::default();
        assert_eq!(activity.output(), Output::Json);
        activity.switch(false);
        assert_eq!(activity.output(), Output::Stylesheet);
        activity.switch(true);
        activity.switch(true);
        assert_eq!(activity.output(), Output::Yaml);
    }

    #[test]
    fn scroll_is_bounded_by_content() {
        let mut code = code_view(5);
        code.perform(Cmd::GoTo(Position::End));
        assert_eq!(code.state(), State::One(StateValue::Usize(2)));
        assert_eq!(code.perform(Cmd::Custom(PAGE_DOWN)), CmdResult::None);
        code.perform(Cmd::Scroll(CmdDirection::Up));
        assert_eq!(code.scroll, 1);
    }

    #[test]
    fn keys_scroll_and_go_back() {
        let mut code = code_view(10);
        let key = |k| Event::Keyboard(KeyEvent::new(k, KeyModifiers::NONE));

        assert_eq!(code.on(key(Key::PageDown)), Some(Msg::Scrolled));
        assert_eq!(code.scroll, 2);
        assert_eq!(code.on(key(Key::Home)), Some(Msg::Scrolled));
        assert_eq!(code.scroll, 0);
        // Already at the top
        assert_eq!(code.on(key(Key::Home)), None);
        assert_eq!(code.on(key(Key::Esc)), Some(Msg::Back));
    }
}
