//! Main activity - the property panel editing screen.

use std::io::Stdout;
use std::time::{Duration, Instant};

use color_eyre::eyre::{Result, eyre};
use ratatui::{
    Frame, Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Direction, Layout, Margin, Rect},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tracing::{debug, error};
use tuirealm::{
    Application, EventListenerCfg, PollStrategy, Sub, SubClause, SubEventClause, Update,
    props::{AttrValue, Attribute},
};

use crate::fields::{AnyField, Device, Field, TooltipTrigger};
use crate::registry::{Entry, Registry};
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{
    LABEL_WIDTH, MAIN_FOOTER_ACTIONS, dim, for_field, format_footer, render_help, render_tooltip,
};

/// Rows moved per scroll step.
const SCROLL_STEP: u16 = 3;

/// Tooltip gap and margin are configured in pixels; one cell is taken as this many.
const CELL_PX: f64 = 8.0;

// ============================================================================
// Component identifiers (scoped to MainActivity)
// ============================================================================

/// One component per registry entry, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Id {
    Field(String),
}

// ============================================================================
// Messages (scoped to MainActivity)
// ============================================================================

/// All possible messages that can be sent in MainActivity.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Application control
    Quit,
    ShowHelp,
    HideHelp,

    // Focus/Navigation
    FocusNext,
    FocusPrev,
    Focus(String),

    // A component's edited copy of its widget
    Edited(Box<AnyField>),

    // Pointer entered or left a field
    Hover { name: String, inside: bool },

    // Responsive device
    DeviceChanged(Device),
    NextDevice,

    // Reset button on the named field
    Reset(String),

    // Status line text
    Status(String),

    // Export flow
    DoExport,

    // Field list scroll
    ScrollUp,
    ScrollDown,

    // Rebuild the form from every widget
    Regenerate,

    // Activity transition
    SwitchToFormPreview,

    None,
}

// ============================================================================
// User events (required by tui-realm, currently unused)
// ============================================================================

/// Custom user events (currently unused, but required by tui-realm).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// Focus management (scoped to MainActivity)
// ============================================================================

/// Manages focus state for Tab navigation over the visible fields.
#[derive(Debug, Default)]
pub struct FocusManager {
    order: Vec<String>,
    current_idx: usize,
}

impl FocusManager {
    /// Replace the focus order, staying on the same field when it is still
    /// visible.
    pub fn set_order(&mut self, order: Vec<String>) {
        let current = self.current_focus().map(str::to_string);
        self.order = order;
        self.current_idx = current
            .and_then(|name| self.order.iter().position(|n| *n == name))
            .unwrap_or_else(|| self.current_idx.min(self.order.len().saturating_sub(1)));
    }

    /// Get the currently focused field name.
    pub fn current_focus(&self) -> Option<&str> {
        self.order.get(self.current_idx).map(String::as_str)
    }

    pub fn focus_next(&mut self) -> Option<&str> {
        if !self.order.is_empty() {
            self.current_idx = (self.current_idx + 1) % self.order.len();
        }
        self.current_focus()
    }

    pub fn focus_prev(&mut self) -> Option<&str> {
        if !self.order.is_empty() {
            self.current_idx = (self.current_idx + self.order.len() - 1) % self.order.len();
        }
        self.current_focus()
    }

    /// Focus a field by name. Returns false when it is not in the order.
    pub fn focus(&mut self, name: &str) -> bool {
        match self.order.iter().position(|n| n == name) {
            Some(idx) => {
                self.current_idx = idx;
                true
            }
            None => false,
        }
    }
}

/// Entries shown right now: sections plus fields of open sections.
fn visible_names(registry: &Registry) -> Vec<String> {
    registry
        .iter()
        .filter(|entry| {
            entry.meta.section.as_deref().is_none_or(|section| {
                matches!(registry.get(section), Some(AnyField::Collapsible(c)) if c.is_open())
            })
        })
        .map(|entry| entry.name().to_string())
        .collect()
}

fn tooltip_trigger(entry: &Entry) -> Option<TooltipTrigger> {
    entry
        .meta
        .tooltip
        .as_ref()
        .map(|text| TooltipTrigger::new(entry.name(), text, entry.meta.tooltip_position))
}

// ============================================================================
// Field list layout
// ============================================================================

/// Scroll position plus where every field landed last frame.
#[derive(Default)]
struct FieldList {
    /// Full rect of every drawn entry
    areas: Vec<(String, Rect)>,
    scroll: u16,
    /// Bring the focused field into view on the next frame
    follow_focus: bool,
}

impl FieldList {
    fn anchor(&self, name: &str) -> Option<Rect> {
        self.areas
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rect)| Rect { height: 1, ..*rect })
    }

    fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        app: &mut Application<Id, Msg, UserEvent>,
        registry: &Registry,
        order: &[String],
        focused: Option<&str>,
    ) {
        let block = Block::default().title(" Fields ").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Measure
        let mut rows = Vec::with_capacity(order.len());
        let mut total = 0u16;
        for name in order {
            let Some(entry) = registry.entry(name) else {
                continue;
            };
            let body = match app.query(&Id::Field(name.clone()), Attribute::Height) {
                Ok(Some(AttrValue::Size(height))) => height,
                _ => 1,
            };
            let height = body + u16::from(entry.meta.description.is_some());
            rows.push((entry, total, body, height));
            total = total.saturating_add(height);
        }

        if self.follow_focus {
            if let Some((_, top, _, height)) = rows
                .iter()
                .find(|(entry, ..)| Some(entry.name()) == focused)
            {
                if *top < self.scroll {
                    self.scroll = *top;
                } else if top + height > self.scroll + inner.height {
                    self.scroll = (top + height).saturating_sub(inner.height);
                }
            }
            self.follow_focus = false;
        }
        self.scroll = self.scroll.min(total.saturating_sub(inner.height));

        self.areas.clear();
        for (entry, top, body, height) in rows {
            if top < self.scroll || top + height > self.scroll + inner.height {
                continue;
            }
            let name = entry.name();
            let y = inner.y + top - self.scroll;
            app.view(
                &Id::Field(name.to_string()),
                frame,
                Rect::new(inner.x, y, inner.width, body),
            );

            if let Some(description) = &entry.meta.description {
                let line = Rect::new(
                    inner.x + LABEL_WIDTH,
                    y + body,
                    inner.width.saturating_sub(LABEL_WIDTH),
                    1,
                );
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        description.clone(),
                        dim().add_modifier(Modifier::ITALIC),
                    )),
                    line,
                );
            }
            self.areas
                .push((name.to_string(), Rect::new(inner.x, y, inner.width, height)));
        }

        // Off-screen components must not claim pointer events
        for entry in registry.iter() {
            let shown = self.areas.iter().any(|(name, _)| name == entry.name());
            let _ = app.attr(
                &Id::Field(entry.name().to_string()),
                Attribute::Display,
                AttrValue::Flag(shown),
            );
        }

        if total > inner.height {
            let mut state = ScrollbarState::new(usize::from(total.saturating_sub(inner.height)))
                .position(usize::from(self.scroll));
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut state,
            );
        }
    }
}

// ============================================================================
// MainActivity
// ============================================================================

/// The main panel editing activity.
#[derive(Default)]
pub struct MainActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    list: FieldList,
    focus: FocusManager,
    /// Field the application has active
    active: Option<String>,
    hovered: Option<String>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl MainActivity {
    /// Create and configure the tui-realm application.
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    /// Mount one component per registry entry.
    ///
    /// Every component subscribes to all events: keys only reach the focused
    /// one, pointer events go to whichever field they land on.
    fn mount_components(app: &mut Application<Id, Msg, UserEvent>, registry: &Registry) -> Result<()> {
        for entry in registry.iter() {
            app.mount(
                Id::Field(entry.name().to_string()),
                for_field(entry.field.clone(), entry.meta.clone()),
                vec![Sub::new(SubEventClause::Any, SubClause::Always)],
            )?;
        }
        Ok(())
    }

    /// Remount every field after the model changed widgets on its own.
    fn sync_all_components(app: &mut Application<Id, Msg, UserEvent>, registry: &Registry) {
        for entry in registry.iter() {
            let _ = app.umount(&Id::Field(entry.name().to_string()));
        }
        if let Err(e) = Self::mount_components(app, registry) {
            error!("Failed to remount components: {}", e);
        }
    }

    /// Make the application's active component match the focus manager.
    fn sync_focus(&mut self, force: bool) {
        let current = self.focus.current_focus().map(str::to_string);
        if !force && current == self.active {
            return;
        }
        if let (Some(app), Some(name)) = (self.app.as_mut(), current.as_ref()) {
            let _ = app.active(&Id::Field(name.clone()));
        }
        if current != self.active {
            self.focus_changed(current.as_deref());
        }
        self.active = current;
    }

    /// Show the tooltip of the field gaining focus.
    fn focus_changed(&mut self, current: Option<&str>) {
        self.list.follow_focus = true;
        let Some(model) = self.context.as_mut().map(|c| &mut c.model) else {
            return;
        };
        match current
            .and_then(|name| model.registry.entry(name))
            .and_then(tooltip_trigger)
        {
            Some(trigger) => model.tooltip.focus(trigger),
            None => model.tooltip.blur(),
        }
        debug!(focus = ?current, "focus changed");
    }

    fn on_hover(&mut self, name: &str, inside: bool) {
        let Some(model) = self.context.as_mut().map(|c| &mut c.model) else {
            return;
        };
        let now = Instant::now();
        if inside {
            if let Some(trigger) = model.registry.entry(name).and_then(tooltip_trigger) {
                model.tooltip.hover_enter(trigger, now);
            }
            self.hovered = Some(name.to_string());
        } else if self.hovered.as_deref() == Some(name) {
            // Leaving one field and entering the next can arrive in either order
            model.tooltip.hover_leave(now);
            self.hovered = None;
        }
    }

    /// Handle activity-level messages. Returns false when the activity exits.
    fn on_message(&mut self, msg: &Msg) -> bool {
        match msg {
            Msg::FocusNext => {
                self.focus.focus_next();
                self.sync_focus(false);
            }
            Msg::FocusPrev => {
                self.focus.focus_prev();
                self.sync_focus(false);
            }
            Msg::Focus(name) => {
                self.focus.focus(name);
                self.sync_focus(false);
            }
            // Keys only edit the focused field, so this came from the pointer
            Msg::Edited(field) if self.active.as_deref() != Some(field.name()) => {
                self.focus.focus(field.name());
                self.sync_focus(false);
            }
            Msg::Hover { name, inside } => self.on_hover(name, *inside),
            Msg::ScrollUp => self.list.scroll = self.list.scroll.saturating_sub(SCROLL_STEP),
            Msg::ScrollDown => self.list.scroll = self.list.scroll.saturating_add(SCROLL_STEP),
            Msg::SwitchToFormPreview => {
                self.exit_reason = Some(ExitReason::SwitchToFormPreview);
                return false;
            }
            Msg::Quit => {
                self.exit_reason = Some(ExitReason::Quit);
                return false;
            }
            _ => {}
        }
        true
    }
}

impl Activity for MainActivity {
    fn on_create(&mut self, context: Context) {
        let mut app = Self::create_application();
        if let Err(e) = Self::mount_components(&mut app, &context.model.registry) {
            error!("Failed to mount components: {}", e);
        }
        self.focus.set_order(visible_names(&context.model.registry));
        self.context = Some(context);
        self.app = Some(app);
        self.sync_focus(true);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let registry = &self
            .context
            .as_ref()
            .ok_or_else(|| eyre!("main activity drawn without context"))?
            .model
            .registry;
        self.focus.set_order(visible_names(registry));
        self.sync_focus(false);

        let app = self
            .app
            .as_mut()
            .ok_or_else(|| eyre!("main activity drawn without application"))?;
        let model = &mut self
            .context
            .as_mut()
            .ok_or_else(|| eyre!("main activity drawn without context"))?
            .model;
        model.tooltip.tick(Instant::now());

        let focused = self.focus.current_focus().map(str::to_string);
        let order = self.focus.order.clone();
        let list = &mut self.list;

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            let main_rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Title
                    Constraint::Min(3),    // Fields
                    Constraint::Length(1), // Status
                ])
                .split(area);

            // Title bar
            let title = Line::from(vec![
                Span::raw(format!(" {} ", model.config.panel.title)),
                Span::styled(format!("- {} ", model.device.label()), dim()),
            ]);
            frame.render_widget(
                Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD)),
                main_rows[0],
            );

            list.draw(frame, main_rows[1], app, &model.registry, &order, focused.as_deref());

            // Status bar
            let status = model
                .message
                .clone()
                .unwrap_or_else(|| format_footer(MAIN_FOOTER_ACTIONS, &[("adjust", "[]/{}")]));
            let status_widget =
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status_widget, main_rows[2]);

            // Tooltip overlay
            if let Some(trigger) = model.tooltip.visible()
                && let Some(anchor) = list.anchor(&trigger.anchor)
            {
                let tooltip = &model.config.tooltip;
                render_tooltip(
                    frame,
                    trigger,
                    anchor,
                    tooltip.gap / CELL_PX,
                    tooltip.margin / CELL_PX,
                );
            }

            // Help modal overlay
            if model.show_help {
                render_help(frame);
            }
        })?;

        // Handle help modal events separately (intercepts all input when visible)
        if model.show_help {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                        model.show_help = false;
                    }
                    _ => {}
                }
            }
            return Ok(());
        }

        // Use tick() - the canonical tui-realm heartbeat
        let Ok(messages) = app.tick(PollStrategy::Once) else {
            // Timeout is fine, just continue
            return Ok(());
        };

        let mut needs_sync = false;
        for msg in messages {
            if !self.on_message(&msg) {
                return Ok(());
            }
            let Some(context) = self.context.as_mut() else {
                break;
            };

            // Process through model, handle chained messages
            let mut current = Some(msg);
            while let Some(m) = current {
                if matches!(
                    m,
                    Msg::Reset(_) | Msg::DeviceChanged(_) | Msg::NextDevice | Msg::Regenerate
                ) {
                    needs_sync = true;
                }
                current = context.model.update(Some(m));
            }
        }

        // Widgets changed behind their components' backs
        if needs_sync
            && let (Some(app), Some(context)) = (self.app.as_mut(), self.context.as_ref())
        {
            Self::sync_all_components(app, &context.model.registry);
            // Restore focus after remounting
            self.sync_focus(true);
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
    use crate::config::PanelConfig;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut focus = FocusManager::default();
        focus.set_order(names(&["a", "b", "c"]));
        assert_eq!(focus.current_focus(), Some("a"));
        assert_eq!(focus.focus_prev(), Some("c"));
        assert_eq!(focus.focus_next(), Some("a"));
        assert_eq!(focus.focus_next(), Some("b"));
    }

    #[test]
    fn focus_survives_reordering() {
        let mut focus = FocusManager::default();
        focus.set_order(names(&["a", "b", "c"]));
        focus.focus("c");
        focus.set_order(names(&["x", "c"]));
        assert_eq!(focus.current_focus(), Some("c"));
        focus.set_order(names(&["x"]));
        assert_eq!(focus.current_focus(), Some("x"));
    }

    #[test]
    fn closed_sections_hide_their_fields() {
        let config = PanelConfig::builtin();
        let registry = Registry::from_config(&config).unwrap();
        let visible = visible_names(&registry);
        assert!(visible.contains(&"section-2".to_string()));
        assert!(visible.contains(&"heading".to_string()));
        assert!(!visible.contains(&"custom_css".to_string()));
    }
}
