//! Help modal component displaying keybindings.

use crossterm_actions::{AppEvent, InputEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::{AppAction, dispatcher};

/// Actions to display in a keybinding group.
struct KeybindingGroup {
    title: &'static str,
    actions: &'static [AppAction],
}

/// Groups of actions for the help modal, with semantic organization.
const HELP_GROUPS: &[KeybindingGroup] = &[
    KeybindingGroup {
        title: "Global",
        actions: &[
            AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
            AppAction::Tui(TuiEvent::App(AppEvent::Help)),
            AppAction::Tui(TuiEvent::App(AppEvent::Refresh)),
            AppAction::NextDevice,
        ],
    },
    KeybindingGroup {
        title: "Views",
        actions: &[AppAction::FormPreview],
    },
    KeybindingGroup {
        title: "Focus Navigation",
        actions: &[
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)),
        ],
    },
    KeybindingGroup {
        title: "Component Navigation",
        actions: &[
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)),
            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)),
            AppAction::Tui(TuiEvent::Input(InputEvent::Cancel)),
        ],
    },
    KeybindingGroup {
        title: "Field Editing",
        actions: &[
            AppAction::Reset,
            AppAction::ToggleState,
            AppAction::ToggleLink,
            AppAction::Play,
            AppAction::Clear,
            AppAction::NextSwatch,
        ],
    },
    KeybindingGroup {
        title: "Value Adjustment",
        actions: &[
            AppAction::ValueDecrementSmall,
            AppAction::ValueIncrementSmall,
            AppAction::ValueDecrementLarge,
            AppAction::ValueIncrementLarge,
            AppAction::CycleUnit,
        ],
    },
];

/// Extra keybindings not in dispatcher (component-specific behaviors).
/// Format: (description, keys)
const EXTRA_BINDINGS: &[(&str, &str)] = &[
    ("Export form", "Ctrl+s"),
    ("Toggle / open", "Space"),
    ("Min / max", "Home/End"),
    ("Scroll panel", "PgUp/PgDn"),
    ("Type a number", "0-9, then Enter"),
    ("Type a color", "#hex, r,g,b or n%"),
    ("Search options", "type while open"),
    ("Indent in CSS editor", "Tab"),
    ("Leave CSS editor", "Esc"),
    ("Reset slider", "double-click value"),
];

/// Actions shown in the main activity footer.
pub const MAIN_FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
    AppAction::Reset,
    AppAction::FormPreview,
    AppAction::Tui(TuiEvent::App(AppEvent::Help)),
    AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
];

/// Actions shown in the form preview footer.
pub const FORM_PREVIEW_FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
    AppAction::FormPreview,
    AppAction::Tui(TuiEvent::App(AppEvent::Help)),
    AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
];

/// Format a footer string from a list of actions.
/// Format: "desc: key | desc: key" (description first, single key binding)
pub fn format_footer(actions: &[AppAction], extras: &[(&str, &str)]) -> String {
    let help_entries = dispatcher().config().help_entries();
    let mut parts: Vec<String> = Vec::new();

    for action in actions {
        if let Some(entry) = help_entries.get(action)
            && let (Some(key), Some(desc)) = (entry.keys.first(), entry.description)
        {
            let short_desc = desc
                .split_whitespace()
                .next()
                .unwrap_or(desc)
                .to_lowercase();
            parts.push(format!("{short_desc}: {key}"));
        }
    }

    for (desc, key) in extras {
        parts.push(format!("{desc}: {key}"));
    }

    parts.join(" | ")
}

/// Calculate a centered popup area with given width/height percentages.
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

fn help_lines() -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::Gray);

    let mut lines = vec![
        Line::from(Span::styled("Keybindings", bold)),
        Line::from(""),
    ];

    let help_entries = dispatcher().config().help_entries();

    for group in HELP_GROUPS {
        lines.push(Line::from(Span::styled(group.title, bold)));
        for action in group.actions {
            if let Some(entry) = help_entries.get(action) {
                let keys_str = entry
                    .keys
                    .iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let desc = entry.description.unwrap_or("(no description)");
                lines.push(Line::from(vec![
                    Span::raw(format!("  {desc:<22}")),
                    Span::styled(keys_str, dim),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("Field Keys", bold)));
    for (description, keys) in EXTRA_BINDINGS {
        lines.push(Line::from(vec![
            Span::raw(format!("  {description:<22}")),
            Span::styled(*keys, dim),
        ]));
    }
    lines
}

/// Render the help modal overlay.
pub fn render_help(frame: &mut Frame) {
    let area = popup_area(frame.area(), 60, 80);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Split inner area: content at top, footer at bottom
    let layout = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);

    frame.render_widget(Paragraph::new(help_lines()), layout[0]);

    let footer = Paragraph::new(Line::from(Span::styled(
        "Press Esc, ?, or Enter to close",
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_uses_first_word_of_description() {
        let footer = format_footer(&[AppAction::Reset], &[("scroll", "PgUp/PgDn")]);
        assert!(footer.starts_with("reset: "), "{footer}");
        assert!(footer.ends_with(" | scroll: PgUp/PgDn"), "{footer}");
    }

    #[test]
    fn panel_actions_are_bound() {
        let help_entries = dispatcher().config().help_entries();
        for group in HELP_GROUPS {
            for action in group.actions {
                if matches!(action, AppAction::Tui(_)) {
                    continue;
                }
                assert!(help_entries.get(action).is_some(), "{action:?} unbound");
            }
        }
    }
}
