//! Interactive property panel.
//!
//! Architecture: activity-based with tui-realm for components. Each screen
//! (activity) has its own Application instance and message type; the model
//! holds the registry and form shared between screens.

mod activities;
mod activity;
mod components;
mod highlighting;
mod model;

use std::io::stdout;
use std::sync::LazyLock;

use color_eyre::eyre::Result;
use crossterm_actions::{
    ActionBinding, ActionConfig, AppEvent, EditingMode, SelectionEvent, TuiEvent,
    TuiRealmDispatcher, defaults, keys,
};
use ratatui::{
    Terminal,
    crossterm::ExecutableCommand,
    crossterm::event::{DisableMouseCapture, EnableMouseCapture},
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    prelude::CrosstermBackend,
};
use tracing::info;

use crate::config::PanelConfig;
use crate::registry::Registry;

pub use highlighting::{Highlighter, SYNTAX_SET};
pub use model::Model;

use activities::Msg;
use activity::{ActivityManager, Context};

// ============================================================================
// Event handling (shared across activities)
// ============================================================================

/// Unified application events - wraps TuiEvent + panel actions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AppAction {
    /// Standard TUI events (navigation, input, selection, app)
    Tui(TuiEvent),
    /// Switch to the form preview screen
    FormPreview,
    /// Cycle the panel's responsive device
    NextDevice,
    /// Restore the focused field's default
    Reset,
    /// Increment value by small step
    ValueIncrementSmall,
    /// Decrement value by small step
    ValueDecrementSmall,
    /// Increment value by large step (10x)
    ValueIncrementLarge,
    /// Decrement value by large step (10x)
    ValueDecrementLarge,
    CycleUnit,
    /// Normal / hover state switch
    ToggleState,
    /// Link or unlink spacing sides
    ToggleLink,
    /// Run the animation preview
    Play,
    /// Clear a color
    Clear,
    /// Next preset swatch
    NextSwatch,
}

/// Global dispatcher instance - shared by all components.
pub static DISPATCHER: LazyLock<TuiRealmDispatcher<AppAction>> = LazyLock::new(|| {
    let mut config = ActionConfig::new(EditingMode::Emacs);

    // Import all standard TuiEvent bindings wrapped in AppAction::Tui
    for binding in defaults::emacs_defaults().bindings() {
        config.bind(ActionBinding {
            action: AppAction::Tui(binding.action),
            keys: binding.keys.clone(),
            description: binding.description.clone(),
        });
    }

    let bindings = [
        (AppAction::FormPreview, 'v', "View form output"),
        (AppAction::NextDevice, 'd', "Next device"),
        (AppAction::Reset, 'r', "Reset to default"),
        (AppAction::ValueDecrementSmall, '[', "Decrease value"),
        (AppAction::ValueIncrementSmall, ']', "Increase value"),
        (AppAction::ValueDecrementLarge, '{', "Decrease value (10x)"),
        (AppAction::ValueIncrementLarge, '}', "Increase value (10x)"),
        (AppAction::CycleUnit, 'u', "Cycle unit"),
        (AppAction::ToggleState, 'h', "Normal / hover"),
        (AppAction::ToggleLink, 'l', "Link spacing sides"),
        (AppAction::Play, 'p', "Play animation"),
        (AppAction::Clear, 'x', "Clear color"),
        (AppAction::NextSwatch, 's', "Next swatch"),
    ];
    for (app_action, key, description) in bindings {
        config.bind(
            ActionBinding::builder()
                .action(app_action)
                .key(keys::char(key))
                .description(description)
                .build(),
        );
    }

    config.compile();
    TuiRealmDispatcher::new(config)
});

/// Convenience function for components to access the dispatcher.
pub fn dispatcher() -> &'static TuiRealmDispatcher<AppAction> {
    &DISPATCHER
}

/// Handle global application events that are common across all components.
/// Returns Some(Msg) if the action was handled, None otherwise.
pub fn handle_global_app_events(action: &AppAction) -> Option<Msg> {
    match action {
        AppAction::Tui(TuiEvent::App(AppEvent::Quit)) => Some(Msg::Quit),
        AppAction::Tui(TuiEvent::App(AppEvent::Help)) => Some(Msg::ShowHelp),
        AppAction::Tui(TuiEvent::App(AppEvent::Refresh)) => Some(Msg::Regenerate),
        AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
        AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),
        AppAction::FormPreview => Some(Msg::SwitchToFormPreview),
        AppAction::NextDevice => Some(Msg::NextDevice),
        _ => None,
    }
}

// ============================================================================
// TUI entry point
// ============================================================================

/// Run the interactive panel editor on an already-built registry.
pub fn run(config: PanelConfig, registry: Registry) -> Result<()> {
    info!(fields = registry.len(), title = %config.panel.title, "starting panel editor");

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let model = Model::new(config, registry);

    // Create context and activity manager
    let context = Context { model };
    let mut manager = ActivityManager::new(context);

    // Run the activity loop
    let result = manager.run(&mut terminal);

    // Cleanup terminal
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    if let Some(form) = manager.into_context().map(|c| c.model.form)
        && let Ok(json) = form.to_json()
    {
        info!(inputs = form.len(), "panel editor closed");
        println!("{json}");
    }

    result
}
