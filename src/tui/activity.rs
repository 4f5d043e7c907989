//! Activity-based architecture for the TUI.
//!
//! Each screen in the TUI is an Activity with its own components and message
//! type. The ActivityManager orchestrates transitions.

use std::io::Stdout;

use color_eyre::eyre::{Result, eyre};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::debug;

use super::Model;
use super::activities::{FormPreviewActivity, MainActivity};

/// Shared context passed between activities.
pub struct Context {
    pub model: Model,
}

/// Exit reasons for activity transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitReason {
    Quit,
    SwitchToMain,
    SwitchToFormPreview,
}

/// Activity lifecycle trait.
pub trait Activity {
    /// Initialize the activity with context from the manager.
    fn on_create(&mut self, context: Context);

    /// Draw the UI and handle one tick of events.
    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()>;

    /// Check if activity wants to exit. Returns Some(reason) to exit, None to continue.
    fn will_umount(&self) -> Option<&ExitReason>;

    /// Clean up and return the context to the manager.
    fn on_destroy(&mut self) -> Option<Context>;
}

/// Activity types available in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    Main,
    FormPreview,
}

/// Manages activity lifecycle and transitions.
pub struct ActivityManager {
    context: Option<Context>,
    current: ActivityType,
}

impl ActivityManager {
    pub fn new(context: Context) -> Self {
        Self {
            context: Some(context),
            current: ActivityType::Main,
        }
    }

    /// Context left after the loop ends, for reading the final form.
    pub fn into_context(self) -> Option<Context> {
        self.context
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            let mut activity: Box<dyn Activity> = match self.current {
                ActivityType::Main => Box::<MainActivity>::default(),
                ActivityType::FormPreview => Box::<FormPreviewActivity>::default(),
            };

            let context = self
                .context
                .take()
                .ok_or_else(|| eyre!("activity context lost during transition"))?;
            activity.on_create(context);
            debug!(activity = ?self.current, "activity created");

            loop {
                activity.on_draw(terminal)?;

                if let Some(reason) = activity.will_umount() {
                    let next = match reason {
                        ExitReason::Quit => None,
                        ExitReason::SwitchToMain => Some(ActivityType::Main),
                        ExitReason::SwitchToFormPreview => Some(ActivityType::FormPreview),
                    };
                    self.context = activity.on_destroy();
                    match next {
                        None => return Ok(()),
                        Some(next) => {
                            self.current = next;
                            break;
                        }
                    }
                }
            }
        }
    }
}
