//! Reset-to-default affordance shown next to a field.

/// Tracks a field's current and default values.
///
/// Only visible while they differ. Activating it hands back the default,
/// which the owning field then loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetButton {
    default: String,
    current: String,
}

impl ResetButton {
    pub fn new(default: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            current: current.into(),
        }
    }

    pub fn default_value(&self) -> &str {
        &self.default
    }

    pub fn is_visible(&self) -> bool {
        self.current != self.default
    }

    pub fn set_current(&mut self, value: impl Into<String>) {
        self.current = value.into();
    }

    /// Value to load into the field. Fires even when hidden.
    pub fn activate(&self) -> String {
        self.default.clone()
    }
}
