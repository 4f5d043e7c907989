//! On/off switch.

use super::{Field, FieldError, FieldKind};

/// A boolean switch, submitted as `"1"` / `"0"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Toggle {
    name: String,
    pub label: String,
    checked: bool,
    pub disabled: bool,
}

impl Toggle {
    pub fn new(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            checked,
            disabled: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Flip the switch. Disabled switches ignore this.
    ///
    /// Returns whether the state changed.
    pub fn toggle(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.checked = !self.checked;
        true
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

impl Field for Toggle {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Toggle
    }

    fn value(&self) -> String {
        if self.checked { "1" } else { "0" }.to_string()
    }

    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        self.checked = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => true,
            "0" | "false" | "off" | "no" | "" => false,
            _ => return Err(FieldError::invalid(&self.name, value, "expected 1/0, true/false or on/off")),
        };
        Ok(())
    }
}
