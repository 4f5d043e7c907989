//! Exclusive choice rendered as a row of buttons.

use super::{Choice, Field, FieldError, FieldKind, choices};

/// Left / center / right / justify preset.
pub fn text_align_choices() -> Vec<Choice> {
    choices(&[
        ("left", "Align Left"),
        ("center", "Align Center"),
        ("right", "Align Right"),
        ("justify", "Justify"),
    ])
    .into_iter()
    .zip(["⇤", "↔", "⇥", "☰"])
    .map(|(choice, icon)| choice.with_icon(icon))
    .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonGroup {
    name: String,
    value: String,
    options: Vec<Choice>,
    default: Option<String>,
}

impl ButtonGroup {
    pub fn new(name: impl Into<String>, options: Vec<Choice>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            options,
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn options(&self) -> &[Choice] {
        &self.options
    }

    pub fn active_index(&self) -> Option<usize> {
        self.options.iter().position(|c| c.value == self.value)
    }

    /// Select a button by value. Always emits.
    pub fn select(&mut self, value: &str) {
        self.value = value.to_string();
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        match self.options.get(index) {
            Some(choice) => {
                self.value = choice.value.clone();
                true
            }
            None => false,
        }
    }

    /// Move the selection one button left, stopping at the first.
    pub fn move_left(&mut self) -> bool {
        match self.active_index() {
            Some(i) if i > 0 => self.select_index(i - 1),
            Some(_) => false,
            None => self.select_index(0),
        }
    }

    /// Move the selection one button right, stopping at the last.
    pub fn move_right(&mut self) -> bool {
        match self.active_index() {
            Some(i) if i + 1 < self.options.len() => self.select_index(i + 1),
            Some(_) => false,
            None => self.select_index(0),
        }
    }
}

impl Field for ButtonGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::ButtonGroup
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        self.value = value.to_string();
        Ok(())
    }

    fn default_value(&self) -> Option<String> {
        self.default.clone()
    }
}
