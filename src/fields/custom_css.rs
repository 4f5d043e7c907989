//! Per-target custom CSS editor.
//!
//! Value layout: `target key → normal/hover → desktop/tablet/mobile → CSS`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Device, Field, FieldError, FieldKind, PerDevice, StyleState};

const TAB: &str = "    ";

/// Element of the module that custom CSS can be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssTarget {
    pub key: String,
    pub label: String,
    pub selector: String,
}

impl CssTarget {
    pub fn new(key: impl Into<String>, label: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            selector: selector.into(),
        }
    }
}

pub fn default_css_targets() -> Vec<CssTarget> {
    vec![
        CssTarget::new("wrapper", "Wrapper", ".module-wrapper"),
        CssTarget::new("content", "Content", ".module-content"),
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateStyles {
    pub normal: PerDevice,
    pub hover: PerDevice,
}

impl StateStyles {
    pub fn get(&self, state: StyleState) -> &PerDevice {
        match state {
            StyleState::Normal => &self.normal,
            StyleState::Hover => &self.hover,
        }
    }

    pub fn get_mut(&mut self, state: StyleState) -> &mut PerDevice {
        match state {
            StyleState::Normal => &mut self.normal,
            StyleState::Hover => &mut self.hover,
        }
    }
}

pub type CustomCssValue = BTreeMap<String, StateStyles>;

#[derive(Debug, Clone, PartialEq)]
pub struct CustomCssField {
    name: String,
    targets: Vec<CssTarget>,
    value: CustomCssValue,
    active_target: usize,
    device: Device,
    state: StyleState,
    /// Cursor in chars within the active text
    cursor: usize,
}

impl CustomCssField {
    /// Every target gets an empty entry up front.
    pub fn new(name: impl Into<String>, targets: Vec<CssTarget>) -> Self {
        let targets = if targets.is_empty() {
            default_css_targets()
        } else {
            targets
        };
        let mut field = Self {
            name: name.into(),
            targets,
            value: CustomCssValue::new(),
            active_target: 0,
            device: Device::Desktop,
            state: StyleState::Normal,
            cursor: 0,
        };
        field.fill_targets();
        field
    }

    fn fill_targets(&mut self) {
        for target in &self.targets {
            self.value.entry(target.key.clone()).or_default();
        }
    }

    pub fn targets(&self) -> &[CssTarget] {
        &self.targets
    }

    pub fn styles(&self) -> &CustomCssValue {
        &self.value
    }

    pub fn active_target(&self) -> &CssTarget {
        &self.targets[self.active_target]
    }

    pub fn active_index(&self) -> usize {
        self.active_target
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn state(&self) -> StyleState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// CSS stored for a target in the active state and device. No fallback.
    pub fn css(&self, target: &str) -> &str {
        self.value
            .get(target)
            .map_or("", |styles| styles.get(self.state).raw(self.device))
    }

    pub fn active_css(&self) -> &str {
        self.css(&self.active_target().key)
    }

    pub fn select_target(&mut self, index: usize) -> bool {
        if index >= self.targets.len() {
            return false;
        }
        self.active_target = index;
        self.cursor_to_end();
        true
    }

    pub fn next_target(&mut self) -> bool {
        self.select_target((self.active_target + 1) % self.targets.len())
    }

    /// Switch normal / hover editing. Does not emit.
    pub fn toggle_state(&mut self) -> StyleState {
        self.state = self.state.toggled();
        self.cursor_to_end();
        self.state
    }

    pub fn set_state(&mut self, state: StyleState) {
        self.state = state;
        self.cursor_to_end();
    }

    /// Replace the CSS of `target` for the active state and device.
    pub fn set_css(&mut self, target: &str, css: impl Into<String>) {
        let (state, device) = (self.state, self.device);
        self.value
            .entry(target.to_string())
            .or_default()
            .get_mut(state)
            .set(device, css);
        debug!(field = %self.name, target, state = state.as_str(), device = %device, "css edited");
    }

    fn edit_active(&mut self, edit: impl FnOnce(&mut String, usize) -> usize) {
        let key = self.active_target().key.clone();
        let mut text = self.css(&key).to_string();
        let at = self.cursor.min(text.chars().count());
        self.cursor = edit(&mut text, at);
        self.set_css(&key, text);
    }

    pub fn insert(&mut self, c: char) {
        self.edit_active(|text, cursor| {
            text.insert(byte_index(text, cursor), c);
            cursor + 1
        });
    }

    /// Tab key: four spaces at the cursor.
    pub fn insert_tab(&mut self) {
        self.edit_active(|text, cursor| {
            text.insert_str(byte_index(text, cursor), TAB);
            cursor + TAB.len()
        });
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.edit_active(|text, cursor| {
            if cursor == 0 {
                return 0;
            }
            text.remove(byte_index(text, cursor - 1));
            cursor - 1
        });
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.active_css().chars().count());
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.active_css().chars().count();
    }
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}

impl Field for CustomCssField {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::CustomCss
    }

    fn value(&self) -> String {
        serde_json::to_string(&self.value).unwrap_or_default()
    }

    /// Replaces the whole value; configured targets missing from it start empty.
    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        self.value = serde_json::from_str(value)?;
        self.fill_targets();
        self.cursor_to_end();
        Ok(())
    }

    fn set_device(&mut self, device: Device) {
        self.device = device;
        self.cursor_to_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_index_handles_multibyte() {
        assert_eq!(byte_index("aé b", 2), 3);
        assert_eq!(byte_index("ab", 5), 2);
    }
}
