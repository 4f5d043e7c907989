//! Single-line text input.

use super::{Field, FieldError, FieldKind};

/// Plain string field with a character cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    name: String,
    value: String,
    pub placeholder: String,
    default: Option<String>,
    /// Cursor position in chars, `0..=len`
    cursor: usize,
}

impl TextInput {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self {
            name: name.into(),
            value,
            placeholder: String::new(),
            default: None,
            cursor,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Delete before the cursor. Returns whether anything was removed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    /// Delete under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.value = text.into();
        self.cursor = self.value.chars().count();
    }
}

impl Field for TextInput {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Text
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        self.set_text(value);
        Ok(())
    }

    fn default_value(&self) -> Option<String> {
        self.default.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_cursor_with_multibyte_text() {
        let mut input = TextInput::new("t", "héllo");
        input.home();
        input.move_right();
        input.move_right();
        input.backspace();
        assert_eq!(input.text(), "hllo");
        input.insert('é');
        assert_eq!(input.text(), "héllo");
        assert_eq!(input.cursor(), 2);
        input.end();
        assert!(!input.delete());
    }
}
