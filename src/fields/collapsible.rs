//! Accordion section grouping other widgets.

use super::{Field, FieldError, FieldKind, HiddenInput};

pub const DEFAULT_TITLE: &str = "Section";

#[derive(Debug, Clone, PartialEq)]
pub struct CollapsibleSection {
    name: String,
    pub title: String,
    pub icon: Option<String>,
    open: bool,
    /// Names of the widgets shown while open
    children: Vec<String>,
}

impl CollapsibleSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: DEFAULT_TITLE.to_string(),
            icon: None,
            open: true,
            children: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn push_child(&mut self, name: impl Into<String>) {
        self.children.push(name.into());
    }

    pub fn remove_child(&mut self, name: &str) {
        self.children.retain(|child| child != name);
    }

    /// Flip open state and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns whether anything changed.
    pub fn open(&mut self) -> bool {
        !self.open && self.toggle()
    }

    /// Returns whether anything changed.
    pub fn close(&mut self) -> bool {
        self.open && !self.toggle()
    }
}

impl Field for CollapsibleSection {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Collapsible
    }

    fn value(&self) -> String {
        if self.open { "open" } else { "closed" }.to_string()
    }

    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        self.open = match value {
            "open" | "1" | "true" => true,
            "closed" | "0" | "false" => false,
            _ => return Err(FieldError::invalid(&self.name, value, "expected open or closed")),
        };
        Ok(())
    }

    fn hidden_inputs(&self) -> Vec<HiddenInput> {
        Vec::new()
    }
}
