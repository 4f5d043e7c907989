//! Searchable dropdown.
//!
//! Keyboard model:
//! - Down opens a closed dropdown, otherwise moves the highlight down
//! - Up moves the highlight up (never above the first option)
//! - Enter picks the highlighted option, or toggles when nothing is highlighted
//! - Escape closes

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Choice, Field, FieldError, FieldKind};

pub const DEFAULT_PLACEHOLDER: &str = "Select...";

/// Labelled block of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceGroup {
    pub label: String,
    pub options: Vec<Choice>,
}

/// Keys the dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKey {
    Down,
    Up,
    Enter,
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    name: String,
    value: String,
    pub placeholder: String,
    options: Vec<Choice>,
    groups: Option<Vec<ChoiceGroup>>,
    pub searchable: bool,
    default: Option<String>,

    open: bool,
    query: String,
    highlighted: Option<usize>,
    /// Indices into `options` matching `query`
    filtered: Vec<usize>,
}

impl Select {
    pub fn new(name: impl Into<String>, options: Vec<Choice>) -> Self {
        let filtered = (0..options.len()).collect();
        Self {
            name: name.into(),
            value: String::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            options,
            groups: None,
            searchable: true,
            default: None,
            open: false,
            query: String::new(),
            highlighted: None,
            filtered,
        }
    }

    /// Build from labelled groups. The flat option list is the groups in order.
    pub fn grouped(name: impl Into<String>, groups: Vec<ChoiceGroup>) -> Self {
        let options = groups.iter().flat_map(|g| g.options.clone()).collect();
        let mut select = Self::new(name, options);
        select.groups = Some(groups);
        select
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn options(&self) -> &[Choice] {
        &self.options
    }

    pub fn groups(&self) -> Option<&[ChoiceGroup]> {
        self.groups.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Options currently visible in the dropdown.
    pub fn visible_options(&self) -> impl Iterator<Item = &Choice> {
        self.filtered.iter().map(|&i| &self.options[i])
    }

    pub fn visible_len(&self) -> usize {
        self.filtered.len()
    }

    /// Visible options split by group label. Ungrouped selects yield one
    /// unlabeled block; empty groups are skipped.
    pub fn visible_groups(&self) -> Vec<(Option<&str>, Vec<&Choice>)> {
        let visible: Vec<&Choice> = self.visible_options().collect();
        match &self.groups {
            None => vec![(None, visible)],
            Some(groups) => groups
                .iter()
                .map(|group| {
                    let members = visible
                        .iter()
                        .copied()
                        .filter(|choice| group.options.contains(choice))
                        .collect::<Vec<_>>();
                    (Some(group.label.as_str()), members)
                })
                .filter(|(_, members)| !members.is_empty())
                .collect(),
        }
    }

    /// Label of the selected option, or the placeholder.
    pub fn display(&self) -> &str {
        self.selected_option()
            .map(|choice| choice.label.as_str())
            .unwrap_or(&self.placeholder)
    }

    pub fn shows_placeholder(&self) -> bool {
        self.selected_option().is_none()
    }

    pub fn selected_option(&self) -> Option<&Choice> {
        self.options.iter().find(|choice| choice.value == self.value)
    }

    pub fn open(&mut self) {
        self.open = true;
        self.highlighted = None;
        if self.searchable {
            self.query.clear();
            self.refilter();
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Filter by case-insensitive label substring.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.refilter();
    }

    pub fn push_query(&mut self, c: char) {
        if !self.searchable {
            return;
        }
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_query(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        let needle = self.query.to_lowercase();
        self.filtered = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, choice)| choice.label.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.highlighted = None;
    }

    /// Pick an option by value and close. Always counts as a change.
    pub fn select(&mut self, value: &str) {
        debug!(field = %self.name, value, "select option");
        self.value = value.to_string();
        self.close();
    }

    /// Pick the n-th visible option.
    pub fn select_visible(&mut self, index: usize) -> bool {
        match self.filtered.get(index).map(|&i| self.options[i].value.clone()) {
            Some(value) => {
                self.select(&value);
                true
            }
            None => false,
        }
    }

    /// Apply a navigation key. Returns whether an option was selected.
    pub fn key(&mut self, key: SelectKey) -> bool {
        match key {
            SelectKey::Down => {
                if !self.open {
                    self.open();
                } else {
                    let last = self.filtered.len().checked_sub(1);
                    self.highlighted = match (self.highlighted, last) {
                        (_, None) => None,
                        (None, Some(_)) => Some(0),
                        (Some(h), Some(last)) => Some((h + 1).min(last)),
                    };
                }
                false
            }
            SelectKey::Up => {
                self.highlighted = Some(self.highlighted.map_or(0, |h| h.saturating_sub(1)));
                false
            }
            SelectKey::Enter => match self.highlighted {
                Some(h) if self.open => self.select_visible(h),
                _ => {
                    self.toggle();
                    false
                }
            },
            SelectKey::Escape => {
                self.close();
                false
            }
        }
    }
}

impl Field for Select {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Select
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    /// Any text is accepted; unknown values render as the placeholder.
    fn load(&mut self, value: &str) -> Result<(), FieldError> {
        self.value = value.to_string();
        Ok(())
    }

    fn default_value(&self) -> Option<String> {
        self.default.clone()
    }
}
