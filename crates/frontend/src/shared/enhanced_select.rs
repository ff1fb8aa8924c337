//! Capability surface of a selection control.
//!
//! Row logic pushes options and values through [`EnhancedSelect`] and
//! receives user choices as [`SelectionEvent`]s, whether the control on
//! screen is a plain `<select>` or the searchable dropdown.

use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub trait EnhancedSelect {
    /// Replace the offered options
    fn set_options(&self, options: Vec<SelectOption>);

    /// Currently selected value; `None` when the placeholder is shown
    fn value(&self) -> Option<String>;

    /// Select a value without emitting a selection event
    fn set_value(&self, value: Option<String>);
}

/// User interaction reported by a selection control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Selected(String),
    Cleared,
}

impl SelectionEvent {
    /// Map a raw `<select>` value; the placeholder option has an empty value
    pub fn from_control_value(raw: String) -> Self {
        if raw.trim().is_empty() {
            SelectionEvent::Cleared
        } else {
            SelectionEvent::Selected(raw)
        }
    }

    /// Value to hand to id parsing; empty for a cleared control
    pub fn into_value(self) -> String {
        match self {
            SelectionEvent::Selected(value) => value,
            SelectionEvent::Cleared => String::new(),
        }
    }
}

/// Reactive state shared by a selection control and the logic driving it
#[derive(Clone, Copy)]
pub struct SelectHandle {
    options: RwSignal<Vec<SelectOption>>,
    value: RwSignal<String>,
}

impl SelectHandle {
    pub fn new() -> Self {
        Self {
            options: RwSignal::new(Vec::new()),
            value: RwSignal::new(String::new()),
        }
    }

    pub fn options_signal(&self) -> Signal<Vec<SelectOption>> {
        let options = self.options;
        Signal::derive(move || options.get())
    }

    pub fn value_signal(&self) -> Signal<String> {
        let value = self.value;
        Signal::derive(move || value.get())
    }

    /// Label of the selected option, if any
    pub fn selected_label(&self) -> Signal<Option<String>> {
        let options = self.options;
        let value = self.value;
        Signal::derive(move || {
            let current = value.get();
            options.with(|opts| {
                opts.iter()
                    .find(|o| o.value == current)
                    .map(|o| o.label.clone())
            })
        })
    }
}

impl Default for SelectHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl EnhancedSelect for SelectHandle {
    fn set_options(&self, options: Vec<SelectOption>) {
        self.options.set(options);
    }

    fn value(&self) -> Option<String> {
        let current = self.value.get_untracked();
        if current.is_empty() {
            None
        } else {
            Some(current)
        }
    }

    fn set_value(&self, value: Option<String>) {
        self.value.set(value.unwrap_or_default());
    }
}

/// Case-insensitive substring match on option labels
pub fn filter_options(options: &[SelectOption], query: &str) -> Vec<SelectOption> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return options.to_vec();
    }
    options
        .iter()
        .filter(|o| o.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
