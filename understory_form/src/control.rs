// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select controls and submit buttons.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::items::{ItemList, Items};

/// Returns `true` if `value` is in the empty value set: absent or `""`.
///
/// A control holding an empty value counts as "nothing selected".
#[must_use]
pub fn is_empty_value(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// Markup classes attached to a control.
///
/// Order is insertion order; adding a class twice is a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: SmallVec<[String; 2]>,
}

impl ClassList {
    /// Adds `class`. Returns `true` if it was not present yet.
    pub fn add(&mut self, class: &str) -> bool {
        if self.contains(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Removes `class`. Returns `true` if it was present.
    pub fn remove(&mut self, class: &str) -> bool {
        let Some(pos) = self.classes.iter().position(|c| c == class) else {
            return false;
        };
        self.classes.remove(pos);
        true
    }

    /// Returns `true` if `class` is present.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Iterates classes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.iter().map(String::as_str)
    }

    /// Returns `true` if no class is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// A dropdown control: ordered options, a current value and an optional prompt.
///
/// The raw value is kept as assigned, but [`value`](Self::value) only reports
/// it while it names one of the current items. Replacing the items therefore
/// never leaves a stale key selected.
///
/// The prompt is a placeholder entry rendered ahead of the items; it has no key,
/// so "selecting the prompt" means holding no value.
///
/// ```rust
/// use understory_form::{Items, SelectControl};
///
/// let mut country = SelectControl::new("Country");
/// country.set_items(Items::from([("us", "USA"), ("cz", "Czechia")]));
/// country.set_value(Some("cz"));
/// assert_eq!(country.value(), Some("cz"));
///
/// // Reloading with a disjoint set drops the selection.
/// country.set_items(Items::from([("de", "Germany")]));
/// assert_eq!(country.value(), None);
/// assert_eq!(country.raw_value(), Some("cz"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SelectControl {
    label: String,
    items: Items,
    value: Option<String>,
    prompt: Option<String>,
    classes: ClassList,
}

impl SelectControl {
    /// Creates an empty control with the given label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the current options.
    #[must_use]
    pub fn items(&self) -> &Items {
        &self.items
    }

    /// Replaces all options.
    ///
    /// Unkeyed lists use each label as its key.
    pub fn set_items(&mut self, items: impl Into<ItemList>) {
        self.items = items.into().into_keyed();
    }

    /// Returns the selected key, if the raw value names a current item.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value
            .as_deref()
            .filter(|value| self.items.contains_key(value))
    }

    /// Returns the value exactly as assigned.
    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Assigns the raw value. `None` selects the prompt.
    pub fn set_value(&mut self, value: Option<&str>) {
        self.value = value.map(ToString::to_string);
    }

    /// Returns `true` if a non-empty current item is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        !is_empty_value(self.value())
    }

    /// Returns the prompt label, if any.
    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Sets or clears the prompt label.
    pub fn set_prompt(&mut self, prompt: Option<&str>) {
        self.prompt = prompt.map(ToString::to_string);
    }

    /// Returns the markup classes.
    #[must_use]
    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Returns the markup classes for modification.
    pub fn classes_mut(&mut self) -> &mut ClassList {
        &mut self.classes
    }
}

/// A button that submits the form and carries the actions registered on it.
///
/// `A` is the host's action payload; the form never interprets it.
#[derive(Clone, Debug)]
pub struct SubmitButton<A> {
    label: String,
    classes: ClassList,
    html_id: Option<String>,
    validation_scope: bool,
    actions: Vec<A>,
}

impl<A> SubmitButton<A> {
    /// Creates a button with validation enabled and no actions.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            classes: ClassList::default(),
            html_id: None,
            validation_scope: true,
            actions: Vec::new(),
        }
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the markup classes.
    #[must_use]
    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Returns the markup classes for modification.
    pub fn classes_mut(&mut self) -> &mut ClassList {
        &mut self.classes
    }

    /// Returns the explicit HTML id, if one was set.
    #[must_use]
    pub fn html_id(&self) -> Option<&str> {
        self.html_id.as_deref()
    }

    /// Sets an explicit HTML id.
    pub fn set_html_id(&mut self, id: impl Into<String>) {
        self.html_id = Some(id.into());
    }

    /// Returns whether submitting through this button validates the form.
    #[must_use]
    pub fn validation_scope(&self) -> bool {
        self.validation_scope
    }

    /// Enables or disables validation for submissions through this button.
    pub fn set_validation_scope(&mut self, validate: bool) {
        self.validation_scope = validate;
    }

    /// Registers an action; actions run in registration order.
    pub fn push_action(&mut self, action: A) {
        self.actions.push(action);
    }

    /// Returns the registered actions in registration order.
    #[must_use]
    pub fn actions(&self) -> &[A] {
        &self.actions
    }
}
