// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forest-wide configuration.

use alloc::string::String;

use crate::trigger::TriggerStyle;

/// What happens to a dependent select whose parents have no value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CascadePolicy {
    /// Put it in the disabled state: no items, no value, disabled placeholder.
    ///
    /// Unselected nodes show an empty placeholder ahead of their items.
    #[default]
    DisableChildren,
    /// Keep it enabled and select its first item.
    ///
    /// No placeholders are shown; root controls must not carry a prompt.
    SelectFirst,
}

/// Configuration read by every state recomputation of a [`Forest`](crate::Forest).
///
/// Set once when the forest is created. Fields are public; the `with_*`
/// methods allow building a configuration in one expression.
///
/// ```rust
/// use understory_dependent_select::{CascadeConfig, CascadePolicy};
///
/// let config = CascadeConfig::default()
///     .with_policy(CascadePolicy::SelectFirst)
///     .with_auto_select_root_first_item(false);
/// assert_eq!(config.empty_item_title, "- - - - -");
/// assert!(!config.auto_select_root_first_item);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CascadeConfig {
    /// Disable-vs-select-first policy.
    pub policy: CascadePolicy,
    /// Placeholder label shown while nothing is selected.
    pub empty_item_title: String,
    /// Placeholder label shown while a node is disabled.
    pub disabled_item_title: String,
    /// Markup class added to disabled nodes.
    pub disabled_class: String,
    /// Select the first item of root controls that have no value when a
    /// dependent select is attached to them.
    pub auto_select_root_first_item: bool,
    /// Naming and classes used for change-trigger buttons.
    pub trigger: TriggerStyle,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            policy: CascadePolicy::default(),
            empty_item_title: "- - - - -".into(),
            disabled_item_title: "x x x x x".into(),
            disabled_class: "disabledControl".into(),
            auto_select_root_first_item: true,
            trigger: TriggerStyle::default(),
        }
    }
}

impl CascadeConfig {
    /// Sets the cascade policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CascadePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the placeholder label for unselected nodes.
    #[must_use]
    pub fn with_empty_item_title(mut self, title: impl Into<String>) -> Self {
        self.empty_item_title = title.into();
        self
    }

    /// Sets the placeholder label for disabled nodes.
    #[must_use]
    pub fn with_disabled_item_title(mut self, title: impl Into<String>) -> Self {
        self.disabled_item_title = title.into();
        self
    }

    /// Sets the markup class for disabled nodes.
    #[must_use]
    pub fn with_disabled_class(mut self, class: impl Into<String>) -> Self {
        self.disabled_class = class.into();
        self
    }

    /// Enables or disables root first-item auto-selection.
    #[must_use]
    pub fn with_auto_select_root_first_item(mut self, enabled: bool) -> Self {
        self.auto_select_root_first_item = enabled;
        self
    }

    /// Sets the change-trigger style.
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerStyle) -> Self {
        self.trigger = trigger;
        self
    }

    /// Returns `true` for [`CascadePolicy::DisableChildren`].
    #[must_use]
    pub fn disables_children(&self) -> bool {
        self.policy == CascadePolicy::DisableChildren
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: CascadeConfig =
            serde_json::from_str(r#"{ "policy": "select_first", "disabled_class": "off" }"#)
                .unwrap();
        assert_eq!(config.policy, CascadePolicy::SelectFirst);
        assert_eq!(config.disabled_class, "off");
        assert_eq!(config.empty_item_title, "- - - - -");
        assert_eq!(config.trigger, TriggerStyle::default());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = CascadeConfig::default().with_empty_item_title("--");
        let json = serde_json::to_string(&config).unwrap();
        let back: CascadeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
