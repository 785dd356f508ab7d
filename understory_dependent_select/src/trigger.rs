// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change triggers: attach a "reload" submit button to an arbitrary select control.
//!
//! A change trigger marks a control so the client side can recognize it, and
//! places a companion submit button next to it named `{control}{suffix}`. When
//! the host dispatches that button, the actions registered on it run. The
//! helper is independent of dependent selects and works for any action payload.
//!
//! ```rust
//! use understory_dependent_select::{ChangeTrigger, TriggerStyle};
//! use understory_form::Form;
//!
//! let mut form = Form::<&str>::new("f");
//! let country = form.add_select(form.root(), "country", "Country").unwrap();
//!
//! let style = TriggerStyle::default();
//! let trigger = ChangeTrigger::new(&form, country, &style).unwrap();
//! let button = trigger.on_change(&mut form, "reload-states", &style).unwrap();
//!
//! assert_eq!(form.lookup_button("country_submit"), Some(button));
//! assert!(form.select(country).classes().contains("dependentControl"));
//! assert!(!form.button(button).validation_scope());
//! assert_eq!(form.button(button).actions(), &["reload-states"]);
//! ```

use alloc::format;
use alloc::string::{String, ToString};

use understory_form::{ButtonId, ComponentRef, ContainerId, Form, SelectId};

use crate::error::Error;

/// Naming and markup used for change-trigger buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TriggerStyle {
    /// Class added to the watched control. The button gets this class
    /// followed by `button_suffix`.
    pub control_class: String,
    /// Suffix appended to the control name to name the button.
    pub button_suffix: String,
    /// Label of the button.
    pub button_label: String,
}

impl Default for TriggerStyle {
    fn default() -> Self {
        Self {
            control_class: "dependentControl".into(),
            button_suffix: "_submit".into(),
            button_label: "Load".into(),
        }
    }
}

/// A change trigger for one select control.
///
/// Creating the trigger validates that the control sits in a container;
/// [`on_change`](Self::on_change) then creates (or reuses) the companion
/// button and registers an action on it.
#[derive(Clone, Debug)]
pub struct ChangeTrigger {
    control: SelectId,
    container: ContainerId,
    button_name: String,
}

impl ChangeTrigger {
    /// Prepares a trigger for `control`.
    ///
    /// Fails with [`Error::Detached`] if the control is not attached to a
    /// container, with [`Error::TriggerNameTaken`] if the button name is used
    /// by a component that is not a button, and with [`Error::Form`] if the
    /// button name is not a valid component name.
    pub fn new<A>(form: &Form<A>, control: SelectId, style: &TriggerStyle) -> Result<Self, Error> {
        let (Some(container), Some(name)) = (
            form.container_of(control.into()),
            form.name_of(control.into()),
        ) else {
            return Err(Error::Detached {
                control: form.select(control).label().to_string(),
            });
        };
        let button_name = format!("{name}{}", style.button_suffix);
        match form.child(container, &button_name) {
            Some(ComponentRef::Button(_)) => {}
            Some(_) => return Err(Error::TriggerNameTaken { name: button_name }),
            None => form.check_name(container, &button_name)?,
        }
        Ok(Self {
            control,
            container,
            button_name,
        })
    }

    /// Returns the watched control.
    #[must_use]
    pub fn control(&self) -> SelectId {
        self.control
    }

    pub(crate) fn container(&self) -> ContainerId {
        self.container
    }

    /// Returns the name of the companion button.
    #[must_use]
    pub fn button_name(&self) -> &str {
        &self.button_name
    }

    /// Returns the companion button, once it exists.
    #[must_use]
    pub fn button<A>(&self, form: &Form<A>) -> Option<ButtonId> {
        match form.child(self.container, &self.button_name)? {
            ComponentRef::Button(id) => Some(id),
            _ => None,
        }
    }

    /// Registers `action` to run when the control's change is submitted.
    ///
    /// The first registration creates the button: validation is turned off for
    /// it, it gets the trigger class and an explicit HTML id. Later
    /// registrations append to the same button.
    pub fn on_change<A>(
        &self,
        form: &mut Form<A>,
        action: A,
        style: &TriggerStyle,
    ) -> Result<ButtonId, Error> {
        form.select_mut(self.control)
            .classes_mut()
            .add(&style.control_class);

        let button = match self.button(form) {
            Some(button) => button,
            None => {
                let label = style.button_label.as_str();
                let id = form.add_button(self.container, &self.button_name, label)?;
                let html_id = form.html_id(id.into());
                let button = form.button_mut(id);
                button.set_validation_scope(false);
                button
                    .classes_mut()
                    .add(&format!("{}{}", style.control_class, style.button_suffix));
                if let Some(html_id) = html_id {
                    button.set_html_id(html_id);
                }
                id
            }
        };
        form.button_mut(button).push_action(action);
        Ok(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_form::FormError;

    #[test]
    fn detached_control_is_rejected() {
        let mut form = Form::<u8>::new("f");
        let loose = form.create_select("Loose");
        let err = ChangeTrigger::new(&form, loose, &TriggerStyle::default()).unwrap_err();
        assert_eq!(
            err,
            Error::Detached {
                control: "Loose".into()
            }
        );
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn name_clash_with_non_button_is_rejected() {
        let mut form = Form::<u8>::new("f");
        let root = form.root();
        let country = form.add_select(root, "country", "Country").unwrap();
        form.add_select(root, "country_submit", "Oops").unwrap();

        let err = ChangeTrigger::new(&form, country, &TriggerStyle::default()).unwrap_err();
        assert_eq!(
            err,
            Error::TriggerNameTaken {
                name: "country_submit".into()
            }
        );
    }

    #[test]
    fn invalid_button_name_is_rejected_up_front() {
        let mut form = Form::<u8>::new("f");
        let country = form.add_select(form.root(), "country", "Country").unwrap();
        let style = TriggerStyle {
            button_suffix: "-reload".into(),
            ..TriggerStyle::default()
        };

        let err = ChangeTrigger::new(&form, country, &style).unwrap_err();
        assert_eq!(
            err,
            Error::Form(FormError::InvalidName("country-reload".into()))
        );
        assert!(form.select(country).classes().is_empty());
    }

    #[test]
    fn second_registration_reuses_the_button() {
        let mut form = Form::<u8>::new("f");
        let root = form.root();
        let inner = form.add_container(root, "addr").unwrap();
        let country = form.add_select(inner, "country", "Country").unwrap();
        let style = TriggerStyle::default();

        let first = ChangeTrigger::new(&form, country, &style)
            .unwrap()
            .on_change(&mut form, 1, &style)
            .unwrap();
        let second = ChangeTrigger::new(&form, country, &style)
            .unwrap()
            .on_change(&mut form, 2, &style)
            .unwrap();

        assert_eq!(first, second);
        let button = form.button(first);
        assert_eq!(button.actions(), &[1, 2]);
        assert_eq!(button.html_id(), Some("frm-f-addr-country_submit"));
        assert!(button.classes().contains("dependentControl_submit"));
        assert_eq!(form.select(country).classes().iter().count(), 1);
    }

    #[test]
    fn custom_style_names_the_button() {
        let mut form = Form::<u8>::new("f");
        let country = form.add_select(form.root(), "country", "Country").unwrap();
        let style = TriggerStyle {
            control_class: "watch".into(),
            button_suffix: "_reload".into(),
            button_label: "Reload".into(),
        };
        let trigger = ChangeTrigger::new(&form, country, &style).unwrap();
        assert_eq!(trigger.control(), country);
        assert_eq!(trigger.button_name(), "country_reload");
        assert_eq!(trigger.button(&form), None);

        let button = trigger.on_change(&mut form, 0, &style).unwrap();
        assert_eq!(trigger.button(&form), Some(button));
        assert_eq!(form.button(button).label(), "Reload");
        assert!(form.select(country).classes().contains("watch"));
    }
}
