// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The form: a tree of named containers, select controls and buttons.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::control::{SelectControl, SubmitButton};
use crate::error::FormError;

/// Separator between component names in a path such as `address-country`.
pub const PATH_SEPARATOR: char = '-';

macro_rules! component_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "arena sizes stay far below u32::MAX"
            )]
            const fn new(idx: usize) -> Self {
                Self(idx as u32)
            }

            const fn idx(self) -> usize {
                self.0 as usize
            }
        }
    };
}

component_id! {
    /// Handle of a container within a [`Form`].
    ContainerId
}

component_id! {
    /// Handle of a [`SelectControl`] within a [`Form`].
    SelectId
}

component_id! {
    /// Handle of a [`SubmitButton`] within a [`Form`].
    ButtonId
}

/// Any component of a [`Form`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComponentRef {
    /// A container.
    Container(ContainerId),
    /// A select control.
    Select(SelectId),
    /// A submit button.
    Button(ButtonId),
}

impl From<ContainerId> for ComponentRef {
    fn from(id: ContainerId) -> Self {
        Self::Container(id)
    }
}

impl From<SelectId> for ComponentRef {
    fn from(id: SelectId) -> Self {
        Self::Select(id)
    }
}

impl From<ButtonId> for ComponentRef {
    fn from(id: ButtonId) -> Self {
        Self::Button(id)
    }
}

/// Name and position of a component in the tree.
#[derive(Clone, Debug, Default)]
struct Slot {
    name: Option<String>,
    parent: Option<ContainerId>,
}

#[derive(Clone, Debug, Default)]
struct ContainerSlot {
    slot: Slot,
    children: Vec<ComponentRef>,
    by_name: HashMap<String, ComponentRef>,
}

#[derive(Clone, Debug)]
struct Slotted<T> {
    slot: Slot,
    component: T,
}

/// A form component tree.
///
/// Components live in typed arenas and are addressed by copyable handles
/// ([`ContainerId`], [`SelectId`], [`ButtonId`]). Handles stay valid for the
/// life of the form; components are never removed individually.
///
/// Select controls can be created detached and attached later, which mirrors
/// hosts that construct a control before placing it. They can also be detached
/// again. Containers and buttons are
/// always created attached.
///
/// `A` is the action payload carried by submit buttons.
///
/// ```rust
/// use understory_form::{ComponentRef, Form, Items};
///
/// let mut form = Form::<()>::new("order");
/// let address = form.add_container(form.root(), "address").unwrap();
/// let country = form.add_select(address, "country", "Country").unwrap();
/// form.select_mut(country).set_items(Items::from([("cz", "Czechia")]));
///
/// assert_eq!(form.path_of(country.into()).as_deref(), Some("address-country"));
/// assert_eq!(form.lookup("address-country"), Some(ComponentRef::Select(country)));
/// assert_eq!(form.html_id(country.into()).as_deref(), Some("frm-order-address-country"));
/// ```
pub struct Form<A> {
    name: String,
    containers: Vec<ContainerSlot>,
    selects: Vec<Slotted<SelectControl>>,
    buttons: Vec<Slotted<SubmitButton<A>>>,
}

impl<A> fmt::Debug for Form<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name)
            .field("containers", &self.containers.len())
            .field("selects", &self.selects.len())
            .field("buttons", &self.buttons.len())
            .finish()
    }
}

impl<A> Form<A> {
    /// Creates a form with an empty root container.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            containers: alloc::vec![ContainerSlot::default()],
            selects: Vec::new(),
            buttons: Vec::new(),
        }
    }

    /// Returns the form name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the root container.
    #[must_use]
    pub const fn root(&self) -> ContainerId {
        ContainerId::new(0)
    }

    /// Creates a container named `name` inside `parent`.
    pub fn add_container(
        &mut self,
        parent: ContainerId,
        name: &str,
    ) -> Result<ContainerId, FormError> {
        self.check_name(parent, name)?;
        let id = ContainerId::new(self.containers.len());
        self.containers.push(ContainerSlot::default());
        self.link(parent, name, id.into());
        Ok(id)
    }

    /// Creates a select control named `name` inside `parent`.
    pub fn add_select(
        &mut self,
        parent: ContainerId,
        name: &str,
        label: impl Into<String>,
    ) -> Result<SelectId, FormError> {
        self.check_name(parent, name)?;
        let id = self.create_select(label);
        self.link(parent, name, id.into());
        Ok(id)
    }

    /// Creates a select control that is not attached to any container yet.
    pub fn create_select(&mut self, label: impl Into<String>) -> SelectId {
        let id = SelectId::new(self.selects.len());
        self.selects.push(Slotted {
            slot: Slot::default(),
            component: SelectControl::new(label),
        });
        id
    }

    /// Attaches a detached select control to `parent` under `name`.
    pub fn attach_select(
        &mut self,
        parent: ContainerId,
        name: &str,
        id: SelectId,
    ) -> Result<(), FormError> {
        if let Some(existing) = &self.selects[id.idx()].slot.name {
            return Err(FormError::AlreadyAttached(existing.clone()));
        }
        self.check_name(parent, name)?;
        self.link(parent, name, id.into());
        Ok(())
    }

    /// Detaches a select control from its container, keeping its state.
    ///
    /// Returns `false` if the control was not attached.
    pub fn detach_select(&mut self, id: SelectId) -> bool {
        let slot = core::mem::take(&mut self.selects[id.idx()].slot);
        let (Some(name), Some(parent)) = (slot.name, slot.parent) else {
            return false;
        };
        let container = &mut self.containers[parent.idx()];
        container.by_name.remove(&name);
        container
            .children
            .retain(|&child| child != ComponentRef::Select(id));
        true
    }

    /// Creates a submit button named `name` inside `parent`.
    pub fn add_button(
        &mut self,
        parent: ContainerId,
        name: &str,
        label: impl Into<String>,
    ) -> Result<ButtonId, FormError> {
        self.check_name(parent, name)?;
        let id = ButtonId::new(self.buttons.len());
        self.buttons.push(Slotted {
            slot: Slot::default(),
            component: SubmitButton::new(label),
        });
        self.link(parent, name, id.into());
        Ok(id)
    }

    /// Checks that a new component could be named `name` inside `parent`.
    ///
    /// Fails with [`FormError::InvalidName`] or [`FormError::DuplicateName`].
    pub fn check_name(&self, parent: ContainerId, name: &str) -> Result<(), FormError> {
        if name.is_empty() || name.contains(PATH_SEPARATOR) {
            return Err(FormError::InvalidName(name.to_string()));
        }
        if self.containers[parent.idx()].by_name.contains_key(name) {
            return Err(FormError::DuplicateName {
                container: self.path_of(parent.into()).unwrap_or_default(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn link(&mut self, parent: ContainerId, name: &str, child: ComponentRef) {
        let slot = self.slot_mut(child);
        slot.name = Some(name.to_string());
        slot.parent = Some(parent);
        let container = &mut self.containers[parent.idx()];
        container.children.push(child);
        container.by_name.insert(name.to_string(), child);
    }

    fn slot(&self, component: ComponentRef) -> &Slot {
        match component {
            ComponentRef::Container(id) => &self.containers[id.idx()].slot,
            ComponentRef::Select(id) => &self.selects[id.idx()].slot,
            ComponentRef::Button(id) => &self.buttons[id.idx()].slot,
        }
    }

    fn slot_mut(&mut self, component: ComponentRef) -> &mut Slot {
        match component {
            ComponentRef::Container(id) => &mut self.containers[id.idx()].slot,
            ComponentRef::Select(id) => &mut self.selects[id.idx()].slot,
            ComponentRef::Button(id) => &mut self.buttons[id.idx()].slot,
        }
    }

    /// Returns the select control for `id`.
    #[must_use]
    pub fn select(&self, id: SelectId) -> &SelectControl {
        &self.selects[id.idx()].component
    }

    /// Returns the select control for `id` for modification.
    pub fn select_mut(&mut self, id: SelectId) -> &mut SelectControl {
        &mut self.selects[id.idx()].component
    }

    /// Returns the button for `id`.
    #[must_use]
    pub fn button(&self, id: ButtonId) -> &SubmitButton<A> {
        &self.buttons[id.idx()].component
    }

    /// Returns the button for `id` for modification.
    pub fn button_mut(&mut self, id: ButtonId) -> &mut SubmitButton<A> {
        &mut self.buttons[id.idx()].component
    }

    /// Returns the component's own name, or `None` for the root and detached controls.
    #[must_use]
    pub fn name_of(&self, component: ComponentRef) -> Option<&str> {
        self.slot(component).name.as_deref()
    }

    /// Returns the container holding `component`.
    #[must_use]
    pub fn container_of(&self, component: ComponentRef) -> Option<ContainerId> {
        self.slot(component).parent
    }

    /// Returns the child of `container` called `name`.
    #[must_use]
    pub fn child(&self, container: ContainerId, name: &str) -> Option<ComponentRef> {
        self.containers[container.idx()].by_name.get(name).copied()
    }

    /// Returns the children of `container` in attachment order.
    #[must_use]
    pub fn children(&self, container: ContainerId) -> &[ComponentRef] {
        &self.containers[container.idx()].children
    }

    /// Returns the path from the root, e.g. `address-country`.
    ///
    /// The root's path is the empty string. Detached controls have no path.
    #[must_use]
    pub fn path_of(&self, component: ComponentRef) -> Option<String> {
        let mut names: Vec<&str> = Vec::new();
        let mut current = component;
        loop {
            let slot = self.slot(current);
            match (slot.parent, slot.name.as_deref()) {
                (Some(parent), Some(name)) => {
                    names.push(name);
                    current = parent.into();
                }
                _ if current == ComponentRef::Container(self.root()) => break,
                _ => return None,
            }
        }
        names.reverse();
        Some(names.join("-"))
    }

    /// Returns the HTML id of an attached component: `frm-{form}-{path}`.
    #[must_use]
    pub fn html_id(&self, component: ComponentRef) -> Option<String> {
        let path = self.path_of(component)?;
        Some(alloc::format!("frm-{}-{path}", self.name))
    }

    /// Resolves a path such as `address-country`.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<ComponentRef> {
        let mut current = ComponentRef::Container(self.root());
        for name in path.split(PATH_SEPARATOR) {
            let ComponentRef::Container(container) = current else {
                return None;
            };
            current = self.child(container, name)?;
        }
        Some(current)
    }

    /// Resolves a path to a select control.
    #[must_use]
    pub fn lookup_select(&self, path: &str) -> Option<SelectId> {
        match self.lookup(path)? {
            ComponentRef::Select(id) => Some(id),
            _ => None,
        }
    }

    /// Resolves a path to a submit button.
    #[must_use]
    pub fn lookup_button(&self, path: &str) -> Option<ButtonId> {
        match self.lookup(path)? {
            ComponentRef::Button(id) => Some(id),
            _ => None,
        }
    }

    /// Assigns submitted raw values to select controls by path.
    ///
    /// Paths that do not name a select control are skipped. Returns the number
    /// of controls updated.
    pub fn load_values<'v>(
        &mut self,
        values: impl IntoIterator<Item = (&'v str, &'v str)>,
    ) -> usize {
        let mut loaded = 0;
        for (path, value) in values {
            let Some(id) = self.lookup_select(path) else {
                tracing::debug!(path, "skipping submitted value without a select control");
                continue;
            };
            self.select_mut(id).set_value(Some(value));
            loaded += 1;
        }
        tracing::debug!(form = %self.name, loaded, "loaded submitted values");
        loaded
    }
}
