// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dependency forest: an arena of dependent selects over a host form.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;
use smallvec::SmallVec;
use understory_form::{ButtonId, ComponentRef, ContainerId, Form, Items, SelectControl, SelectId};

use crate::config::CascadeConfig;
use crate::error::Error;
use crate::node::{DependentSelect, Node, NodeId, ParentRef, SubmitCallback};
use crate::trigger::ChangeTrigger;

/// Owns a form, the dependent selects placed in it and the cascade configuration.
///
/// Nodes are stored in an arena indexed by [`NodeId`]. Parents are recorded on
/// each node in declaration order; child lists are filled in by the forest as
/// new nodes name an existing node as parent. The parent relation is expected
/// to be acyclic, which holds naturally because a node can only name parents
/// that already exist.
///
/// The submit buttons of the form carry [`NodeId`] actions: pressing a
/// change-trigger button through [`submit`](Self::submit) re-derives every
/// node registered on it.
pub struct Forest {
    pub(crate) form: Form<NodeId>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) config: CascadeConfig,
}

impl fmt::Debug for Forest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forest")
            .field("form", &self.form.name())
            .field("nodes", &self.nodes)
            .field("config", &self.config)
            .finish()
    }
}

impl Forest {
    /// Creates a forest over `form`.
    ///
    /// Controls already in the form can serve as root parents.
    #[must_use]
    pub fn new(form: Form<NodeId>, config: CascadeConfig) -> Self {
        Self {
            form,
            nodes: Vec::new(),
            config,
        }
    }

    /// Returns the form.
    #[must_use]
    pub fn form(&self) -> &Form<NodeId> {
        &self.form
    }

    /// Returns the form for editing root controls and layout.
    ///
    /// Changes made here are not propagated; call [`refresh`](Self::refresh)
    /// or dispatch a trigger afterwards.
    pub fn form_mut(&mut self) -> &mut Form<NodeId> {
        &mut self.form
    }

    /// Consumes the forest and returns the form.
    #[must_use]
    pub fn into_form(self) -> Form<NodeId> {
        self.form
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    /// Returns the number of dependent selects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no dependent select has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a dependent select named `name` to `container`.
    ///
    /// This auto-selects the first item of unselected root parents when
    /// configured to, computes the node's initial state and wires a change
    /// trigger onto every parent.
    ///
    /// Fails without touching the form when the builder has no loader or no
    /// parents, a parent is unknown, a root parent carries a prompt under
    /// [`CascadePolicy::SelectFirst`](crate::CascadePolicy::SelectFirst), or a
    /// parent cannot receive a trigger. If the initial load fails the select
    /// is detached again and root parents get their previous values back.
    pub fn add(
        &mut self,
        container: ContainerId,
        name: &str,
        select: DependentSelect,
    ) -> Result<NodeId, Error> {
        let DependentSelect {
            label,
            parents,
            loader,
            disabled_value,
            leave_first_empty,
            on_submit,
        } = select;

        let Some(loader) = loader else {
            return Err(Error::MissingLoader { label });
        };
        if parents.is_empty() {
            return Err(Error::NoParents { label });
        }
        for &parent in &parents {
            match parent {
                ParentRef::Dependent(id) => {
                    if id.idx() >= self.nodes.len() {
                        return Err(Error::UnknownNode(id));
                    }
                }
                ParentRef::Control(control) => {
                    if !self.config.disables_children()
                        && self.form.select(control).prompt().is_some()
                    {
                        return Err(Error::PromptOnRoot {
                            control: self.describe_control(control),
                        });
                    }
                }
            }
        }

        let mut triggers: SmallVec<[ChangeTrigger; 2]> = SmallVec::new();
        for &parent in &parents {
            let control = self.parent_control(parent);
            let trigger = ChangeTrigger::new(&self.form, control, &self.config.trigger)?;
            if trigger.container() == container && trigger.button_name() == name {
                return Err(Error::TriggerNameTaken {
                    name: name.to_string(),
                });
            }
            triggers.push(trigger);
        }

        let control = self.form.add_select(container, name, label)?;
        let id = NodeId::new(self.nodes.len());
        let root_values: SmallVec<[(SelectId, Option<String>); 2]> = parents
            .iter()
            .filter_map(|&parent| match parent {
                ParentRef::Control(control) => Some(control),
                ParentRef::Dependent(_) => None,
            })
            .map(|control| {
                let raw = self.form.select(control).raw_value().map(ToString::to_string);
                (control, raw)
            })
            .collect();
        self.nodes.push(Node {
            control,
            parents,
            children: Vec::new(),
            loader,
            on_submit,
            disabled: false,
            disabled_value,
            leave_first_empty,
        });

        self.auto_select_root_first_item(id);
        if let Err(err) = self.initialize_state(id) {
            tracing::debug!(control = %self.describe(id), %err, "rolling back dependent select");
            self.nodes.pop();
            self.form.detach_select(control);
            for (control, raw) in root_values {
                self.form.select_mut(control).set_value(raw.as_deref());
            }
            return Err(err);
        }

        for i in 0..self.nodes[id.idx()].parents.len() {
            if let ParentRef::Dependent(parent) = self.nodes[id.idx()].parents[i] {
                let children = &mut self.nodes[parent.idx()].children;
                if !children.contains(&id) {
                    children.push(id);
                }
            }
        }
        for trigger in &triggers {
            trigger.on_change(&mut self.form, id, &self.config.trigger)?;
        }
        tracing::debug!(node = ?id, control = %self.describe(id), "added dependent select");
        Ok(id)
    }

    /// Returns the select control backing `id`.
    #[must_use]
    pub fn control(&self, id: NodeId) -> SelectId {
        self.nodes[id.idx()].control
    }

    /// Returns the select control state of `id`.
    #[must_use]
    pub fn select(&self, id: NodeId) -> &SelectControl {
        self.form.select(self.control(id))
    }

    /// Returns the selected key of `id`, if any.
    #[must_use]
    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.select(id).value()
    }

    /// Returns the items currently offered by `id`.
    #[must_use]
    pub fn items(&self, id: NodeId) -> &Items {
        self.select(id).items()
    }

    /// Returns `true` while `id` is in the disabled state.
    #[must_use]
    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.nodes[id.idx()].disabled
    }

    /// Returns the parents of `id` in declaration order.
    #[must_use]
    pub fn parents(&self, id: NodeId) -> &[ParentRef] {
        &self.nodes[id.idx()].parents
    }

    /// Returns the direct children of `id` in the order they were added.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.idx()].children
    }

    /// Returns the selected key of a parent.
    #[must_use]
    pub fn parent_value(&self, parent: ParentRef) -> Option<&str> {
        self.form.select(self.parent_control(parent)).value()
    }

    /// Iterates every transitive child of `id` in pre-order.
    ///
    /// A node reachable through several parents is yielded once, at its first
    /// visit.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants::new(self, id)
    }

    /// Replaces the fixed items shown while `id` is disabled.
    ///
    /// If the node is disabled right now its presentation is updated at once.
    pub fn set_disabled_value(&mut self, id: NodeId, items: Option<Items>) -> Result<(), Error> {
        self.nodes[id.idx()].disabled_value = items;
        if self.nodes[id.idx()].disabled {
            self.disable_select_box(id)?;
        }
        Ok(())
    }

    /// Toggles the leading empty placeholder of `id` and refreshes it alone.
    pub fn set_leave_first_empty(&mut self, id: NodeId, leave: bool) -> Result<(), Error> {
        self.nodes[id.idx()].leave_first_empty = leave;
        self.refresh(id, false, false)
    }

    /// Registers a callback run whenever the change trigger of `id` fires.
    pub fn add_on_submit_callback(
        &mut self,
        id: NodeId,
        callback: impl FnMut(&Form<NodeId>) + 'static,
    ) {
        let callback: SubmitCallback = Box::new(callback);
        self.nodes[id.idx()].on_submit.push(callback);
    }

    /// Dispatches the submit button at `path`.
    ///
    /// Every node registered on the button is refreshed together with its
    /// subtree, then its change handling runs.
    pub fn submit(&mut self, path: &str) -> Result<(), Error> {
        let Some(button) = self.form.lookup_button(path) else {
            return Err(Error::UnknownButton(path.to_string()));
        };
        self.dispatch(button)
    }

    /// Assigns a raw value to a control as a user edit would, then fires the
    /// control's change trigger if it has one.
    ///
    /// A dependent select is refreshed on its own first, so its placeholder
    /// follows the new value.
    ///
    /// Returns `Ok(false)` when the control has no trigger, for example a
    /// dependent select without children.
    pub fn user_change(
        &mut self,
        control: impl Into<ParentRef>,
        value: Option<&str>,
    ) -> Result<bool, Error> {
        let changed = control.into();
        let control = self.parent_control(changed);
        self.form.select_mut(control).set_value(value);
        if let ParentRef::Dependent(id) = changed {
            self.refresh(id, false, false)?;
        }
        match self.trigger_button(control) {
            Some(button) => {
                self.dispatch(button)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn dispatch(&mut self, button: ButtonId) -> Result<(), Error> {
        let actions = self.form.button(button).actions().to_vec();
        tracing::debug!(button = ?button, nodes = actions.len(), "dispatching change trigger");
        for id in actions {
            self.refresh(id, false, true)?;
            self.on_change_triggered(id)?;
        }
        Ok(())
    }

    fn trigger_button(&self, control: SelectId) -> Option<ButtonId> {
        let container = self.form.container_of(control.into())?;
        let name = self.form.name_of(control.into())?;
        let button_name = format!("{name}{}", self.config.trigger.button_suffix);
        match self.form.child(container, &button_name)? {
            ComponentRef::Button(button) => Some(button),
            _ => None,
        }
    }

    pub(crate) fn parent_control(&self, parent: ParentRef) -> SelectId {
        match parent {
            ParentRef::Dependent(id) => self.nodes[id.idx()].control,
            ParentRef::Control(control) => control,
        }
    }

    /// Names a node for logs and errors: its form path, or its label.
    pub(crate) fn describe(&self, id: NodeId) -> String {
        self.describe_control(self.control(id))
    }

    fn describe_control(&self, control: SelectId) -> String {
        self.form
            .path_of(control.into())
            .unwrap_or_else(|| self.form.select(control).label().to_string())
    }
}

/// Pre-order iterator over the transitive children of a node.
///
/// Returned by [`Forest::descendants`].
pub struct Descendants<'a> {
    forest: &'a Forest,
    visited: HashSet<NodeId>,
    stack: Vec<NodeId>,
}

impl fmt::Debug for Descendants<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descendants")
            .field("stack", &self.stack)
            .finish_non_exhaustive()
    }
}

impl<'a> Descendants<'a> {
    fn new(forest: &'a Forest, start: NodeId) -> Self {
        let mut iter = Self {
            forest,
            visited: HashSet::new(),
            stack: Vec::new(),
        };
        iter.stack.extend(forest.children(start).iter().rev());
        iter
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if self.visited.insert(id) {
                self.stack.extend(self.forest.children(id).iter().rev());
                return Some(id);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use understory_form::ItemList;

    fn letters(_: &crate::LoadContext<'_>) -> ItemList {
        Items::from([("a", "A"), ("b", "B")]).into()
    }

    #[test]
    fn builder_without_loader_is_rejected() {
        let mut form = Form::new("f");
        let root = form.root();
        let top = form.add_select(root, "top", "Top").unwrap();
        let mut forest = Forest::new(form, CascadeConfig::default());

        let err = forest
            .add(root, "child", DependentSelect::new("Child").parent(top))
            .unwrap_err();
        assert_eq!(
            err,
            Error::MissingLoader {
                label: "Child".into()
            }
        );
        assert!(forest.is_empty());
        assert_eq!(forest.form().lookup("child"), None);
    }

    #[test]
    fn builder_without_parents_is_rejected() {
        let mut forest = Forest::new(Form::new("f"), CascadeConfig::default());
        let root = forest.form().root();
        let err = forest
            .add(root, "child", DependentSelect::new("Child").loader(letters))
            .unwrap_err();
        assert_eq!(err, Error::NoParents { label: "Child".into() });
    }

    #[test]
    fn select_name_cannot_shadow_its_trigger() {
        let mut form = Form::new("f");
        let root = form.root();
        let top = form.add_select(root, "top", "Top").unwrap();
        let mut forest = Forest::new(form, CascadeConfig::default());

        let err = forest
            .add(
                root,
                "top_submit",
                DependentSelect::new("Child").parent(top).loader(letters),
            )
            .unwrap_err();
        assert_eq!(
            err,
            Error::TriggerNameTaken {
                name: "top_submit".into()
            }
        );
    }

    #[test]
    fn unusable_trigger_name_leaves_the_form_untouched() {
        let mut form = Form::new("f");
        let root = form.root();
        let top = form.add_select(root, "top", "Top").unwrap();
        form.select_mut(top).set_items(Items::from([("t", "T")]));
        let mut config = CascadeConfig::default();
        config.trigger.button_suffix = "-reload".into();
        let mut forest = Forest::new(form, config);

        let err = forest
            .add(root, "child", DependentSelect::new("Child").parent(top).loader(letters))
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
        assert!(forest.is_empty());
        assert_eq!(forest.form().lookup("child"), None);
        assert_eq!(forest.form().children(root).len(), 1);
        assert_eq!(forest.form().select(top).value(), None);
        assert!(forest.form().select(top).classes().is_empty());
    }

    #[test]
    fn descendants_visit_shared_children_once() {
        // top -> a -> c, top -> b -> c
        let mut form = Form::new("f");
        let root = form.root();
        let top = form.add_select(root, "top", "Top").unwrap();
        let mut forest = Forest::new(form, CascadeConfig::default());

        let a = forest
            .add(root, "a", DependentSelect::new("A").parent(top).loader(letters))
            .unwrap();
        let b = forest
            .add(root, "b", DependentSelect::new("B").parent(top).loader(letters))
            .unwrap();
        let c = forest
            .add(root, "c", DependentSelect::new("C").parents([a, b]).loader(letters))
            .unwrap();
        let d = forest
            .add(root, "d", DependentSelect::new("D").parent(a).loader(letters))
            .unwrap();

        assert_eq!(forest.children(a), &[c, d]);
        assert_eq!(forest.parents(c), &[ParentRef::Dependent(a), ParentRef::Dependent(b)]);
        assert_eq!(forest.descendants(a).collect::<Vec<_>>(), vec![c, d]);
        assert_eq!(forest.descendants(b).collect::<Vec<_>>(), vec![c]);
        assert_eq!(forest.descendants(d).count(), 0);
    }

    #[test]
    fn loader_context_names_the_node_being_loaded() {
        use alloc::rc::Rc;
        use core::cell::Cell;

        let mut form = Form::new("f");
        let root = form.root();
        let top = form.add_select(root, "top", "Top").unwrap();
        form.select_mut(top).set_items(Items::from([("t", "T")]));
        let mut forest = Forest::new(form, CascadeConfig::default());

        let seen = Rc::new(Cell::new(None));
        let record = Rc::clone(&seen);
        let id = forest
            .add(
                root,
                "child",
                DependentSelect::new("Child").parent(top).loader(move |cx| {
                    record.set(Some(cx.node()));
                    letters(cx)
                }),
            )
            .unwrap();
        assert_eq!(seen.get(), Some(id));
        assert_eq!(forest.control(id), forest.form().lookup_select("child").unwrap());
    }

    #[test]
    fn nodes_are_described_by_path() {
        let mut form = Form::new("f");
        let root = form.root();
        let address = form.add_container(root, "address").unwrap();
        let top = form.add_select(address, "top", "Top").unwrap();
        let mut forest = Forest::new(form, CascadeConfig::default());
        let child = forest
            .add(address, "child", DependentSelect::new("Child").parent(top).loader(letters))
            .unwrap();
        assert_eq!(forest.describe(child), "address-child");
    }
}
