// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The propagation engine: per-node state machine and subtree cascades.
//!
//! A node is either *disabled* (some parent has no value, and the policy is
//! [`CascadePolicy::DisableChildren`](crate::CascadePolicy::DisableChildren))
//! or *active* (its items come from its loader). Each node only asks its
//! immediate parents whether they are satisfied; a parent answers with its own
//! [`has_empty_value`](Forest::has_empty_value), which already reflects its
//! ancestors. Refreshes therefore walk top-down, parent before child.

use alloc::string::ToString;

use understory_form::{ItemList, Items, is_empty_value};

use crate::error::Error;
use crate::forest::Forest;
use crate::node::{LoadContext, NodeId, ParentRef};

impl Forest {
    /// Returns `true` if any parent of `id` has no value.
    ///
    /// Dependent parents count as empty while disabled; root controls count as
    /// empty while unselected.
    #[must_use]
    pub fn has_any_parent_unsatisfied(&self, id: NodeId) -> bool {
        self.nodes[id.idx()].parents.iter().any(|&parent| match parent {
            ParentRef::Dependent(parent) => self.has_empty_value(parent),
            ParentRef::Control(control) => is_empty_value(self.form.select(control).value()),
        })
    }

    /// Returns `true` if `id` is disabled or unselected.
    #[must_use]
    pub fn has_empty_value(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.idx()];
        node.disabled || is_empty_value(self.form.select(node.control).value())
    }

    /// Assigns the value of `id` and re-derives its subtree.
    ///
    /// Fails with [`Error::ParentUnsatisfied`] when `value` is a real key, the
    /// node currently holds a real value and a parent has none. Nothing is
    /// changed in that case.
    pub fn set_value(&mut self, id: NodeId, value: Option<&str>) -> Result<(), Error> {
        self.set_value_with(id, value, true)
    }

    /// Assigns a default value to `id`, then refreshes it and its subtree.
    ///
    /// Validated like [`set_value`](Self::set_value).
    pub fn set_default_value(&mut self, id: NodeId, value: Option<&str>) -> Result<(), Error> {
        self.check_value(id, value)?;
        self.form.select_mut(self.nodes[id.idx()].control).set_value(value);
        self.refresh(id, false, true)
    }

    /// Replaces the items of `id` until its next reload.
    ///
    /// Only keyed items are accepted.
    pub fn set_items(&mut self, id: NodeId, items: impl Into<ItemList>) -> Result<(), Error> {
        match items.into() {
            ItemList::Keyed(items) => {
                self.form.select_mut(self.nodes[id.idx()].control).set_items(items);
                Ok(())
            }
            ItemList::Unkeyed(_) => Err(Error::UnkeyedItems {
                control: self.describe(id),
            }),
        }
    }

    /// Re-derives the state of `id`, then of every descendant when `recursive`.
    ///
    /// The placeholder is dropped first and, with `clear_value`, the value too.
    /// Every descendant is revisited, parents before children.
    pub fn refresh(&mut self, id: NodeId, clear_value: bool, recursive: bool) -> Result<(), Error> {
        tracing::trace!(node = ?id, clear_value, recursive, "refreshing");
        let control = self.nodes[id.idx()].control;
        self.form.select_mut(control).set_prompt(None);
        if clear_value {
            self.set_value_with(id, None, false)?;
        }
        self.initialize_state(id)?;
        if recursive {
            for i in 0..self.nodes[id.idx()].children.len() {
                let child = self.nodes[id.idx()].children[i];
                self.refresh(child, false, true)?;
            }
        }
        Ok(())
    }

    /// Handles a fired change trigger of `id`.
    ///
    /// Submit callbacks always run, in registration order. If the parents are
    /// satisfied the node then either shows its empty placeholder and disables
    /// its whole subtree, or selects its first item and propagates first-item
    /// selection down the subtree, depending on the policy.
    pub fn on_change_triggered(&mut self, id: NodeId) -> Result<(), Error> {
        for callback in &mut self.nodes[id.idx()].on_submit {
            callback(&self.form);
        }
        if self.has_any_parent_unsatisfied(id) {
            return Ok(());
        }
        if self.config.disables_children() {
            self.add_empty_header_item(id, true)?;
            self.disable_all_children(id)
        } else {
            self.set_first_item_selected(id)?;
            self.select_first_item_for_all_children(id)
        }
    }

    pub(crate) fn initialize_state(&mut self, id: NodeId) -> Result<(), Error> {
        let disables_children = self.config.disables_children();
        if disables_children && self.has_any_parent_unsatisfied(id) {
            return self.disable_select_box(id);
        }

        let control = self.nodes[id.idx()].control;
        if self.nodes[id.idx()].disabled {
            self.nodes[id.idx()].disabled = false;
            let class = self.config.disabled_class.as_str();
            self.form.select_mut(control).classes_mut().remove(class);
        }
        self.load_items(id)?;
        if disables_children {
            let empty = self.has_empty_value(id);
            if empty || self.nodes[id.idx()].leave_first_empty {
                self.add_empty_header_item(id, empty)?;
            }
        }
        Ok(())
    }

    pub(crate) fn auto_select_root_first_item(&mut self, id: NodeId) {
        if !self.config.auto_select_root_first_item {
            return;
        }
        for i in 0..self.nodes[id.idx()].parents.len() {
            let ParentRef::Control(control) = self.nodes[id.idx()].parents[i] else {
                continue;
            };
            let select = self.form.select_mut(control);
            if select.value().is_some() {
                continue;
            }
            if let Some(first) = select.items().first_key().map(ToString::to_string) {
                tracing::debug!(?control, value = %first, "auto-selecting first root item");
                select.set_value(Some(&first));
            }
        }
    }

    fn load_items(&mut self, id: NodeId) -> Result<(), Error> {
        let data = (self.nodes[id.idx()].loader)(&LoadContext::new(self, id));
        let ItemList::Keyed(items) = data else {
            return Err(Error::UnkeyedLoaderData {
                control: self.describe(id),
            });
        };
        tracing::trace!(node = ?id, items = items.len(), "reloaded items");
        self.form.select_mut(self.nodes[id.idx()].control).set_items(items);
        if !self.config.disables_children() && self.has_empty_value(id) {
            self.set_first_item_selected(id)?;
        }
        Ok(())
    }

    fn add_empty_header_item(&mut self, id: NodeId, select_placeholder: bool) -> Result<(), Error> {
        let control = self.nodes[id.idx()].control;
        let title = self.config.empty_item_title.as_str();
        self.form.select_mut(control).set_prompt(Some(title));
        if select_placeholder {
            self.set_value_with(id, None, false)?;
        }
        Ok(())
    }

    fn set_first_item_selected(&mut self, id: NodeId) -> Result<(), Error> {
        let first = self
            .form
            .select(self.nodes[id.idx()].control)
            .items()
            .first_key()
            .map(ToString::to_string);
        self.set_value_with(id, first.as_deref(), false)
    }

    pub(crate) fn disable_select_box(&mut self, id: NodeId) -> Result<(), Error> {
        tracing::debug!(node = ?id, "disabling");
        let node = &mut self.nodes[id.idx()];
        node.disabled = true;
        let control = node.control;
        let override_items = node.disabled_value.clone();

        let select = self.form.select_mut(control);
        select.classes_mut().add(&self.config.disabled_class);
        match override_items {
            None => {
                self.set_value_with(id, None, false)?;
                let select = self.form.select_mut(control);
                select.set_items(Items::new());
                select.set_prompt(Some(self.config.disabled_item_title.as_str()));
            }
            Some(items) => {
                let first = items.first_key().map(ToString::to_string);
                select.set_items(items);
                self.set_value_with(id, first.as_deref(), false)?;
            }
        }
        Ok(())
    }

    fn disable_all_children(&mut self, id: NodeId) -> Result<(), Error> {
        for i in 0..self.nodes[id.idx()].children.len() {
            let child = self.nodes[id.idx()].children[i];
            self.disable_select_box(child)?;
            self.disable_all_children(child)?;
        }
        Ok(())
    }

    fn select_first_item_for_all_children(&mut self, id: NodeId) -> Result<(), Error> {
        for i in 0..self.nodes[id.idx()].children.len() {
            let child = self.nodes[id.idx()].children[i];
            self.refresh(child, false, false)?;
            if !self.has_any_parent_unsatisfied(child) {
                self.set_first_item_selected(child)?;
            }
            self.select_first_item_for_all_children(child)?;
        }
        Ok(())
    }

    /// Assigns a value, cascading into the subtree when asked to and the
    /// result is a real value.
    pub(crate) fn set_value_with(
        &mut self,
        id: NodeId,
        value: Option<&str>,
        cascade: bool,
    ) -> Result<(), Error> {
        self.check_value(id, value)?;
        self.form.select_mut(self.nodes[id.idx()].control).set_value(value);
        if cascade && !self.has_empty_value(id) {
            self.refresh(id, false, true)?;
        }
        Ok(())
    }

    fn check_value(&self, id: NodeId, value: Option<&str>) -> Result<(), Error> {
        if !is_empty_value(value)
            && !self.has_empty_value(id)
            && self.has_any_parent_unsatisfied(id)
        {
            return Err(Error::ParentUnsatisfied {
                control: self.describe(id),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CascadeConfig, CascadePolicy, DependentSelect};
    use alloc::format;
    use alloc::vec::Vec;
    use understory_form::{Form, SelectId};

    fn pair(parent: Option<&str>) -> Items {
        match parent {
            Some(p) => Items::from([(format!("{p}1"), "one"), (format!("{p}2"), "two")]),
            None => Items::new(),
        }
    }

    fn chain(config: CascadeConfig) -> (Forest, SelectId, NodeId) {
        let mut form = Form::new("f");
        let root = form.root();
        let top = form.add_select(root, "top", "Top").unwrap();
        form.select_mut(top).set_items(Items::from([("a", "A"), ("b", "B")]));
        let mut forest = Forest::new(form, config);
        let child = forest
            .add(
                root,
                "child",
                DependentSelect::new("Child")
                    .parent(top)
                    .loader(|cx| pair(cx.parent_value(0))),
            )
            .unwrap();
        (forest, top, child)
    }

    #[test]
    fn attaching_selects_root_first_item() {
        let (forest, top, child) = chain(CascadeConfig::default());
        assert_eq!(forest.form().select(top).value(), Some("a"));
        assert!(!forest.is_disabled(child));
        assert_eq!(forest.items(child).keys().collect::<Vec<_>>(), ["a1", "a2"]);
        assert_eq!(forest.value(child), None);
        assert_eq!(forest.select(child).prompt(), Some("- - - - -"));
    }

    #[test]
    fn unselected_root_disables_the_child() {
        let config = CascadeConfig::default().with_auto_select_root_first_item(false);
        let (forest, top, child) = chain(config);
        assert_eq!(forest.form().select(top).value(), None);
        assert!(forest.is_disabled(child));
        assert!(forest.items(child).is_empty());
        assert_eq!(forest.select(child).prompt(), Some("x x x x x"));
        assert!(forest.select(child).classes().contains("disabledControl"));
    }

    #[test]
    fn reenabling_drops_the_disabled_class() {
        let config = CascadeConfig::default().with_auto_select_root_first_item(false);
        let (mut forest, top, child) = chain(config);
        forest.form_mut().select_mut(top).set_value(Some("b"));
        forest.refresh(child, false, true).unwrap();
        assert!(!forest.is_disabled(child));
        assert!(!forest.select(child).classes().contains("disabledControl"));
        assert_eq!(forest.select(child).prompt(), Some("- - - - -"));
    }

    #[test]
    fn select_first_policy_picks_first_item() {
        let config = CascadeConfig::default().with_policy(CascadePolicy::SelectFirst);
        let (forest, _, child) = chain(config);
        assert_eq!(forest.value(child), Some("a1"));
        assert_eq!(forest.select(child).prompt(), None);
    }

    #[test]
    fn clearing_refresh_forgets_the_value() {
        let (mut forest, _, child) = chain(CascadeConfig::default());
        forest.set_value(child, Some("a2")).unwrap();
        assert_eq!(forest.value(child), Some("a2"));
        assert_eq!(forest.select(child).prompt(), None);

        forest.refresh(child, true, true).unwrap();
        assert_eq!(forest.value(child), None);
        assert_eq!(forest.select(child).prompt(), Some("- - - - -"));
    }

    #[test]
    fn callbacks_run_before_the_unsatisfied_check() {
        use alloc::rc::Rc;
        use core::cell::Cell;

        let config = CascadeConfig::default().with_auto_select_root_first_item(false);
        let (mut forest, _, child) = chain(config);
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        forest.add_on_submit_callback(child, move |_| seen.set(seen.get() + 1));

        forest.on_change_triggered(child).unwrap();
        assert_eq!(calls.get(), 1);
        assert!(forest.is_disabled(child));
    }
}
