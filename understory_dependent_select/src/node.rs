// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dependent select nodes: handles, parent references and the construction builder.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;
use understory_form::{Form, ItemList, Items, SelectId};

use crate::forest::Forest;

/// Identifier of a dependent select within a [`Forest`].
///
/// Handles are indices into the forest's arena and stay valid for its whole
/// life; nodes are never removed individually.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[expect(clippy::cast_possible_truncation, reason = "forests stay far below u32::MAX nodes")]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A parent of a dependent select.
///
/// Either another dependent select of the same forest, or a plain select
/// control of the form acting as a root of the forest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParentRef {
    /// A dependent select of the same forest.
    Dependent(NodeId),
    /// A plain select control with no dependency parents of its own.
    Control(SelectId),
}

impl From<NodeId> for ParentRef {
    fn from(id: NodeId) -> Self {
        Self::Dependent(id)
    }
}

impl From<SelectId> for ParentRef {
    fn from(id: SelectId) -> Self {
        Self::Control(id)
    }
}

/// Produces the items of a dependent select from its current context.
///
/// Loaders run synchronously on every reload and must not assume anything
/// about how often they are called.
pub type DataLoader = Box<dyn Fn(&LoadContext<'_>) -> ItemList>;

/// Runs when the change trigger of a node fires, before the cascade.
pub type SubmitCallback = Box<dyn FnMut(&Form<NodeId>)>;

/// What a [`DataLoader`] can see while producing items.
#[derive(Clone, Copy)]
pub struct LoadContext<'a> {
    forest: &'a Forest,
    node: NodeId,
}

impl fmt::Debug for LoadContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadContext")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

impl<'a> LoadContext<'a> {
    pub(crate) fn new(forest: &'a Forest, node: NodeId) -> Self {
        Self { forest, node }
    }

    /// Returns the form, for reading any control's state.
    #[must_use]
    pub fn form(&self) -> &'a Form<NodeId> {
        self.forest.form()
    }

    /// Returns the node being loaded.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the select control of the node being loaded.
    #[must_use]
    pub fn control(&self) -> SelectId {
        self.forest.control(self.node)
    }

    /// Returns the current value of the parent at `index` (declaration order).
    #[must_use]
    pub fn parent_value(&self, index: usize) -> Option<&'a str> {
        let parent = *self.forest.parents(self.node).get(index)?;
        self.forest.parent_value(parent)
    }

    /// Iterates the current values of all parents in declaration order.
    pub fn parent_values(&self) -> impl Iterator<Item = Option<&'a str>> + 'a {
        let forest = self.forest;
        forest
            .parents(self.node)
            .iter()
            .map(move |&parent| forest.parent_value(parent))
    }
}

/// Per-node state held by the forest arena.
pub(crate) struct Node {
    pub(crate) control: SelectId,
    pub(crate) parents: SmallVec<[ParentRef; 2]>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) loader: DataLoader,
    pub(crate) on_submit: Vec<SubmitCallback>,
    pub(crate) disabled: bool,
    pub(crate) disabled_value: Option<Items>,
    pub(crate) leave_first_empty: bool,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("control", &self.control)
            .field("parents", &self.parents)
            .field("children", &self.children)
            .field("disabled", &self.disabled)
            .field("disabled_value", &self.disabled_value)
            .field("leave_first_empty", &self.leave_first_empty)
            .field("on_submit", &self.on_submit.len())
            .finish_non_exhaustive()
    }
}

/// Describes a dependent select before it is added to a [`Forest`].
///
/// ```rust
/// use understory_dependent_select::DependentSelect;
/// use understory_form::{Form, Items};
///
/// # let mut form = Form::<()>::new("f");
/// # let country = form.add_select(form.root(), "country", "Country").unwrap();
/// let state = DependentSelect::new("State")
///     .parent(country)
///     .loader(|cx| match cx.parent_value(0) {
///         Some("us") => Items::from([("ny", "New York"), ("ca", "California")]),
///         _ => Items::new(),
///     })
///     .disabled_value(Items::from([("", "Pick a country first")]));
/// ```
pub struct DependentSelect {
    pub(crate) label: String,
    pub(crate) parents: SmallVec<[ParentRef; 2]>,
    pub(crate) loader: Option<DataLoader>,
    pub(crate) disabled_value: Option<Items>,
    pub(crate) leave_first_empty: bool,
    pub(crate) on_submit: Vec<SubmitCallback>,
}

impl fmt::Debug for DependentSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependentSelect")
            .field("label", &self.label)
            .field("parents", &self.parents)
            .field("has_loader", &self.loader.is_some())
            .field("disabled_value", &self.disabled_value)
            .field("leave_first_empty", &self.leave_first_empty)
            .finish_non_exhaustive()
    }
}

impl DependentSelect {
    /// Starts describing a dependent select with the given label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            parents: SmallVec::new(),
            loader: None,
            disabled_value: None,
            leave_first_empty: false,
            on_submit: Vec::new(),
        }
    }

    /// Adds a parent. Parents are consulted in the order they are added.
    #[must_use]
    pub fn parent(mut self, parent: impl Into<ParentRef>) -> Self {
        self.parents.push(parent.into());
        self
    }

    /// Adds several parents.
    #[must_use]
    pub fn parents<P: Into<ParentRef>>(mut self, parents: impl IntoIterator<Item = P>) -> Self {
        self.parents.extend(parents.into_iter().map(Into::into));
        self
    }

    /// Sets the data loader.
    ///
    /// The loader may return [`Items`] or an [`ItemList`]; unkeyed lists are
    /// rejected when the node reloads.
    #[must_use]
    pub fn loader<F, R>(mut self, loader: F) -> Self
    where
        F: Fn(&LoadContext<'_>) -> R + 'static,
        R: Into<ItemList>,
    {
        self.loader = Some(Box::new(move |cx: &LoadContext<'_>| -> ItemList {
            loader(cx).into()
        }));
        self
    }

    /// Sets the fixed items presented while the node is disabled.
    ///
    /// The first key becomes the node's value in that state.
    #[must_use]
    pub fn disabled_value(mut self, items: impl Into<Items>) -> Self {
        self.disabled_value = Some(items.into());
        self
    }

    /// Keeps the empty placeholder ahead of the items even while a value is selected.
    #[must_use]
    pub fn leave_first_empty(mut self, leave: bool) -> Self {
        self.leave_first_empty = leave;
        self
    }

    /// Registers a callback run whenever the node's change trigger fires.
    #[must_use]
    pub fn on_submit(mut self, callback: impl FnMut(&Form<NodeId>) + 'static) -> Self {
        self.on_submit.push(Box::new(callback));
        self
    }
}
