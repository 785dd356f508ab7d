// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by the dependency forest.

use alloc::string::String;

use understory_form::FormError;

use crate::node::NodeId;

/// Broad classification of an [`Error`].
///
/// All errors are programmer or configuration errors reported synchronously;
/// none are retried.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller passed something unusable: missing loader, detached control,
    /// loader output without keys, unknown handle or path.
    InvalidArgument,
    /// The operation conflicts with the current dependency state.
    InvalidState,
    /// The requested mode of operation is not supported.
    NotSupported,
}

/// Errors returned by [`Forest`](crate::Forest) operations.
///
/// Controls are identified by their form path, or by their label when they
/// are not attached to a form yet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A dependent select was built without a data loader.
    #[error("dependent select `{label}` has no data loader")]
    MissingLoader {
        /// Label of the rejected select.
        label: String,
    },
    /// A dependent select was built without any parent.
    #[error("dependent select `{label}` must depend on at least one control")]
    NoParents {
        /// Label of the rejected select.
        label: String,
    },
    /// A parent handle does not belong to this forest.
    #[error("unknown dependent select {0:?}")]
    UnknownNode(NodeId),
    /// A data loader produced option data without keys.
    #[error("data loader for `{control}` must return keyed items")]
    UnkeyedLoaderData {
        /// The node whose loader misbehaved.
        control: String,
    },
    /// A real value was assigned while a parent has no value.
    #[error("cannot set the value of `{control}` while a parent has no value")]
    ParentUnsatisfied {
        /// The node that rejected the value.
        control: String,
    },
    /// Dependent selects only work with keyed items.
    #[error("`{control}` only accepts keyed items")]
    UnkeyedItems {
        /// The node that rejected the items.
        control: String,
    },
    /// A root control with a prompt cannot be combined with [`CascadePolicy::SelectFirst`].
    ///
    /// [`CascadePolicy::SelectFirst`]: crate::CascadePolicy::SelectFirst
    #[error("root control `{control}` has a prompt, unsupported by the select-first policy")]
    PromptOnRoot {
        /// The offending root control.
        control: String,
    },
    /// A change trigger was requested for a control outside any container.
    #[error("control `{control}` is not attached to a form container")]
    Detached {
        /// The detached control.
        control: String,
    },
    /// The trigger button name is already used by a component that is not a button.
    #[error("cannot add change trigger `{name}`: the name is taken")]
    TriggerNameTaken {
        /// The button name that clashed.
        name: String,
    },
    /// No submit button exists at the given path.
    #[error("no submit button at `{0}`")]
    UnknownButton(String),
    /// The form rejected a component.
    #[error(transparent)]
    Form(#[from] FormError),
}

impl Error {
    /// Returns the broad classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ParentUnsatisfied { .. } => ErrorKind::InvalidState,
            Self::UnkeyedItems { .. } | Self::PromptOnRoot { .. } => ErrorKind::NotSupported,
            Self::MissingLoader { .. }
            | Self::NoParents { .. }
            | Self::UnknownNode(_)
            | Self::UnkeyedLoaderData { .. }
            | Self::Detached { .. }
            | Self::TriggerNameTaken { .. }
            | Self::UnknownButton(_)
            | Self::Form(_) => ErrorKind::InvalidArgument,
        }
    }
}
