// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Errors raised while building a form's component tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The container already has a child with this name.
    #[error("container `{container}` already has a component named `{name}`")]
    DuplicateName {
        /// Path of the container (empty for the form root).
        container: String,
        /// The conflicting name.
        name: String,
    },
    /// Names must be non-empty and must not contain the path separator.
    #[error("invalid component name `{0}`")]
    InvalidName(String),
    /// The component is already attached to a container.
    #[error("component `{0}` is already attached")]
    AlreadyAttached(String),
}
