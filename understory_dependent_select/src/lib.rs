// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dependent_select --heading-base-level=0

//! Understory Dependent Select: dropdowns whose options depend on other dropdowns.
//!
//! A [`Forest`] holds dependent selects placed in an [`understory_form::Form`]. Each
//! dependent select names one or more parents (plain select controls acting as
//! roots, or other dependent selects) and a data loader that produces its items
//! from the parents' current values. The forest keeps one rule across every
//! change: a node holds a real value only while all of its parents do.
//!
//! - [`DependentSelect`]: builder describing a node (label, parents, loader,
//!   disabled presentation, submit callbacks).
//! - [`Forest`]: the arena. It attaches nodes, wires change triggers onto
//!   their parents, and runs the propagation engine on refreshes, value
//!   assignments and trigger dispatch.
//! - [`CascadeConfig`]: the policy ([`CascadePolicy::DisableChildren`] or
//!   [`CascadePolicy::SelectFirst`]), placeholder labels and markup classes.
//! - [`ChangeTrigger`]: the reusable helper that adds a "reload" submit
//!   button next to any select control.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_dependent_select::{CascadeConfig, DependentSelect, Forest};
//! use understory_form::{Form, Items};
//!
//! let mut form = Form::new("order");
//! let root = form.root();
//! let country = form.add_select(root, "country", "Country").unwrap();
//! form.select_mut(country)
//!     .set_items(Items::from([("us", "United States"), ("cz", "Czechia")]));
//!
//! let mut forest = Forest::new(form, CascadeConfig::default());
//! let state = forest
//!     .add(
//!         root,
//!         "state",
//!         DependentSelect::new("State")
//!             .parent(country)
//!             .loader(|cx| match cx.parent_value(0) {
//!                 Some("us") => Items::from([("ny", "New York"), ("ca", "California")]),
//!                 Some("cz") => Items::from([("prg", "Prague"), ("brq", "Brno")]),
//!                 _ => Items::new(),
//!             }),
//!     )
//!     .unwrap();
//!
//! // The first country was selected automatically.
//! assert_eq!(forest.items(state).first_key(), Some("ny"));
//!
//! // The user picks another country; the trigger reloads the states.
//! forest.user_change(country, Some("cz")).unwrap();
//! assert_eq!(forest.items(state).keys().collect::<Vec<_>>(), ["prg", "brq"]);
//! assert_eq!(forest.value(state), None);
//!
//! // Clearing the country disables the states.
//! forest.user_change(country, None).unwrap();
//! assert!(forest.is_disabled(state));
//! assert!(forest.items(state).is_empty());
//! ```
//!
//! ## Host integration
//!
//! On a submission the host first loads the submitted values with
//! [`Form::load_values`](understory_form::Form::load_values) on
//! [`Forest::form_mut`], then dispatches the pressed button with
//! [`Forest::submit`]. Rendering reads the controls from [`Forest::form`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod forest;
mod node;
mod propagate;
mod trigger;

pub use config::{CascadeConfig, CascadePolicy};
pub use error::{Error, ErrorKind};
pub use forest::{Descendants, Forest};
pub use node::{DataLoader, DependentSelect, LoadContext, NodeId, ParentRef, SubmitCallback};
pub use trigger::{ChangeTrigger, TriggerStyle};
