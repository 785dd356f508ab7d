// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_form --heading-base-level=0

//! Understory Form: a minimal form component tree.
//!
//! This crate provides the host-side pieces that form widgets are built on:
//!
//! - [`Form`]: an arena of named containers, select controls and submit buttons,
//!   addressed by typed handles ([`ContainerId`], [`SelectId`], [`ButtonId`]) and by
//!   hierarchical paths such as `address-country`.
//! - [`SelectControl`]: a dropdown holding ordered [`Items`], a current value, an
//!   optional prompt (placeholder) and markup classes.
//! - [`SubmitButton`]: a named action; each button carries the host's action
//!   payloads (`A`) in registration order.
//!
//! It does not render markup or talk to a network. Rendering reads the controls'
//! state; transports deliver submitted values through [`Form::load_values`] and
//! dispatch the pressed button by path.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_form::{Form, Items};
//!
//! #[derive(Copy, Clone, Debug, PartialEq)]
//! enum Action {
//!     Reload,
//! }
//!
//! let mut form = Form::<Action>::new("order");
//! let root = form.root();
//!
//! let country = form.add_select(root, "country", "Country").unwrap();
//! form.select_mut(country)
//!     .set_items(Items::from([("us", "United States"), ("cz", "Czechia")]));
//!
//! let load = form.add_button(root, "country_submit", "Load").unwrap();
//! form.button_mut(load).push_action(Action::Reload);
//!
//! // A submission arrives: values first, then the pressed button.
//! form.load_values([("country", "cz")]);
//! assert_eq!(form.select(country).value(), Some("cz"));
//!
//! let pressed = form.lookup_button("country_submit").unwrap();
//! assert_eq!(form.button(pressed).actions(), &[Action::Reload]);
//! ```
//!
//! ## Empty values
//!
//! A select control is "unselected" when its value is absent or the empty
//! string; see [`is_empty_value`]. Its [`value`](SelectControl::value) is also
//! absent whenever the raw value does not name one of the current items.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod control;
mod error;
mod form;
mod items;

pub use control::{ClassList, SelectControl, SubmitButton, is_empty_value};
pub use error::FormError;
pub use form::{ButtonId, ComponentRef, ContainerId, Form, PATH_SEPARATOR, SelectId};
pub use items::{ItemList, Items};
