// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers shared by the dependent select demos: logging setup and a plain-text
//! rendering of select controls.

use tracing_subscriber::EnvFilter;
use understory_dependent_select::NodeId;
use understory_form::{Form, SelectId};

/// Installs a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Defaults to `understory_dependent_select=debug` when `RUST_LOG` is unset;
/// use `RUST_LOG=understory_dependent_select=trace` to see every reload.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("understory_dependent_select=debug,understory_form=debug")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Renders one select control as a single line.
///
/// The selected item is marked with `*`; a prompt is shown first in
/// parentheses and markup classes last in brackets.
pub fn render_select(form: &Form<NodeId>, id: SelectId) -> String {
    let select = form.select(id);
    let mut line = format!("{:>8}:", select.label());
    if let Some(prompt) = select.prompt() {
        let marker = if select.value().is_none() { "*" } else { " " };
        line.push_str(&format!(" {marker}({prompt})"));
    }
    for (key, label) in select.items().iter() {
        let marker = if select.value() == Some(key) { "*" } else { " " };
        line.push_str(&format!(" {marker}{key}={label}"));
    }
    if !select.classes().is_empty() {
        let classes: Vec<&str> = select.classes().iter().collect();
        line.push_str(&format!("  [{}]", classes.join(" ")));
    }
    line
}

/// Prints every listed control under a heading.
pub fn print_controls(heading: &str, form: &Form<NodeId>, controls: &[SelectId]) {
    println!("-- {heading}");
    for &id in controls {
        println!("{}", render_select(form, id));
    }
}
