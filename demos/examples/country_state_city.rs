// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Country → State → City with disabled children.
//!
//! Walk through a short session: first render, a country change, a state pick,
//! and clearing the country again. Each step prints the three controls.
//!
//! Run:
//! - `cargo run -p understory_demos --example country_state_city`
//! - `RUST_LOG=understory_dependent_select=trace cargo run -p understory_demos --example country_state_city`

use understory_dependent_select::{CascadeConfig, DependentSelect, Forest, LoadContext};
use understory_demos::{init_tracing, print_controls};
use understory_form::{Form, Items};

fn states(cx: &LoadContext<'_>) -> Items {
    match cx.parent_value(0) {
        Some("us") => Items::from([("ny", "New York"), ("ca", "California")]),
        Some("cz") => Items::from([("prg", "Prague"), ("jm", "South Moravia")]),
        _ => Items::new(),
    }
}

fn cities(cx: &LoadContext<'_>) -> Items {
    match cx.parent_value(0) {
        Some("ny") => Items::from([("nyc", "New York City"), ("buf", "Buffalo")]),
        Some("ca") => Items::from([("la", "Los Angeles"), ("sf", "San Francisco")]),
        Some("prg") => Items::from([("prg", "Prague")]),
        Some("jm") => Items::from([("brq", "Brno"), ("zn", "Znojmo")]),
        _ => Items::new(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut form = Form::new("order");
    let root = form.root();
    let address = form.add_container(root, "address")?;
    let country = form.add_select(address, "country", "Country")?;
    form.select_mut(country)
        .set_items(Items::from([("us", "United States"), ("cz", "Czechia")]));

    let mut forest = Forest::new(form, CascadeConfig::default());
    let state = forest.add(
        address,
        "state",
        DependentSelect::new("State")
            .parent(country)
            .loader(states)
            .on_submit(|form| println!("   (state reload requested on form `{}`)", form.name())),
    )?;
    let city = forest.add(
        address,
        "city",
        DependentSelect::new("City")
            .parent(state)
            .loader(cities)
            .disabled_value(Items::from([("", "Pick a state first")])),
    )?;
    let controls = [country, forest.control(state), forest.control(city)];

    print_controls("first render", forest.form(), &controls);

    // A browser submits the form through the country's reload button.
    forest
        .form_mut()
        .load_values([("address-country", "cz"), ("address-state", "ny")]);
    forest.submit("address-country_submit")?;
    print_controls("country changed to Czechia", forest.form(), &controls);

    forest.user_change(state, Some("jm"))?;
    print_controls("state picked", forest.form(), &controls);

    forest.set_value(city, Some("brq"))?;
    print_controls("city picked", forest.form(), &controls);

    // Clearing the country without dispatching leaves the state stale, and a
    // new state value is refused until the cascade runs.
    forest.form_mut().select_mut(country).set_value(None);
    if let Err(err) = forest.set_value(state, Some("prg")) {
        println!("-- rejected: {err} ({:?})", err.kind());
    }

    forest.user_change(country, None)?;
    print_controls("country cleared", forest.form(), &controls);
    Ok(())
}
