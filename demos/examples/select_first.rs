// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select-first cascading with a configuration read from JSON.
//!
//! Every dependent select keeps a real value: changing a parent selects the
//! first item of each freshly loaded child. Two children share one parent and
//! therefore one reload button.
//!
//! Run:
//! - `cargo run -p understory_demos --example select_first`

use understory_dependent_select::{CascadeConfig, DependentSelect, Forest};
use understory_demos::{init_tracing, print_controls};
use understory_form::{Form, Items};

const CONFIG: &str = r#"{
    "policy": "select_first",
    "trigger": { "button_label": "Reload" }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config: CascadeConfig = serde_json::from_str(CONFIG)?;
    tracing::info!(policy = ?config.policy, "loaded cascade configuration");

    let mut form = Form::new("shop");
    let root = form.root();
    let category = form.add_select(root, "category", "Category")?;
    form.select_mut(category)
        .set_items(Items::from([("tea", "Tea"), ("coffee", "Coffee")]));

    let mut forest = Forest::new(form, config);
    let product = forest.add(
        root,
        "product",
        DependentSelect::new("Product")
            .parent(category)
            .loader(|cx| match cx.parent_value(0) {
                Some("tea") => Items::from([("sencha", "Sencha"), ("assam", "Assam")]),
                Some("coffee") => Items::from([("arabica", "Arabica"), ("robusta", "Robusta")]),
                _ => Items::new(),
            }),
    )?;
    let size = forest.add(
        root,
        "size",
        DependentSelect::new("Size")
            .parent(category)
            .loader(|cx| match cx.parent_value(0) {
                Some("tea") => Items::from([("50g", "50 g"), ("100g", "100 g")]),
                Some(_) => Items::from([("250g", "250 g"), ("1kg", "1 kg")]),
                None => Items::new(),
            }),
    )?;
    let grind = forest.add(
        root,
        "grind",
        DependentSelect::new("Grind")
            .parent(product)
            .loader(|cx| match cx.parent_value(0) {
                Some("arabica" | "robusta") => {
                    Items::from([("beans", "Whole beans"), ("fine", "Fine")])
                }
                Some(_) => Items::from([("leaf", "Loose leaf")]),
                None => Items::new(),
            }),
    )?;
    let controls = [
        category,
        forest.control(product),
        forest.control(size),
        forest.control(grind),
    ];

    print_controls("first render", forest.form(), &controls);

    forest.user_change(category, Some("coffee"))?;
    print_controls("category changed to coffee", forest.form(), &controls);

    forest.user_change(product, Some("robusta"))?;
    print_controls("product changed to robusta", forest.form(), &controls);

    let form = forest.form();
    if let Some(button) = form.lookup_button("category_submit") {
        println!(
            "-- `category_submit` ({}) reloads {} dependent selects",
            form.button(button).label(),
            form.button(button).actions().len()
        );
    }
    Ok(())
}
