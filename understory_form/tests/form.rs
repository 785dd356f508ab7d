// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path addressing and submitted-value loading across nested containers.

use understory_form::{ComponentRef, Form, FormError, ItemList, Items};

#[test]
fn nested_paths_resolve_both_ways() {
    let mut form = Form::<()>::new("signup");
    let root = form.root();
    let address = form.add_container(root, "address").unwrap();
    let country = form.add_select(address, "country", "Country").unwrap();
    let load = form.add_button(address, "country_submit", "Load").unwrap();

    assert_eq!(form.path_of(country.into()).as_deref(), Some("address-country"));
    assert_eq!(form.path_of(root.into()).as_deref(), Some(""));
    assert_eq!(form.lookup("address-country"), Some(ComponentRef::Select(country)));
    assert_eq!(form.lookup_select("address-country"), Some(country));
    assert_eq!(form.lookup_button("address-country_submit"), Some(load));
    assert_eq!(form.lookup_select("address-country_submit"), None);
    assert_eq!(form.lookup("address-country-deeper"), None);
    assert_eq!(form.lookup("nowhere"), None);

    assert_eq!(
        form.html_id(load.into()).as_deref(),
        Some("frm-signup-address-country_submit")
    );
    assert_eq!(form.container_of(country.into()), Some(address));
    assert_eq!(
        form.children(address),
        &[ComponentRef::Select(country), ComponentRef::Button(load)]
    );
}

#[test]
fn detached_select_gets_a_path_once_attached() {
    let mut form = Form::<()>::new("f");
    let root = form.root();
    let loose = form.create_select("Loose");
    assert_eq!(form.path_of(loose.into()), None);
    assert_eq!(form.html_id(loose.into()), None);

    form.attach_select(root, "loose", loose).unwrap();
    assert_eq!(form.path_of(loose.into()).as_deref(), Some("loose"));

    let inner = form.add_container(root, "inner").unwrap();
    assert_eq!(
        form.attach_select(inner, "again", loose).unwrap_err(),
        FormError::AlreadyAttached("loose".into())
    );
}

#[test]
fn submitted_values_only_count_when_they_name_an_item() {
    let mut form = Form::<()>::new("f");
    let root = form.root();
    let size = form.add_select(root, "size", "Size").unwrap();
    form.select_mut(size)
        .set_items(Items::from([("s", "Small"), ("m", "Medium")]));

    assert_eq!(form.load_values([("size", "xl"), ("color", "red")]), 1);
    assert_eq!(form.select(size).raw_value(), Some("xl"));
    assert_eq!(form.select(size).value(), None);
    assert!(!form.select(size).is_selected());

    form.select_mut(size)
        .set_items(ItemList::Unkeyed(vec!["xl".into(), "xxl".into()]));
    assert_eq!(form.select(size).value(), Some("xl"));
    assert!(form.select(size).is_selected());
}
