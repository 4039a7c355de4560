use super::*;
use std::cell::Cell;

fn list(document: &Document, items: &[&str]) -> (Handle, Vec<Handle>) {
    let parent = document.create_element("ul");
    let children: Vec<Handle> = items
        .iter()
        .map(|text| {
            let li = document.create_element("li");
            li.append_child(&document.create_text(*text)).unwrap();
            parent.append_child(&li).unwrap();
            li
        })
        .collect();
    (parent, children)
}

#[test]
fn test_handles_compare_by_identity() {
    let document = Document::new();
    let a = document.create_text("same");
    let b = document.create_text("same");

    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_eq!(a.key(), a.clone().key());
}

#[test]
fn test_insert_before_moves_existing_child() {
    let document = Document::new();
    let (parent, items) = list(&document, &["a", "b", "c"]);

    parent.insert_before(&items[2], Some(&items[0])).unwrap();

    assert_eq!(parent.children(), vec![items[2].clone(), items[0].clone(), items[1].clone()]);
    assert_eq!(items[2].parent(), Some(parent));
}

#[test]
fn test_insert_before_itself_is_noop_in_order() {
    let document = Document::new();
    let (parent, items) = list(&document, &["a", "b", "c"]);

    parent.insert_before(&items[1], Some(&items[1])).unwrap();

    assert_eq!(parent.children(), items);
}

#[test]
fn test_insert_before_rejects_foreign_reference() {
    let document = Document::new();
    let (parent, _) = list(&document, &["a"]);
    let stranger = document.create_element("li");
    let child = document.create_element("li");

    let err = parent.insert_before(&child, Some(&stranger)).unwrap_err();
    assert_eq!(err, DomError::NotAChild);
}

#[test]
fn test_insert_rejects_cycles_and_text_parents() {
    let document = Document::new();
    let outer = document.create_element("div");
    let inner = document.create_element("span");
    outer.append_child(&inner).unwrap();

    assert!(matches!(
        inner.append_child(&outer),
        Err(DomError::HierarchyRequest { .. })
    ));
    assert!(matches!(
        outer.append_child(&outer),
        Err(DomError::HierarchyRequest { .. })
    ));

    let text = document.create_text("x");
    assert!(matches!(
        text.append_child(&document.create_text("y")),
        Err(DomError::HierarchyRequest { .. })
    ));
}

#[test]
fn test_inserting_fragment_moves_its_children() {
    let document = Document::new();
    let fragment = document.create_fragment();
    let a = document.create_text("a");
    let b = document.create_text("b");
    fragment.append_child(&a).unwrap();
    fragment.append_child(&b).unwrap();
    let parent = document.create_element("div");

    parent.append_child(&fragment).unwrap();

    assert_eq!(parent.children(), vec![a, b]);
    assert_eq!(fragment.child_count(), 0);
}

#[test]
fn test_stats_treat_fragments_as_staging() {
    let document = Document::new();
    let parent = document.create_element("div");
    let fragment = document.create_fragment();
    let node = document.create_element("p");
    let before = document.stats();

    fragment.append_child(&node).unwrap();
    let staged = document.stats().since(&before);
    assert_eq!(staged.tree_operations(), 0);

    parent.append_child(&node).unwrap();
    let inserted = document.stats().since(&before);
    assert_eq!(inserted.inserted, 1);

    let other = document.create_element("section");
    parent.append_child(&other).unwrap();
    parent.insert_before(&other, Some(&node)).unwrap();
    let moved = document.stats().since(&before);
    assert_eq!(moved.moved, 1);

    fragment.append_child(&node).unwrap();
    let removed = document.stats().since(&before);
    assert_eq!(removed.removed, 1);
}

#[test]
fn test_remove_and_replace() {
    let document = Document::new();
    let (parent, items) = list(&document, &["a", "b", "c"]);
    let fresh = document.create_element("li");

    items[1].replace_with(&fresh).unwrap();
    assert_eq!(parent.children(), vec![items[0].clone(), fresh.clone(), items[2].clone()]);
    assert_eq!(items[1].parent(), None);

    items[0].remove();
    assert_eq!(parent.children(), vec![fresh, items[2].clone()]);

    assert_eq!(items[0].replace_with(&items[1]), Err(DomError::DetachedAnchor));
}

#[test]
fn test_siblings_and_index() {
    let document = Document::new();
    let (parent, items) = list(&document, &["a", "b", "c"]);

    assert_eq!(items[1].next_sibling(), Some(items[2].clone()));
    assert_eq!(items[1].previous_sibling(), Some(items[0].clone()));
    assert_eq!(items[0].previous_sibling(), None);
    assert_eq!(items[2].next_sibling(), None);
    assert_eq!(items[2].index_in_parent(), Some(2));
    assert_eq!(parent.first_child(), Some(items[0].clone()));
    assert_eq!(parent.last_child(), Some(items[2].clone()));
}

#[test]
fn test_attributes() {
    let document = Document::new();
    let div = document.create_element("div");

    div.set_attribute("data-x", "1").unwrap();
    div.set_attribute("data-x", "2").unwrap();
    assert_eq!(div.get_attribute("data-x").as_deref(), Some("2"));
    assert_eq!(div.attributes().len(), 1);

    assert!(div.toggle_attribute("hidden", true).unwrap());
    assert_eq!(div.get_attribute("hidden").as_deref(), Some(""));
    assert!(!div.toggle_attribute("hidden", false).unwrap());
    assert!(!div.has_attribute("hidden"));

    assert!(div.remove_attribute("data-x"));
    assert!(!div.remove_attribute("data-x"));

    let text = document.create_text("t");
    assert_eq!(text.set_attribute("a", "b"), Err(DomError::NotAnElement));
}

#[test]
fn test_text_content() {
    let document = Document::new();
    let (parent, _) = list(&document, &["a", "b"]);
    parent.append_child(&document.create_comment("ignored")).unwrap();

    assert_eq!(parent.text_content(), "ab");

    parent.set_text_content("replaced").unwrap();
    assert_eq!(parent.child_count(), 1);
    assert_eq!(parent.text_content(), "replaced");

    parent.set_text_content("").unwrap();
    assert_eq!(parent.child_count(), 0);
}

#[test]
fn test_import_node_copies_tree_without_state() {
    let source = Document::new();
    let target = Document::new();
    let (parent, items) = list(&source, &["a"]);
    parent.set_attribute("class", "menu").unwrap();
    items[0].set_expando("custom", Value::from(1)).unwrap();

    let copy = target.import_node(&parent, true);

    assert_ne!(copy, parent);
    assert_eq!(outer_html(&copy), "<ul class=\"menu\"><li>a</li></ul>");
    assert_eq!(copy.child(0).and_then(|li| li.property("custom")), None);
    assert_eq!(target.stats().created, 3);
}

#[test]
fn test_serialization_escapes_text() {
    let document = Document::new();
    let p = document.create_element("p");
    p.set_attribute("title", "a \"quote\"").unwrap();
    p.append_child(&document.create_text("1 < 2 & 3")).unwrap();
    p.append_child(&document.create_comment("note")).unwrap();

    assert_eq!(
        outer_html(&p),
        "<p title=\"a &quot;quote&quot;\">1 &lt; 2 &amp; 3<!--note--></p>"
    );
    assert_eq!(inner_html(&p), "1 &lt; 2 &amp; 3<!--note-->");
}

#[test]
fn test_reflected_and_flag_properties() {
    let document = Document::new();
    let input = document.create_element("input");

    input.set_property("id", Value::from("name")).unwrap();
    assert_eq!(input.get_attribute("id").as_deref(), Some("name"));

    input.set_property("className", Value::from("wide")).unwrap();
    assert_eq!(input.get_attribute("class").as_deref(), Some("wide"));

    input.set_property("disabled", Value::Bool(true)).unwrap();
    assert_eq!(input.property("disabled"), Some(Value::Bool(true)));
    input.set_property("disabled", Value::Bool(false)).unwrap();
    assert!(!input.has_attribute("disabled"));

    input.set_property("id", Value::Null).unwrap();
    assert!(!input.has_attribute("id"));
}

#[test]
fn test_state_properties_fall_back_to_attribute() {
    let document = Document::new();
    let input = document.create_element("input");
    input.set_attribute("value", "initial").unwrap();

    assert_eq!(input.property("value"), Some(Value::from("initial")));

    input.set_property("value", Value::from("typed")).unwrap();
    assert_eq!(input.property("value"), Some(Value::from("typed")));
    assert_eq!(input.get_attribute("value").as_deref(), Some("initial"));

    input.clear_property("value");
    assert_eq!(input.property("value"), Some(Value::from("initial")));
    assert_eq!(input.property("checked"), Some(Value::Bool(false)));
}

#[test]
fn test_unknown_properties_rejected_except_on_custom_elements() {
    let document = Document::new();
    let div = document.create_element("div");
    let custom = document.create_element("my-widget");

    assert!(!div.accepts_property("items"));
    assert!(matches!(
        div.set_property("items", Value::from(1)),
        Err(DomError::UnknownProperty { .. })
    ));

    assert!(custom.accepts_property("items"));
    assert!(!custom.supports_property("items"));
    custom.set_property("items", Value::list([1, 2])).unwrap();
    assert_eq!(custom.property("items"), Some(Value::list([1, 2])));
}

#[test]
fn test_handler_property_requires_listener() {
    let document = Document::new();
    let button = document.create_element("button");

    assert!(button.supports_property("onclick"));
    assert!(matches!(
        button.set_property("onclick", Value::from("alert()")),
        Err(DomError::InvalidPropertyValue { .. })
    ));
    assert_eq!(button.property("onclick"), Some(Value::Null));
}

#[test]
fn test_dispatch_runs_listeners_and_bubbles() {
    let document = Document::new();
    let outer = document.create_element("div");
    let button = document.create_element("button");
    outer.append_child(&button).unwrap();

    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let listener = EventListener::new(move |_| counter.set(counter.get() + 1));
    button.add_event_listener("click", &listener).unwrap();
    button.add_event_listener("click", &listener).unwrap();
    outer.add_event_listener("click", &listener).unwrap();
    assert_eq!(button.listener_count("click"), 1);

    assert_eq!(button.dispatch_event(Event::new("click")), 1);
    assert_eq!(button.dispatch_event(Event::new("click").bubbling()), 2);
    assert_eq!(hits.get(), 3);

    assert!(button.remove_event_listener("click", &listener));
    assert_eq!(button.dispatch_event(Event::new("click")), 0);
}

#[test]
fn test_once_listener_runs_once_and_sees_targets() {
    let document = Document::new();
    let outer = document.create_element("div");
    let inner = document.create_element("span");
    outer.append_child(&inner).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let listener = EventListener::new(move |event| {
        log.borrow_mut().push((
            event.target().cloned(),
            event.current_target().cloned(),
        ));
    })
    .with_options(ListenerOptions {
        once: true,
        ..Default::default()
    });
    outer.add_event_listener("ping", &listener).unwrap();

    inner.dispatch_event(Event::new("ping").bubbling());
    inner.dispatch_event(Event::new("ping").bubbling());

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], (Some(inner.clone()), Some(outer.clone())));
}

#[test]
fn test_handler_property_is_dispatched() {
    let document = Document::new();
    let button = document.create_element("button");
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);

    button
        .set_property("onclick", Value::listener(move |_| counter.set(counter.get() + 1)))
        .unwrap();
    button.dispatch_event(Event::new("click"));

    assert_eq!(hits.get(), 1);
}
