use std::cell::RefCell;
use std::rc::Rc;

use super::dispatch::select;
use super::{Binding, Updater};
use crate::config::EngineConfig;
use crate::dom::{Document, Event, EventListener, Handle};
use crate::engine::Engine;
use crate::error::TagtreeError;
use crate::value::{NodeRef, Value};

fn setup(tag: &str) -> (Engine, Handle) {
    let engine = Engine::new(Document::new());
    let node = engine.document().create_element(tag);
    (engine, node)
}

fn bind(node: &Handle, updater: Updater) -> Binding {
    Binding::new(node.clone(), updater)
}

#[test]
fn test_select_prefixes() {
    let (_, input) = setup("input");
    let config = EngineConfig::default();

    assert_eq!(
        select(&input, "?checked", false, &config).unwrap(),
        Updater::Toggle {
            name: "checked".into()
        }
    );
    assert_eq!(
        select(&input, "@change", false, &config).unwrap(),
        Updater::Listener {
            event: "change".into()
        }
    );
    assert_eq!(
        select(&input, ".value", false, &config).unwrap(),
        Updater::Property {
            name: "value".into(),
            expando: false,
        }
    );
}

#[test]
fn test_select_reflected_and_handler_names() {
    let (_, button) = setup("button");
    let config = EngineConfig::default();

    assert_eq!(
        select(&button, "id", false, &config).unwrap(),
        Updater::Reflect { name: "id".into() }
    );
    assert_eq!(
        select(&button, "onclick", false, &config).unwrap(),
        Updater::Handler {
            name: "onclick".into()
        }
    );
    assert_eq!(
        select(&button, "x-label", false, &config).unwrap(),
        Updater::Attribute {
            name: "x-label".into()
        }
    );
}

#[test]
fn test_select_svg_context_skips_special_names() {
    let (_, g) = setup("g");
    let config = EngineConfig::default();

    assert_eq!(
        select(&g, "style", true, &config).unwrap(),
        Updater::Attribute {
            name: "style".into()
        }
    );
    assert_eq!(select(&g, "ref", true, &config).unwrap(), Updater::Ref);
    assert_eq!(
        select(&g, "?hidden", true, &config).unwrap(),
        Updater::Toggle {
            name: "hidden".into()
        }
    );
}

#[test]
fn test_updater_kind_and_name() {
    let updater = Updater::Listener {
        event: "click".into(),
    };
    assert_eq!(updater.kind(), "listener");
    assert_eq!(updater.name(), Some("click"));
    assert_eq!(Updater::Content.name(), None);
}

#[test]
fn test_attribute_null_and_undefined_remove() {
    let (engine, div) = setup("div");
    let mut binding = bind(&div, Updater::Attribute { name: "title".into() });

    binding.apply(&engine, &Value::from("hello")).unwrap();
    assert_eq!(div.get_attribute("title").as_deref(), Some("hello"));

    binding.apply(&engine, &Value::Null).unwrap();
    assert!(!div.has_attribute("title"));

    binding.apply(&engine, &Value::from(3)).unwrap();
    assert_eq!(div.get_attribute("title").as_deref(), Some("3"));

    binding.apply(&engine, &Value::Undefined).unwrap();
    assert!(!div.has_attribute("title"));
}

#[test]
fn test_unchanged_value_skips_write() {
    let (engine, div) = setup("div");
    let mut binding = bind(&div, Updater::Attribute { name: "title".into() });

    binding.apply(&engine, &Value::from("same")).unwrap();
    let before = engine.document().stats();
    binding.apply(&engine, &Value::from("same")).unwrap();

    assert!(engine.document().stats().since(&before).is_quiet());
}

#[test]
fn test_attribute_rejects_maps() {
    let (engine, div) = setup("div");
    let mut binding = bind(&div, Updater::Attribute { name: "title".into() });

    let err = binding
        .apply(&engine, &Value::map([("a", 1)]))
        .unwrap_err();
    assert!(matches!(
        err,
        TagtreeError::InvalidBindingValue {
            binding: "attribute",
            found: "map"
        }
    ));
}

#[test]
fn test_toggle_follows_truthiness() {
    let (engine, input) = setup("input");
    let mut binding = bind(&input, Updater::Toggle { name: "disabled".into() });

    binding.apply(&engine, &Value::from(1)).unwrap();
    assert!(input.has_attribute("disabled"));
    binding.apply(&engine, &Value::from("")).unwrap();
    assert!(!input.has_attribute("disabled"));
    binding.apply(&engine, &Value::from("yes")).unwrap();
    assert!(input.has_attribute("disabled"));
    binding.apply(&engine, &Value::Null).unwrap();
    assert!(!input.has_attribute("disabled"));
}

#[test]
fn test_class_accepts_lists_and_maps() {
    let (engine, div) = setup("div");
    let mut binding = bind(&div, Updater::Class);

    binding
        .apply(&engine, &Value::list([Value::from("a"), Value::Null, Value::from("b")]))
        .unwrap();
    assert_eq!(div.get_attribute("class").as_deref(), Some("a b"));

    binding
        .apply(
            &engine,
            &Value::map([("active", Value::Bool(true)), ("hidden", Value::Bool(false))]),
        )
        .unwrap();
    assert_eq!(div.get_attribute("class").as_deref(), Some("active"));

    binding.apply(&engine, &Value::Null).unwrap();
    assert!(!div.has_attribute("class"));
}

#[test]
fn test_style_map_skips_nullish_declarations() {
    let (engine, div) = setup("div");
    let mut binding = bind(&div, Updater::Style);

    binding
        .apply(
            &engine,
            &Value::map([
                ("color", Value::from("red")),
                ("margin", Value::Null),
                ("opacity", Value::from(0.5)),
            ]),
        )
        .unwrap();
    assert_eq!(
        div.get_attribute("style").as_deref(),
        Some("color: red; opacity: 0.5;")
    );
}

#[test]
fn test_aria_map_removes_stale_keys() {
    let (engine, div) = setup("div");
    let mut binding = bind(&div, Updater::Aria);

    binding
        .apply(
            &engine,
            &Value::map([("role", Value::from("button")), ("Label", Value::from("Go"))]),
        )
        .unwrap();
    assert_eq!(div.get_attribute("role").as_deref(), Some("button"));
    assert_eq!(div.get_attribute("aria-label").as_deref(), Some("Go"));

    binding
        .apply(&engine, &Value::map([("role", Value::from("link"))]))
        .unwrap();
    assert_eq!(div.get_attribute("role").as_deref(), Some("link"));
    assert!(!div.has_attribute("aria-label"));

    binding.apply(&engine, &Value::Null).unwrap();
    assert!(!div.has_attribute("role"));
}

#[test]
fn test_data_keys_are_dash_cased() {
    let (engine, div) = setup("div");
    let mut binding = bind(&div, Updater::Data);

    binding
        .apply(
            &engine,
            &Value::map([("userId", Value::from(7)), ("gone", Value::Null)]),
        )
        .unwrap();

    assert_eq!(div.get_attribute("data-user-id").as_deref(), Some("7"));
    assert!(!div.has_attribute("data-gone"));
}

#[test]
fn test_listener_is_swapped() {
    let (engine, button) = setup("button");
    let log = Rc::new(RefCell::new(Vec::new()));
    let first = {
        let log = Rc::clone(&log);
        EventListener::new(move |_| log.borrow_mut().push("first"))
    };
    let second = {
        let log = Rc::clone(&log);
        EventListener::new(move |_| log.borrow_mut().push("second"))
    };
    let mut binding = bind(&button, Updater::Listener { event: "click".into() });

    binding.apply(&engine, &Value::from(&first)).unwrap();
    button.dispatch_event(Event::new("click"));
    binding.apply(&engine, &Value::from(&second)).unwrap();
    button.dispatch_event(Event::new("click"));
    binding.apply(&engine, &Value::Null).unwrap();
    button.dispatch_event(Event::new("click"));

    assert_eq!(*log.borrow(), vec!["first", "second"]);
    assert_eq!(button.listener_count("click"), 0);
}

#[test]
fn test_listener_rejects_strings() {
    let (engine, button) = setup("button");
    let mut binding = bind(&button, Updater::Listener { event: "click".into() });

    assert!(matches!(
        binding.apply(&engine, &Value::from("handler()")),
        Err(TagtreeError::InvalidBindingValue { .. })
    ));
}

#[test]
fn test_ref_cell_and_callback() {
    let (engine, div) = setup("div");

    let cell = NodeRef::new();
    bind(&div, Updater::Ref)
        .apply(&engine, &Value::from(&cell))
        .unwrap();
    assert_eq!(cell.current(), Some(div.clone()));

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let callback = NodeRef::callback(move |node| *sink.borrow_mut() = Some(node.clone()));
    bind(&div, Updater::Ref)
        .apply(&engine, &Value::from(callback))
        .unwrap();
    assert_eq!(*seen.borrow(), Some(div));
}

#[test]
fn test_reflect_null_clears_attribute() {
    let (engine, input) = setup("input");
    let mut binding = bind(&input, Updater::Reflect { name: "title".into() });

    binding.apply(&engine, &Value::from("tip")).unwrap();
    assert_eq!(input.get_attribute("title").as_deref(), Some("tip"));

    binding.apply(&engine, &Value::Null).unwrap();
    assert!(!input.has_attribute("title"));
}

#[test]
fn test_reflect_null_resets_state_property() {
    let (engine, input) = setup("input");
    input.set_attribute("value", "seed").unwrap();
    let mut binding = bind(&input, Updater::Reflect { name: "value".into() });

    binding.apply(&engine, &Value::from("typed")).unwrap();
    assert_eq!(input.property("value"), Some(Value::from("typed")));

    binding.apply(&engine, &Value::Null).unwrap();
    assert!(!input.has_attribute("value"));
    assert_eq!(input.property("value"), Some(Value::from("")));
    assert!(input.is_state_property("value"));
    assert!(!input.is_state_property("title"));
}

#[test]
fn test_text_updater_writes_raw_text() {
    let (engine, textarea) = setup("textarea");
    let mut binding = bind(&textarea, Updater::Text);

    binding.apply(&engine, &Value::from("<b>not markup</b>")).unwrap();
    assert_eq!(textarea.text_content(), "<b>not markup</b>");

    binding.apply(&engine, &Value::Null).unwrap();
    assert_eq!(textarea.text_content(), "");
}
