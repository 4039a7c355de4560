use std::rc::Rc;

use crate::config::EngineConfig;
use crate::template::{TemplateCache, TemplateSite};

static FIRST: TemplateSite = TemplateSite::html("<p>{}</p>");
static SECOND: TemplateSite = TemplateSite::html("<p>{}</p>");

#[test]
fn test_same_site_parses_once() {
    let cache = TemplateCache::new();
    let config = EngineConfig::default();

    let a = cache.get_or_parse(&FIRST, &config).unwrap();
    let b = cache.get_or_parse(&FIRST, &config).unwrap();

    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(cache.parse_count(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_identical_text_at_different_sites_parses_twice() {
    let cache = TemplateCache::new();
    let config = EngineConfig::default();

    let a = cache.get_or_parse(&FIRST, &config).unwrap();
    let b = cache.get_or_parse(&SECOND, &config).unwrap();

    assert_ne!(a.id(), b.id());
    assert!(!Rc::ptr_eq(&a, &b));
    assert_eq!(cache.parse_count(), 2);
}

#[test]
fn test_macro_site_is_stable_across_calls() {
    let cache = TemplateCache::new();
    let config = EngineConfig::default();

    for i in 0..5 {
        let hole = crate::html!("<li>{}</li>", i);
        let template = cache.get_or_parse(hole.site(), &config).unwrap();
        assert_eq!(template.hole_count(), 1);
    }

    assert_eq!(cache.parse_count(), 1);
}

#[test]
fn test_failed_parse_is_not_cached() {
    let cache = TemplateCache::new();
    let config = EngineConfig::default();
    let site = TemplateSite::leak("<p>{x}</p>", false);

    assert!(cache.get_or_parse(site, &config).is_err());
    assert!(cache.is_empty());
    assert_eq!(cache.get(site.id()).map(|t| t.hole_count()), None);
}
