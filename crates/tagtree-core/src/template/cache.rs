//! Per-engine template cache keyed by call-site identity.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{Template, TemplateId, TemplateSite, parser};
use crate::config::EngineConfig;
use crate::dom::Document;
use crate::error::Result;

/// Parsed templates, one per [`TemplateSite`]. Entries are never evicted.
///
/// Template trees live in a private document so parsing never shows up in
/// the mutation counters of the document being rendered into.
#[derive(Debug, Default)]
pub struct TemplateCache {
    document: Document,
    templates: RefCell<HashMap<TemplateId, Rc<Template>>>,
    parses: Cell<usize>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the template for `site`, parsing it on first use.
    pub fn get_or_parse(
        &self,
        site: &'static TemplateSite,
        config: &EngineConfig,
    ) -> Result<Rc<Template>> {
        let id = site.id();
        if let Some(template) = self.templates.borrow().get(&id) {
            log::trace!("cache hit for {id}");
            return Ok(Rc::clone(template));
        }

        let parsed = parser::parse(&self.document, site, config)?;
        self.parses.set(self.parses.get() + 1);
        log::debug!(
            "parsed {id}: {} holes, single root: {}",
            parsed.entries.len(),
            parsed.single_root
        );

        let template = Rc::new(Template {
            id,
            svg: site.is_svg(),
            content: parsed.content,
            entries: parsed.entries,
            single_root: parsed.single_root,
            markup: parsed.markup,
        });
        self.templates.borrow_mut().insert(id, Rc::clone(&template));
        Ok(template)
    }

    pub fn get(&self, id: TemplateId) -> Option<Rc<Template>> {
        self.templates.borrow().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.templates.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.borrow().is_empty()
    }

    /// How many times a source was actually parsed.
    pub fn parse_count(&self) -> usize {
        self.parses.get()
    }
}
