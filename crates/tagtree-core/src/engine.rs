//! The shared context every render runs against.

use std::rc::Rc;

use crate::config::EngineConfig;
use crate::dom::Document;
use crate::error::Result;
use crate::template::{Template, TemplateCache, TemplateSite};

/// Target document, template cache and configuration.
#[derive(Debug)]
pub struct Engine {
    document: Document,
    templates: TemplateCache,
    config: EngineConfig,
}

impl Engine {
    pub fn new(document: Document) -> Self {
        Self::with_config(document, EngineConfig::default())
    }

    pub fn with_config(document: Document, config: EngineConfig) -> Self {
        Self {
            document,
            templates: TemplateCache::new(),
            config,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn templates(&self) -> &TemplateCache {
        &self.templates
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The parsed template for `site`, from the cache when possible.
    pub fn template(&self, site: &'static TemplateSite) -> Result<Rc<Template>> {
        self.templates.get_or_parse(site, &self.config)
    }
}
