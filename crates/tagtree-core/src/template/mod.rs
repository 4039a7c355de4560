//! Template module - parsing tagged template sources into reusable trees
//!
//! A template source is HTML (or SVG) markup with `{}` holes. It is parsed
//! once per call site into a detached node tree plus one [`PathEntry`] per
//! hole. Instances clone that tree and use the paths to find the nodes
//! their values go to.
//!
//! ## Hole positions
//!
//! - Attribute: `<p class={}>`, `<input .value={}>`, `<b ?hidden={}>`,
//!   `<button @click={}>`
//! - Content: `<p>{}</p>`, anywhere a child node could be
//! - Raw text: the whole body of `<textarea>`, `<style>`, `<script>`,
//!   `<title>`, `<xmp>` or `<plaintext>`
//!
//! Holes inside attribute values (`class="a {}"`) or tag names are not
//! supported.

pub mod cache;
pub mod error;
pub mod parser;
pub mod path;
pub mod segments;

#[cfg(test)]
mod tests;

pub use cache::TemplateCache;
pub use error::TemplateError;

use serde::Serialize;
use std::fmt;

use crate::binding::Updater;
use crate::dom::Handle;

/// One call site of [`html!`](crate::html) or [`svg!`](crate::svg).
///
/// The site's address is its identity, so it has to live in a `static`
/// (the macros take care of that) or be leaked with [`TemplateSite::leak`].
#[derive(Debug)]
pub struct TemplateSite {
    source: &'static str,
    svg: bool,
}

impl TemplateSite {
    pub const fn html(source: &'static str) -> Self {
        Self { source, svg: false }
    }

    pub const fn svg(source: &'static str) -> Self {
        Self { source, svg: true }
    }

    /// Creates a site for source only known at runtime. Every call leaks
    /// a new site, so callers should intern the result.
    pub fn leak(source: impl Into<String>, svg: bool) -> &'static TemplateSite {
        let source: &'static str = Box::leak(source.into().into_boxed_str());
        Box::leak(Box::new(TemplateSite { source, svg }))
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn is_svg(&self) -> bool {
        self.svg
    }

    pub fn id(&'static self) -> TemplateId {
        TemplateId(self as *const TemplateSite as usize)
    }
}

/// Identity of a [`TemplateSite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(usize);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template@{:#x}", self.0)
    }
}

/// Where a hole's node is, and how values are written to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    /// Child indices from the template root.
    pub path: Vec<usize>,
    pub updater: Updater,
}

/// A parsed template. Immutable once built and shared by every instance.
#[derive(Debug)]
pub struct Template {
    id: TemplateId,
    svg: bool,
    content: Handle,
    entries: Vec<PathEntry>,
    single_root: bool,
    markup: String,
}

impl Template {
    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn is_svg(&self) -> bool {
        self.svg
    }

    /// Detached fragment holding the template's nodes.
    pub fn content(&self) -> &Handle {
        &self.content
    }

    /// One entry per hole, in hole order.
    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn hole_count(&self) -> usize {
        self.entries.len()
    }

    /// True when instances render to a single node rather than a fragment.
    pub fn is_single_root(&self) -> bool {
        self.single_root
    }

    /// Normalized markup handed to the HTML parser.
    pub fn markup(&self) -> &str {
        &self.markup
    }
}
