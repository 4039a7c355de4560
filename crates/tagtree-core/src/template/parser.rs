//! Template parser
//!
//! Parsing happens in three passes:
//!
//! 1. **normalize**: join the static segments with hole markers, expand
//!    self-closing tags, and turn attribute holes into numbered marker
//!    attributes and content holes into numbered marker comments.
//! 2. **parse**: hand the markup to html5ever's fragment parser (in a
//!    `<template>` context for HTML, `<svg>` for SVG) and import the result
//!    into a detached fragment.
//! 3. **walk**: visit the tree in document order, find the markers hole by
//!    hole, record a child-index path and an updater for each, and strip
//!    the markers.

use std::fmt::Write as _;
use std::sync::LazyLock;

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_fragment};
use markup5ever::{LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle as RcHandle, NodeData as RcNodeData, RcDom};
use regex::{Captures, Regex};

use super::error::TemplateError;
use super::{PathEntry, TemplateSite, segments};
use crate::binding::{Updater, dispatch};
use crate::config::EngineConfig;
use crate::dom::{Attr, Document, HTML_NAMESPACE, Handle, NodeKind, SVG_NAMESPACE};
use crate::error::Result;

/// Prefix of the marker attributes and comments.
pub const HOLE_PREFIX: &str = "tagtree-hole-";

const CONTENT_MARK: char = '\u{1}';
const ATTRIBUTE_MARK: char = '\u{2}';

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([a-zA-Z0-9]+[a-zA-Z0-9:._-]*)([^>]*?)(/?)>").expect("tag pattern is valid")
});

static ATTRIBUTE_HOLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s\\>"'=]+)\s*=\s*(['"]?)\x01"#).expect("attribute hole pattern is valid")
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "menuitem",
    "meta", "param", "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["plaintext", "script", "style", "textarea", "title", "xmp"];

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(name))
}

fn is_raw_text(node: &Handle) -> bool {
    node.local_name()
        .is_some_and(|name| RAW_TEXT_ELEMENTS.contains(&name))
}

/// Output of [`parse`].
#[derive(Debug)]
pub struct Parsed {
    pub content: Handle,
    pub entries: Vec<PathEntry>,
    pub single_root: bool,
    pub markup: String,
}

/// Parses `site` into a detached tree owned by `document`.
///
/// # Errors
///
/// - [`TemplateError::MalformedSource`] for stray braces
/// - [`TemplateError::UnresolvedHole`] when a hole marker did not survive
///   HTML parsing
/// - `INVALID_BINDING_TARGET` for `.prop` holes naming unknown properties
///   under strict property checking
pub fn parse(document: &Document, site: &TemplateSite, config: &EngineConfig) -> Result<Parsed> {
    let segments = segments::split(site.source())?;
    let holes = segments.len() - 1;
    let markup = normalize(&segments, site.is_svg(), config.parser.trim);
    let content = parse_markup(document, &markup, site.is_svg())?;

    let mut walker = HoleWalker {
        holes,
        next: 0,
        svg: site.is_svg(),
        config,
        path: Vec::new(),
        entries: Vec::with_capacity(holes),
    };
    walker.visit_children(&content)?;
    if walker.next < holes {
        return Err(TemplateError::UnresolvedHole {
            index: walker.next,
            holes,
        }
        .into());
    }

    let single_root = match content.child_count() {
        0 => {
            content.push_child(document.create_text(""));
            true
        }
        1 => holes == 0 || content.first_child().is_some_and(|node| node.is_element()),
        _ => false,
    };

    Ok(Parsed {
        content,
        entries: walker.entries,
        single_root,
        markup,
    })
}

/// Rewrites joined template segments into parseable markup with numbered
/// hole markers.
pub fn normalize(segments: &[String], svg: bool, trim: bool) -> String {
    let joined = segments.join("\u{1}");
    let joined = if trim { joined.trim() } else { joined.as_str() };

    let tagged = TAG.replace_all(joined, |caps: &Captures| {
        let name = &caps[1];
        let attributes = ATTRIBUTE_HOLE.replace_all(&caps[2], "\u{2}=${2}${1}");
        let closing = if caps[3].is_empty() {
            String::new()
        } else if svg || is_void(name) {
            " /".to_string()
        } else {
            format!("></{name}")
        };
        format!("<{name}{}{closing}>", attributes.trim_end())
    });

    let mut markup = String::with_capacity(tagged.len() + segments.len() * 24);
    let mut index = 0;
    for ch in tagged.chars() {
        match ch {
            CONTENT_MARK => {
                let _ = write!(markup, "<!--{HOLE_PREFIX}{index}-->");
                index += 1;
            }
            ATTRIBUTE_MARK => {
                let _ = write!(markup, "{HOLE_PREFIX}{index}");
                index += 1;
            }
            c => markup.push(c),
        }
    }
    markup
}

fn context_name(svg: bool) -> QualName {
    if svg {
        QualName::new(None, Namespace::from(SVG_NAMESPACE), LocalName::from("svg"))
    } else {
        QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from("template"))
    }
}

fn parse_markup(document: &Document, markup: &str, svg: bool) -> Result<Handle> {
    let dom = parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        context_name(svg),
        Vec::new(),
    )
    .one(markup);

    let root = dom
        .document
        .children
        .borrow()
        .first()
        .cloned()
        .ok_or_else(|| TemplateError::ParseFailed {
            message: "fragment parser produced no root element".to_string(),
        })?;

    let content = document.create_fragment();
    for child in root.children.borrow().iter() {
        if let Some(node) = import(document, child) {
            content.push_child(node);
        }
    }
    Ok(content)
}

fn import(document: &Document, node: &RcHandle) -> Option<Handle> {
    let imported = match &node.data {
        RcNodeData::Element { name, attrs, .. } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| Attr {
                    name: attr.name.clone(),
                    value: attr.value.to_string(),
                })
                .collect();
            document.create_element_with(name.clone(), attrs)
        }
        RcNodeData::Text { contents } => document.create_text(contents.borrow().to_string()),
        RcNodeData::Comment { contents } => document.create_comment(contents.to_string()),
        _ => return None,
    };
    for child in node.children.borrow().iter() {
        if let Some(child) = import(document, child) {
            imported.push_child(child);
        }
    }
    Some(imported)
}

struct HoleWalker<'a> {
    holes: usize,
    next: usize,
    svg: bool,
    config: &'a EngineConfig,
    path: Vec<usize>,
    entries: Vec<PathEntry>,
}

impl HoleWalker<'_> {
    fn marker(&self) -> String {
        format!("{HOLE_PREFIX}{}", self.next)
    }

    fn done(&self) -> bool {
        self.next >= self.holes
    }

    fn push(&mut self, updater: Updater) {
        self.entries.push(PathEntry {
            path: self.path.clone(),
            updater,
        });
        self.next += 1;
    }

    fn visit_children(&mut self, parent: &Handle) -> Result<()> {
        for (index, child) in parent.children().iter().enumerate() {
            if self.done() {
                break;
            }
            self.path.push(index);
            self.visit(child)?;
            self.path.pop();
        }
        Ok(())
    }

    fn visit(&mut self, node: &Handle) -> Result<()> {
        match node.kind() {
            NodeKind::Comment => {
                if node.data().as_deref() == Some(self.marker().as_str()) {
                    node.set_data("")?;
                    self.push(Updater::Content);
                }
            }
            NodeKind::Element => {
                while !self.done() {
                    let marker = self.marker();
                    let Some(name) = node.get_attribute(&marker) else {
                        break;
                    };
                    node.remove_attribute(&marker);
                    let updater = dispatch::select(node, &name, self.svg, self.config)?;
                    self.push(updater);
                }

                if !self.done()
                    && !self.svg
                    && is_raw_text(node)
                    && node.text_content().trim() == format!("<!--{}-->", self.marker())
                {
                    node.set_text_content("")?;
                    self.push(Updater::Text);
                }

                self.visit_children(node)?;
            }
            NodeKind::Text | NodeKind::Fragment => {}
        }
        Ok(())
    }
}
