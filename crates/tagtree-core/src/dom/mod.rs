//! In-memory document model the renderer writes into.
//!
//! Nodes are reference counted with weak parent links, the same ownership
//! shape `markup5ever_rcdom` uses. A [`Handle`] compares by identity, so two
//! handles are equal only when they point at the same node.
//!
//! All writes go through `Handle` methods so the owning [`Document`] can
//! count them (see [`MutationCounts`]).

mod error;
mod events;
mod props;
mod serialize;
mod stats;

#[cfg(test)]
mod tests;

pub use error::DomError;
pub use events::{Event, EventListener, ListenerOptions};
pub use serialize::{inner_html, outer_html};
pub use stats::MutationCounts;

use events::Registration;
use stats::{Mutation, MutationStats};

use markup5ever::{LocalName, Namespace, QualName};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use crate::value::Value;

pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Node factory and owner of the mutation counters.
///
/// Cloning a `Document` yields another view of the same counters.
#[derive(Clone, Default)]
pub struct Document {
    stats: Rc<MutationStats>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, data: NodeData) -> Handle {
        self.stats.record(Mutation::Created);
        Handle(Rc::new(Node {
            parent: Cell::new(None),
            children: RefCell::new(Vec::new()),
            data,
            stats: Rc::clone(&self.stats),
        }))
    }

    /// Creates an HTML element.
    pub fn create_element(&self, local: &str) -> Handle {
        self.create_element_ns(HTML_NAMESPACE, local)
    }

    pub fn create_element_ns(&self, namespace: &str, local: &str) -> Handle {
        let name = QualName::new(None, Namespace::from(namespace), LocalName::from(local));
        self.create_element_with(name, Vec::new())
    }

    pub(crate) fn create_element_with(&self, name: QualName, attrs: Vec<Attr>) -> Handle {
        self.node(NodeData::Element(ElementData {
            name,
            attrs: RefCell::new(attrs),
            props: RefCell::new(HashMap::new()),
            listeners: RefCell::new(Vec::new()),
        }))
    }

    pub fn create_text(&self, data: impl Into<String>) -> Handle {
        self.node(NodeData::Text(RefCell::new(data.into())))
    }

    pub fn create_comment(&self, data: impl Into<String>) -> Handle {
        self.node(NodeData::Comment(RefCell::new(data.into())))
    }

    pub fn create_fragment(&self) -> Handle {
        self.node(NodeData::Fragment)
    }

    /// Copies `node` (and, when `deep`, its subtree) into this document.
    ///
    /// Attributes and character data are copied; properties and listeners
    /// are not.
    pub fn import_node(&self, node: &Handle, deep: bool) -> Handle {
        let data = match &node.0.data {
            NodeData::Fragment => NodeData::Fragment,
            NodeData::Element(element) => NodeData::Element(ElementData {
                name: element.name.clone(),
                attrs: RefCell::new(element.attrs.borrow().clone()),
                props: RefCell::new(HashMap::new()),
                listeners: RefCell::new(Vec::new()),
            }),
            NodeData::Text(text) => NodeData::Text(RefCell::new(text.borrow().clone())),
            NodeData::Comment(text) => NodeData::Comment(RefCell::new(text.borrow().clone())),
        };
        let copy = self.node(data);
        if deep {
            for child in node.children() {
                copy.push_child(self.import_node(&child, true));
            }
        }
        copy
    }

    pub fn stats(&self) -> MutationCounts {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}

pub(crate) struct Node {
    parent: Cell<Option<Weak<Node>>>,
    children: RefCell<Vec<Handle>>,
    data: NodeData,
    stats: Rc<MutationStats>,
}

pub(crate) enum NodeData {
    Fragment,
    Element(ElementData),
    Text(RefCell<String>),
    Comment(RefCell<String>),
}

pub(crate) struct ElementData {
    pub(crate) name: QualName,
    pub(crate) attrs: RefCell<Vec<Attr>>,
    pub(crate) props: RefCell<HashMap<String, Value>>,
    pub(crate) listeners: RefCell<Vec<Registration>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Fragment,
    Element,
    Text,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: QualName,
    pub value: String,
}

impl Attr {
    /// Qualified attribute name as written in markup (`xlink:href`).
    pub fn qualified_name(&self) -> String {
        match &self.name.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name.local),
            None => self.name.local.to_string(),
        }
    }

    fn matches(&self, name: &str) -> bool {
        match (&self.name.prefix, name.split_once(':')) {
            (Some(prefix), Some((p, local))) => &**prefix == p && &*self.name.local == local,
            (None, _) => &*self.name.local == name,
            (Some(_), None) => false,
        }
    }
}

/// Shared reference to a node. Equality and hashing are by identity.
#[derive(Clone)]
pub struct Handle(Rc<Node>);

/// Non-owning counterpart of [`Handle`].
#[derive(Clone, Default)]
pub struct WeakHandle(Weak<Node>);

impl WeakHandle {
    pub fn upgrade(&self) -> Option<Handle> {
        self.0.upgrade().map(Handle)
    }
}

/// Identity of a node, usable as a map key without keeping the node alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(usize);

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Handle {}

impl Hash for Handle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.data {
            NodeData::Fragment => write!(f, "#fragment"),
            NodeData::Element(element) => write!(f, "<{}>", element.name.local),
            NodeData::Text(text) => write!(f, "#text {:?}", text.borrow()),
            NodeData::Comment(text) => write!(f, "<!--{}-->", text.borrow()),
        }
    }
}

impl Handle {
    pub fn downgrade(&self) -> WeakHandle {
        WeakHandle(Rc::downgrade(&self.0))
    }

    pub fn key(&self) -> NodeKey {
        NodeKey(Rc::as_ptr(&self.0) as usize)
    }

    /// The document this node was created by.
    pub fn document(&self) -> Document {
        Document {
            stats: Rc::clone(&self.0.stats),
        }
    }

    fn record(&self, mutation: Mutation) {
        self.0.stats.record(mutation);
    }

    pub fn kind(&self) -> NodeKind {
        match &self.0.data {
            NodeData::Fragment => NodeKind::Fragment,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Comment,
        }
    }

    pub fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }

    pub fn is_text(&self) -> bool {
        self.kind() == NodeKind::Text
    }

    pub fn is_comment(&self) -> bool {
        self.kind() == NodeKind::Comment
    }

    pub fn is_fragment(&self) -> bool {
        self.kind() == NodeKind::Fragment
    }

    pub(crate) fn element(&self) -> Option<&ElementData> {
        match &self.0.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn data_cell(&self) -> Option<&RefCell<String>> {
        match &self.0.data {
            NodeData::Text(text) | NodeData::Comment(text) => Some(text),
            _ => None,
        }
    }

    /// Local tag name of an element, `None` for other nodes.
    pub fn local_name(&self) -> Option<&str> {
        self.element().map(|element| &*element.name.local)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.element().map(|element| &*element.name.ns)
    }

    pub fn is_svg(&self) -> bool {
        self.namespace() == Some(SVG_NAMESPACE)
    }

    /// Elements whose tag contains a dash are treated as custom elements.
    pub fn is_custom_element(&self) -> bool {
        self.local_name().is_some_and(|name| name.contains('-'))
    }

    // Navigation

    pub fn parent(&self) -> Option<Handle> {
        let weak = self.0.parent.take();
        let parent = weak.as_ref().and_then(Weak::upgrade).map(Handle);
        self.0.parent.set(weak);
        parent
    }

    pub fn children(&self) -> Vec<Handle> {
        self.0.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    pub fn child(&self, index: usize) -> Option<Handle> {
        self.0.children.borrow().get(index).cloned()
    }

    pub fn first_child(&self) -> Option<Handle> {
        self.0.children.borrow().first().cloned()
    }

    pub fn last_child(&self) -> Option<Handle> {
        self.0.children.borrow().last().cloned()
    }

    pub fn index_in_parent(&self) -> Option<usize> {
        let parent = self.parent()?;
        let children = parent.0.children.borrow();
        children.iter().position(|child| child == self)
    }

    pub fn next_sibling(&self) -> Option<Handle> {
        let parent = self.parent()?;
        let children = parent.0.children.borrow();
        let index = children.iter().position(|child| child == self)?;
        children.get(index + 1).cloned()
    }

    pub fn previous_sibling(&self) -> Option<Handle> {
        let parent = self.parent()?;
        let children = parent.0.children.borrow();
        let index = children.iter().position(|child| child == self)?;
        index.checked_sub(1).and_then(|i| children.get(i).cloned())
    }

    /// True when `other` is this node or one of its descendants.
    pub fn contains(&self, other: &Handle) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if &node == self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// All descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<Handle> {
        let mut out = Vec::new();
        let mut stack: Vec<Handle> = self.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }
        out
    }

    // Tree mutation

    /// Appends without validation or accounting. Used while building
    /// detached trees.
    pub(crate) fn push_child(&self, child: Handle) {
        child.0.parent.set(Some(Rc::downgrade(&self.0)));
        self.0.children.borrow_mut().push(child);
    }

    /// Unlinks from the current parent, returning it.
    fn unlink(&self) -> Option<Handle> {
        let parent = self.parent()?;
        parent.0.children.borrow_mut().retain(|child| child != self);
        self.0.parent.set(None);
        Some(parent)
    }

    pub fn append_child(&self, child: &Handle) -> Result<(), DomError> {
        self.insert_before(child, None)
    }

    /// Inserts `child` before `reference`, or at the end when `reference`
    /// is `None`. A child already in the tree is moved. Inserting a
    /// fragment moves its children instead of the fragment itself.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAChild`] when `reference` is not a child of
    /// `self` and [`DomError::HierarchyRequest`] for cycles or character
    /// data parents.
    pub fn insert_before(&self, child: &Handle, reference: Option<&Handle>) -> Result<(), DomError> {
        if self.data_cell().is_some() {
            return Err(DomError::HierarchyRequest {
                reason: "text and comment nodes cannot have children",
            });
        }
        if let Some(reference) = reference
            && reference.parent().as_ref() != Some(self)
        {
            return Err(DomError::NotAChild);
        }
        if child.contains(self) {
            return Err(DomError::HierarchyRequest {
                reason: "a node cannot be inserted into itself or its descendants",
            });
        }

        if child.is_fragment() {
            for node in child.children() {
                self.insert_before(&node, reference)?;
            }
            return Ok(());
        }

        let reference = match reference {
            Some(reference) if reference == child => child.next_sibling(),
            other => other.cloned(),
        };

        let was_live = child.unlink().is_some_and(|parent| !parent.is_fragment());
        let now_live = !self.is_fragment();

        {
            let mut children = self.0.children.borrow_mut();
            let index = match &reference {
                Some(reference) => children
                    .iter()
                    .position(|node| node == reference)
                    .ok_or(DomError::NotAChild)?,
                None => children.len(),
            };
            children.insert(index, child.clone());
        }
        child.0.parent.set(Some(Rc::downgrade(&self.0)));

        match (was_live, now_live) {
            (true, true) => self.record(Mutation::Moved),
            (false, true) => self.record(Mutation::Inserted),
            (true, false) => self.record(Mutation::Removed),
            (false, false) => {}
        }
        Ok(())
    }

    pub fn remove_child(&self, child: &Handle) -> Result<(), DomError> {
        if child.parent().as_ref() != Some(self) {
            return Err(DomError::NotAChild);
        }
        child.unlink();
        if !self.is_fragment() {
            self.record(Mutation::Removed);
        }
        Ok(())
    }

    pub fn replace_child(&self, replacement: &Handle, old: &Handle) -> Result<(), DomError> {
        if replacement == old {
            return Ok(());
        }
        self.insert_before(replacement, Some(old))?;
        self.remove_child(old)
    }

    /// Detaches from the parent, if any.
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            // `self` is known to be a child of `parent`
            let _ = parent.remove_child(self);
        }
    }

    pub fn replace_with(&self, replacement: &Handle) -> Result<(), DomError> {
        let parent = self.parent().ok_or(DomError::DetachedAnchor)?;
        parent.replace_child(replacement, self)
    }

    /// Removes every child, then appends `nodes` in order.
    pub fn replace_children(&self, nodes: &[Handle]) -> Result<(), DomError> {
        for child in self.children() {
            if !nodes.contains(&child) {
                self.remove_child(&child)?;
            }
        }
        for node in nodes {
            self.append_child(node)?;
        }
        Ok(())
    }

    /// Copies this node into its own document.
    pub fn clone_node(&self, deep: bool) -> Handle {
        self.document().import_node(self, deep)
    }

    // Character data

    /// Text of a text or comment node.
    pub fn data(&self) -> Option<String> {
        self.data_cell().map(|cell| cell.borrow().clone())
    }

    pub fn set_data(&self, data: &str) -> Result<(), DomError> {
        let cell = self.data_cell().ok_or(DomError::NotCharacterData)?;
        data.clone_into(&mut cell.borrow_mut());
        self.record(Mutation::DataWritten);
        Ok(())
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        match &self.0.data {
            NodeData::Text(text) | NodeData::Comment(text) => text.borrow().clone(),
            _ => self
                .descendants()
                .iter()
                .filter(|node| node.is_text())
                .filter_map(Handle::data)
                .collect(),
        }
    }

    /// Replaces all children by a single text node (none when `text` is
    /// empty). Writes data directly on text and comment nodes.
    pub fn set_text_content(&self, text: &str) -> Result<(), DomError> {
        if self.data_cell().is_some() {
            return self.set_data(text);
        }
        for child in self.children() {
            self.remove_child(&child)?;
        }
        if !text.is_empty() {
            let node = self.document().create_text(text);
            self.append_child(&node)?;
        }
        Ok(())
    }

    // Attributes

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let element = self.element()?;
        let attrs = element.attrs.borrow();
        attrs.iter().find(|attr| attr.matches(name)).map(|attr| attr.value.clone())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.element()
            .is_some_and(|element| element.attrs.borrow().iter().any(|attr| attr.matches(name)))
    }

    pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        let element = self.element().ok_or(DomError::NotAnElement)?;
        {
            let mut attrs = element.attrs.borrow_mut();
            match attrs.iter_mut().find(|attr| attr.matches(name)) {
                Some(attr) => value.clone_into(&mut attr.value),
                None => attrs.push(Attr {
                    name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
                    value: value.to_string(),
                }),
            }
        }
        self.record(Mutation::AttributeSet);
        Ok(())
    }

    /// Removes the attribute, returning whether it was present.
    pub fn remove_attribute(&self, name: &str) -> bool {
        let Some(element) = self.element() else {
            return false;
        };
        let removed = {
            let mut attrs = element.attrs.borrow_mut();
            let before = attrs.len();
            attrs.retain(|attr| !attr.matches(name));
            attrs.len() != before
        };
        if removed {
            self.record(Mutation::AttributeRemoved);
        }
        removed
    }

    /// Adds an empty attribute when `force` is true, removes it otherwise.
    pub fn toggle_attribute(&self, name: &str, force: bool) -> Result<bool, DomError> {
        if self.element().is_none() {
            return Err(DomError::NotAnElement);
        }
        if force {
            if !self.has_attribute(name) {
                self.set_attribute(name, "")?;
            }
        } else {
            self.remove_attribute(name);
        }
        Ok(force)
    }

    pub fn attributes(&self) -> Vec<Attr> {
        self.element()
            .map(|element| element.attrs.borrow().clone())
            .unwrap_or_default()
    }
}
