//! Persistent fragments and the units the reconciler moves around.
//!
//! A plain document fragment empties itself when inserted, which makes a
//! multi-root template impossible to move or remove later. [`Fragment`]
//! brackets its nodes between two empty comment markers and keeps the
//! original fragment node as a holder, so the range can always be found
//! again, moved as a whole, or pulled back out of the tree.

use crate::dom::{DomError, Handle};

/// A movable range of sibling nodes, delimited by marker comments.
#[derive(Debug, Clone)]
pub struct Fragment {
    start: Handle,
    end: Handle,
    holder: Handle,
}

impl Fragment {
    /// Brackets the children of the document fragment `content` with
    /// markers. `content` becomes the holder the range returns to when
    /// detached.
    pub fn new(content: Handle) -> Result<Self, DomError> {
        if !content.is_fragment() {
            return Err(DomError::HierarchyRequest {
                reason: "a persistent fragment needs a document fragment as holder",
            });
        }
        let document = content.document();
        let start = document.create_comment("");
        let end = document.create_comment("");
        content.insert_before(&start, content.first_child().as_ref())?;
        content.append_child(&end)?;
        Ok(Self {
            start,
            end,
            holder: content,
        })
    }

    pub fn first_boundary(&self) -> &Handle {
        &self.start
    }

    pub fn last_boundary(&self) -> &Handle {
        &self.end
    }

    /// Current parent of the range: the holder while detached.
    pub fn parent(&self) -> Option<Handle> {
        self.start.parent()
    }

    pub fn is_detached(&self) -> bool {
        self.parent().as_ref() == Some(&self.holder)
    }

    /// The markers and every node between them, in order.
    pub fn flatten_to_nodes(&self) -> Vec<Handle> {
        let Some(parent) = self.parent() else {
            return vec![self.start.clone()];
        };
        let siblings = parent.children();
        let start = siblings.iter().position(|node| node == &self.start);
        let end = siblings.iter().position(|node| node == &self.end);
        match (start, end) {
            (Some(start), Some(end)) if start <= end => siblings[start..=end].to_vec(),
            _ => vec![self.start.clone()],
        }
    }

    /// Moves the whole range under `parent`, before `reference`.
    pub fn insert_before(&self, parent: &Handle, reference: Option<&Handle>) -> Result<(), DomError> {
        let nodes = self.flatten_to_nodes();
        let reference = match reference {
            Some(reference) if nodes.contains(reference) => self.end.next_sibling(),
            other => other.cloned(),
        };
        for node in &nodes {
            parent.insert_before(node, reference.as_ref())?;
        }
        Ok(())
    }

    /// Pulls the range, markers included, back into the holder so it can
    /// be inserted again later.
    pub fn detach(&self) -> Result<(), DomError> {
        if self.is_detached() {
            return Ok(());
        }
        for node in self.flatten_to_nodes() {
            self.holder.append_child(&node)?;
        }
        Ok(())
    }

    /// Deletes everything between the markers. The markers stay.
    pub fn clear(&self) {
        let nodes = self.flatten_to_nodes();
        if nodes.len() > 2 {
            for node in &nodes[1..nodes.len() - 1] {
                node.remove();
            }
        }
    }

    /// Drops the range from wherever it is, markers included.
    pub fn remove(self) {
        for node in self.flatten_to_nodes() {
            node.remove();
        }
    }

    /// Puts `replacement` where the range starts, then drops the range.
    pub fn replace_with(self, replacement: &Handle) -> Result<(), DomError> {
        let parent = self.parent().ok_or(DomError::DetachedAnchor)?;
        parent.insert_before(replacement, Some(&self.start))?;
        self.remove();
        Ok(())
    }
}

/// What an instance renders to: one node, or a persistent fragment.
#[derive(Debug, Clone)]
pub enum Unit {
    Node(Handle),
    Fragment(Fragment),
}

impl Unit {
    /// First node in document order.
    pub fn first(&self) -> Handle {
        match self {
            Unit::Node(node) => node.clone(),
            Unit::Fragment(fragment) => fragment.first_boundary().clone(),
        }
    }

    /// Last node in document order.
    pub fn last(&self) -> Handle {
        match self {
            Unit::Node(node) => node.clone(),
            Unit::Fragment(fragment) => fragment.last_boundary().clone(),
        }
    }

    /// Every node the unit occupies.
    pub fn nodes(&self) -> Vec<Handle> {
        match self {
            Unit::Node(node) => vec![node.clone()],
            Unit::Fragment(fragment) => fragment.flatten_to_nodes(),
        }
    }

    pub fn parent(&self) -> Option<Handle> {
        self.first().parent()
    }

    /// Identity comparison.
    pub fn same(&self, other: &Unit) -> bool {
        self.first() == other.first()
    }

    pub fn insert_before(&self, parent: &Handle, reference: Option<&Handle>) -> Result<(), DomError> {
        match self {
            Unit::Node(node) => parent.insert_before(node, reference),
            Unit::Fragment(fragment) => fragment.insert_before(parent, reference),
        }
    }

    /// Takes the unit out of the tree. Fragments go back to their holder,
    /// so the unit stays reusable.
    pub fn remove(&self) -> Result<(), DomError> {
        match self {
            Unit::Node(node) => {
                node.remove();
                Ok(())
            }
            Unit::Fragment(fragment) => fragment.detach(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, inner_html};

    fn pair(document: &Document) -> Fragment {
        let content = document.create_fragment();
        content.append_child(&document.create_element("dt")).unwrap();
        content.append_child(&document.create_element("dd")).unwrap();
        Fragment::new(content).unwrap()
    }

    #[test]
    fn test_new_requires_document_fragment() {
        let document = Document::new();
        let div = document.create_element("div");

        assert!(matches!(
            Fragment::new(div),
            Err(DomError::HierarchyRequest { .. })
        ));
    }

    #[test]
    fn test_markers_bracket_content() {
        let document = Document::new();
        let fragment = pair(&document);

        let nodes = fragment.flatten_to_nodes();
        assert_eq!(nodes.len(), 4);
        assert_eq!(&nodes[0], fragment.first_boundary());
        assert_eq!(&nodes[3], fragment.last_boundary());
        assert!(fragment.is_detached());
    }

    #[test]
    fn test_insert_detach_and_reinsert() {
        let document = Document::new();
        let fragment = pair(&document);
        let list = document.create_element("dl");
        let tail = document.create_element("p");
        list.append_child(&tail).unwrap();

        fragment.insert_before(&list, Some(&tail)).unwrap();
        assert_eq!(inner_html(&list), "<!----><dt></dt><dd></dd><!----><p></p>");
        assert!(!fragment.is_detached());

        fragment.detach().unwrap();
        assert_eq!(inner_html(&list), "<p></p>");
        assert!(fragment.is_detached());

        fragment.insert_before(&list, None).unwrap();
        assert_eq!(inner_html(&list), "<p></p><!----><dt></dt><dd></dd><!---->");
    }

    #[test]
    fn test_clear_keeps_markers() {
        let document = Document::new();
        let fragment = pair(&document);
        let list = document.create_element("dl");
        fragment.insert_before(&list, None).unwrap();

        fragment.clear();
        assert_eq!(inner_html(&list), "<!----><!---->");
    }

    #[test]
    fn test_replace_with_drops_range() {
        let document = Document::new();
        let fragment = pair(&document);
        let list = document.create_element("dl");
        fragment.insert_before(&list, None).unwrap();
        let replacement = document.create_text("gone");

        fragment.replace_with(&replacement).unwrap();
        assert_eq!(inner_html(&list), "gone");
    }

    #[test]
    fn test_units_compare_by_first_node() {
        let document = Document::new();
        let fragment = pair(&document);
        let a = Unit::Fragment(fragment.clone());
        let b = Unit::Fragment(fragment);
        let node = Unit::Node(document.create_text("x"));

        assert!(a.same(&b));
        assert!(!a.same(&node));
        assert_eq!(a.nodes().len(), 4);
    }
}
