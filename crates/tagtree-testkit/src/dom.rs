//! Rendering helpers
//!
//! Every helper builds on a fresh [`Document`], so tests never share
//! mutation counters or template caches.

use tagtree_core::{
    Document, EngineConfig, Handle, MutationCounts, RenderInput, Renderer, Result,
};

/// A renderer with one container element ready to render into.
pub struct Mounted {
    pub renderer: Renderer,
    pub container: Handle,
}

impl Mounted {
    /// Renders into the container.
    pub fn render(&self, what: impl Into<RenderInput>) -> Result<Handle> {
        self.renderer.render(&self.container, what)
    }

    pub fn document(&self) -> &Document {
        self.renderer.document()
    }

    /// Serialized children of the container.
    pub fn html(&self) -> String {
        tagtree_core::dom::inner_html(&self.container)
    }

    /// Starts counting mutations from now.
    pub fn probe(&self) -> MutationProbe {
        MutationProbe::new(self.document())
    }
}

/// Creates a renderer with default configuration and a `<div>` container.
///
/// # Examples
///
/// ```rust
/// use tagtree_core::html;
/// use tagtree_testkit::mount;
///
/// let mounted = mount();
/// mounted.render(html!("<p>{}</p>", "hi")).unwrap();
/// assert_eq!(mounted.html(), "<p>hi</p>");
/// ```
pub fn mount() -> Mounted {
    mount_with_config(EngineConfig::default())
}

pub fn mount_with_config(config: EngineConfig) -> Mounted {
    let renderer = Renderer::with_config(Document::new(), config);
    let container = renderer.document().create_element("div");
    Mounted {
        renderer,
        container,
    }
}

/// Snapshot of a document's mutation counters.
///
/// `delta` reports what happened since the probe was taken, which is the
/// figure render tests care about.
pub struct MutationProbe {
    document: Document,
    start: MutationCounts,
}

impl MutationProbe {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
            start: document.stats(),
        }
    }

    pub fn delta(&self) -> MutationCounts {
        self.document.stats().since(&self.start)
    }

    /// Takes the delta and restarts the probe.
    pub fn take(&mut self) -> MutationCounts {
        let current = self.document.stats();
        let delta = current.since(&self.start);
        self.start = current;
        delta
    }
}

/// Element children of `node`, skipping text and comments.
pub fn element_children(node: &Handle) -> Vec<Handle> {
    node.children()
        .into_iter()
        .filter(|child| child.is_element())
        .collect()
}

/// Text content of each element child.
pub fn texts(node: &Handle) -> Vec<String> {
    element_children(node)
        .iter()
        .map(Handle::text_content)
        .collect()
}
