//! Root rendering: keeping a container's children in sync with a hole.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::EngineConfig;
use crate::dom::{Document, Handle, NodeKey, WeakHandle};
use crate::engine::Engine;
use crate::error::{Result, TagtreeError};
use crate::fragment::Unit;
use crate::hole::Hole;
use crate::instance::Instance;
use crate::value::Value;

struct Root {
    container: WeakHandle,
    instance: Instance,
    /// Unit last placed into the container, when it came from a hole.
    mounted: Option<Unit>,
}

/// Renders holes into containers, remembering one instance per container.
///
/// # Examples
///
/// ```ignore
/// let renderer = Renderer::new(Document::new());
/// let body = renderer.document().create_element("body");
/// renderer.render(&body, tagtree_core::html!("<p>{}</p>", "hi"))?;
/// ```
pub struct Renderer {
    engine: Engine,
    roots: RefCell<HashMap<NodeKey, Rc<RefCell<Root>>>>,
}

impl Renderer {
    pub fn new(document: Document) -> Self {
        Self::with_engine(Engine::new(document))
    }

    pub fn with_config(document: Document, config: EngineConfig) -> Self {
        Self::with_engine(Engine::with_config(document, config))
    }

    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            roots: RefCell::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn document(&self) -> &Document {
        self.engine.document()
    }

    fn root_for(&self, container: &Handle) -> Rc<RefCell<Root>> {
        let mut roots = self.roots.borrow_mut();
        roots.retain(|_, root| {
            root.try_borrow()
                .map_or(true, |root| root.container.upgrade().is_some())
        });
        let entry = roots.entry(container.key()).or_insert_with(|| {
            Rc::new(RefCell::new(Root {
                container: container.downgrade(),
                instance: Instance::new(),
                mounted: None,
            }))
        });
        Rc::clone(entry)
    }

    /// Renders `what` into `container`.
    ///
    /// A [`Hole`] goes through the container's instance, so rendering the
    /// same template again only writes what changed. A [`Handle`] replaces
    /// the children with that node. Returns the container.
    ///
    /// # Errors
    ///
    /// `REENTRANT_RENDER` when called for a container whose render is still
    /// running (for example from a ref callback), plus any error the update
    /// raises.
    pub fn render(&self, container: &Handle, what: impl Into<RenderInput>) -> Result<Handle> {
        let slot = self.root_for(container);
        let mut root = slot
            .try_borrow_mut()
            .map_err(|_| TagtreeError::ReentrantRender)?;

        match what.into() {
            RenderInput::Hole(hole) => {
                let unit = root.instance.update(&self.engine, &hole)?;
                let unchanged = root.mounted.as_ref().is_some_and(|mounted| mounted.same(&unit));
                if !unchanged {
                    log::debug!("mounting {} into {:?}", hole.id(), container);
                    container.replace_children(&unit.nodes())?;
                    root.mounted = Some(unit);
                }
            }
            RenderInput::Node(node) => {
                container.replace_children(std::slice::from_ref(&node))?;
                root.mounted = None;
                root.instance = Instance::new();
            }
        }
        Ok(container.clone())
    }

    /// Renders the hole produced by `view`, called once per render.
    pub fn render_with<F>(&self, container: &Handle, view: F) -> Result<Handle>
    where
        F: FnOnce() -> Hole,
    {
        self.render(container, view())
    }

    /// Empties `container` and forgets its instance. Returns whether the
    /// container had been rendered into.
    pub fn unmount(&self, container: &Handle) -> Result<bool> {
        let root = self.roots.borrow_mut().remove(&container.key());
        let Some(root) = root else {
            return Ok(false);
        };
        if root.try_borrow_mut().is_err() {
            self.roots.borrow_mut().insert(container.key(), root);
            return Err(TagtreeError::ReentrantRender);
        }
        container.replace_children(&[])?;
        log::debug!("unmounted {:?}", container);
        Ok(true)
    }

    /// Number of containers with a live instance.
    pub fn root_count(&self) -> usize {
        self.roots
            .borrow()
            .values()
            .filter(|root| {
                root.try_borrow()
                    .map_or(true, |root| root.container.upgrade().is_some())
            })
            .count()
    }
}

/// Anything [`Renderer::render`] accepts.
pub enum RenderInput {
    Hole(Hole),
    Node(Handle),
}

impl From<Hole> for RenderInput {
    fn from(hole: Hole) -> Self {
        RenderInput::Hole(hole)
    }
}

impl From<Handle> for RenderInput {
    fn from(node: Handle) -> Self {
        RenderInput::Node(node)
    }
}

impl From<&Handle> for RenderInput {
    fn from(node: &Handle) -> Self {
        RenderInput::Node(node.clone())
    }
}

impl TryFrom<Value> for RenderInput {
    type Error = TagtreeError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Hole(hole) => Ok(RenderInput::Hole(hole)),
            Value::Node(node) => Ok(RenderInput::Node(node)),
            other => Err(TagtreeError::InvalidBindingValue {
                binding: "root",
                found: other.type_name(),
            }),
        }
    }
}
