//! Template instances: one live copy of a template and its bindings.

use std::rc::Rc;

use crate::binding::Binding;
use crate::dom::DomError;
use crate::engine::Engine;
use crate::error::{Result, TagtreeError};
use crate::fragment::{Fragment, Unit};
use crate::hole::Hole;
use crate::template::{Template, TemplateId, path};

/// A rendered copy of a template.
///
/// The first [`update`](Instance::update) clones the template tree and
/// resolves every hole path. Later updates with the same template only
/// write changed values; a different template replaces everything.
#[derive(Default)]
pub struct Instance {
    template: Option<Rc<Template>>,
    unit: Option<Unit>,
    bindings: Vec<Binding>,
}

impl Instance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an instance and renders `hole` into it.
    pub fn create(engine: &Engine, hole: &Hole) -> Result<(Self, Unit)> {
        let mut instance = Self::new();
        let unit = instance.update(engine, hole)?;
        Ok((instance, unit))
    }

    pub fn template_id(&self) -> Option<TemplateId> {
        self.template.as_ref().map(|template| template.id())
    }

    /// The node or fragment this instance renders to, once created.
    pub fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }

    /// Applies `hole`'s values, recreating the DOM first if `hole` belongs
    /// to a different template. Returns the unit to place.
    ///
    /// # Errors
    ///
    /// `ARITY_MISMATCH` when the value count differs from the hole count,
    /// plus any template, binding or DOM error raised while writing.
    pub fn update(&mut self, engine: &Engine, hole: &Hole) -> Result<Unit> {
        let reuse = self.template_id() == Some(hole.id());
        let template = match &self.template {
            Some(template) if reuse => Rc::clone(template),
            _ => engine.template(hole.site())?,
        };

        if hole.values().len() != template.hole_count() {
            return Err(TagtreeError::ArityMismatch {
                expected: template.hole_count(),
                actual: hole.values().len(),
            });
        }

        let unit = match (&self.unit, reuse) {
            (Some(unit), true) => unit.clone(),
            _ => self.instantiate(engine, template)?,
        };

        for (binding, value) in self.bindings.iter_mut().zip(hole.values()) {
            binding.apply(engine, value)?;
        }
        Ok(unit)
    }

    fn instantiate(&mut self, engine: &Engine, template: Rc<Template>) -> Result<Unit> {
        if let Some(previous) = self.template_id() {
            log::debug!("instance switching from {previous} to {}", template.id());
        }

        let root = engine.document().import_node(template.content(), true);

        // consecutive holes on one element share a path
        let mut bindings = Vec::with_capacity(template.hole_count());
        let mut last: Option<(&[usize], crate::dom::Handle)> = None;
        for entry in template.entries() {
            let node = match &last {
                Some((path, node)) if *path == entry.path.as_slice() => node.clone(),
                _ => path::resolve(&root, &entry.path)?,
            };
            last = Some((entry.path.as_slice(), node.clone()));
            bindings.push(Binding::new(node, entry.updater.clone()));
        }

        let unit = if template.is_single_root() {
            let node = root
                .first_child()
                .ok_or_else(|| DomError::PathNotFound { path: vec![0] })?;
            Unit::Node(node)
        } else {
            Unit::Fragment(Fragment::new(root)?)
        };

        self.bindings = bindings;
        self.unit = Some(unit.clone());
        self.template = Some(template);
        Ok(unit)
    }
}
