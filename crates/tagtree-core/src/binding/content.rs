//! Content holes.
//!
//! A content hole starts out as an empty comment in the cloned tree. That
//! comment stays put as the anchor for lists and as the stand-in while the
//! hole shows nothing; other values (text, a node, a nested template) take
//! its place until the value kind changes again.

use crate::dom::{DomError, Handle};
use crate::engine::Engine;
use crate::error::{Result, TagtreeError};
use crate::fragment::Unit;
use crate::hole::Hole;
use crate::instance::Instance;
use crate::reconcile::{self, ListItem};
use crate::value::Value;

/// What currently sits where the hole is.
enum Occupant {
    /// The anchor comment alone.
    Placeholder,
    Text(Handle),
    Unit(Unit),
    /// List items, followed by the anchor comment.
    List,
}

pub(crate) struct ContentSlot {
    anchor: Handle,
    occupant: Occupant,
    last: Option<Value>,
    text: Option<Handle>,
    nested: Option<Instance>,
    items: Vec<ListItem>,
}

impl ContentSlot {
    pub(crate) fn new(anchor: Handle) -> Self {
        Self {
            anchor,
            occupant: Occupant::Placeholder,
            last: None,
            text: None,
            nested: None,
            items: Vec::new(),
        }
    }

    pub(crate) fn apply(&mut self, engine: &Engine, value: &Value) -> Result<()> {
        match value {
            Value::List(items) => self.show_list(engine, items)?,
            Value::Hole(hole) => self.show_hole(engine, hole)?,
            Value::Node(node) => self.show_node(node)?,
            Value::Map(_) | Value::Listener(_) | Value::Ref(_) => {
                return Err(TagtreeError::InvalidBindingValue {
                    binding: "content",
                    found: value.type_name(),
                });
            }
            primitive => self.show_text(engine, primitive)?,
        }
        self.last = Some(value.clone());
        Ok(())
    }

    fn first_node(&self) -> Handle {
        match &self.occupant {
            Occupant::Placeholder => self.anchor.clone(),
            Occupant::Text(text) => text.clone(),
            Occupant::Unit(unit) => unit.first(),
            Occupant::List => self
                .items
                .first()
                .map(|item| item.unit().first())
                .unwrap_or_else(|| self.anchor.clone()),
        }
    }

    /// Puts `next` in front of whatever is there now, then clears the old
    /// occupant out.
    fn replace_occupant(&mut self, next: Occupant) -> Result<()> {
        let first = self.first_node();
        let parent = first.parent().ok_or(DomError::DetachedAnchor)?;
        let keeps_anchor = matches!(next, Occupant::Placeholder | Occupant::List);
        match &next {
            Occupant::Placeholder | Occupant::List if first == self.anchor => {}
            Occupant::Placeholder | Occupant::List => {
                parent.insert_before(&self.anchor, Some(&first))?
            }
            Occupant::Text(text) => parent.insert_before(text, Some(&first))?,
            Occupant::Unit(unit) => unit.insert_before(&parent, Some(&first))?,
        }

        match std::mem::replace(&mut self.occupant, next) {
            Occupant::Placeholder => {}
            Occupant::Text(text) => text.remove(),
            Occupant::Unit(unit) => {
                unit.remove()?;
                self.nested = None;
            }
            Occupant::List => {
                for item in std::mem::take(&mut self.items) {
                    item.unit().remove()?;
                }
            }
        }
        if !keeps_anchor {
            self.anchor.remove();
        }
        Ok(())
    }

    fn show_text(&mut self, engine: &Engine, value: &Value) -> Result<()> {
        if let Occupant::Text(text) = &self.occupant {
            if self.last.as_ref() != Some(value) {
                text.set_data(&value.to_text())?;
            }
            return Ok(());
        }

        let text = match &self.text {
            Some(text) => {
                text.set_data(&value.to_text())?;
                text.clone()
            }
            None => {
                let text = engine.document().create_text(value.to_text());
                self.text = Some(text.clone());
                text
            }
        };
        self.replace_occupant(Occupant::Text(text))
    }

    fn show_node(&mut self, node: &Handle) -> Result<()> {
        if let Occupant::Unit(Unit::Node(current)) = &self.occupant
            && current == node
        {
            return Ok(());
        }
        self.replace_occupant(Occupant::Unit(Unit::Node(node.clone())))
    }

    fn show_hole(&mut self, engine: &Engine, hole: &Hole) -> Result<()> {
        if let Some(nested) = self.nested.as_mut()
            && nested.template_id() == Some(hole.id())
        {
            let unit = nested.update(engine, hole)?;
            return self.show_unit(unit);
        }

        let (instance, unit) = Instance::create(engine, hole)?;
        self.show_unit(unit)?;
        self.nested = Some(instance);
        Ok(())
    }

    fn show_unit(&mut self, unit: Unit) -> Result<()> {
        if let Occupant::Unit(current) = &self.occupant
            && current.same(&unit)
        {
            return Ok(());
        }
        self.replace_occupant(Occupant::Unit(unit))
    }

    fn show_list(&mut self, engine: &Engine, values: &[Value]) -> Result<()> {
        if !matches!(self.occupant, Occupant::List) {
            self.replace_occupant(Occupant::List)?;
        }
        let parent = self.anchor.parent().ok_or(DomError::DetachedAnchor)?;
        reconcile::reconcile(engine, &parent, &self.anchor, &mut self.items, values)
    }
}
