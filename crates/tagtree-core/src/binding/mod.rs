//! Bindings: the live link between one hole and one node.
//!
//! The parser decides an [`Updater`] for every hole from the attribute name
//! (or from the hole's position). An instance pairs each updater with the
//! node it resolved and keeps the last value written, so an unchanged value
//! never touches the DOM.

pub mod content;
pub mod dispatch;
mod updaters;

#[cfg(test)]
mod tests;

use serde::Serialize;

use crate::dom::Handle;
use crate::engine::Engine;
use crate::error::Result;
use crate::value::Value;
use content::ContentSlot;

/// How values for one hole are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Updater {
    /// Plain attribute. Null and undefined remove it.
    Attribute { name: String },
    /// `?name`: boolean attribute present when the value is truthy.
    Toggle { name: String },
    /// `.name`: direct property write. `expando` marks names the element
    /// does not know, accepted when property checking is relaxed.
    Property { name: String, expando: bool },
    /// `@event`: event listener, swapped when the callback changes.
    Listener { event: String },
    /// `ref`: hands the element to a callback or ref cell.
    Ref,
    /// `aria`: map of `aria-*` attributes (`role` stays `role`).
    Aria,
    /// `class`: string, list or map of class names.
    Class,
    /// `data`: map of `data-*` attributes, camelCase keys dash-cased.
    Data,
    /// `style`: string or map of declarations.
    Style,
    /// Attribute name the element also exposes as a property.
    Reflect { name: String },
    /// `on<event>` handler property.
    Handler { name: String },
    /// Whole text of a raw-text element.
    Text,
    /// Child content: text, nodes, nested templates or lists.
    Content,
}

impl Updater {
    pub fn kind(&self) -> &'static str {
        match self {
            Updater::Attribute { .. } => "attribute",
            Updater::Toggle { .. } => "toggle",
            Updater::Property { .. } => "property",
            Updater::Listener { .. } => "listener",
            Updater::Ref => "ref",
            Updater::Aria => "aria",
            Updater::Class => "class",
            Updater::Data => "data",
            Updater::Style => "style",
            Updater::Reflect { .. } => "reflect",
            Updater::Handler { .. } => "handler",
            Updater::Text => "text",
            Updater::Content => "content",
        }
    }

    /// The attribute, property or event name, when the updater has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Updater::Attribute { name }
            | Updater::Toggle { name }
            | Updater::Property { name, .. }
            | Updater::Reflect { name }
            | Updater::Handler { name } => Some(name),
            Updater::Listener { event } => Some(event),
            _ => None,
        }
    }
}

enum BindingState {
    Scalar { last: Option<Value> },
    Content(Box<ContentSlot>),
}

pub(crate) struct Binding {
    node: Handle,
    updater: Updater,
    state: BindingState,
}

impl Binding {
    pub(crate) fn new(node: Handle, updater: Updater) -> Self {
        let state = match updater {
            Updater::Content => BindingState::Content(Box::new(ContentSlot::new(node.clone()))),
            _ => BindingState::Scalar { last: None },
        };
        Self {
            node,
            updater,
            state,
        }
    }

    pub(crate) fn apply(&mut self, engine: &Engine, value: &Value) -> Result<()> {
        match &mut self.state {
            BindingState::Content(slot) => slot.apply(engine, value),
            BindingState::Scalar { last } => {
                if last.as_ref() == Some(value) {
                    return Ok(());
                }
                updaters::apply(&self.node, &self.updater, value, last.as_ref())?;
                *last = Some(value.clone());
                Ok(())
            }
        }
    }
}
