//! Event listeners and synchronous dispatch.

use std::fmt;
use std::rc::Rc;

use super::stats::Mutation;
use super::{DomError, Handle};
use crate::value::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
    pub once: bool,
    pub passive: bool,
}

/// A shared event callback. Two listeners are the same listener when they
/// wrap the same callback allocation and agree on `capture`.
#[derive(Clone)]
pub struct EventListener {
    handler: Rc<dyn Fn(&Event)>,
    options: ListenerOptions,
}

impl EventListener {
    pub fn new(handler: impl Fn(&Event) + 'static) -> Self {
        Self {
            handler: Rc::new(handler),
            options: ListenerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ListenerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ListenerOptions {
        self.options
    }

    pub fn call(&self, event: &Event) {
        (self.handler)(event);
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.handler).cast::<()>() as usize
    }

    fn same_registration(&self, other: &EventListener) -> bool {
        self.identity() == other.identity() && self.options.capture == other.options.capture
    }
}

impl PartialEq for EventListener {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity() && self.options == other.options
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener")
            .field("handler", &format_args!("{:#x}", self.identity()))
            .field("options", &self.options)
            .finish()
    }
}

#[derive(Clone)]
pub(crate) struct Registration {
    kind: String,
    listener: EventListener,
}

#[derive(Debug, Clone)]
pub struct Event {
    kind: String,
    bubbles: bool,
    target: Option<Handle>,
    current_target: Option<Handle>,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            bubbles: false,
            target: None,
            current_target: None,
        }
    }

    pub fn bubbling(mut self) -> Self {
        self.bubbles = true;
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// The node the event was dispatched on.
    pub fn target(&self) -> Option<&Handle> {
        self.target.as_ref()
    }

    /// The node whose listener is currently running.
    pub fn current_target(&self) -> Option<&Handle> {
        self.current_target.as_ref()
    }
}

impl Handle {
    /// Registers `listener` for `kind`. Registering the same listener twice
    /// is a no-op.
    pub fn add_event_listener(&self, kind: &str, listener: &EventListener) -> Result<(), DomError> {
        let element = self.element().ok_or(DomError::NotAnElement)?;
        {
            let mut listeners = element.listeners.borrow_mut();
            if listeners
                .iter()
                .any(|r| r.kind == kind && r.listener.same_registration(listener))
            {
                return Ok(());
            }
            listeners.push(Registration {
                kind: kind.to_string(),
                listener: listener.clone(),
            });
        }
        self.record(Mutation::ListenerAdded);
        Ok(())
    }

    pub fn remove_event_listener(&self, kind: &str, listener: &EventListener) -> bool {
        let Some(element) = self.element() else {
            return false;
        };
        let removed = {
            let mut listeners = element.listeners.borrow_mut();
            let before = listeners.len();
            listeners.retain(|r| !(r.kind == kind && r.listener.same_registration(listener)));
            listeners.len() != before
        };
        if removed {
            self.record(Mutation::ListenerRemoved);
        }
        removed
    }

    pub fn listener_count(&self, kind: &str) -> usize {
        self.element().map_or(0, |element| {
            element
                .listeners
                .borrow()
                .iter()
                .filter(|r| r.kind == kind)
                .count()
        })
    }

    /// Dispatches `event` at this node, then at each ancestor when the
    /// event bubbles. Runs registered listeners followed by the matching
    /// `on<kind>` handler property. Returns the number of callbacks run.
    pub fn dispatch_event(&self, event: Event) -> usize {
        let mut path = vec![self.clone()];
        if event.bubbles {
            let mut current = self.parent();
            while let Some(node) = current {
                current = node.parent();
                path.push(node);
            }
        }

        let handler_name = format!("on{}", event.kind);
        let mut invoked = 0;
        for node in path {
            let Some(element) = node.element() else {
                continue;
            };
            let event = Event {
                target: Some(self.clone()),
                current_target: Some(node.clone()),
                ..event.clone()
            };

            let matching: Vec<EventListener> = element
                .listeners
                .borrow()
                .iter()
                .filter(|r| r.kind == event.kind)
                .map(|r| r.listener.clone())
                .collect();
            for listener in matching {
                if listener.options.once {
                    node.remove_event_listener(&event.kind, &listener);
                }
                listener.call(&event);
                invoked += 1;
            }

            let handler = element.props.borrow().get(&handler_name).cloned();
            if let Some(Value::Listener(listener)) = handler {
                listener.call(&event);
                invoked += 1;
            }
        }
        invoked
    }
}
