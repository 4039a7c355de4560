//! Element properties.
//!
//! Properties are the script-side view of an element. Most of them reflect
//! an attribute; a few (`value`, `checked`, `selected`) hold live state that
//! starts out from the attribute but diverges once written. The table here
//! decides which names an element supports.

use super::stats::Mutation;
use super::{DomError, Handle};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyKind {
    /// Mirrors a string attribute.
    Reflect(&'static str),
    /// Mirrors a boolean attribute.
    Flag(&'static str),
    /// Live state seeded from the attribute of the same name.
    State,
    /// `textContent`.
    Text,
    /// `on<event>` handler slot.
    Handler,
    /// Arbitrary value stored on the element.
    Expando,
}

use PropertyKind::{Expando, Flag, Handler, Reflect, State, Text};

const GLOBAL: &[(&str, PropertyKind)] = &[
    ("id", Reflect("id")),
    ("title", Reflect("title")),
    ("lang", Reflect("lang")),
    ("dir", Reflect("dir")),
    ("className", Reflect("class")),
    ("slot", Reflect("slot")),
    ("tabIndex", Reflect("tabindex")),
    ("hidden", Flag("hidden")),
    ("textContent", Text),
];

const INPUT: &[(&str, PropertyKind)] = &[
    ("value", State),
    ("checked", State),
    ("name", Reflect("name")),
    ("type", Reflect("type")),
    ("placeholder", Reflect("placeholder")),
    ("min", Reflect("min")),
    ("max", Reflect("max")),
    ("step", Reflect("step")),
    ("disabled", Flag("disabled")),
    ("readOnly", Flag("readonly")),
    ("required", Flag("required")),
    ("multiple", Flag("multiple")),
];

const TEXTAREA: &[(&str, PropertyKind)] = &[
    ("value", State),
    ("name", Reflect("name")),
    ("placeholder", Reflect("placeholder")),
    ("rows", Reflect("rows")),
    ("cols", Reflect("cols")),
    ("disabled", Flag("disabled")),
    ("readOnly", Flag("readonly")),
    ("required", Flag("required")),
];

const SELECT: &[(&str, PropertyKind)] = &[
    ("value", State),
    ("name", Reflect("name")),
    ("disabled", Flag("disabled")),
    ("multiple", Flag("multiple")),
    ("required", Flag("required")),
];

const OPTION: &[(&str, PropertyKind)] = &[
    ("value", Reflect("value")),
    ("label", Reflect("label")),
    ("selected", State),
    ("disabled", Flag("disabled")),
];

const BUTTON: &[(&str, PropertyKind)] = &[
    ("name", Reflect("name")),
    ("type", Reflect("type")),
    ("value", Reflect("value")),
    ("disabled", Flag("disabled")),
];

const ANCHOR: &[(&str, PropertyKind)] = &[
    ("href", Reflect("href")),
    ("target", Reflect("target")),
    ("rel", Reflect("rel")),
    ("download", Reflect("download")),
];

const IMAGE: &[(&str, PropertyKind)] = &[
    ("src", Reflect("src")),
    ("alt", Reflect("alt")),
    ("width", Reflect("width")),
    ("height", Reflect("height")),
    ("loading", Reflect("loading")),
];

const FORM: &[(&str, PropertyKind)] = &[
    ("action", Reflect("action")),
    ("method", Reflect("method")),
    ("noValidate", Flag("novalidate")),
];

const LABEL: &[(&str, PropertyKind)] = &[("htmlFor", Reflect("for"))];

const MEDIA: &[(&str, PropertyKind)] = &[
    ("src", Reflect("src")),
    ("autoplay", Flag("autoplay")),
    ("controls", Flag("controls")),
    ("loop", Flag("loop")),
    ("muted", Flag("muted")),
];

const SOURCED: &[(&str, PropertyKind)] = &[("src", Reflect("src")), ("type", Reflect("type"))];

const OPENABLE: &[(&str, PropertyKind)] = &[("open", Flag("open"))];

const EVENT_HANDLERS: &[&str] = &[
    "onabort",
    "onblur",
    "onchange",
    "onclick",
    "oncontextmenu",
    "ondblclick",
    "onerror",
    "onfocus",
    "oninput",
    "onkeydown",
    "onkeypress",
    "onkeyup",
    "onload",
    "onmousedown",
    "onmouseenter",
    "onmouseleave",
    "onmousemove",
    "onmouseout",
    "onmouseover",
    "onmouseup",
    "onpointerdown",
    "onpointermove",
    "onpointerup",
    "onreset",
    "onscroll",
    "onsubmit",
    "ontoggle",
    "onwheel",
];

fn element_table(local: &str) -> &'static [(&'static str, PropertyKind)] {
    match local {
        "input" => INPUT,
        "textarea" => TEXTAREA,
        "select" => SELECT,
        "option" => OPTION,
        "button" => BUTTON,
        "a" | "area" => ANCHOR,
        "img" => IMAGE,
        "form" => FORM,
        "label" => LABEL,
        "audio" | "video" => MEDIA,
        "iframe" | "script" | "source" | "embed" | "track" => SOURCED,
        "details" | "dialog" => OPENABLE,
        _ => &[],
    }
}

impl Handle {
    fn property_kind(&self, name: &str) -> Option<PropertyKind> {
        let local = self.local_name()?;
        let known = GLOBAL
            .iter()
            .chain(element_table(local))
            .find(|(property, _)| *property == name)
            .map(|(_, kind)| *kind);
        known
            .or_else(|| EVENT_HANDLERS.contains(&name).then_some(Handler))
            .or_else(|| self.is_custom_element().then_some(Expando))
    }

    /// True when `name` is a built-in property of this element.
    pub fn supports_property(&self, name: &str) -> bool {
        self.property_kind(name).is_some_and(|kind| kind != Expando)
    }

    /// True when `name` holds live state seeded from its attribute, like
    /// `value` on inputs.
    pub fn is_state_property(&self, name: &str) -> bool {
        self.property_kind(name) == Some(State)
    }

    /// True when `set_property` would accept `name`. Custom elements accept
    /// any name.
    pub fn accepts_property(&self, name: &str) -> bool {
        self.property_kind(name).is_some()
    }

    /// Writes a property.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownProperty`] for names the element does not accept,
    /// [`DomError::InvalidPropertyValue`] for non-callable handler values.
    pub fn set_property(&self, name: &str, value: Value) -> Result<(), DomError> {
        let element = self.element().ok_or(DomError::NotAnElement)?;
        let kind = self
            .property_kind(name)
            .ok_or_else(|| DomError::UnknownProperty {
                element: element.name.local.to_string(),
                name: name.to_string(),
            })?;

        match kind {
            Reflect(attribute) => {
                if value.is_nullish() {
                    self.remove_attribute(attribute);
                    Ok(())
                } else {
                    self.set_attribute(attribute, &value.to_text())
                }
            }
            Flag(attribute) => self.toggle_attribute(attribute, value.is_truthy()).map(|_| ()),
            Text => self.set_text_content(&value.to_text()),
            Handler => match value {
                Value::Listener(_) => self.set_expando(name, value),
                other if other.is_nullish() => {
                    element.props.borrow_mut().remove(name);
                    self.record(Mutation::PropertySet);
                    Ok(())
                }
                other => Err(DomError::InvalidPropertyValue {
                    name: name.to_string(),
                    found: other.type_name(),
                }),
            },
            State | Expando => self.set_expando(name, value),
        }
    }

    /// Stores `value` under `name` without consulting the property table.
    pub fn set_expando(&self, name: &str, value: Value) -> Result<(), DomError> {
        let element = self.element().ok_or(DomError::NotAnElement)?;
        element.props.borrow_mut().insert(name.to_string(), value);
        self.record(Mutation::PropertySet);
        Ok(())
    }

    /// Reads a property. Reflected properties read their attribute; state
    /// properties fall back to it until written.
    pub fn property(&self, name: &str) -> Option<Value> {
        let element = self.element()?;
        let stored = element.props.borrow().get(name).cloned();
        match self.property_kind(name) {
            Some(Reflect(attribute)) => {
                Some(Value::from(self.get_attribute(attribute).unwrap_or_default()))
            }
            Some(Flag(attribute)) => Some(Value::Bool(self.has_attribute(attribute))),
            Some(Text) => Some(Value::from(self.text_content())),
            Some(State) => stored.or_else(|| {
                Some(match name {
                    "checked" | "selected" => Value::Bool(self.has_attribute(name)),
                    _ => Value::from(self.get_attribute(name).unwrap_or_default()),
                })
            }),
            Some(Handler) => stored.or(Some(Value::Null)),
            Some(Expando) | None => stored,
        }
    }

    /// Drops a stored property value, restoring attribute fallback.
    pub fn clear_property(&self, name: &str) {
        if let Some(element) = self.element() {
            element.props.borrow_mut().remove(name);
        }
    }
}
