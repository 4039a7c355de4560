//! Writers for every non-content updater.

use std::collections::BTreeMap;

use super::Updater;
use crate::dom::Handle;
use crate::error::{Result, TagtreeError};
use crate::value::Value;

/// Writes `value` through `updater`. `previous` is the value last written
/// by the same binding.
pub(super) fn apply(
    node: &Handle,
    updater: &Updater,
    value: &Value,
    previous: Option<&Value>,
) -> Result<()> {
    match updater {
        Updater::Attribute { name } => attribute(node, name, value),
        Updater::Toggle { name } => {
            node.toggle_attribute(name, value.is_truthy())?;
            Ok(())
        }
        Updater::Property { name, expando } => {
            if *expando {
                node.set_expando(name, value.clone())?;
            } else {
                node.set_property(name, value.clone())?;
            }
            Ok(())
        }
        Updater::Listener { event } => listener(node, event, value, previous),
        Updater::Ref => node_ref(node, value),
        Updater::Aria => prefixed_map(node, "aria", value, previous, aria_attribute),
        Updater::Data => prefixed_map(node, "data", value, previous, data_attribute),
        Updater::Class => class(node, value),
        Updater::Style => style(node, value),
        Updater::Reflect { name } => reflect(node, name, value),
        Updater::Handler { name } => {
            node.set_property(name, value.clone())?;
            Ok(())
        }
        Updater::Text => {
            node.set_text_content(&value.to_text())?;
            Ok(())
        }
        // content holes are driven by their slot
        Updater::Content => Ok(()),
    }
}

fn invalid(binding: &'static str, value: &Value) -> TagtreeError {
    TagtreeError::InvalidBindingValue {
        binding,
        found: value.type_name(),
    }
}

fn attribute(node: &Handle, name: &str, value: &Value) -> Result<()> {
    match value {
        v if v.is_nullish() => {
            node.remove_attribute(name);
        }
        Value::Bool(_) | Value::Number(_) | Value::Str(_) | Value::List(_) => {
            node.set_attribute(name, &value.to_text())?;
        }
        other => return Err(invalid("attribute", other)),
    }
    Ok(())
}

fn listener(node: &Handle, event: &str, value: &Value, previous: Option<&Value>) -> Result<()> {
    if !matches!(value, Value::Listener(_)) && !value.is_nullish() {
        return Err(invalid("event listener", value));
    }
    if let Some(Value::Listener(old)) = previous {
        node.remove_event_listener(event, old);
    }
    if let Value::Listener(listener) = value {
        node.add_event_listener(event, listener)?;
    }
    Ok(())
}

fn node_ref(node: &Handle, value: &Value) -> Result<()> {
    match value {
        Value::Ref(target) => {
            target.attach(node);
            Ok(())
        }
        v if v.is_nullish() => Ok(()),
        other => Err(invalid("ref", other)),
    }
}

fn aria_attribute(key: &str) -> String {
    if key == "role" {
        key.to_string()
    } else {
        format!("aria-{}", key.to_ascii_lowercase())
    }
}

/// `fooBar` becomes `data-foo-bar`.
fn data_attribute(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 8);
    name.push_str("data-");
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            name.push('-');
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }
    name
}

/// Keys dropped since the previous map lose their attribute; null entries
/// remove theirs; changed entries are rewritten.
fn prefixed_map(
    node: &Handle,
    binding: &'static str,
    value: &Value,
    previous: Option<&Value>,
    attribute_name: fn(&str) -> String,
) -> Result<()> {
    let next: Option<&BTreeMap<String, Value>> = match value {
        Value::Map(map) => Some(map.as_ref()),
        v if v.is_nullish() => None,
        other => return Err(invalid(binding, other)),
    };
    let previous = previous.and_then(Value::as_map);

    if let Some(previous) = previous {
        for key in previous.keys() {
            if next.is_none_or(|next| !next.contains_key(key)) {
                node.remove_attribute(&attribute_name(key));
            }
        }
    }

    for (key, entry) in next.into_iter().flatten() {
        let name = attribute_name(key);
        if entry.is_nullish() {
            node.remove_attribute(&name);
        } else if previous.and_then(|previous| previous.get(key)) != Some(entry)
            || !node.has_attribute(&name)
        {
            node.set_attribute(&name, &entry.to_text())?;
        }
    }
    Ok(())
}

fn class(node: &Handle, value: &Value) -> Result<()> {
    let names = match value {
        v if v.is_nullish() => {
            node.remove_attribute("class");
            return Ok(());
        }
        Value::Bool(_) | Value::Number(_) | Value::Str(_) => value.to_text(),
        Value::List(items) => items
            .iter()
            .filter(|item| item.is_truthy())
            .map(Value::to_text)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Map(map) => map
            .iter()
            .filter(|(_, on)| on.is_truthy())
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        other => return Err(invalid("class", other)),
    };
    node.set_attribute("class", &names)?;
    Ok(())
}

fn style(node: &Handle, value: &Value) -> Result<()> {
    let css = match value {
        v if v.is_nullish() => {
            node.remove_attribute("style");
            return Ok(());
        }
        Value::Str(_) | Value::Number(_) | Value::Bool(_) => value.to_text(),
        Value::Map(map) => map
            .iter()
            .filter(|(_, declaration)| !declaration.is_nullish())
            .map(|(property, declaration)| format!("{}: {};", property, declaration.to_text()))
            .collect::<Vec<_>>()
            .join(" "),
        other => return Err(invalid("style", other)),
    };
    node.set_attribute("style", &css)?;
    Ok(())
}

fn reflect(node: &Handle, name: &str, value: &Value) -> Result<()> {
    node.set_property(name, value.clone())?;
    if value.is_nullish() && node.is_state_property(name) {
        // a nulled state property falls back to its attribute, so both go
        node.clear_property(name);
        node.remove_attribute(name);
    }
    Ok(())
}
