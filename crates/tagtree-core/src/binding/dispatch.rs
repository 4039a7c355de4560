//! Choosing an updater from an attribute name.

use super::Updater;
use crate::config::EngineConfig;
use crate::dom::Handle;
use crate::error::{Result, TagtreeError};

/// Picks the updater for an attribute hole named `name` on `node`.
///
/// Resolution order:
///
/// 1. `.name`, `?name` and `@name` prefixes
/// 2. SVG context: `ref`, otherwise a plain attribute
/// 3. `aria`, `class`, `data`, `ref`, `style`
/// 4. names the element exposes as properties (`on*` become handlers)
/// 5. plain attribute
///
/// # Errors
///
/// `INVALID_BINDING_TARGET` for an empty name after a prefix, or a `.name`
/// the element does not support while property checking is strict.
pub fn select(node: &Handle, name: &str, svg: bool, config: &EngineConfig) -> Result<Updater> {
    let invalid = |reason: &'static str| TagtreeError::InvalidBindingTarget {
        element: node.local_name().unwrap_or_default().to_string(),
        name: name.to_string(),
        reason,
    };

    if let Some((prefix, rest)) = name.split_at_checked(1)
        && matches!(prefix, "." | "?" | "@")
    {
        if rest.is_empty() {
            return Err(invalid("nothing follows the prefix"));
        }
        let rest = rest.to_string();
        return match prefix {
            "." => {
                let expando = !node.supports_property(&rest);
                if !node.accepts_property(&rest) && config.bindings.strict_properties {
                    return Err(invalid("the element has no such property"));
                }
                Ok(Updater::Property {
                    name: rest,
                    expando,
                })
            }
            "?" => Ok(Updater::Toggle { name: rest }),
            _ => Ok(Updater::Listener { event: rest }),
        };
    }

    if svg || node.is_svg() {
        return Ok(match name {
            "ref" => Updater::Ref,
            _ => Updater::Attribute {
                name: name.to_string(),
            },
        });
    }

    Ok(match name {
        "aria" => Updater::Aria,
        "class" => Updater::Class,
        "data" => Updater::Data,
        "ref" => Updater::Ref,
        "style" => Updater::Style,
        _ if node.supports_property(name) => {
            if name.starts_with("on") {
                Updater::Handler {
                    name: name.to_string(),
                }
            } else {
                Updater::Reflect {
                    name: name.to_string(),
                }
            }
        }
        _ => Updater::Attribute {
            name: name.to_string(),
        },
    })
}
