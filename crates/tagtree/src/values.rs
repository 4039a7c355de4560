//! Hole values from JSON
//!
//! Plain JSON maps onto values directly. An object with a `template` key is
//! a nested template: `{"template": "<li>{}</li>", "values": [1]}`, with an
//! optional `"svg": true`. Nested template text is interned so the same
//! text keeps one identity across passes, which is what lets a re-render
//! update nested instances instead of replacing them.

use std::collections::HashMap;

use anyhow::{Result, bail};
use serde_json::Value as Json;
use tagtree_core::{Hole, TemplateSite, Value};

#[derive(Default)]
pub struct SiteRegistry {
    sites: HashMap<(String, bool), &'static TemplateSite>,
}

impl SiteRegistry {
    fn site(&mut self, source: &str, svg: bool) -> &'static TemplateSite {
        *self
            .sites
            .entry((source.to_string(), svg))
            .or_insert_with(|| TemplateSite::leak(source, svg))
    }

    pub fn to_value(&mut self, json: &Json) -> Result<Value> {
        Ok(match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => match n.as_f64() {
                Some(n) => Value::Number(n),
                None => bail!("number {n} does not fit a float"),
            },
            Json::String(s) => Value::from(s.as_str()),
            Json::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| self.to_value(item))
                    .collect::<Result<Vec<_>>>()?;
                Value::list(items)
            }
            Json::Object(object) => match object.get("template") {
                Some(Json::String(source)) => {
                    let svg = object.get("svg").and_then(Json::as_bool).unwrap_or(false);
                    let values = match object.get("values") {
                        None => Vec::new(),
                        Some(Json::Array(items)) => items
                            .iter()
                            .map(|item| self.to_value(item))
                            .collect::<Result<Vec<_>>>()?,
                        Some(_) => bail!("\"values\" of a nested template must be an array"),
                    };
                    Value::Hole(Hole::new(self.site(source, svg), values))
                }
                Some(_) => bail!("\"template\" must be a string"),
                None => {
                    let entries = object
                        .iter()
                        .map(|(key, item)| -> Result<(String, Value)> {
                            Ok((key.clone(), self.to_value(item)?))
                        })
                        .collect::<Result<Vec<(String, Value)>>>()?;
                    Value::map(entries)
                }
            },
        })
    }
}
