//! RPSL object parsing
//!
//! Turns the text of one RPSL object into an attribute map. Attribute names
//! are case-insensitive and stored lowercase. Lines starting with whitespace
//! or `+` continue the previous attribute. List attributes (`members`,
//! `mp-members`) are split on commas.
//!
//! The record builder only depends on the [`AttributeParser`] trait, so the
//! grammar can be swapped out independently.

use crate::error::{NetblockError, Result};
use crate::record::attribute::AttrValue;
use std::collections::HashMap;

/// Attributes whose values are comma-separated lists
const LIST_ATTRIBUTES: &[&str] = &["members", "mp-members"];

/// A parsed RPSL object
#[derive(Debug, Clone)]
pub struct RpslObject {
    /// Object class, the name of the first attribute (`inetnum`, `route-set`, ...)
    pub class: String,
    /// Value of the first attribute
    pub key: String,
    attributes: HashMap<String, AttrValue>,
}

impl RpslObject {
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Joined value of an attribute, empty when absent
    pub fn joined(&self, name: &str) -> String {
        self.get(name).map(AttrValue::joined).unwrap_or_default()
    }
}

/// Structured attribute parser for free-text registry objects
pub trait AttributeParser {
    fn parse(&self, text: &str) -> Result<RpslObject>;
}

/// Default RPSL grammar
#[derive(Debug, Default, Clone, Copy)]
pub struct RpslParser;

impl RpslParser {
    pub fn new() -> Self {
        Self
    }

    fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl AttributeParser for RpslParser {
    fn parse(&self, text: &str) -> Result<RpslObject> {
        let mut pairs: Vec<(String, String)> = Vec::new();

        for (number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(rest) = line
                .strip_prefix('+')
                .or_else(|| line.starts_with([' ', '\t']).then_some(line))
            {
                let (_, value) = pairs.last_mut().ok_or_else(|| {
                    NetblockError::rpsl(format!("continuation before any attribute on line {}", number + 1))
                })?;
                let rest = rest.trim();
                if !rest.is_empty() {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(rest);
                }
                continue;
            }

            let (name, value) = line.split_once(':').ok_or_else(|| {
                NetblockError::rpsl(format!("line {} is not an attribute: {:?}", number + 1, line))
            })?;
            if !Self::is_valid_name(name) {
                return Err(NetblockError::rpsl(format!(
                    "invalid attribute name {:?} on line {}",
                    name,
                    number + 1
                )));
            }
            pairs.push((name.to_ascii_lowercase(), value.trim().to_string()));
        }

        let (class, key) = match pairs.first() {
            Some((class, key)) => (class.clone(), key.clone()),
            None => return Err(NetblockError::rpsl("empty object")),
        };
        if key.is_empty() {
            return Err(NetblockError::rpsl(format!("{} object has an empty primary key", class)));
        }

        let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in pairs {
            let values = grouped.entry(name.clone()).or_default();
            if LIST_ATTRIBUTES.contains(&name.as_str()) {
                values.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                        .map(str::to_string),
                );
            } else {
                values.push(value);
            }
        }

        let attributes = grouped
            .into_iter()
            .map(|(name, mut values)| {
                let value = if values.len() == 1 && !LIST_ATTRIBUTES.contains(&name.as_str()) {
                    AttrValue::Single(values.remove(0))
                } else {
                    AttrValue::Many(values)
                };
                (name, value)
            })
            .collect();

        Ok(RpslObject { class, key, attributes })
    }
}
