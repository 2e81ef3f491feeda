//! Typed model of a key-value item.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single attribute value.
///
/// Numbers travel as their decimal string so no precision is lost between the
/// message and the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    S(String),
    N(String),
}

impl AttributeValue {
    /// Returns the string payload if this is an `S` attribute.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            AttributeValue::N(_) => None,
        }
    }

    /// Returns the decimal string if this is an `N` attribute.
    pub fn as_n(&self) -> Option<&str> {
        match self {
            AttributeValue::N(n) => Some(n),
            AttributeValue::S(_) => None,
        }
    }
}

/// A persisted record: attribute name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    attributes: BTreeMap<String, AttributeValue>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Shortcut for the string payload of an `S` attribute.
    pub fn get_s(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_s)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.attributes.iter()
    }

    pub fn into_attributes(self) -> BTreeMap<String, AttributeValue> {
        self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_typed_attribute_form() {
        let item = Item::new()
            .with("orderId", AttributeValue::S("o1".into()))
            .with("quantity", AttributeValue::N("2".into()));

        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"orderId":{"S":"o1"},"quantity":{"N":"2"}}"#);
    }

    #[test]
    fn typed_accessors_reject_the_other_kind() {
        let item = Item::new().with("quantity", AttributeValue::N("0".into()));
        assert_eq!(item.get_s("quantity"), None);
        assert_eq!(item.get("quantity").and_then(AttributeValue::as_n), Some("0"));
    }
}
