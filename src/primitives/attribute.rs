//! Free-form attribute metadata attached to map primitives.
//!
//! Attributes map a name (`"type"`, `"subtype"`, ...) to a string value.
//! The map is ordered by name so iteration and serialization are
//! deterministic.

use std::collections::BTreeMap;
use std::fmt;

/// Well-known attribute names.
pub struct AttributeName;

impl AttributeName {
    pub const TYPE: &'static str = "type";
    pub const SUBTYPE: &'static str = "subtype";
}

/// Well-known attribute values.
pub struct AttributeValueString;

impl AttributeValueString {
    pub const REGULATORY_ELEMENT: &'static str = "regulatory_element";
    pub const LANELET: &'static str = "lanelet";
}

/// A single attribute value.
///
/// Values are stored as strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AttributeValue(String);

impl AttributeValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue(value)
    }
}

/// Ordered attribute-name → attribute-value mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AttributeMap {
    entries: BTreeMap<String, AttributeValue>,
}

impl AttributeMap {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, returning the previous value, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `subtype` attribute, which carries a regulatory element's rule name.
    pub fn subtype(&self) -> Option<&str> {
        self.get(AttributeName::SUBTYPE).map(AttributeValue::as_str)
    }

    /// Iterate over `(name, value)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_returns_previous_value() {
        let mut attrs = AttributeMap::new();
        assert_eq!(attrs.insert("subtype", "roundabout"), None);
        assert_eq!(
            attrs.insert("subtype", "crosswalk"),
            Some(AttributeValue::from("roundabout"))
        );
        assert_eq!(attrs.subtype(), Some("crosswalk"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn iteration_is_name_ordered() {
        let attrs: AttributeMap = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
        let names: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "m", "z"]);
    }

    #[test]
    fn serializes_as_plain_object() {
        let attrs: AttributeMap = [("type", "regulatory_element")].into_iter().collect();
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"type":"regulatory_element"}"#);
    }
}
