//! Field name to message mapping shared by local and server validation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ValidationDetail;

/// Key under which non-field failures are reported.
pub const GENERAL_KEY: &str = "general";

/// Per-field validation messages. Local schema failures and server 422
/// responses produce the same shape so callers never branch on origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrorMap(BTreeMap<String, String>);

impl FieldErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding a single entry under `general`.
    pub fn general(message: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(GENERAL_KEY, message);
        map
    }

    /// Build from a server `detail` list. Later entries for the same field
    /// overwrite earlier ones.
    pub fn from_details<'a>(details: impl IntoIterator<Item = &'a ValidationDetail>) -> Self {
        let mut map = Self::new();
        for detail in details {
            map.insert(detail.field.as_str(), detail.message.as_str());
        }
        map
    }

    /// Record a message, keeping the first one already stored for the field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn general_message(&self) -> Option<&str> {
        self.get(GENERAL_KEY)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_details_maps_field_to_message() {
        let details = vec![
            ValidationDetail {
                field: "name".to_string(),
                message: "too short".to_string(),
            },
            ValidationDetail {
                field: "price".to_string(),
                message: "bad".to_string(),
            },
        ];
        let map = FieldErrorMap::from_details(&details);
        assert_eq!(map.get("name"), Some("too short"));
        assert_eq!(map.get("price"), Some("bad"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn add_keeps_first_message() {
        let mut map = FieldErrorMap::new();
        map.add("name", "first");
        map.add("name", "second");
        assert_eq!(map.get("name"), Some("first"));
    }

    #[test]
    fn general_uses_reserved_key() {
        let map = FieldErrorMap::general("boom");
        assert_eq!(map.general_message(), Some("boom"));
        assert_eq!(map.to_string(), "general: boom");
    }

    #[test]
    fn serializes_as_plain_object() {
        let map: FieldErrorMap = [("name", "too short")].into_iter().collect();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({"name": "too short"}));
    }
}
