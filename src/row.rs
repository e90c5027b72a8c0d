//! Ordered header-to-value record.

use indexmap::IndexMap;
use serde::Serialize;

/// A single record keyed by header name, preserving column order.
///
/// Keys keep the order in which they were first inserted; setting an
/// existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, String>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a header, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells.get(key).map(String::as_str)
    }

    /// Value for a header, or the empty string if absent.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Insert or replace a value. Empty keys are ignored.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        // IndexMap::insert keeps the original slot for an existing key
        self.cells.insert(key, value.into());
    }

    /// Returns true if the header is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// Iterate `(header, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate headers in column order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Mutable access to values in column order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        self.cells.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut row = Row {
            cells: IndexMap::with_capacity(iter.size_hint().0),
        };
        for (k, v) in iter {
            row.set(k, v);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_preserves_order() {
        let mut row = Row::new();
        row.set("b", "1");
        row.set("a", "2");
        row.set("b", "3");

        let keys: Vec<&str> = row.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(row.get("b"), Some("3"));
    }

    #[test]
    fn test_empty_key_ignored() {
        let row: Row = [("", "x"), ("name", "Ali")].into_iter().collect();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get_or_empty("missing"), "");
    }

    #[test]
    fn test_serialize_in_order() {
        let row: Row = [("z", "1"), ("a", "2")].into_iter().collect();
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }

    #[test]
    fn test_replace_keeps_position_in_output() {
        let mut row: Row = [("name", "Ali"), ("email", "a@x.com")].into_iter().collect();
        row.set("name", "Veli");
        row.set("phone", "5320000000");

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"name":"Veli","email":"a@x.com","phone":"5320000000"}"#);
    }
}
