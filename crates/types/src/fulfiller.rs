//! Fulfiller records and the sorted catalog built from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::collation::sort_by_name;

/// Identifier used for the synthetic entry that carries a catalog load error.
pub const ERROR_FULFILLER_ID: &str = "-1";

/// A print or production partner as returned by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfiller {
    pub fulfiller_id: String,
    pub internal_fulfiller_id: i64,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

impl Fulfiller {
    pub fn new(fulfiller_id: impl Into<String>, internal_fulfiller_id: i64, name: impl Into<String>) -> Self {
        Self {
            fulfiller_id: fulfiller_id.into(),
            internal_fulfiller_id,
            name: name.into(),
            archived: false,
        }
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// Synthetic stand-in shown when the catalog could not be loaded.
    pub fn load_error(message: impl Into<String>) -> Self {
        Self::new(ERROR_FULFILLER_ID, -1, message)
    }

    pub fn is_load_error(&self) -> bool {
        self.fulfiller_id == ERROR_FULFILLER_ID
    }

    /// Value that identifies this record inside an option list.
    pub fn composite_key(&self) -> CompositeKey {
        CompositeKey::for_fulfiller(self)
    }
}

/// Option value built from id, internal id and name.
///
/// Two fulfillers that share a display label still get distinct keys as
/// long as any of the three parts differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeKey(String);

impl CompositeKey {
    pub fn for_fulfiller(fulfiller: &Fulfiller) -> Self {
        Self(format!(
            "{} {} {}",
            fulfiller.fulfiller_id, fulfiller.internal_fulfiller_id, fulfiller.name
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CompositeKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name-ordered list of fulfillers.
///
/// A catalog is never edited in place; every load produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FulfillerCatalog {
    entries: Vec<Fulfiller>,
}

impl FulfillerCatalog {
    /// Sorts `fulfillers` by name and wraps them.
    pub fn new(mut fulfillers: Vec<Fulfiller>) -> Self {
        sort_by_name(&mut fulfillers);
        Self { entries: fulfillers }
    }

    /// Single-entry catalog carrying a load failure message.
    pub fn load_error(message: impl Into<String>) -> Self {
        Self {
            entries: vec![Fulfiller::load_error(message)],
        }
    }

    pub fn entries(&self) -> &[Fulfiller] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fulfiller> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, fulfiller_id: &str) -> Option<&Fulfiller> {
        self.entries.iter().find(|fulfiller| fulfiller.fulfiller_id == fulfiller_id)
    }
}

impl From<Vec<Fulfiller>> for FulfillerCatalog {
    fn from(value: Vec<Fulfiller>) -> Self {
        Self::new(value)
    }
}

impl<'a> IntoIterator for &'a FulfillerCatalog {
    type Item = &'a Fulfiller;
    type IntoIter = std::slice::Iter<'a, Fulfiller>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case_and_defaults_archived() {
        let fulfiller: Fulfiller = serde_json::from_value(json!({
            "fulfillerId": "abc123",
            "internalFulfillerId": 42,
            "name": "Acme Print",
            "links": {"self": "ignored"}
        }))
        .unwrap();

        assert_eq!(fulfiller.fulfiller_id, "abc123");
        assert_eq!(fulfiller.internal_fulfiller_id, 42);
        assert!(!fulfiller.archived);
    }

    #[test]
    fn composite_key_joins_id_internal_id_and_name() {
        let fulfiller = Fulfiller::new("abc123", 42, "Acme Print");
        assert_eq!(fulfiller.composite_key().as_str(), "abc123 42 Acme Print");
    }

    #[test]
    fn catalog_is_sorted_by_name() {
        let catalog = FulfillerCatalog::new(vec![
            Fulfiller::new("3", 3, "zeta"),
            Fulfiller::new("1", 1, "Alpha"),
            Fulfiller::new("2", 2, "beta"),
        ]);
        let names: Vec<&str> = catalog.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn load_error_catalog_has_single_sentinel_entry() {
        let catalog = FulfillerCatalog::load_error("boom");
        assert_eq!(catalog.len(), 1);
        let entry = &catalog.entries()[0];
        assert_eq!(entry.fulfiller_id, ERROR_FULFILLER_ID);
        assert_eq!(entry.internal_fulfiller_id, -1);
        assert_eq!(entry.name, "boom");
        assert!(entry.is_load_error());
    }
}
