//! Most-recently-selected fulfiller ids.

use serde::{Deserialize, Serialize};

/// Default number of ids retained after a promotion.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Ordered fulfiller ids, most recent first, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RecencyList(Vec<String>);

impl RecencyList {
    /// Build a list from ids as stored remotely, dropping repeated ids after
    /// their first occurrence.
    pub fn new(ids: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }
        Self(deduped)
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, fulfiller_id: &str) -> bool {
        self.0.iter().any(|id| id == fulfiller_id)
    }

    /// Returns a new list with `fulfiller_id` at the front, any earlier
    /// occurrence removed, and at most `limit` entries.
    pub fn promoted(&self, fulfiller_id: &str, limit: usize) -> Self {
        let mut ids = Vec::with_capacity(self.0.len() + 1);
        ids.push(fulfiller_id.to_string());
        ids.extend(self.0.iter().filter(|id| id.as_str() != fulfiller_id).cloned());
        ids.truncate(limit.max(1));
        Self(ids)
    }

    pub fn into_ids(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for RecencyList {
    fn from(value: Vec<String>) -> Self {
        Self::new(value)
    }
}

impl From<RecencyList> for Vec<String> {
    fn from(value: RecencyList) -> Self {
        value.0
    }
}
