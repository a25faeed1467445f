//! Resolution of option values back to fulfiller records.

use std::collections::HashMap;

use fulfillers_types::{CompositeKey, Fulfiller, FulfillerCatalog};

/// Maps option values and fulfiller ids to the records they came from.
///
/// Rebuilt whenever the catalog is replaced, so it holds exactly the
/// host-supplied fulfillers plus the latest fetch. Entries from the latest
/// fetch win over host-supplied ones with the same key.
#[derive(Debug, Clone, Default)]
pub struct FulfillerLookup {
    by_key: HashMap<CompositeKey, Fulfiller>,
    by_id: HashMap<String, Fulfiller>,
}

impl FulfillerLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a record.
    pub fn insert(&mut self, fulfiller: &Fulfiller) {
        self.by_key.insert(fulfiller.composite_key(), fulfiller.clone());
        self.by_id.insert(fulfiller.fulfiller_id.clone(), fulfiller.clone());
    }

    pub fn extend<'a>(&mut self, fulfillers: impl IntoIterator<Item = &'a Fulfiller>) {
        for fulfiller in fulfillers {
            self.insert(fulfiller);
        }
    }

    /// Drop everything and index `host` followed by `fetched`.
    pub fn rebuild(&mut self, host: Option<&[Fulfiller]>, fetched: Option<&FulfillerCatalog>) {
        self.by_key.clear();
        self.by_id.clear();
        if let Some(host) = host {
            self.extend(host);
        }
        if let Some(fetched) = fetched {
            self.extend(fetched);
        }
    }

    pub fn resolve(&self, key: &CompositeKey) -> Option<&Fulfiller> {
        self.by_key.get(key)
    }

    pub fn by_id(&self, fulfiller_id: &str) -> Option<&Fulfiller> {
        self.by_id.get(fulfiller_id)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_fetch_overwrites_same_id() {
        let mut lookup = FulfillerLookup::new();
        let first = Fulfiller::new("A", 1, "Acme");
        let renamed = Fulfiller::new("A", 1, "Acme").archived(true);
        lookup.insert(&first);
        lookup.insert(&renamed);

        assert_eq!(lookup.resolve(&first.composite_key()), Some(&renamed));
        assert_eq!(lookup.by_id("A"), Some(&renamed));
    }

    #[test]
    fn rebuild_discards_stale_entries() {
        let mut lookup = FulfillerLookup::new();
        let old = Fulfiller::new("old", 1, "Old");
        lookup.insert(&old);

        let host = vec![Fulfiller::new("host", 2, "Host")];
        let fetched = FulfillerCatalog::new(vec![Fulfiller::new("new", 3, "New")]);
        lookup.rebuild(Some(&host), Some(&fetched));

        assert!(lookup.resolve(&old.composite_key()).is_none());
        assert!(lookup.by_id("host").is_some());
        assert!(lookup.by_id("new").is_some());
        assert_eq!(lookup.len(), 2);
    }
}
