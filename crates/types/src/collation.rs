//! Locale-aware ordering of fulfiller names.
//!
//! Names compare on a folded form first (canonical decomposition with
//! combining marks removed, then lowercased) so that `Émile` sorts next to
//! `emile` and `Zürich` next to `zurich`. Ties fall back to the raw strings.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::Fulfiller;

fn fold(name: &str) -> String {
    name.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect()
}

/// Compare two display names the way a reader expects an alphabetical list.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    fold(left).cmp(&fold(right)).then_with(|| left.cmp(right))
}

/// Sort fulfillers ascending by name.
pub fn sort_by_name(fulfillers: &mut [Fulfiller]) {
    fulfillers.sort_by_cached_key(|fulfiller| (fold(&fulfiller.name), fulfiller.name.clone()));
}
