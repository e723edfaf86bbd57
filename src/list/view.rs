//! Derived views over the item collection.
//!
//! Both functions are pure over their inputs; the list recomputes them on
//! every read.

use crate::core::{Filter, Item, Stats};

/// Apply the search term (name or category, case-insensitive) and then the
/// filter mode. Relative order is preserved.
pub fn filter_items<'a>(items: &'a [Item], filter: Filter, search_term: &str) -> Vec<&'a Item> {
    let needle = search_term.to_lowercase();
    items
        .iter()
        .filter(|item| item.matches_search(&needle))
        .filter(|item| filter.matches(item))
        .collect()
}

pub fn compute_stats(items: &[Item]) -> Stats {
    let collected = items.iter().filter(|item| item.is_collected()).count();
    Stats::new(items.len(), collected)
}
