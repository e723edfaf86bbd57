// ============================================================================
// Grocery List Library
// ============================================================================

//! Grocery list state with local persistence.
//!
//! A [`GroceryList`] owns the items and the view-state (filter and search
//! term), derives the filtered view and [`Stats`], and writes the whole
//! collection through an [`ItemPersistence`] adapter after every change.
//! Storage backends implement [`KeyValueStore`].
//!
//! # Examples
//!
//! ```
//! use grocerylist::{Filter, GroceryList, InMemoryStore, ItemPersistence};
//!
//! let store = InMemoryStore::new();
//! let mut list = GroceryList::open(ItemPersistence::new(store.clone()));
//!
//! let banana = list.add_item("Banana", Some("Frutas e Verduras")).unwrap();
//! list.add_item("Leite", None);
//! list.toggle_item(banana.id());
//!
//! list.set_filter(Filter::Pending);
//! assert_eq!(list.filtered_items()[0].name(), "Leite");
//! assert_eq!(list.stats().completion_rate, 50);
//!
//! // A new list over the same store sees the saved items
//! let reopened = GroceryList::open(ItemPersistence::new(store));
//! assert_eq!(reopened.len(), 2);
//! ```

pub mod core;
pub mod list;
pub mod storage;

// Re-export main types for convenience
pub use crate::core::{Category, Filter, GroceryError, Item, ItemPatch, Result, Stats, category_labels};
pub use crate::list::{GroceryList, ListConfig, Phase};
pub use crate::storage::{DEFAULT_STORAGE_KEY, FileStore, InMemoryStore, ItemPersistence, KeyValueStore};

/// Open the grocery list described by `config` on a file-backed store.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::TempDir::new()?;
/// let config = grocerylist::ListConfig::new().data_dir(dir.path());
///
/// let mut list = grocerylist::open_file_list(&config)?;
/// list.add_item("Café", Some("Bebidas"));
///
/// let reopened = grocerylist::open_file_list(&config)?;
/// assert_eq!(reopened.all_items()[0].name(), "Café");
/// # Ok(())
/// # }
/// ```
pub fn open_file_list(config: &ListConfig) -> Result<GroceryList<FileStore>> {
    let store = config.file_store()?;
    GroceryList::with_config(store, config)
}
