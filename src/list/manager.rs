use super::config::ListConfig;
use super::view::{compute_stats, filter_items};
use crate::core::{Filter, Item, ItemPatch, Result, Stats};
use crate::storage::{ItemPersistence, KeyValueStore};
use log::debug;

/// Lifecycle of a list: writes are only issued once stored items are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// Authoritative in-memory grocery list.
///
/// Owns the items plus the view-state (filter and search term). Every
/// mutation changes memory first and, once the list is [`Phase::Ready`],
/// writes the whole collection through the persistence adapter. Unknown ids
/// and blank names are ignored; the return values say whether anything
/// happened.
#[derive(Debug)]
pub struct GroceryList<S> {
    persistence: ItemPersistence<S>,
    items: Vec<Item>,
    filter: Filter,
    search_term: String,
    phase: Phase,
}

impl<S: KeyValueStore> GroceryList<S> {
    /// Create an empty list in the loading phase. Call [`hydrate`](Self::hydrate)
    /// before expecting changes to be stored.
    pub fn new(persistence: ItemPersistence<S>) -> Self {
        Self {
            persistence,
            items: Vec::new(),
            filter: Filter::default(),
            search_term: String::new(),
            phase: Phase::Loading,
        }
    }

    /// Create a list and hydrate it from storage.
    pub fn open(persistence: ItemPersistence<S>) -> Self {
        let mut list = Self::new(persistence);
        list.hydrate();
        list
    }

    /// Open a list over `store` using the key and initial filter from `config`.
    pub fn with_config(store: S, config: &ListConfig) -> Result<Self> {
        config.validate()?;
        let persistence = ItemPersistence::with_key(store, config.storage_key.clone());
        let mut list = Self::open(persistence);
        list.filter = config.initial_filter;
        Ok(list)
    }

    /// Replace memory with the stored collection and become ready.
    /// Only the first call has an effect.
    pub fn hydrate(&mut self) -> bool {
        if self.phase == Phase::Ready {
            return false;
        }
        self.items = self.persistence.load();
        self.phase = Phase::Ready;
        debug!(
            "grocery list ready: key='{}' items={}",
            self.persistence.key(),
            self.items.len()
        );
        true
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a pending item at the top of the list.
    pub fn add_item(&mut self, name: &str, category: Option<&str>) -> Option<Item> {
        let item = Item::new(name, category)?;
        debug!("add item: id='{}' name='{}'", item.id(), item.name());
        self.items.insert(0, item.clone());
        self.persist();
        Some(item)
    }

    /// Flip the collected flag of the item with `id`.
    pub fn toggle_item(&mut self, id: &str) -> bool {
        let Some(item) = self.find_mut(id) else {
            return false;
        };
        item.toggle();
        debug!("toggle item: id='{}' collected={}", id, item.is_collected());
        self.persist();
        true
    }

    /// Apply `patch` to the item with `id`. A blank name in the patch is ignored.
    pub fn update_item(&mut self, id: &str, patch: ItemPatch) -> bool {
        let Some(item) = self.find_mut(id) else {
            return false;
        };
        item.apply(patch);
        debug!("update item: id='{}'", id);
        self.persist();
        true
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() == before {
            return false;
        }
        debug!("remove item: id='{}'", id);
        self.persist();
        true
    }

    /// Drop every collected item. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_collected());
        let removed = before - self.items.len();
        if removed > 0 {
            debug!("cleared {} collected items", removed);
            self.persist();
        }
        removed
    }

    /// Empty the list and delete the stored copy (the key is removed rather
    /// than overwritten with an empty array). The stored copy is removed in
    /// every phase, so a later hydrate finds nothing to load.
    pub fn clear_all(&mut self) {
        self.items.clear();
        self.persistence.clear();
        debug!("cleared all items");
    }

    // ========================================================================
    // View state
    // ========================================================================

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Whether a search term or a non-`All` filter narrows the view.
    pub fn is_filtering(&self) -> bool {
        !self.search_term.is_empty() || self.filter != Filter::All
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Items matching the search term and the filter mode, newest first.
    pub fn filtered_items(&self) -> Vec<&Item> {
        filter_items(&self.items, self.filter, &self.search_term)
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered_items().len()
    }

    /// Every item, newest first, ignoring filter and search.
    pub fn all_items(&self) -> &[Item] {
        &self.items
    }

    pub fn get_item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn stats(&self) -> Stats {
        compute_stats(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn persistence(&self) -> &ItemPersistence<S> {
        &self.persistence
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    fn persist(&self) {
        if self.phase == Phase::Ready {
            self.persistence.save(&self.items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DEFAULT_STORAGE_KEY, InMemoryStore};

    fn open_list() -> (GroceryList<InMemoryStore>, InMemoryStore) {
        let store = InMemoryStore::new();
        let list = GroceryList::open(ItemPersistence::new(store.clone()));
        (list, store)
    }

    fn stored_names(store: &InMemoryStore) -> Vec<String> {
        ItemPersistence::new(store.clone())
            .load()
            .iter()
            .map(|item| item.name().to_string())
            .collect()
    }

    #[test]
    fn test_add_prepends_and_skips_blank_names() {
        let (mut list, _) = open_list();
        list.add_item("Arroz", None).unwrap();
        assert!(list.add_item("   ", None).is_none());
        list.add_item(" Feijão ", Some("Outros")).unwrap();
        assert!(list.add_item("", Some("Bebidas")).is_none());

        let names: Vec<_> = list.all_items().iter().map(Item::name).collect();
        assert_eq!(names, vec!["Feijão", "Arroz"]);
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let (mut list, _) = open_list();
        let item = list.add_item("Banana", Some("Frutas e Verduras")).unwrap();

        assert!(list.toggle_item(item.id()));
        let first = list.get_item(item.id()).unwrap().updated_at();
        assert!(list.get_item(item.id()).unwrap().is_collected());

        assert!(list.toggle_item(item.id()));
        let toggled = list.get_item(item.id()).unwrap();
        assert!(!toggled.is_collected());
        assert!(toggled.updated_at() >= first);
        assert!(toggled.updated_at() >= toggled.created_at());
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let (mut list, store) = open_list();
        list.add_item("Café", None).unwrap();
        let before = store.get(DEFAULT_STORAGE_KEY).unwrap();

        assert!(!list.toggle_item("missing"));
        assert!(!list.update_item("missing", ItemPatch::new().name("x")));
        assert!(!list.remove_item("missing"));
        assert_eq!(list.len(), 1);
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), before);
    }

    #[test]
    fn test_update_name_and_category() {
        let (mut list, store) = open_list();
        let item = list.add_item("Leite", None).unwrap();

        assert!(list.update_item(
            item.id(),
            ItemPatch::new().name("Leite integral").category("Laticínios")
        ));
        let updated = list.get_item(item.id()).unwrap();
        assert_eq!(updated.name(), "Leite integral");
        assert_eq!(updated.category(), Some("Laticínios"));
        assert_eq!(updated.created_at(), item.created_at());
        assert_eq!(stored_names(&store), vec!["Leite integral"]);

        assert!(list.update_item(item.id(), ItemPatch::new().clear_category()));
        assert_eq!(list.get_item(item.id()).unwrap().category(), None);
    }

    #[test]
    fn test_remove_item() {
        let (mut list, store) = open_list();
        let a = list.add_item("A", None).unwrap();
        list.add_item("B", None).unwrap();

        assert!(list.remove_item(a.id()));
        assert!(list.get_item(a.id()).is_none());
        assert_eq!(stored_names(&store), vec!["B"]);
    }

    #[test]
    fn test_banana_scenario() {
        let (mut list, _) = open_list();
        let banana = list.add_item("Banana", Some("Frutas e Verduras")).unwrap();
        assert_eq!(list.len(), 1);
        assert!(!banana.is_collected());

        list.toggle_item(banana.id());
        assert!(list.get_item(banana.id()).unwrap().is_collected());
        assert_eq!(
            list.stats(),
            Stats {
                total: 1,
                collected: 1,
                pending: 0,
                completion_rate: 100
            }
        );
    }

    #[test]
    fn test_search_scenario() {
        let (mut list, _) = open_list();
        list.add_item("Leite", None).unwrap();
        list.add_item("Pão", None).unwrap();
        list.set_search_term("le");

        let names: Vec<_> = list.filtered_items().into_iter().map(Item::name).collect();
        assert_eq!(names, vec!["Leite"]);
        assert_eq!(list.filtered_count(), 1);
        assert!(list.is_filtering());
    }

    #[test]
    fn test_filter_does_not_touch_storage_or_stats() {
        let (mut list, store) = open_list();
        let a = list.add_item("A", None).unwrap();
        list.add_item("B", None).unwrap();
        list.toggle_item(a.id());
        let stored = store.get(DEFAULT_STORAGE_KEY).unwrap();

        list.set_filter(Filter::Collected);
        assert_eq!(list.filtered_count(), 1);
        list.set_filter(Filter::Pending);
        assert_eq!(list.filtered_items()[0].name(), "B");
        assert_eq!(list.stats().total, 2);
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), stored);
    }

    #[test]
    fn test_clear_completed_scenario() {
        let (mut list, store) = open_list();
        let milk = list.add_item("Leite", None).unwrap();
        list.add_item("Pão", None).unwrap();
        list.toggle_item(milk.id());

        assert_eq!(list.clear_completed(), 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.all_items()[0].name(), "Pão");
        assert_eq!(stored_names(&store), vec!["Pão"]);
        assert_eq!(list.clear_completed(), 0);
    }

    #[test]
    fn test_clear_all_removes_key() {
        let (mut list, store) = open_list();
        list.add_item("Leite", None).unwrap();
        list.add_item("Pão", None).unwrap();
        assert!(store.contains(DEFAULT_STORAGE_KEY).unwrap());

        list.clear_all();
        assert!(list.is_empty());
        assert!(!store.contains(DEFAULT_STORAGE_KEY).unwrap());
    }

    #[test]
    fn test_writes_suppressed_while_loading() {
        let store = InMemoryStore::new();
        ItemPersistence::new(store.clone()).save(&[Item::new("Guardado", None).unwrap()]);

        let mut list = GroceryList::new(ItemPersistence::new(store.clone()));
        assert_eq!(list.phase(), Phase::Loading);
        assert!(!list.is_loaded());

        list.add_item("Temporário", None).unwrap();
        assert_eq!(stored_names(&store), vec!["Guardado"]);

        assert!(list.hydrate());
        assert!(list.is_loaded());
        assert_eq!(list.all_items()[0].name(), "Guardado");
        assert!(!list.hydrate());
    }

    #[test]
    fn test_clear_all_before_hydrate_removes_key() {
        let store = InMemoryStore::new();
        ItemPersistence::new(store.clone()).save(&[Item::new("Guardado", None).unwrap()]);

        let mut list = GroceryList::new(ItemPersistence::new(store.clone()));
        list.clear_all();
        assert_eq!(list.phase(), Phase::Loading);
        assert!(!store.contains(DEFAULT_STORAGE_KEY).unwrap());

        assert!(list.hydrate());
        assert!(list.is_empty());
    }

    #[test]
    fn test_save_failure_keeps_memory() {
        let (mut list, store) = open_list();
        list.add_item("Arroz", None).unwrap();
        store.set_read_only(true);

        let item = list.add_item("Feijão", None).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(stored_names(&store), vec!["Arroz"]);

        store.set_read_only(false);
        list.toggle_item(item.id());
        assert_eq!(stored_names(&store), vec!["Feijão", "Arroz"]);
    }

    #[test]
    fn test_with_config_applies_key_and_filter() {
        let store = InMemoryStore::new();
        let config = ListConfig::new()
            .storage_key("weekly")
            .initial_filter(Filter::Pending);
        let mut list = GroceryList::with_config(store.clone(), &config).unwrap();

        assert!(list.is_loaded());
        assert_eq!(list.filter(), Filter::Pending);
        list.add_item("Ovos", None).unwrap();
        assert!(store.contains("weekly").unwrap());
        assert!(!store.contains(DEFAULT_STORAGE_KEY).unwrap());

        let bad = ListConfig::new().storage_key("../weekly");
        assert!(GroceryList::with_config(store, &bad).is_err());
    }
}
