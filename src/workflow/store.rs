//! In-memory workflow item store.

use parking_lot::Mutex;

use super::item::{ItemPatch, WorkflowItem};
use crate::core::{Error, Result};

/// Owns the authoritative set of workflow items.
///
/// Every read and write goes through one mutex, so concurrent updates are
/// serialized and none are lost. Items keep their insertion order.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Mutex<Vec<WorkflowItem>>,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given items.
    ///
    /// Fails on the first item `insert` would reject.
    pub fn with_items(items: impl IntoIterator<Item = WorkflowItem>) -> Result<Self> {
        let store = Self::new();
        for item in items {
            store.insert(item)?;
        }
        Ok(store)
    }

    /// Add a new item. Ids must be unique and non-empty.
    pub fn insert(&self, item: WorkflowItem) -> Result<()> {
        if item.id.trim().is_empty() {
            return Err(Error::validation("id", "must not be empty"));
        }

        let mut items = self.items.lock();
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(Error::validation("id", format!("duplicate item id '{}'", item.id)));
        }
        tracing::debug!(item_id = %item.id, status = %item.status, "Inserted workflow item");
        items.push(item);
        Ok(())
    }

    /// Snapshot of all items in store order.
    pub fn list(&self) -> Vec<WorkflowItem> {
        self.items.lock().clone()
    }

    /// Fetch one item by id.
    pub fn get(&self, id: &str) -> Result<WorkflowItem> {
        self.items
            .lock()
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| Error::item_not_found(id))
    }

    /// Apply `patch` to the item with `id` and return the updated item.
    ///
    /// The patch is validated before the item is located, and the merge
    /// happens under the lock, so a failed update leaves the store as it was.
    pub fn update(&self, id: &str, patch: &ItemPatch) -> Result<WorkflowItem> {
        self.update_tracked(id, patch).map(|(_, updated)| updated)
    }

    /// Like [`update`](Self::update), also returning the item as it was
    /// before the merge.
    pub(crate) fn update_tracked(&self, id: &str, patch: &ItemPatch) -> Result<(WorkflowItem, WorkflowItem)> {
        patch.validate()?;

        let mut items = self.items.lock();
        let item = items.iter_mut().find(|item| item.id == id).ok_or_else(|| {
            tracing::debug!(item_id = %id, "Update for unknown workflow item");
            Error::item_not_found(id)
        })?;

        let previous = item.clone();
        patch.apply_to(item);
        tracing::debug!(item_id = %id, status = %item.status, "Updated workflow item");
        Ok((previous, item.clone()))
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::workflow::item::{Priority, Size, Status};

    fn item(id: &str, status: Status) -> WorkflowItem {
        WorkflowItem::new(id, format!("Item {id}"), status, Priority::Medium, Size::Medium, 3)
    }

    fn seeded() -> ItemStore {
        ItemStore::with_items([item("1", Status::Review), item("2", Status::Ready)]).unwrap()
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = seeded();
        let ids: Vec<_> = store.list().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let store = seeded();
        let err = store.insert(item("1", Status::Done)).unwrap_err();
        assert_eq!(err.field(), Some("id"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_rejects_empty_id() {
        let store = ItemStore::new();
        assert!(store.insert(item(" ", Status::Done)).unwrap_err().is_validation());
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_merges_fields() {
        let store = seeded();
        let patch = ItemPatch {
            status: Some(Status::Done),
            description: Some("shipped".to_string()),
            ..ItemPatch::default()
        };
        let updated = store.update("1", &patch).unwrap();

        assert_eq!(updated.status, Status::Done);
        assert_eq!(updated.description, "shipped");
        assert_eq!(updated.title, "Item 1");
        assert_eq!(store.get("1").unwrap(), updated);
    }

    #[test]
    fn test_update_missing_id_leaves_store_unchanged() {
        let store = seeded();
        let before = store.list();

        let err = store.update("missing-id", &ItemPatch::status(Status::Done)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_update_negative_estimate_leaves_store_unchanged() {
        let store = seeded();
        let before = store.list();

        let err = store.update("1", &ItemPatch::estimate(-1)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field(), Some("estimate"));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_update_accepts_empty_title() {
        let store = seeded();
        let patch = ItemPatch { title: Some(String::new()), ..ItemPatch::default() };
        let updated = store.update("1", &patch).unwrap();
        assert_eq!(updated.title, "");
        assert_eq!(store.get("1").unwrap(), updated);
    }

    #[test]
    fn test_update_tracked_returns_previous_item() {
        let store = seeded();
        let (previous, updated) = store.update_tracked("2", &ItemPatch::status(Status::Done)).unwrap();
        assert_eq!(previous.status, Status::Ready);
        assert_eq!(updated.status, Status::Done);
        assert_eq!(WorkflowItem { status: Status::Ready, ..updated }, previous);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let store = seeded();
        let before = store.get("2").unwrap();
        let after = store.update("2", &ItemPatch::default()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_get_missing() {
        let store = seeded();
        assert!(store.get("9").unwrap_err().is_not_found());
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = Arc::new(ItemStore::with_items((0..16).map(|i| item(&i.to_string(), Status::Review))).unwrap());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let patch = ItemPatch { status: Some(Status::Done), estimate: Some(i), ..ItemPatch::default() };
                    store.update(&i.to_string(), &patch).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for (i, item) in store.list().iter().enumerate() {
            assert_eq!(item.status, Status::Done);
            assert_eq!(i64::from(item.estimate), i as i64);
        }
    }
}
