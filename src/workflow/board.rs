//! Board controller: column layout and drag-and-drop moves.
//!
//! Transitions are unconstrained: any status may move to any
//! other status, including Done back to Review.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::item::{ItemPatch, Status, WorkflowItem};
use super::store::ItemStore;
use crate::core::Result;

/// One board column and the items currently in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub status: Status,
    pub items: Vec<WorkflowItem>,
}

/// Drives status transitions on a shared [`ItemStore`].
#[derive(Debug, Clone)]
pub struct Board {
    store: Arc<ItemStore>,
}

impl Board {
    /// Create a board over `store`.
    pub fn new(store: Arc<ItemStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<ItemStore> {
        &self.store
    }

    /// Move an item to `destination`.
    ///
    /// Only the status changes. Store errors propagate unchanged; moving an
    /// item to the column it is already in returns it untouched.
    pub fn move_item(&self, id: &str, destination: Status) -> Result<WorkflowItem> {
        let (previous, moved) = self.store.update_tracked(id, &ItemPatch::status(destination))?;
        tracing::info!(item_id = %id, from = %previous.status, to = %destination, "Moved workflow item");
        Ok(moved)
    }

    /// The board in fixed column order.
    ///
    /// All four columns are always present; within a column items keep
    /// store order.
    pub fn columns(&self) -> Vec<Column> {
        let items = self.store.list();
        Status::ALL
            .iter()
            .map(|&status| Column {
                status,
                items: items.iter().filter(|item| item.status == status).cloned().collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::item::{Priority, Size};

    fn board() -> Board {
        let store = ItemStore::with_items([
            WorkflowItem::new("1", "Provision VM", Status::Review, Priority::High, Size::Large, 5),
            WorkflowItem::new("2", "Configure DNS", Status::Ready, Priority::Low, Size::Small, 1),
            WorkflowItem::new("3", "Add alerts", Status::Review, Priority::Medium, Size::Medium, 2),
        ])
        .unwrap();
        Board::new(Arc::new(store))
    }

    #[test]
    fn test_move_item_changes_only_status() {
        let board = board();
        let before = board.store().get("1").unwrap();

        let moved = board.move_item("1", Status::Done).unwrap();
        assert_eq!(moved.status, Status::Done);
        assert_eq!(WorkflowItem { status: before.status, ..moved.clone() }, before);

        let listed = board.store().list();
        assert_eq!(listed.iter().find(|i| i.id == "1").unwrap().status, Status::Done);
    }

    #[test]
    fn test_move_to_current_status_is_noop() {
        let board = board();
        let before = board.store().list();

        let moved = board.move_item("2", Status::Ready).unwrap();
        assert_eq!(moved, before[1]);
        assert_eq!(board.store().list(), before);
    }

    #[test]
    fn test_done_can_move_back_to_review() {
        let board = board();
        board.move_item("1", Status::Done).unwrap();
        let moved = board.move_item("1", Status::Review).unwrap();
        assert_eq!(moved.status, Status::Review);
    }

    #[test]
    fn test_every_transition_is_allowed() {
        let board = board();
        for from in Status::ALL {
            for to in Status::ALL {
                board.move_item("3", from).unwrap();
                assert_eq!(board.move_item("3", to).unwrap().status, to);
            }
        }
    }

    #[test]
    fn test_move_missing_item_propagates_not_found() {
        let board = board();
        let before = board.store().list();
        assert!(board.move_item("42", Status::Done).unwrap_err().is_not_found());
        assert_eq!(board.store().list(), before);
    }

    #[test]
    fn test_columns_fixed_order_and_store_order_within() {
        let board = board();
        let columns = board.columns();

        let statuses: Vec<_> = columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, Status::ALL.to_vec());

        let review: Vec<_> = columns[0].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(review, vec!["1", "3"]);
        assert!(columns[2].items.is_empty());
        assert!(columns[3].items.is_empty());
    }

    #[test]
    fn test_columns_on_empty_board() {
        let board = Board::new(Arc::new(ItemStore::new()));
        let columns = board.columns();
        assert_eq!(columns.len(), 4);
        assert!(columns.iter().all(|c| c.items.is_empty()));
    }
}
