//! Workflow board for deployment tasks.
//!
//! ## Components
//!
//! - `ItemStore` - authoritative in-memory set of workflow items
//! - `Board` - column layout and drag-and-drop status moves
//! - seed helpers - demo items or a JSON seed file

mod board;
mod item;
mod seed;
mod store;

pub use board::{Board, Column};
pub use item::{ItemPatch, ItemPatchRequest, Priority, Size, Status, WorkflowItem};
pub use seed::{demo_items, load_items, seeded_store};
pub use store::ItemStore;
