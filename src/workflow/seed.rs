//! Seed data for the board.

use std::path::Path;

use anyhow::Context;

use super::item::{Priority, Size, Status, WorkflowItem};
use super::store::ItemStore;

/// Built-in demo items covering every column.
pub fn demo_items() -> Vec<WorkflowItem> {
    vec![
        WorkflowItem::new("1", "Analyze LibreChat requirements", Status::Review, Priority::High, Size::Medium, 3)
            .with_description("Turn the chat deployment request into a resource specification")
            .with_assignees(["alex", "sam"]),
        WorkflowItem::new("2", "Review PostgreSQL sizing", Status::Review, Priority::Medium, Size::Small, 1)
            .with_description("Confirm storage and backup targets for the shared database")
            .with_assignees(["jordan"]),
        WorkflowItem::new("3", "Prepare Proxmox VM template", Status::Ready, Priority::High, Size::Large, 5)
            .with_description("Base image with cloud-init for service nodes")
            .with_assignees(["taylor"]),
        WorkflowItem::new("4", "Configure ingress and TLS", Status::Ready, Priority::Medium, Size::Medium, 2)
            .with_description("Reverse proxy with certificates for public endpoints"),
        WorkflowItem::new("5", "Deploy Ollama model server", Status::InProgress, Priority::High, Size::Large, 4)
            .with_description("GPU node with model storage volume")
            .with_assignees(["alex"]),
        WorkflowItem::new("6", "Wire Prometheus scraping", Status::InProgress, Priority::Low, Size::Small, 1)
            .with_description("Scrape targets for the new services")
            .with_assignees(["sam"]),
        WorkflowItem::new("7", "Set up MinIO buckets", Status::Done, Priority::Medium, Size::Small, 1)
            .with_description("Artifact and backup buckets")
            .with_assignees(["jordan"]),
        WorkflowItem::new("8", "Document rollback runbook", Status::Done, Priority::Low, Size::Medium, 2)
            .with_assignees(["taylor", "alex"]),
    ]
}

/// Read items from a JSON array file.
pub fn load_items(path: &Path) -> anyhow::Result<Vec<WorkflowItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let items: Vec<WorkflowItem> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
    Ok(items)
}

/// Build a store from `seed_file`, or from the demo items when `None`.
pub fn seeded_store(seed_file: Option<&Path>) -> anyhow::Result<ItemStore> {
    let items = match seed_file {
        Some(path) => load_items(path)?,
        None => demo_items(),
    };
    let count = items.len();
    let store = ItemStore::with_items(items).context("Invalid seed data")?;
    tracing::info!(count, source = ?seed_file, "Seeded workflow board");
    Ok(store)
}
