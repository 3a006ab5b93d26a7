//! Performance benchmarks for LumaEngine.
//!
//! This module contains benchmarks for:
//! - Keyword requirements analysis across request lengths
//! - Board moves and column views on stores of different sizes
//!
//! Run with: `cargo bench`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use luma_engine::analysis::analyze;
use luma_engine::workflow::{Board, ItemStore, Priority, Size, Status, WorkflowItem};

// ============================================================================
// Fixtures
// ============================================================================

mod fixtures {
    use super::*;

    pub const REQUESTS: [(&str, &str); 3] = [
        ("short", "Deploy a LibreChat instance with PostgreSQL database"),
        (
            "medium",
            "Production chat service on kubernetes with redis cache, TLS termination, \
             a load balancer and prometheus alerting",
        ),
        (
            "long",
            "We need a production web application backed by postgres and object storage. \
             It should run on a kubernetes cluster with high availability, expose a public \
             domain through an ingress with https, use SSO for staff, keep secrets in a vault, \
             and ship logging plus grafana dashboards with alert routing for the on-call team.",
        ),
    ];

    /// Build a board holding `count` items spread over all columns.
    pub fn board(count: usize) -> Board {
        let items = (0..count).map(|i| {
            WorkflowItem::new(
                i.to_string(),
                format!("Task {i}"),
                Status::ALL[i % Status::ALL.len()],
                Priority::Medium,
                Size::Small,
                1,
            )
        });
        Board::new(Arc::new(ItemStore::with_items(items).unwrap()))
    }
}

// ============================================================================
// Analysis Benchmarks
// ============================================================================

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis/keyword");

    for (name, text) in fixtures::REQUESTS {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| analyze(black_box(text)).unwrap());
        });
    }

    group.finish();
}

// ============================================================================
// Board Benchmarks
// ============================================================================

fn bench_move_item(c: &mut Criterion) {
    let mut group = c.benchmark_group("board/move");

    for count in [10, 100, 1000] {
        let board = fixtures::board(count);
        let target = (count - 1).to_string();
        let mut toggle = false;

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                toggle = !toggle;
                let destination = if toggle { Status::Done } else { Status::Review };
                board.move_item(black_box(&target), destination).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("board/columns");

    for count in [10, 100, 1000] {
        let board = fixtures::board(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(board.columns()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_move_item, bench_columns);
criterion_main!(benches);
