//! # LumaEngine
//!
//! Deployment workflow board and requirements analysis service.
//!
//! LumaEngine keeps a kanban board of deployment work items and turns
//! free-text deployment requests into structured infrastructure
//! recommendations, served over a small JSON HTTP API.
//!
//! ## Features
//!
//! - **Workflow Board**: Review, Ready, In Progress and Done columns with
//!   validated partial updates
//! - **Requirements Analysis**: Deterministic keyword classification with
//!   resource estimates and dependency hints
//! - **Template Catalog**: Built-in deployable service templates
//! - **HTTP API**: axum server with CORS, request tracing and timeouts
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the API server
//! luma serve --port 8000
//!
//! # Analyze a request from the terminal
//! luma analyze "Deploy a LibreChat instance with PostgreSQL database"
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::significant_drop_tightening)]
#![allow(clippy::map_unwrap_or)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unnecessary_map_or)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::format_push_string)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::unused_async)]

pub mod analysis;
pub mod core;
pub mod server;
pub mod templates;
pub mod workflow;

pub use analysis::{Analyzer, KeywordAnalyzer, RequirementAnalysisResult};
pub use core::{Config, Error, Result};
pub use server::{create_app, AppState};
pub use workflow::{Board, ItemPatch, ItemStore, Status, WorkflowItem};

/// Version of LumaEngine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name (binary and config directory).
pub const APP_NAME: &str = "luma";

/// Human-facing application title.
pub const APP_TITLE: &str = "LumaEngine";
