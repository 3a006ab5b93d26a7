//! HTTP server exposing the board and the requirements analyzer.
//!
//! Routes (relative to `server.api_prefix`):
//!
//! - `GET /workflow-items`, `GET|PATCH /workflow-items/{id}`
//! - `POST /workflow-items/{id}/move`, `GET /board`
//! - `POST /requirements/analyze`, `POST /requirements/validate`
//! - `GET /templates`, `GET /templates/{id}`
//!
//! `/`, `/health` and `/info` are always served at the root.

pub mod handlers;
mod response;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use response::{ApiError, ErrorBody};

use crate::analysis::{build_analyzer, Analyzer};
use crate::core::Config;
use crate::workflow::{seeded_store, Board, ItemStore};

/// Response header carrying the handling time in seconds.
pub const PROCESS_TIME_HEADER: &str = "x-process-time";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub board: Board,
    pub analyzer: Arc<dyn Analyzer>,
    pub api_prefix: String,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state over an existing store.
    pub fn new(store: Arc<ItemStore>, analyzer: Arc<dyn Analyzer>) -> Self {
        Self { board: Board::new(store), analyzer, api_prefix: String::new(), started_at: Utc::now() }
    }

    /// Build the seeded store and the configured analyzer.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = seeded_store(config.board.seed_file.as_deref())?;
        let analyzer = build_analyzer(&config.analyzer)?;
        let mut state = Self::new(Arc::new(store), analyzer);
        state.api_prefix.clone_from(&config.server.api_prefix);
        Ok(state)
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/workflow-items", get(handlers::list_items))
        .route("/workflow-items/{id}", get(handlers::get_item).patch(handlers::update_item))
        .route("/workflow-items/{id}/move", post(handlers::move_item))
        .route("/board", get(handlers::board))
        .route("/requirements/analyze", post(handlers::analyze))
        .route("/requirements/validate", post(handlers::validate))
        .route("/templates", get(handlers::list_templates))
        .route("/templates/{id}", get(handlers::get_template))
}

/// Build CORS layer from configuration.
fn build_cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.cors.allowed_origins.is_empty() {
        cors.allow_origin(AllowOrigin::any())
    } else {
        let origins: Vec<HeaderValue> =
            config.cors.allowed_origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

async fn add_process_time(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let mut response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&format!("{elapsed:.6}")) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }
    response
}

/// Create the application router.
pub fn create_app(state: AppState, config: &Config) -> Router {
    let system = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/info", get(handlers::info));

    let prefix = config.server.api_prefix.as_str();
    let routes = if prefix.is_empty() {
        system.merge(api_routes())
    } else {
        system.nest(prefix, api_routes())
    };

    routes
        .fallback(handlers::fallback)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(build_cors_layer(config))
        .layer(TraceLayer::new_for_http())
        // Outermost: timeout and CORS preflight responses carry the header.
        .layer(middleware::from_fn(add_process_time))
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    let app = create_app(state, config);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    if config.cors.allowed_origins.is_empty() {
        tracing::warn!("CORS allows any origin; set cors.allowed_origins for production");
    }
    tracing::info!(address = %address, prefix = %config.server.api_prefix, "LumaEngine listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await.context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
