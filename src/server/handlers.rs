//! Route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::response::ApiError;
use super::AppState;
use crate::analysis::{validate_resources, CompatibilityReport, RequirementAnalysisResult, ResourceSpec};
use crate::templates::{self, Template, TemplateCategory};
use crate::workflow::{Column, ItemPatch, ItemPatchRequest, Status, WorkflowItem};
use crate::{APP_TITLE, VERSION};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Body of `POST /workflow-items/{id}/move`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoveRequest {
    pub status: String,
}

/// Body of `POST /requirements/analyze`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(alias = "user_request")]
    pub text: String,
}

/// Query of `GET /templates`.
#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    pub category: Option<String>,
}

pub async fn list_items(State(state): State<AppState>) -> Json<Vec<WorkflowItem>> {
    Json(state.board.store().list())
}

pub async fn get_item(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<WorkflowItem> {
    Ok(Json(state.board.store().get(&id)?))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ItemPatchRequest>, JsonRejection>,
) -> ApiResult<WorkflowItem> {
    let Json(request) = payload?;
    let patch = ItemPatch::try_from(request)?;
    Ok(Json(state.board.store().update(&id, &patch)?))
}

pub async fn move_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> ApiResult<WorkflowItem> {
    let Json(request) = payload?;
    let destination: Status = request.status.parse()?;
    Ok(Json(state.board.move_item(&id, destination)?))
}

pub async fn board(State(state): State<AppState>) -> Json<Vec<Column>> {
    Json(state.board.columns())
}

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<RequirementAnalysisResult> {
    let Json(request) = payload?;
    let result = state.analyzer.analyze(&request.text).await?;
    tracing::info!(
        analyzer = state.analyzer.name(),
        matched = result.matched_categories(),
        confidence = result.confidence_score,
        "Requirements analyzed"
    );
    Ok(Json(result))
}

pub async fn validate(payload: Result<Json<ResourceSpec>, JsonRejection>) -> ApiResult<CompatibilityReport> {
    let Json(spec) = payload?;
    Ok(Json(validate_resources(&spec)))
}

pub async fn list_templates(Query(query): Query<TemplateQuery>) -> ApiResult<Vec<Template>> {
    let category = query.category.as_deref().map(str::parse::<TemplateCategory>).transpose()?;
    Ok(Json(templates::list_templates(category)))
}

pub async fn get_template(Path(id): Path<String>) -> ApiResult<Template> {
    Ok(Json(templates::get_template(&id)?))
}

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to {APP_TITLE}"),
        "version": VERSION,
        "api_prefix": state.api_prefix,
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": APP_TITLE,
        "version": VERSION,
        "analyzer": state.analyzer.name(),
        "items": state.board.store().len(),
        "started_at": state.started_at.to_rfc3339(),
    }))
}

pub async fn fallback(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
