use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use llmsel_core::{CatalogEntry, RecommendationResponse, UserRequirements};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn recommendation_routes() -> Router<AppState> {
    Router::new().route("/api/recommendations", post(recommend))
}

pub fn model_routes() -> Router<AppState> {
    Router::new().route("/api/models", get(list_models))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

/// 200 whenever the body is usable, including after an internal fallback.
/// Only malformed requirements produce an error.
async fn recommend(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let requirements = UserRequirements::from_slice(&body)?;
    info!(task = %UserRequirements::describe(&requirements.task_type), "recommendation requested");
    let advice = state.advisor.recommend(&requirements).await;
    Ok(Json(advice.into_response()))
}

#[derive(Debug, Serialize)]
struct ModelsResponse {
    success: bool,
    count: usize,
    models: Vec<CatalogEntry>,
}

async fn list_models(State(state): State<AppState>) -> Result<Json<ModelsResponse>, ApiError> {
    let models = state.advisor.catalog().fetch_models().await?;
    Ok(Json(ModelsResponse {
        success: true,
        count: models.len(),
        models,
    }))
}
