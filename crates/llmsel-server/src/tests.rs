use crate::app_with_state;
use crate::state::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use llmsel_advisor::Advisor;
use llmsel_catalog::{CatalogSource, ListingError};
use llmsel_core::{CatalogEntry, Recommendation, UserRequirements};
use llmsel_reasoning::{Reasoner, ReasoningError};
use llmsel_router::RuleBasedScorer;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct StubCatalog(Result<Vec<CatalogEntry>, ListingError>);

#[async_trait]
impl CatalogSource for StubCatalog {
    async fn fetch_models(&self) -> Result<Vec<CatalogEntry>, ListingError> {
        self.0.clone()
    }
}

struct StubReasoner(Result<Vec<Recommendation>, ReasoningError>);

#[async_trait]
impl Reasoner for StubReasoner {
    async fn rank(
        &self,
        _requirements: &UserRequirements,
        _catalog: &[CatalogEntry],
    ) -> Result<Vec<Recommendation>, ReasoningError> {
        self.0.clone()
    }
}

fn models() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("hf-a").with_display_name("Model A"),
        CatalogEntry::new("hf-b").with_display_name("Model B"),
        CatalogEntry::new("hf-c").with_display_name("Model C"),
    ]
}

fn state(
    catalog: Result<Vec<CatalogEntry>, ListingError>,
    reasoner: Option<Result<Vec<Recommendation>, ReasoningError>>,
) -> AppState {
    let reasoner = reasoner.map(|r| Arc::new(StubReasoner(r)) as Arc<dyn Reasoner>);
    AppState::new(Advisor::new(
        Arc::new(StubCatalog(catalog)),
        reasoner,
        RuleBasedScorer::default(),
    ))
}

fn static_state() -> AppState {
    state(Ok(models()), None)
}

async fn post_json(state: AppState, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(state, req).await
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(state, req).await
}

async fn send(state: AppState, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app_with_state(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let (status, body) = get(static_state(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_request_id_header() {
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app_with_state(static_state()).oneshot(req).await.unwrap();
    let id = resp.headers().get(crate::REQUEST_ID_HEADER).unwrap();
    assert_eq!(id.to_str().unwrap().len(), 36);
}

// ========== Recommendations ==========

#[tokio::test]
async fn test_static_summarization() {
    let body = json!({
        "taskType": "summarization",
        "speedPriority": "low",
        "monthlyUsage": "medium",
    });
    let (status, body) =
        post_json(static_state(), "/api/recommendations", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["source"], "static");
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["modelName"], "BART Large CNN SamSum");
    assert!((recs[0]["monthlyCost"].as_f64().unwrap() - 12.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_legacy_field_names() {
    let body = r#"{"task":"code","accuracy":"high","usage":"heavy"}"#;
    let (status, body) = post_json(static_state(), "/api/recommendations", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendations"][0]["modelName"], "Qwen 2.5 72B");
    assert_eq!(body["recommendations"][0]["monthlyCost"], 800.0);
}

#[tokio::test]
async fn test_remote_source() {
    let picks = vec![
        Recommendation::new("Model A", 90.0, "a"),
        Recommendation::new("Model B", 80.0, "b"),
        Recommendation::new("Model C", 70.0, "c"),
    ];
    let (status, body) = post_json(
        state(Ok(models()), Some(Ok(picks))),
        "/api/recommendations",
        "{}",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "remote");
    assert_eq!(body["recommendations"][1]["modelName"], "Model B");
}

#[tokio::test]
async fn test_fallback_is_still_200() {
    let (status, body) = post_json(
        state(
            Ok(models()),
            Some(Err(ReasoningError::Timeout("60s".into()))),
        ),
        "/api/recommendations",
        r#"{"taskType":"translation"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_malformed_body_is_500() {
    let (status, body) = post_json(static_state(), "/api/recommendations", "{not json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to get recommendations");
    assert!(body["message"].as_str().unwrap().contains("invalid JSON"));
}

#[tokio::test]
async fn test_non_object_body_is_500() {
    let (status, body) = post_json(static_state(), "/api/recommendations", "[1, 2]").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}

// ========== Models ==========

#[tokio::test]
async fn test_list_models() {
    let (status, body) = get(static_state(), "/api/models").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 3);
    assert_eq!(body["models"][0]["displayName"], "Model A");
}

#[tokio::test]
async fn test_list_models_failure_is_502() {
    let failing = state(
        Err(ListingError::Api {
            status: 403,
            message: "AccessDenied".into(),
        }),
        None,
    );
    let (status, body) = get(failing, "/api/models").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to list models");
}
