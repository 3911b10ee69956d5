use axum::body::Body;
use axum::http::Request;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use llmsel_advisor::Advisor;
use llmsel_catalog::{CatalogFetcher, KnownModelsListing};
use llmsel_core::config::CatalogConfig;
use llmsel_router::RuleBasedScorer;
use llmsel_server::{app_with_state, state::AppState};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tower::ServiceExt;

fn static_state() -> AppState {
    let catalog = CatalogFetcher::new(KnownModelsListing, &CatalogConfig::default()).with_cache(None);
    AppState::new(Advisor::new(Arc::new(catalog), None, RuleBasedScorer::default()))
}

fn bench_http_health(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let state = static_state();
    c.bench_function("http_health_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                for _ in 0..1000 {
                    let app = app_with_state(state.clone());
                    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
                    let resp = app.oneshot(req).await.unwrap();
                    black_box(resp.status());
                }
            })
        })
    });
}

fn bench_http_recommendations(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let state = static_state();
    let bodies = [
        r#"{"taskType":"summarization","speedPriority":"low","monthlyUsage":"medium"}"#,
        r#"{"taskType":"text_generation","modelSize":"small","speedPriority":"high"}"#,
        r#"{"task":"code","accuracy":"high","privacy":"high","usage":"heavy"}"#,
        r#"{}"#,
    ];

    c.bench_function("http_recommendations_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                for i in 0..1000 {
                    let app = app_with_state(state.clone());
                    let req = Request::builder()
                        .method("POST")
                        .uri("/api/recommendations")
                        .header("content-type", "application/json")
                        .body(Body::from(bodies[i % bodies.len()]))
                        .unwrap();
                    let resp = app.oneshot(req).await.unwrap();
                    black_box(resp.status());
                }
            })
        })
    });
}

criterion_group!(benches, bench_http_health, bench_http_recommendations);
criterion_main!(benches);
