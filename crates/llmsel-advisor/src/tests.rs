use crate::*;
use async_trait::async_trait;
use llmsel_catalog::{CatalogSource, ListingError};
use llmsel_core::{
    CatalogEntry, MonthlyUsage, Recommendation, RecommendationSource, SelectorConfig, TaskType,
    UserRequirements,
};
use llmsel_reasoning::{Reasoner, ReasoningError};
use llmsel_router::RuleBasedScorer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct StaticCatalog(Result<Vec<CatalogEntry>, ListingError>);

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_models(&self) -> Result<Vec<CatalogEntry>, ListingError> {
        self.0.clone()
    }
}

struct FixedReasoner {
    result: Result<Vec<Recommendation>, ReasoningError>,
    calls: AtomicUsize,
}

impl FixedReasoner {
    fn new(result: Result<Vec<Recommendation>, ReasoningError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Reasoner for FixedReasoner {
    async fn rank(
        &self,
        _requirements: &UserRequirements,
        _catalog: &[CatalogEntry],
    ) -> Result<Vec<Recommendation>, ReasoningError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

fn catalog() -> Arc<StaticCatalog> {
    Arc::new(StaticCatalog(Ok(vec![
        CatalogEntry::new("a").with_display_name("Model A"),
        CatalogEntry::new("b").with_display_name("Model B"),
        CatalogEntry::new("c").with_display_name("Model C"),
    ])))
}

fn remote_picks() -> Vec<Recommendation> {
    vec![
        Recommendation::new("Model A", 93.0, "best").with_cost_per_1m(2.0),
        Recommendation::new("Model B", 85.0, "good"),
        Recommendation::new("Model C", 70.0, "ok").with_cost_per_1m(0.5),
    ]
}

fn advisor(
    catalog: Arc<StaticCatalog>,
    reasoner: Option<Arc<FixedReasoner>>,
) -> Advisor {
    Advisor::new(
        catalog,
        reasoner.map(|r| r as Arc<dyn Reasoner>),
        RuleBasedScorer::default(),
    )
}

fn summarization() -> UserRequirements {
    UserRequirements::new()
        .with_task(TaskType::Summarization)
        .with_usage(MonthlyUsage::Medium)
}

// ========== Remote Path ==========

#[tokio::test]
async fn test_remote_ranking_used_and_annotated() {
    let reasoner = FixedReasoner::new(Ok(remote_picks()));
    let advice = advisor(catalog(), Some(reasoner.clone()))
        .recommend(&summarization())
        .await;

    assert_eq!(advice.source, RecommendationSource::Remote);
    assert_eq!(advice.recommendations[0].model_name, "Model A");
    assert_eq!(advice.recommendations[0].monthly_cost, Some(20.0));
    assert_eq!(advice.recommendations[1].monthly_cost, None);
    assert_eq!(advice.recommendations[2].monthly_cost, Some(5.0));
    assert_eq!(reasoner.calls.load(Ordering::SeqCst), 1);
}

// ========== Fallback ==========

#[tokio::test]
async fn test_reasoning_failure_falls_back() {
    let reasoner = FixedReasoner::new(Err(ReasoningError::Payload("prose".into())));
    let advice = advisor(catalog(), Some(reasoner)).recommend(&summarization()).await;

    assert_eq!(advice.source, RecommendationSource::Fallback);
    assert_eq!(advice.recommendations.len(), 3);
    assert_eq!(advice.recommendations[0].model_name, "BART Large CNN SamSum");
    assert!((advice.recommendations[0].monthly_cost.unwrap() - 12.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_catalog_failure_skips_reasoning() {
    let failing = Arc::new(StaticCatalog(Err(ListingError::RetriesExhausted {
        attempts: 6,
        last: "Rate exceeded".into(),
    })));
    let reasoner = FixedReasoner::new(Ok(remote_picks()));
    let advice = advisor(failing, Some(reasoner.clone()))
        .recommend(&UserRequirements::default())
        .await;

    assert_eq!(advice.source, RecommendationSource::Fallback);
    assert_eq!(advice.recommendations.len(), 3);
    assert_eq!(reasoner.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_catalog_skips_reasoning() {
    let empty = Arc::new(StaticCatalog(Ok(Vec::new())));
    let reasoner = FixedReasoner::new(Ok(remote_picks()));
    let advice = advisor(empty, Some(reasoner.clone()))
        .recommend(&UserRequirements::default())
        .await;

    assert_eq!(advice.source, RecommendationSource::Fallback);
    assert_eq!(reasoner.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_without_reasoner_is_static() {
    let advice = advisor(catalog(), None).recommend(&summarization()).await;
    assert_eq!(advice.source, RecommendationSource::Static);
    assert_eq!(advice.recommendations[0].model_name, "BART Large CNN SamSum");
}

#[tokio::test]
async fn test_into_response_envelope() {
    let response = advisor(catalog(), None)
        .recommend(&UserRequirements::default())
        .await
        .into_response();
    assert!(response.success);
    assert_eq!(response.source, Some(RecommendationSource::Static));
    assert_eq!(response.recommendations.len(), 3);
    assert!(response.error.is_none());
}

// ========== Wiring ==========

#[tokio::test]
async fn test_from_config_offline_static() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = SelectorConfig::default();
    config.catalog.offline = true;
    config.catalog.cache_path = dir.path().join("models-cache.json");
    config.reasoning.enabled = false;

    let advisor = Advisor::from_config(&config).unwrap();
    assert_eq!(advisor.catalog().fetch_models().await.unwrap().len(), 8);

    let advice = advisor
        .recommend(&UserRequirements::new().with_task(TaskType::CodeGeneration))
        .await;
    assert_eq!(advice.source, RecommendationSource::Static);
    assert_eq!(advice.recommendations[0].model_name, "Qwen 2.5 72B");
}

#[test]
fn test_from_config_bad_rule_table() {
    let mut config = SelectorConfig::default();
    config.reasoning.enabled = false;
    config.rules.table_path = Some("/nonexistent/rules.toml".into());
    assert!(Advisor::from_config(&config).is_err());
}
