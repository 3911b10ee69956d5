use llmsel_catalog::{CatalogFetcher, CatalogSource, HttpHubClient, ListingError};
use llmsel_core::{
    Recommendation, RecommendationResponse, RecommendationSource, Result, SelectorConfig,
    SelectorError, UserRequirements,
};
use llmsel_reasoning::{BedrockReasoner, Reasoner, ReasoningError};
use llmsel_router::{annotate, RuleBasedScorer, RuleTable};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Why the remote path was abandoned.
#[derive(Error, Debug)]
pub enum FallbackReason {
    #[error("catalog unavailable: {0}")]
    Catalog(#[from] ListingError),
    #[error("catalog is empty")]
    EmptyCatalog,
    #[error("ranking failed: {0}")]
    Reasoning(#[from] ReasoningError),
}

/// Ranked, cost-annotated recommendations plus their provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub recommendations: Vec<Recommendation>,
    pub source: RecommendationSource,
}

impl Advice {
    pub fn into_response(self) -> RecommendationResponse {
        RecommendationResponse::ok(self.recommendations, self.source)
    }
}

pub struct Advisor {
    catalog: Arc<dyn CatalogSource>,
    reasoner: Option<Arc<dyn Reasoner>>,
    scorer: RuleBasedScorer,
}

impl Advisor {
    /// Without a reasoner every answer is rule-based and tagged `static`.
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        reasoner: Option<Arc<dyn Reasoner>>,
        scorer: RuleBasedScorer,
    ) -> Self {
        Self {
            catalog,
            reasoner,
            scorer,
        }
    }

    /// Wire the HTTP clients, cache and rule table described by `config`.
    pub fn from_config(config: &SelectorConfig) -> Result<Self> {
        let catalog: Arc<dyn CatalogSource> = if config.catalog.offline {
            info!("using built-in model catalog");
            Arc::new(CatalogFetcher::offline(&config.catalog))
        } else {
            let client = HttpHubClient::from_config(&config.catalog)
                .map_err(|e| SelectorError::Config(e.to_string()))?;
            Arc::new(CatalogFetcher::new(client, &config.catalog))
        };

        let reasoner: Option<Arc<dyn Reasoner>> = if config.reasoning.enabled {
            let reasoner = BedrockReasoner::from_config(&config.reasoning)
                .map_err(|e| SelectorError::Config(e.to_string()))?;
            Some(Arc::new(reasoner))
        } else {
            info!("remote reasoning disabled");
            None
        };

        let table = RuleTable::load_or_default(config.rules.table_path.as_deref())?;
        Ok(Self::new(catalog, reasoner, RuleBasedScorer::new(table)))
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogSource> {
        &self.catalog
    }

    pub fn scorer(&self) -> &RuleBasedScorer {
        &self.scorer
    }

    /// Never fails: any remote error degrades to the rule table.
    pub async fn recommend(&self, req: &UserRequirements) -> Advice {
        let (recommendations, source) = match &self.reasoner {
            None => (self.scorer.score(req), RecommendationSource::Static),
            Some(reasoner) => match self.rank_remotely(reasoner.as_ref(), req).await {
                Ok(recs) => (recs, RecommendationSource::Remote),
                Err(reason) => {
                    warn!(reason = %reason, "remote ranking unavailable, using rule table");
                    (self.scorer.score(req), RecommendationSource::Fallback)
                }
            },
        };

        let recommendations = annotate(recommendations, req.monthly_usage.as_ref());
        info!(source = %source, count = recommendations.len(), "recommendations ready");
        Advice {
            recommendations,
            source,
        }
    }

    async fn rank_remotely(
        &self,
        reasoner: &dyn Reasoner,
        req: &UserRequirements,
    ) -> std::result::Result<Vec<Recommendation>, FallbackReason> {
        let catalog = self.catalog.fetch_models().await?;
        if catalog.is_empty() {
            return Err(FallbackReason::EmptyCatalog);
        }
        Ok(reasoner.rank(req, &catalog).await?)
    }
}
