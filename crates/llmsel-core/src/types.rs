use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// One model listed by the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Capability and framework tags such as `@capability:bedrock_console`.
    #[serde(default)]
    pub search_keywords: BTreeSet<String>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            description: None,
            search_keywords: BTreeSet::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Display name, falling back to the stable id.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.search_keywords.contains(keyword)
    }
}

/// A single suggested model.
///
/// `score` is only meaningful for ordering within one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub model_name: String,
    pub score: f64,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window: Option<String>,
    #[serde(rename = "costPer1M", default, skip_serializing_if = "Option::is_none")]
    pub cost_per_1m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_cost: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Recommendation {
    pub fn new(model_name: impl Into<String>, score: f64, reasoning: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            score,
            reasoning: reasoning.into(),
            context_window: None,
            cost_per_1m: None,
            monthly_cost: None,
            tags: Vec::new(),
        }
    }

    pub fn with_context_window(mut self, window: impl Into<String>) -> Self {
        self.context_window = Some(window.into());
        self
    }

    pub fn with_cost_per_1m(mut self, cost: f64) -> Self {
        self.cost_per_1m = Some(cost);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// On-disk snapshot of the filtered catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Creation time in Unix milliseconds.
    pub timestamp: i64,
    pub models: Vec<CatalogEntry>,
}

impl CacheRecord {
    pub fn new(models: Vec<CatalogEntry>) -> Self {
        Self::at(Utc::now().timestamp_millis(), models)
    }

    pub fn at(timestamp: i64, models: Vec<CatalogEntry>) -> Self {
        Self { timestamp, models }
    }

    /// A record is valid while `now - timestamp < ttl`. Records from the future are stale.
    pub fn is_fresh_at(&self, now_ms: i64, ttl: Duration) -> bool {
        let age = now_ms - self.timestamp;
        age >= 0 && (age as u128) < ttl.as_millis()
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.is_fresh_at(Utc::now().timestamp_millis(), ttl)
    }
}

/// Where a recommendation list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// Ranked by the hosted reasoning model.
    Remote,
    /// Rule-based, after a remote attempt failed.
    Fallback,
    /// Rule-based, remote reasoning disabled.
    Static,
}

impl fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationSource::Remote => write!(f, "remote"),
            RecommendationSource::Fallback => write!(f, "fallback"),
            RecommendationSource::Static => write!(f, "static"),
        }
    }
}

/// Envelope returned to callers of the recommendation API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub success: bool,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RecommendationSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecommendationResponse {
    pub fn ok(recommendations: Vec<Recommendation>, source: RecommendationSource) -> Self {
        Self {
            success: true,
            recommendations,
            source: Some(source),
            error: None,
            message: None,
        }
    }

    pub fn failure(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            recommendations: Vec::new(),
            source: None,
            error: Some(error.into()),
            message: Some(message.into()),
        }
    }
}
