//! Selector configuration: TOML file first, environment variables on top.

use crate::error::{Result, SelectorError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const BEDROCK_CAPABILITY_KEYWORD: &str = "@capability:bedrock_console";
pub const HUGGINGFACE_FRAMEWORK_KEYWORD: &str = "@framework:huggingface";
const CACHE_FILE_NAME: &str = "models-cache.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub catalog: CatalogConfig,
    pub reasoning: ReasoningConfig,
    pub server: ServerConfig,
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Listing API base URL. Derived from `region` when unset.
    pub endpoint: Option<String>,
    pub region: String,
    pub hub_name: String,
    pub content_type: String,
    pub page_size: u32,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub page_delay_ms: u64,
    pub cache_path: PathBuf,
    pub cache_ttl_secs: u64,
    /// Every keyword must be present for an entry to survive filtering.
    pub required_keywords: Vec<String>,
    pub bearer_token: Option<String>,
    /// Per-request limit for listing calls.
    pub timeout_secs: u64,
    /// Serve the built-in model list instead of calling the listing API.
    pub offline: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    pub enabled: bool,
    /// Runtime API base URL. Derived from `region` when unset.
    pub endpoint: Option<String>,
    pub region: String,
    pub model_id: String,
    pub anthropic_version: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub bearer_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// TOML rule table replacing the built-in one.
    pub table_path: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: DEFAULT_REGION.into(),
            hub_name: "SageMakerPublicHub".into(),
            content_type: "Model".into(),
            page_size: 50,
            max_retries: 5,
            initial_backoff_ms: 1000,
            page_delay_ms: 100,
            cache_path: default_cache_path(),
            cache_ttl_secs: 24 * 60 * 60,
            required_keywords: vec![
                BEDROCK_CAPABILITY_KEYWORD.into(),
                HUGGINGFACE_FRAMEWORK_KEYWORD.into(),
            ],
            bearer_token: None,
            timeout_secs: 30,
            offline: false,
        }
    }
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: None,
            region: DEFAULT_REGION.into(),
            model_id: "us.anthropic.claude-3-5-sonnet-20241022-v2:0".into(),
            anthropic_version: "bedrock-2023-05-31".into(),
            max_tokens: 4000,
            timeout_secs: 60,
            bearer_token: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

impl CatalogConfig {
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://api.sagemaker.{}.amazonaws.com", self.region))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ReasoningConfig {
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://bedrock-runtime.{}.amazonaws.com", self.region))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `<platform cache dir>/llmsel/models-cache.json`, or the bare file name when
/// the platform has no cache directory.
pub fn default_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("llmsel").join(CACHE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CACHE_FILE_NAME))
}

impl SelectorConfig {
    /// Load from an optional TOML file, then apply process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path).map_err(|e| {
                    SelectorError::Config(format!("read {}: {e}", path.display()))
                })?;
                Self::from_toml_str(&contents)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| SelectorError::Config(e.to_string()))
    }

    /// Overlay environment-style settings. `lookup` returns the value for a key.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(region) = non_empty("AWS_REGION") {
            self.catalog.region = region.clone();
            self.reasoning.region = region;
        }
        if let Some(token) = non_empty("AWS_BEARER_TOKEN_BEDROCK") {
            self.reasoning.bearer_token = Some(token);
        }
        if let Some(token) = non_empty("LLMSEL_CATALOG_TOKEN") {
            self.catalog.bearer_token = Some(token);
        }
        if let Some(path) = non_empty("LLMSEL_CACHE_PATH") {
            self.catalog.cache_path = PathBuf::from(path);
        }
        if let Some(url) = non_empty("LLMSEL_CATALOG_ENDPOINT") {
            self.catalog.endpoint = Some(url);
        }
        if let Some(url) = non_empty("LLMSEL_REASONING_ENDPOINT") {
            self.reasoning.endpoint = Some(url);
        }
        if non_empty("LLMSEL_DISABLE_REASONING").is_some_and(|v| is_truthy(&v)) {
            self.reasoning.enabled = false;
        }
        if non_empty("LLMSEL_CATALOG_OFFLINE").is_some_and(|v| is_truthy(&v)) {
            self.catalog.offline = true;
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
