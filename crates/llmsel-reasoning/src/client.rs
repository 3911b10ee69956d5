//! Invoke-model client.

use crate::error::ReasoningError;
use crate::prompt::build_prompt;
use crate::response::{generated_text, parse_recommendations};
use async_trait::async_trait;
use llmsel_core::config::ReasoningConfig;
use llmsel_core::{CatalogEntry, Recommendation, UserRequirements};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Ranks catalog entries against requirements.
#[async_trait]
pub trait Reasoner: Send + Sync {
    async fn rank(
        &self,
        requirements: &UserRequirements,
        catalog: &[CatalogEntry],
    ) -> Result<Vec<Recommendation>, ReasoningError>;
}

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    anthropic_version: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Bedrock runtime `InvokeModel` over HTTP, one attempt per call.
pub struct BedrockReasoner {
    http: reqwest::Client,
    endpoint: String,
    model_id: String,
    anthropic_version: String,
    max_tokens: u32,
    bearer_token: Option<String>,
}

impl BedrockReasoner {
    /// `http` should carry a request timeout; [`BedrockReasoner::from_config`] sets one.
    pub fn new(http: reqwest::Client, config: &ReasoningConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint(),
            model_id: config.model_id.clone(),
            anthropic_version: config.anthropic_version.clone(),
            max_tokens: config.max_tokens,
            bearer_token: config.bearer_token.clone(),
        }
    }

    pub fn from_config(config: &ReasoningConfig) -> Result<Self, ReasoningError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ReasoningError::Transport(e.to_string()))?;
        Ok(Self::new(http, config))
    }

    pub fn invoke_url(&self) -> String {
        format!(
            "{}/model/{}/invoke",
            self.endpoint.trim_end_matches('/'),
            self.model_id
        )
    }

    /// Send one prompt and return the generated text.
    pub async fn invoke(&self, prompt: &str) -> Result<String, ReasoningError> {
        let body = InvokeRequest {
            anthropic_version: &self.anthropic_version,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let mut builder = self
            .http
            .post(self.invoke_url())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&body);
        if let Some(token) = &self.bearer_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(
            status = status.as_u16(),
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "invoke response"
        );

        if !status.is_success() {
            return Err(ReasoningError::Status {
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }
        generated_text(&bytes)
    }
}

#[async_trait]
impl Reasoner for BedrockReasoner {
    async fn rank(
        &self,
        requirements: &UserRequirements,
        catalog: &[CatalogEntry],
    ) -> Result<Vec<Recommendation>, ReasoningError> {
        if catalog.is_empty() {
            return Err(ReasoningError::Shape("no candidate models to rank".into()));
        }
        let prompt = build_prompt(requirements, catalog);
        info!(model = %self.model_id, candidates = catalog.len(), "requesting ranking");
        let text = self.invoke(&prompt).await?;
        parse_recommendations(&text, catalog)
    }
}

fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("Message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
}
