//! Built-in catalog of Bedrock-capable Hugging Face models, for offline use.

use crate::client::{HubContentPage, HubListing, ListHubContentsRequest};
use crate::error::ListingError;
use crate::fetcher::CatalogFetcher;
use async_trait::async_trait;
use llmsel_core::config::{
    CatalogConfig, BEDROCK_CAPABILITY_KEYWORD, HUGGINGFACE_FRAMEWORK_KEYWORD,
};
use llmsel_core::CatalogEntry;

const KNOWN_MODELS: &[(&str, &str, &str)] = &[
    (
        "huggingface-llm-phi-3-5-mini-instruct",
        "Phi 3.5 Mini Instruct",
        "Microsoft Phi 3.5 Mini instruction-tuned model",
    ),
    (
        "huggingface-llm-gemma-7b-instruct",
        "Gemma 7B Instruct",
        "Google Gemma 7B instruction-tuned model",
    ),
    (
        "huggingface-llm-qwen2-5-72b-instruct",
        "Qwen 2.5 72B Instruct",
        "Alibaba Qwen 2.5 72B instruction-tuned model",
    ),
    (
        "huggingface-llm-mistral-7b-openorca",
        "Mistral 7B OpenOrca",
        "Mistral 7B fine-tuned on OpenOrca dataset",
    ),
    (
        "huggingface-llm-bart-large-cnn-samsum",
        "BART Large CNN SamSum",
        "BART Large fine-tuned for summarization",
    ),
    (
        "huggingface-llm-qwen2-5-14b-instruct",
        "Qwen 2.5 14B Instruct",
        "Alibaba Qwen 2.5 14B instruction-tuned model",
    ),
    (
        "huggingface-llm-yi-1-5-34b-chat",
        "Yi 1.5 34B Chat",
        "01.AI Yi 1.5 34B chat model",
    ),
    (
        "huggingface-llm-whisper-large-v3-turbo",
        "Whisper Large V3 Turbo",
        "OpenAI Whisper Large V3 Turbo for speech recognition",
    ),
];

pub fn known_models() -> Vec<CatalogEntry> {
    KNOWN_MODELS
        .iter()
        .map(|(id, name, description)| {
            CatalogEntry::new(*id)
                .with_display_name(*name)
                .with_description(*description)
                .with_keywords([HUGGINGFACE_FRAMEWORK_KEYWORD, BEDROCK_CAPABILITY_KEYWORD])
        })
        .collect()
}

/// Serves [`known_models`] as a single listing page.
#[derive(Debug, Clone, Default)]
pub struct KnownModelsListing;

#[async_trait]
impl HubListing for KnownModelsListing {
    async fn list_page(
        &self,
        request: &ListHubContentsRequest,
    ) -> Result<HubContentPage, ListingError> {
        let entries = if request.next_token.is_some() {
            Vec::new()
        } else {
            known_models()
        };
        Ok(HubContentPage {
            entries,
            next_token: None,
        })
    }
}

impl CatalogFetcher<KnownModelsListing> {
    /// Fetcher over the built-in list. It never touches the on-disk cache,
    /// which only ever holds a listing API result.
    pub fn offline(config: &CatalogConfig) -> Self {
        CatalogFetcher::new(KnownModelsListing, config).with_cache(None)
    }
}
