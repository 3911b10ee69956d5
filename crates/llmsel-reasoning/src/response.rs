//! Two-stage decoding of an invoke-model response.
//!
//! The HTTP body is a messages envelope whose first text block holds the
//! generated answer, which is itself a JSON document.

use crate::error::ReasoningError;
use llmsel_core::{CatalogEntry, Recommendation};
use serde::Deserialize;
use std::collections::HashSet;

pub const EXPECTED_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Deserialize)]
struct InvokeEnvelope {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RankedPayload {
    recommendations: Vec<Recommendation>,
}

/// Extract the generated text from the envelope.
pub fn generated_text(body: &[u8]) -> Result<String, ReasoningError> {
    let envelope: InvokeEnvelope =
        serde_json::from_slice(body).map_err(|e| ReasoningError::Envelope(e.to_string()))?;
    envelope
        .content
        .into_iter()
        .find_map(|block| block.text)
        .ok_or_else(|| ReasoningError::Envelope("no text content block".into()))
}

/// Parse the generated text and check it against the catalog.
///
/// Surrounding whitespace is trimmed; nothing else is repaired. Any
/// `monthlyCost` the model invents is dropped.
pub fn parse_recommendations(
    text: &str,
    catalog: &[CatalogEntry],
) -> Result<Vec<Recommendation>, ReasoningError> {
    let payload: RankedPayload = serde_json::from_str(text.trim())
        .map_err(|e| ReasoningError::Payload(e.to_string()))?;
    let mut recommendations = payload.recommendations;

    if recommendations.len() != EXPECTED_RECOMMENDATIONS {
        return Err(ReasoningError::Shape(format!(
            "expected {EXPECTED_RECOMMENDATIONS} recommendations, got {}",
            recommendations.len()
        )));
    }

    let mut seen = HashSet::new();
    for rec in &mut recommendations {
        if rec.model_name.trim().is_empty() {
            return Err(ReasoningError::Shape("empty modelName".into()));
        }
        if !seen.insert(rec.model_name.clone()) {
            return Err(ReasoningError::Shape(format!(
                "`{}` recommended more than once",
                rec.model_name
            )));
        }
        if !rec.score.is_finite() {
            return Err(ReasoningError::Shape(format!(
                "non-finite score for {}",
                rec.model_name
            )));
        }
        let known = catalog
            .iter()
            .any(|e| e.label() == rec.model_name || e.id == rec.model_name);
        if !known {
            return Err(ReasoningError::Shape(format!(
                "`{}` is not in the catalog",
                rec.model_name
            )));
        }
        rec.monthly_cost = None;
    }

    Ok(recommendations)
}
