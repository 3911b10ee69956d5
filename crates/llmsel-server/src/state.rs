//! Application state shared across all handlers.

use llmsel_advisor::Advisor;
use llmsel_core::{Result, SelectorConfig};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<Advisor>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(advisor: Advisor) -> Self {
        Self {
            advisor: Arc::new(advisor),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn from_config(config: &SelectorConfig) -> Result<Self> {
        Ok(Self::new(Advisor::from_config(config)?))
    }
}
