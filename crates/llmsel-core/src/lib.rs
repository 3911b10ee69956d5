//! Shared data model, configuration, and errors for the LLM selector.

pub mod config;
pub mod error;
pub mod requirements;
pub mod types;

pub use config::SelectorConfig;
pub use error::{Result, SelectorError};
pub use requirements::{
    AccuracyPriority, ContextWindow, DataPrivacy, ModelSize, MonthlyUsage, SpeedPriority,
    TaskType, UserRequirements,
};
pub use types::{
    CacheRecord, CatalogEntry, Recommendation, RecommendationResponse, RecommendationSource,
};
