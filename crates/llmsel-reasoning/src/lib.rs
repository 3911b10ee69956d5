//! Remote Reasoning Client: asks a hosted model to rank the catalog.

pub mod client;
pub mod error;
pub mod prompt;
pub mod response;

pub use client::{BedrockReasoner, Reasoner};
pub use error::ReasoningError;
pub use prompt::build_prompt;
pub use response::parse_recommendations;
