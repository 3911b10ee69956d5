//! Rule-based model scoring and cost annotation.

pub mod config;
pub mod cost;
pub mod scorer;
pub mod types;

pub use config::DEFAULT_RULES;
pub use cost::{annotate, usage_multiplier};
pub use scorer::RuleBasedScorer;
pub use types::*;
