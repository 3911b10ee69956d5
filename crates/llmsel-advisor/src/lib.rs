//! Orchestrator: remote ranking first, rule-based scoring when that fails.

pub mod advisor;

pub use advisor::{Advice, Advisor, FallbackReason};

#[cfg(test)]
mod tests;
