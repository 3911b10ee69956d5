//! Deterministic scoring against a [`RuleTable`].

use crate::config::DEFAULT_RULES;
use crate::types::RuleTable;
use llmsel_core::{DataPrivacy, Recommendation, UserRequirements};
use tracing::debug;

/// Pure function of the requirements: no I/O, no failure mode.
#[derive(Debug, Clone)]
pub struct RuleBasedScorer {
    table: RuleTable,
}

impl Default for RuleBasedScorer {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.clone())
    }
}

impl RuleBasedScorer {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Picks of the first matching rule, topped up with fillers, in rule order.
    /// Scores are not compared across entries.
    pub fn score(&self, req: &UserRequirements) -> Vec<Recommendation> {
        let limit = self.table.max_results;
        let mut results: Vec<Recommendation> = Vec::with_capacity(limit);

        if let Some(rule) = self.table.rules.iter().find(|r| r.when.matches(req)) {
            debug!(rule = %rule.name, "rule matched");
            results.extend(rule.picks.iter().map(|p| p.to_recommendation()));
        }

        for filler in &self.table.fillers {
            if results.len() >= limit {
                break;
            }
            if results.iter().any(|r| r.model_name == filler.model_name) {
                continue;
            }
            results.push(filler.to_recommendation());
        }

        results.truncate(limit);

        if req.data_privacy == Some(DataPrivacy::High) {
            for rec in &mut results {
                rec.reasoning = format!("{} {}", rec.reasoning, self.table.privacy_notice);
            }
        }

        results
    }
}
