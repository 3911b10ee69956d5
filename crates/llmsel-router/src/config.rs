//! Built-in rule table and loading of replacement tables.

use crate::types::*;
use llmsel_core::{AccuracyPriority, ModelSize, Result, SelectorError, SpeedPriority, TaskType};
use std::path::Path;
use tracing::info;

pub const DEFAULT_PRIVACY_NOTICE: &str = "Deployable inside your own AWS account and VPC, \
keeping prompts and outputs private for HIPAA, PCI and GDPR workloads.";

fn profile(
    model_name: &str,
    score: f64,
    reasoning: &str,
    context_window: &str,
    cost_per_1m: f64,
    tags: &[&str],
) -> ModelProfile {
    ModelProfile {
        model_name: model_name.into(),
        score,
        reasoning: reasoning.into(),
        context_window: Some(context_window.into()),
        cost_per_1m: Some(cost_per_1m),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn rule(name: &str, when: Condition, picks: Vec<ModelProfile>) -> Rule {
    Rule {
        name: name.into(),
        when,
        picks,
    }
}

fn tasks(tasks: &[TaskType]) -> Condition {
    Condition {
        tasks: tasks.to_vec(),
        ..Condition::default()
    }
}

/// Default rule table.
pub fn default_rule_table() -> RuleTable {
    let qwen_72b = |score, reasoning: &str, tags: &[&str]| {
        profile("Qwen 2.5 72B", score, reasoning, "128K", 8.00, tags)
    };

    RuleTable {
        version: 1,
        max_results: 3,
        privacy_notice: DEFAULT_PRIVACY_NOTICE.into(),
        rules: vec![
            rule(
                "text-small-fast",
                Condition {
                    size: Some(ModelSize::Small),
                    speed: Some(SpeedPriority::High),
                    ..tasks(&[TaskType::TextGeneration])
                },
                vec![profile(
                    "Phi 3.5 Mini",
                    92.0,
                    "Ultra-fast small model optimized for quick text generation",
                    "128K",
                    0.15,
                    &["Fast", "Small", "Efficient"],
                )],
            ),
            rule(
                "text-accurate",
                Condition {
                    accuracy: Some(AccuracyPriority::High),
                    ..tasks(&[TaskType::TextGeneration])
                },
                vec![qwen_72b(
                    95.0,
                    "Highest accuracy for complex text generation tasks",
                    &["Accurate", "Large", "Premium"],
                )],
            ),
            rule(
                "text-balanced",
                tasks(&[TaskType::TextGeneration]),
                vec![profile(
                    "Gemma 7B Instruct",
                    88.0,
                    "Balanced performance for general text generation",
                    "8K",
                    0.70,
                    &["Balanced", "Recommended"],
                )],
            ),
            rule(
                "code",
                tasks(&[TaskType::CodeGeneration]),
                vec![qwen_72b(
                    94.0,
                    "Excellent code generation with strong reasoning capabilities",
                    &["Code", "Large", "Accurate"],
                )],
            ),
            rule(
                "summarization",
                tasks(&[TaskType::Summarization]),
                vec![profile(
                    "BART Large CNN SamSum",
                    90.0,
                    "Specialized summarization model trained on conversation data",
                    "4K",
                    1.20,
                    &["Specialized", "Summarization"],
                )],
            ),
            rule(
                "general",
                Condition::default(),
                vec![profile(
                    "Gemma 7B Instruct",
                    85.0,
                    "Well-balanced model for general use cases",
                    "8K",
                    0.70,
                    &["Balanced", "Versatile"],
                )],
            ),
        ],
        fillers: vec![
            profile(
                "Mistral 7B OpenOrca",
                82.0,
                "High-quality instruction-following model with good performance",
                "32K",
                0.60,
                &["Balanced", "Instruct"],
            ),
            profile(
                "Qwen 2.5 14B",
                80.0,
                "Medium-sized model with strong capabilities across tasks",
                "32K",
                2.80,
                &["Balanced", "Efficient"],
            ),
        ],
    }
}

/// The default table instance.
pub static DEFAULT_RULES: std::sync::LazyLock<RuleTable> =
    std::sync::LazyLock::new(default_rule_table);

impl RuleTable {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: RuleTable = toml::from_str(contents)
            .map_err(|e| SelectorError::Config(format!("rule table: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SelectorError::Config(format!("read {}: {e}", path.display())))?;
        let table = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            version = table.version,
            rules = table.rules.len(),
            "rule table loaded"
        );
        Ok(table)
    }

    /// The built-in table, or the one at `path` when given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(DEFAULT_RULES.clone()),
        }
    }

    /// A usable table always yields at least one recommendation.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(SelectorError::Config("rule table: max_results must be at least 1".into()));
        }
        if let Some(empty) = self.rules.iter().find(|r| r.picks.is_empty()) {
            return Err(SelectorError::Config(format!(
                "rule table: rule `{}` has no picks",
                empty.name
            )));
        }
        let has_catch_all = self.rules.iter().any(|r| r.when.is_catch_all());
        if !has_catch_all && self.fillers.is_empty() {
            return Err(SelectorError::Config(
                "rule table: needs a catch-all rule or at least one filler".into(),
            ));
        }
        Ok(())
    }
}
