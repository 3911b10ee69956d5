use llmsel_core::{
    AccuracyPriority, ModelSize, Recommendation, SpeedPriority, TaskType, UserRequirements,
};
use serde::{Deserialize, Serialize};

/// Versioned decision table used when no remote ranking is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    pub version: u32,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Appended to every reasoning string when the caller needs high data privacy.
    pub privacy_notice: String,
    /// Evaluated in order. The first matching rule supplies the leading picks.
    pub rules: Vec<Rule>,
    /// Generic entries appended until `max_results` is reached.
    #[serde(default)]
    pub fillers: Vec<ModelProfile>,
}

fn default_max_results() -> usize {
    3
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    #[serde(default)]
    pub when: Condition,
    pub picks: Vec<ModelProfile>,
}

/// Conjunction of requirement checks. Unset checks always pass; an empty
/// `tasks` list matches any task, including a missing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub tasks: Vec<TaskType>,
    pub accuracy: Option<AccuracyPriority>,
    pub speed: Option<SpeedPriority>,
    pub size: Option<ModelSize>,
}

impl Condition {
    pub fn matches(&self, req: &UserRequirements) -> bool {
        let task_ok = self.tasks.is_empty()
            || req.task_type.is_some_and(|t| self.tasks.contains(&t));
        task_ok
            && self.accuracy.is_none_or(|a| req.accuracy_priority == Some(a))
            && self.speed.is_none_or(|s| req.speed_priority == Some(s))
            && self.size.is_none_or(|s| req.model_size == Some(s))
    }

    pub fn is_catch_all(&self) -> bool {
        *self == Condition::default()
    }
}

/// Pre-authored recommendation for one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub model_name: String,
    pub score: f64,
    pub reasoning: String,
    #[serde(default)]
    pub context_window: Option<String>,
    #[serde(default)]
    pub cost_per_1m: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ModelProfile {
    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            model_name: self.model_name.clone(),
            score: self.score,
            reasoning: self.reasoning.clone(),
            context_window: self.context_window.clone(),
            cost_per_1m: self.cost_per_1m,
            monthly_cost: None,
            tags: self.tags.clone(),
        }
    }
}
