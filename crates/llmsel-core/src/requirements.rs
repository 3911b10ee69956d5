//! User requirements and the normalization step applied at the request boundary.
//!
//! Historical clients sent the same preferences under different field names
//! (`accuracy` vs `accuracyPriority`) and different value spellings (`code` vs
//! `code_generation`). [`UserRequirements::from_json`] folds all of them into one
//! canonical shape. Missing or unrecognized values become `None`, which the
//! scoring rules treat as "no preference".

use crate::error::{Result, SelectorError};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Declares a preference enum with its canonical wire label and accepted aliases.
macro_rules! preference {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant,)+
        }

        impl $name {
            /// Canonical wire label.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Parse a label or alias, case-insensitively.
            pub fn parse(raw: &str) -> Option<Self> {
                let key = raw.trim().to_ascii_lowercase();
                match key.as_str() {
                    $($label $(| $alias)* => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

preference!(
    /// Kind of work the model will do.
    TaskType {
        TextGeneration => "text_generation" | "generation" | "text-generation",
        CodeGeneration => "code_generation" | "code" | "code-generation",
        Summarization => "summarization" | "summarisation",
        Translation => "translation",
        QuestionAnswering => "question_answering" | "qa" | "question-answering",
        MultiModal => "multi_modal" | "multi-modal" | "multimodal",
    }
);

preference!(
    AccuracyPriority {
        High => "high",
        Medium => "medium",
        Basic => "basic" | "low",
    }
);

preference!(
    SpeedPriority {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
);

preference!(
    /// Data privacy and compliance level. `High` covers HIPAA, PCI and GDPR workloads.
    DataPrivacy {
        High => "high",
        Medium => "medium",
        Standard => "standard" | "low",
    }
);

preference!(
    ModelSize {
        Large => "large",
        Medium => "medium",
        Small => "small",
    }
);

preference!(
    ContextWindow {
        Any => "any",
        K4 => "4k",
        K8 => "8k",
        K32 => "32k",
        K128Plus => "128k+" | "128k",
    }
);

/// Expected monthly token volume.
///
/// The four tiers may also arrive as raw million-token counts (`"1"`, `"10"`,
/// `"100"`, `"1000"`). Anything else is kept verbatim as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MonthlyUsage {
    Light,
    Medium,
    Heavy,
    Enterprise,
    Custom(String),
}

impl MonthlyUsage {
    /// Returns `None` for empty input.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim();
        if key.is_empty() {
            return None;
        }
        let usage = match key.to_ascii_lowercase().as_str() {
            "light" | "1" => Self::Light,
            "medium" | "10" => Self::Medium,
            "heavy" | "100" => Self::Heavy,
            "enterprise" | "1000" => Self::Enterprise,
            _ => Self::Custom(key.to_string()),
        };
        Some(usage)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
            Self::Enterprise => "enterprise",
            Self::Custom(raw) => raw,
        }
    }
}

impl fmt::Display for MonthlyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MonthlyUsage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Canonical field names and the historical spellings accepted for each.
const TASK_TYPE: (&str, &[&str]) = ("taskType", &["task_type", "task"]);
const ACCURACY: (&str, &[&str]) = ("accuracyPriority", &["accuracy_priority", "accuracy"]);
const SPEED: (&str, &[&str]) = ("speedPriority", &["speed_priority", "speed"]);
const PRIVACY: (&str, &[&str]) = ("dataPrivacy", &["data_privacy", "privacy"]);
const MODEL_SIZE: (&str, &[&str]) = ("modelSize", &["model_size", "size"]);
const CONTEXT: (&str, &[&str]) = ("contextWindow", &["context_window", "context"]);
const USAGE: (&str, &[&str]) = ("monthlyUsage", &["monthly_usage", "usage"]);

/// Requirements submitted with one recommendation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequirements {
    pub task_type: Option<TaskType>,
    pub accuracy_priority: Option<AccuracyPriority>,
    pub speed_priority: Option<SpeedPriority>,
    pub data_privacy: Option<DataPrivacy>,
    pub model_size: Option<ModelSize>,
    pub context_window: Option<ContextWindow>,
    pub monthly_usage: Option<MonthlyUsage>,
}

impl UserRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(mut self, task: TaskType) -> Self {
        self.task_type = Some(task);
        self
    }

    pub fn with_accuracy(mut self, accuracy: AccuracyPriority) -> Self {
        self.accuracy_priority = Some(accuracy);
        self
    }

    pub fn with_speed(mut self, speed: SpeedPriority) -> Self {
        self.speed_priority = Some(speed);
        self
    }

    pub fn with_privacy(mut self, privacy: DataPrivacy) -> Self {
        self.data_privacy = Some(privacy);
        self
    }

    pub fn with_size(mut self, size: ModelSize) -> Self {
        self.model_size = Some(size);
        self
    }

    pub fn with_context(mut self, context: ContextWindow) -> Self {
        self.context_window = Some(context);
        self
    }

    pub fn with_usage(mut self, usage: MonthlyUsage) -> Self {
        self.monthly_usage = Some(usage);
        self
    }

    /// Parse and normalize a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| SelectorError::RequestShape(format!("invalid JSON body: {e}")))?;
        Self::from_json(&value)
    }

    /// Normalize an already-parsed JSON document.
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            SelectorError::RequestShape("requirements must be a JSON object".into())
        })?;

        Ok(Self {
            task_type: preference_field(obj, TASK_TYPE, TaskType::parse)?,
            accuracy_priority: preference_field(obj, ACCURACY, AccuracyPriority::parse)?,
            speed_priority: preference_field(obj, SPEED, SpeedPriority::parse)?,
            data_privacy: preference_field(obj, PRIVACY, DataPrivacy::parse)?,
            model_size: preference_field(obj, MODEL_SIZE, ModelSize::parse)?,
            context_window: preference_field(obj, CONTEXT, ContextWindow::parse)?,
            monthly_usage: raw_field(obj, USAGE, true)?
                .as_deref()
                .and_then(MonthlyUsage::parse),
        })
    }

    /// Value rendered for a field in human-readable output.
    pub fn describe<T: fmt::Display>(value: &Option<T>) -> String {
        match value {
            Some(v) => v.to_string(),
            None => "no preference".to_string(),
        }
    }
}

fn preference_field<T>(
    obj: &Map<String, Value>,
    names: (&str, &[&str]),
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    let Some(raw) = raw_field(obj, names, false)? else {
        return Ok(None);
    };
    let parsed = parse(&raw);
    if parsed.is_none() && !raw.trim().is_empty() {
        debug!(field = names.0, value = %raw, "unrecognized preference, treating as no preference");
    }
    Ok(parsed)
}

/// Look up a field by canonical name, then by alias. `null` counts as absent.
fn raw_field(
    obj: &Map<String, Value>,
    (canonical, aliases): (&str, &[&str]),
    allow_number: bool,
) -> Result<Option<String>> {
    let found = std::iter::once(canonical)
        .chain(aliases.iter().copied())
        .find_map(|key| obj.get(key));

    match found {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) if allow_number => Ok(Some(n.to_string())),
        Some(other) => Err(SelectorError::RequestShape(format!(
            "field `{canonical}` must be a string, got {other}"
        ))),
    }
}
