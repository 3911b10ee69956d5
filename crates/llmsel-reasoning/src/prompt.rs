//! Ranking prompt.

use llmsel_core::{CatalogEntry, UserRequirements};
use std::fmt::Write;

const RESPONSE_FORMAT: &str = r#"{
  "recommendations": [
    {
      "modelName": "exact model name from the list",
      "score": 95,
      "reasoning": "detailed explanation of why this model fits the requirements",
      "contextWindow": "estimated context window (e.g., 4K, 8K, 32K, 128K)",
      "costPer1M": 2.50,
      "tags": ["tag1", "tag2", "tag3"]
    }
  ]
}"#;

const FACTORS: &[&str] = &[
    "Model architecture suitability for the task type",
    "Performance vs speed trade-offs based on priorities",
    "Model size alignment with preferences",
    "Security and privacy capabilities",
    "Cost efficiency for usage patterns",
    "Context window capabilities",
];

/// Render the requirements and a 1-indexed `name - description` list of every
/// candidate. The model is told to answer with JSON only.
pub fn build_prompt(req: &UserRequirements, catalog: &[CatalogEntry]) -> String {
    let mut out = String::with_capacity(2048 + catalog.len() * 96);
    out.push_str(
        "You are an AI model selection expert. Given the user requirements and available \
         Hugging Face models on Amazon Bedrock, analyze and recommend the top 3 models that \
         best match their needs.\n\n",
    );

    out.push_str("User Requirements:\n");
    let fields = [
        ("Task Type", UserRequirements::describe(&req.task_type)),
        ("Accuracy Priority", UserRequirements::describe(&req.accuracy_priority)),
        ("Speed Priority", UserRequirements::describe(&req.speed_priority)),
        ("Data Privacy & Security", UserRequirements::describe(&req.data_privacy)),
        ("Model Size Preference", UserRequirements::describe(&req.model_size)),
        ("Context Window", UserRequirements::describe(&req.context_window)),
        ("Expected Monthly Usage", UserRequirements::describe(&req.monthly_usage)),
    ];
    for (label, value) in fields {
        let _ = writeln!(out, "- {label}: {value}");
    }

    out.push_str("\nAvailable Models:\n");
    for (i, entry) in catalog.iter().enumerate() {
        let description = entry.description.as_deref().unwrap_or("No description");
        let _ = writeln!(out, "{}. {} - {}", i + 1, entry.label(), description);
    }

    out.push_str(
        "\nPlease analyze each model against the requirements and provide exactly 3 \
         recommendations in the following JSON format:\n",
    );
    out.push_str(RESPONSE_FORMAT);
    out.push_str("\n\nConsider factors like:\n");
    for factor in FACTORS {
        let _ = writeln!(out, "- {factor}");
    }
    out.push_str("\nProvide only valid JSON response, no additional text.");
    out
}
