use llmsel_advisor::Advice;
use llmsel_core::{CatalogEntry, RecommendationSource};
use std::fmt::Write;

pub fn render_advice(advice: &Advice) -> String {
    let mut out = String::new();
    let origin = match advice.source {
        RecommendationSource::Remote => "ranked by the reasoning model",
        RecommendationSource::Fallback => "rule-based, remote ranking unavailable",
        RecommendationSource::Static => "rule-based",
    };
    let _ = writeln!(
        out,
        "Top {} model recommendations ({origin})\n",
        advice.recommendations.len()
    );

    for (i, rec) in advice.recommendations.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, rec.model_name);
        let _ = writeln!(out, "   Score: {}/100", rec.score);
        if let Some(window) = &rec.context_window {
            let _ = writeln!(out, "   Context window: {window}");
        }
        if let Some(cost) = rec.cost_per_1m {
            let _ = writeln!(out, "   Cost per 1M tokens: ${cost:.2}");
        }
        if let Some(monthly) = rec.monthly_cost {
            let _ = writeln!(out, "   Estimated monthly cost: ${monthly:.2}");
        }
        if !rec.tags.is_empty() {
            let _ = writeln!(out, "   Tags: {}", rec.tags.join(", "));
        }
        let _ = writeln!(out, "   Reasoning: {}\n", rec.reasoning);
    }
    out
}

pub fn render_models(models: &[CatalogEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} deployable models\n", models.len());
    for model in models {
        match &model.description {
            Some(description) => {
                let _ = writeln!(out, "- {} ({}): {description}", model.label(), model.id);
            }
            None => {
                let _ = writeln!(out, "- {} ({})", model.label(), model.id);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use llmsel_core::Recommendation;

    #[test]
    fn test_render_advice() {
        let mut rec = Recommendation::new("BART Large CNN SamSum", 90.0, "Summaries")
            .with_context_window("4K")
            .with_cost_per_1m(1.2)
            .with_tags(["Specialized"]);
        rec.monthly_cost = Some(12.0);
        let advice = Advice {
            recommendations: vec![rec],
            source: RecommendationSource::Fallback,
        };
        let text = render_advice(&advice);
        assert!(text.starts_with("Top 1 model recommendations (rule-based, remote ranking unavailable)"));
        assert!(text.contains("1. BART Large CNN SamSum\n"));
        assert!(text.contains("Score: 90/100"));
        assert!(text.contains("Cost per 1M tokens: $1.20"));
        assert!(text.contains("Estimated monthly cost: $12.00"));
        assert!(text.contains("Tags: Specialized"));
    }

    #[test]
    fn test_render_models() {
        let models = vec![
            CatalogEntry::new("hf-a").with_display_name("A").with_description("first"),
            CatalogEntry::new("hf-b"),
        ];
        let text = render_models(&models);
        assert!(text.contains("2 deployable models"));
        assert!(text.contains("- A (hf-a): first\n"));
        assert!(text.contains("- hf-b (hf-b)\n"));
    }
}
