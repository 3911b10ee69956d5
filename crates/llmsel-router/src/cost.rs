//! Monthly cost estimates.

use llmsel_core::{MonthlyUsage, Recommendation};

/// Millions of tokens per month assumed for a usage tier. Custom or missing → 1.
pub fn usage_multiplier(usage: Option<&MonthlyUsage>) -> f64 {
    match usage {
        Some(MonthlyUsage::Light) => 1.0,
        Some(MonthlyUsage::Medium) => 10.0,
        Some(MonthlyUsage::Heavy) => 100.0,
        Some(MonthlyUsage::Enterprise) => 1000.0,
        Some(MonthlyUsage::Custom(_)) | None => 1.0,
    }
}

/// Fill `monthly_cost` wherever a per-million price is known.
pub fn annotate(
    mut recommendations: Vec<Recommendation>,
    usage: Option<&MonthlyUsage>,
) -> Vec<Recommendation> {
    let multiplier = usage_multiplier(usage);
    for rec in &mut recommendations {
        rec.monthly_cost = rec.cost_per_1m.map(|cost| cost * multiplier);
    }
    recommendations
}
