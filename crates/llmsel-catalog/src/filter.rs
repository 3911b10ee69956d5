use llmsel_core::CatalogEntry;
use tracing::info;

/// Keep entries carrying every required keyword.
///
/// Keywords are applied one at a time so the log shows how many entries
/// survive each stage.
pub fn filter_deployable(entries: Vec<CatalogEntry>, required: &[String]) -> Vec<CatalogEntry> {
    info!(count = entries.len(), "models listed in total");
    required.iter().fold(entries, |remaining, keyword| {
        let kept: Vec<CatalogEntry> = remaining
            .into_iter()
            .filter(|e| e.has_keyword(keyword))
            .collect();
        info!(count = kept.len(), keyword = %keyword, "models after keyword filter");
        kept
    })
}
