//! Key name completions

use crate::rank::{rank, FuzzyScorer};
use crate::types::{CompletionItem, CompletionKind};
use unitkb::{Setting, SettingsIndex};

/// Complete key names of the enclosing section. Accepting an item inserts
/// `Key=` so the cursor lands on the value.
pub fn complete_settings(
    settings: &SettingsIndex,
    scorer: &dyn FuzzyScorer,
    prefix: &str,
) -> Vec<CompletionItem> {
    let candidates: Vec<&Setting> = settings.iter().collect();

    rank(candidates, prefix, |s| s.name.as_str(), scorer)
        .into_iter()
        .map(|setting| {
            CompletionItem::new(&setting.name, CompletionKind::Setting)
                .with_insert_text(format!("{}=", setting.name))
                .with_detail(CompletionKind::Setting.label())
                .with_documentation(&setting.doc)
        })
        .collect()
}
