//! Enumerated value completions

use crate::rank::{rank, FuzzyScorer};
use crate::types::{CompletionItem, CompletionKind};
use unitkb::Setting;

/// Complete the literal values of an enumerated setting.
///
/// Free-form settings produce nothing. Choices come back verbatim unless a
/// `filter` prefix is given.
pub fn complete_values(
    setting: &Setting,
    scorer: &dyn FuzzyScorer,
    filter: Option<&str>,
) -> Vec<CompletionItem> {
    let choices: Vec<&String> = setting.choices.iter().collect();
    let choices = match filter {
        Some(prefix) => rank(choices, prefix, |c| c.as_str(), scorer),
        None => choices,
    };

    choices
        .into_iter()
        .map(|choice| {
            CompletionItem::new(choice, CompletionKind::Value)
                .with_detail(format!("{} value", setting.name))
        })
        .collect()
}
