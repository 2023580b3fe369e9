//! Section name completions

use crate::rank::{rank, FuzzyScorer};
use crate::types::{CompletionItem, CompletionKind};
use unitkb::{KnowledgeBase, Section};

/// Complete section names after `[`.
///
/// With `file_name`, only sections whose file pattern accepts it are offered.
pub fn complete_sections(
    kb: &KnowledgeBase,
    scorer: &dyn FuzzyScorer,
    prefix: &str,
    file_name: Option<&str>,
) -> Vec<CompletionItem> {
    let candidates: Vec<&Section> = match file_name {
        Some(name) => kb.sections_for_file(name),
        None => kb.sections().iter().collect(),
    };

    rank(candidates, prefix, |s| s.name.as_str(), scorer)
        .into_iter()
        .map(|section| {
            CompletionItem::new(&section.name, CompletionKind::Section)
                .with_detail(CompletionKind::Section.label())
                .with_documentation(&section.doc)
        })
        .collect()
}
