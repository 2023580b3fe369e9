//! Completion providers

mod sections;
mod settings;
mod values;

pub use sections::complete_sections;
pub use settings::complete_settings;
pub use values::complete_values;

use crate::context::split_lines;
use crate::rank::FuzzyScorer;
use crate::scope::find_enclosing_section;
use crate::types::{CompletionResult, ContextKind, CursorContext};
use crate::EngineOptions;
use unitkb::KnowledgeBase;

/// Get completions for the given context
pub fn get_completions(
    kb: &KnowledgeBase,
    scorer: &dyn FuzzyScorer,
    ctx: &CursorContext,
    source: &str,
    file_name: Option<&str>,
    options: &EngineOptions,
) -> CompletionResult {
    let lines = split_lines(source);

    let mut items = match &ctx.kind {
        ContextKind::SectionName { prefix } => {
            let file_name = file_name.filter(|_| options.match_sections_to_file);
            complete_sections(kb, scorer, prefix, file_name)
        }

        ContextKind::KeyName { prefix } => find_enclosing_section(kb, &lines, ctx.line_index())
            .map(|settings| complete_settings(settings, scorer, prefix))
            .unwrap_or_default(),

        ContextKind::KeyValue { key } => find_enclosing_section(kb, &lines, ctx.line_index())
            .and_then(|settings| settings.get(key))
            .map(|setting| {
                let filter = options.filter_values.then_some(ctx.prefix.as_str());
                complete_values(setting, scorer, filter)
            })
            .unwrap_or_default(),

        ContextKind::Unknown => Vec::new(),
    };

    // Hosts re-sort by priority; pin the ranked order
    for (pos, item) in items.iter_mut().enumerate() {
        item.sort_priority = pos as u32;
    }

    let mut result = CompletionResult::new(items);
    if let Some(max) = options.max_completions {
        if result.items.len() > max {
            result.items.truncate(max);
            result.is_incomplete = true;
        }
    }

    result
}
