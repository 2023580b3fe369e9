//! Type conversions from engine types to LSP types
//!
//! Engine positions are 1-based, LSP positions 0-based.

use tower_lsp::lsp_types::{
    self, CompletionItem as LspCompletionItem, CompletionItemKind as LspCompletionItemKind,
    CompletionList, Hover, HoverContents, MarkupContent, MarkupKind, Position as LspPosition,
    Range as LspRange,
};
use unitsense::{CompletionItem, CompletionKind, CompletionResult, HoverInfo, Range};

/// Convert engine completion to LSP completion item
pub fn to_lsp_completion(item: &CompletionItem) -> LspCompletionItem {
    LspCompletionItem {
        label: item.label.clone(),
        kind: Some(to_lsp_completion_kind(item.kind)),
        detail: item
            .detail
            .clone()
            .or_else(|| Some(item.kind.label().to_string())),
        documentation: item.documentation.as_ref().map(|doc| {
            lsp_types::Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value: doc.clone(),
            })
        }),
        insert_text: Some(item.insert_text.clone()),
        insert_text_format: Some(lsp_types::InsertTextFormat::PLAIN_TEXT),
        sort_text: Some(format!("{:05}", item.sort_priority)),
        ..Default::default()
    }
}

/// Convert a full completion result, keeping the incomplete flag
pub fn to_lsp_completion_list(result: &CompletionResult) -> CompletionList {
    CompletionList {
        is_incomplete: result.is_incomplete,
        items: result.items.iter().map(to_lsp_completion).collect(),
    }
}

fn to_lsp_completion_kind(kind: CompletionKind) -> LspCompletionItemKind {
    match kind {
        CompletionKind::Section => LspCompletionItemKind::MODULE,
        CompletionKind::Setting => LspCompletionItemKind::PROPERTY,
        CompletionKind::Value => LspCompletionItemKind::KEYWORD,
    }
}

pub fn to_lsp_range(range: &Range) -> LspRange {
    LspRange {
        start: LspPosition {
            line: range.start_line.saturating_sub(1),
            character: range.start_col.saturating_sub(1),
        },
        end: LspPosition {
            line: range.end_line.saturating_sub(1),
            character: range.end_col.saturating_sub(1),
        },
    }
}

/// Convert engine hover info to LSP hover
pub fn to_lsp_hover(info: &HoverInfo) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: info.contents.clone(),
        }),
        range: info.range.as_ref().map(to_lsp_range),
    }
}
