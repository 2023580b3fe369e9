//! Core types for unitsense

use serde::{Deserialize, Serialize};

/// Source range (1-based lines and columns, end column exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Range {
    /// Range within a single line.
    pub fn on_line(line: u32, start_col: u32, end_col: u32) -> Self {
        Self {
            start_line: line,
            start_col,
            end_line: line,
            end_col,
        }
    }
}

/// What the user is in the middle of typing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextKind {
    /// After `[` at the start of a line
    SectionName {
        /// Partial section name
        prefix: String,
    },

    /// At the start of a line, before any `=`
    KeyName {
        /// Partial key name
        prefix: String,
    },

    /// After `Key=` or `Key=-`
    KeyValue {
        /// The key being assigned
        key: String,
    },

    /// Nothing recognizable
    #[default]
    Unknown,
}

/// Cursor context for completion
#[derive(Debug, Clone, Default, Serialize)]
pub struct CursorContext {
    /// Line number (1-based)
    pub line: u32,

    /// Column number (1-based)
    pub column: u32,

    /// Classified context
    pub kind: ContextKind,

    /// Word under the cursor (empty if none)
    pub prefix: String,

    /// Line text before the word under the cursor, or before the cursor if
    /// there is no word
    pub line_start: String,

    /// Range of the word under the cursor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_range: Option<Range>,
}

impl CursorContext {
    /// 0-based index of the cursor line.
    pub fn line_index(&self) -> usize {
        (self.line as usize).saturating_sub(1)
    }
}

// ============================================================================
// Completion Types
// ============================================================================

/// Role of a completion item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    /// Section name (structural)
    Section,
    /// Key name (attribute-like)
    Setting,
    /// Enumerated value (keyword)
    Value,
}

impl CompletionKind {
    pub fn label(self) -> &'static str {
        match self {
            CompletionKind::Section => "Section",
            CompletionKind::Setting => "Setting",
            CompletionKind::Value => "Value",
        }
    }
}

/// A completion item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionItem {
    /// Label shown in completion list
    pub label: String,

    /// Kind of completion
    pub kind: CompletionKind,

    /// Text to insert
    pub insert_text: String,

    /// Short detail text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Full documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    /// Position in the ranked result (lower = first)
    #[serde(default)]
    pub sort_priority: u32,
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionKind) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            detail: None,
            documentation: None,
            sort_priority: 0,
        }
    }

    pub fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = text.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }
}

/// Result of completion request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionResult {
    pub items: Vec<CompletionItem>,
    #[serde(default)]
    pub is_incomplete: bool,
}

impl CompletionResult {
    pub fn new(items: Vec<CompletionItem>) -> Self {
        Self {
            items,
            is_incomplete: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }
}

// ============================================================================
// Hover Types
// ============================================================================

/// Hover information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverInfo {
    /// Documentation text
    pub contents: String,

    /// Range of the hovered word
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
}

impl HoverInfo {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            range: None,
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }
}
