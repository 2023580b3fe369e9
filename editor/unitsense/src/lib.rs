//! Unitsense - Context-aware completion and hover for systemd unit files
//!
//! Given the text of a unit file and a cursor position, the engine works out
//! what the user is typing (a section name, a setting name, or a setting's
//! value) and offers the matching entries from a [`KnowledgeBase`]. Hovering a
//! setting key shows its documentation.
//!
//! # Architecture
//!
//! ```text
//! CLI/LSP -> Engine -> context (classify) -> completions -> rank -> KnowledgeBase
//!                  |                              |
//!                  +-> hover                      +-> scope (enclosing section)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use unitsense::Engine;
//!
//! let engine = Engine::builtin()?;
//! let result = engine.complete("[Service]\nType=", 2, 6);
//! assert_eq!(result.labels()[0], "simple");
//! ```

pub mod completions;
pub mod context;
pub mod hover;
pub mod rank;
pub mod scope;
pub mod types;

// Re-export main types
pub use context::parse_context;
pub use rank::{FuzzyScorer, NucleoScorer};
pub use types::{
    CompletionItem, CompletionKind, CompletionResult, ContextKind, CursorContext, HoverInfo,
    Range,
};
pub use unitkb::{KnowledgeBase, KnowledgeStats, LoadError};

use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Completion behavior switches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Truncate results to this many items
    pub max_completions: Option<usize>,

    /// Rank value choices by the partially typed value
    pub filter_values: bool,

    /// Offer only sections whose file pattern accepts the file name
    pub match_sections_to_file: bool,
}

impl EngineOptions {
    pub fn with_max_completions(mut self, max: usize) -> Self {
        self.max_completions = Some(max);
        self
    }

    pub fn with_filter_values(mut self, enabled: bool) -> Self {
        self.filter_values = enabled;
        self
    }

    pub fn with_match_sections_to_file(mut self, enabled: bool) -> Self {
        self.match_sections_to_file = enabled;
        self
    }
}

/// Main completion and hover engine
#[derive(Clone)]
pub struct Engine {
    /// Section and setting catalog
    kb: Arc<KnowledgeBase>,

    /// Ranking of candidates against typed text
    scorer: Arc<dyn FuzzyScorer>,

    options: EngineOptions,
}

impl Engine {
    /// Create engine over a loaded knowledge base
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self {
            kb,
            scorer: Arc::new(NucleoScorer::new()),
            options: EngineOptions::default(),
        }
    }

    /// Create engine over the built-in systemd catalog
    pub fn builtin() -> Result<Self, LoadError> {
        Ok(Self::new(Arc::new(KnowledgeBase::builtin()?)))
    }

    /// Create engine from a catalog file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        Ok(Self::new(Arc::new(KnowledgeBase::load(path)?)))
    }

    /// Replace the fuzzy scorer
    pub fn with_scorer(mut self, scorer: Arc<dyn FuzzyScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set maximum completions
    pub fn with_max_completions(mut self, max: usize) -> Self {
        self.options.max_completions = Some(max);
        self
    }

    /// Get completions at cursor position (1-based line/column)
    pub fn complete(&self, source: &str, line: u32, column: u32) -> CompletionResult {
        self.complete_in_file(None, source, line, column)
    }

    /// Get completions for a document whose file name is known
    pub fn complete_in_file(
        &self,
        file_name: Option<&str>,
        source: &str,
        line: u32,
        column: u32,
    ) -> CompletionResult {
        let ctx = parse_context(source, line, column);
        debug!(line, column, kind = ?ctx.kind, "Completing");

        let result = completions::get_completions(
            &self.kb,
            self.scorer.as_ref(),
            &ctx,
            source,
            file_name,
            &self.options,
        );
        debug!(items = result.items.len(), incomplete = result.is_incomplete, "Completed");
        result
    }

    /// Get hover information at position
    pub fn hover(&self, source: &str, line: u32, column: u32) -> Option<HoverInfo> {
        let info = hover::get_hover(&self.kb, source, line, column);
        debug!(line, column, found = info.is_some(), "Hover");
        info
    }

    /// Classify the cursor position without completing
    pub fn context(&self, source: &str, line: u32, column: u32) -> CursorContext {
        parse_context(source, line, column)
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Get statistics
    pub fn stats(&self) -> KnowledgeStats {
        self.kb.stats()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("sections", &self.kb.sections().len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
