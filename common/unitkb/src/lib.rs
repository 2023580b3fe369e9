//! # unitkb
//!
//! Knowledge base for systemd unit files: the sections a unit file can
//! contain, the settings each section accepts, the literal values of
//! enumerated settings, and documentation for all of them.
//!
//! Used by `unitsense` for completion and hover, and by `unit-lsp` through it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use unitkb::KnowledgeBase;
//!
//! let kb = KnowledgeBase::builtin()?;
//! let service = kb.settings("Service").unwrap();
//! assert!(service.get("Type").unwrap().is_enumerated());
//! ```
//!
//! A custom catalog can be loaded with [`KnowledgeBase::load`]; see
//! [`loader`] for the file format.

pub mod knowledge;
pub mod loader;
pub mod types;

pub use knowledge::{KnowledgeBase, KnowledgeStats};
pub use loader::{Catalog, CatalogSection, LoadError};
pub use types::{Section, Setting, SettingsIndex};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
