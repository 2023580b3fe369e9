//! Language Server Protocol implementation for systemd unit files
//!
//! Serves completion and hover for `.service`, `.socket`, `.timer` and the
//! other unit types, backed by the unitsense engine and the unitkb catalog.
//!
//! # Usage
//!
//! Run the language server via stdio:
//!
//! ```bash
//! unit-lsp
//! ```
//!
//! # Configuration
//!
//! Create a `.unit-lsp.yaml` in your workspace root:
//!
//! ```yaml
//! engine:
//!   name: unit-lsp
//!   log_level: info
//!
//! completion:
//!   trigger_characters: ["="]
//!   max_items: 100
//!   filter_values: false
//!   match_sections_to_file: true
//!
//! catalog:
//!   search_paths:
//!     - .unitkb.yaml
//!
//! extensions: [service, socket, timer]
//! ```
//!
//! Without a catalog in the workspace the built-in systemd catalog is used.

pub mod engine;

pub use engine::{DocumentManager, EngineConfig, LspServer};
