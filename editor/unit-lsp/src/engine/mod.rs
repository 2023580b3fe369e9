//! LSP engine core
//!
//! Document store, configuration, and the server that answers requests with
//! the unitsense engine.

pub mod config;
pub mod convert;
pub mod document;
pub mod server;

pub use config::{ConfigError, EngineConfig};
pub use document::DocumentManager;
pub use server::LspServer;
