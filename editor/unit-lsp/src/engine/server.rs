//! Language server for systemd unit files
//!
//! Completion and hover are answered by a [`unitsense::Engine`] over the
//! current text of the document. The engine is rebuilt once during
//! `initialize`, when the workspace configuration and catalog are known.

use super::config::EngineConfig;
use super::convert;
use super::document::DocumentManager;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use unitkb::KnowledgeBase;
use unitsense::Engine;

/// Unit file language server
pub struct LspServer {
    /// LSP client for sending notifications
    client: Client,
    documents: DocumentManager,
    engine: RwLock<Arc<Engine>>,
    config: RwLock<EngineConfig>,
}

impl LspServer {
    /// Create a server over the given engine with default configuration
    pub fn new(client: Client, engine: Engine) -> Self {
        Self::with_config(client, engine, EngineConfig::new())
    }

    pub fn with_config(client: Client, engine: Engine, config: EngineConfig) -> Self {
        let engine = engine.with_options(config.engine_options());
        Self {
            client,
            documents: DocumentManager::new(),
            engine: RwLock::new(Arc::new(engine)),
            config: RwLock::new(config),
        }
    }

    /// Server capabilities for the given configuration
    pub fn capabilities(config: &EngineConfig) -> ServerCapabilities {
        let trigger_chars = config.completion.trigger_characters.clone();

        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    ..Default::default()
                },
            )),

            completion_provider: Some(CompletionOptions {
                trigger_characters: if trigger_chars.is_empty() {
                    None
                } else {
                    Some(trigger_chars)
                },
                resolve_provider: Some(false),
                ..Default::default()
            }),

            hover_provider: Some(HoverProviderCapability::Simple(true)),
            ..Default::default()
        }
    }

    /// Adopt the workspace configuration and catalog
    async fn configure(&self, root: &Path) {
        let config = EngineConfig::load_default(root);

        let current = self.engine.read().await.clone();
        let mut engine = Engine::clone(&current);

        if config.engine.workspace_discovery {
            if let Some(path) = config.find_catalog(root) {
                match KnowledgeBase::load(&path) {
                    Ok(kb) => {
                        tracing::info!("Using catalog {}", path.display());
                        engine = Engine::new(Arc::new(kb));
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring catalog {}: {}", path.display(), e);
                    }
                }
            }
        }

        let engine = engine.with_options(config.engine_options());
        *self.engine.write().await = Arc::new(engine);
        *self.config.write().await = config;
    }

    /// Engine snapshot and document text, if the document is a unit file
    async fn document(&self, uri: &Url) -> Option<(Arc<Engine>, String)> {
        let doc = self.documents.get(uri)?;
        if !self.config.read().await.handles(uri.path(), &doc.language_id) {
            return None;
        }

        let engine = self.engine.read().await.clone();
        Some((engine, doc.text))
    }
}

fn file_name(uri: &Url) -> Option<&str> {
    uri.path_segments().and_then(|mut segments| segments.next_back())
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root = params.root_uri.and_then(|uri| uri.to_file_path().ok());

        if let Some(root) = root {
            self.configure(&root).await;
        }

        let config = self.config.read().await;
        tracing::info!("{} initializing", config.engine.name);

        Ok(InitializeResult {
            capabilities: Self::capabilities(&config),
            server_info: Some(ServerInfo {
                name: config.engine.name.clone(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let name = self.config.read().await.engine.name.clone();
        tracing::info!("{} initialized", name);
        self.client
            .log_message(MessageType::INFO, format!("{} ready", name))
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("{} shutting down", self.config.read().await.engine.name);
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        tracing::debug!("Document opened: {} ({})", doc.uri, doc.language_id);
        self.documents.open(doc.uri, doc.text, doc.version, doc.language_id);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // Full sync: the last change holds the whole document
        if let Some(change) = params.content_changes.into_iter().last() {
            if !self.documents.update(&uri, change.text, version) {
                tracing::debug!("Ignoring change to {} at version {}", uri, version);
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!("Document closed: {}", uri);
        self.documents.close(&uri);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some((engine, content)) = self.document(uri).await else {
            return Ok(None);
        };

        let result = engine.complete_in_file(
            file_name(uri),
            &content,
            position.line + 1,
            position.character + 1,
        );

        Ok(Some(CompletionResponse::List(
            convert::to_lsp_completion_list(&result),
        )))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some((engine, content)) = self.document(uri).await else {
            return Ok(None);
        };

        Ok(engine
            .hover(&content, position.line + 1, position.character + 1)
            .map(|info| convert::to_lsp_hover(&info)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_trigger_characters() {
        let caps = LspServer::capabilities(&EngineConfig::new());
        let completion = caps.completion_provider.unwrap();
        assert_eq!(completion.trigger_characters, Some(vec!["=".to_string()]));
        assert!(caps.hover_provider.is_some());
        assert!(caps.definition_provider.is_none());
    }

    #[test]
    fn test_capabilities_without_trigger_characters() {
        let mut config = EngineConfig::new();
        config.completion.trigger_characters.clear();

        let caps = LspServer::capabilities(&config);
        assert!(caps.completion_provider.unwrap().trigger_characters.is_none());
    }

    #[test]
    fn test_file_name() {
        let uri = Url::parse("file:///etc/systemd/system/sshd.socket").unwrap();
        assert_eq!(file_name(&uri), Some("sshd.socket"));
    }
}
