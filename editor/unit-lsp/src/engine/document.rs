//! Open document store
//!
//! Documents are synced in full. Each change replaces the stored text unless
//! it is older than what is already stored.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

/// Open documents by URI
#[derive(Debug, Default)]
pub struct DocumentManager {
    documents: DashMap<Url, Document>,
}

/// An open document as last synced by the client
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub version: i32,
    /// Language id sent with `didOpen` (e.g. `systemd`)
    pub language_id: String,
}

impl DocumentManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, uri: Url, text: String, version: i32, language_id: String) {
        self.documents.insert(
            uri,
            Document {
                text,
                version,
                language_id,
            },
        );
    }

    /// Replace the text of an open document.
    ///
    /// Returns `false` for unknown URIs and for versions older than the stored
    /// one; the stored text is left as is.
    pub fn update(&self, uri: &Url, text: String, version: i32) -> bool {
        match self.documents.entry(uri.clone()) {
            Entry::Occupied(mut entry) if entry.get().version <= version => {
                let doc = entry.get_mut();
                doc.text = text;
                doc.version = version;
                true
            }
            _ => false,
        }
    }

    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Snapshot of an open document
    pub fn get(&self, uri: &Url) -> Option<Document> {
        self.documents.get(uri).map(|doc| doc.clone())
    }
}
