//! Open document snapshots.

use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use super::text::LineIndex;

/// Immutable snapshot of one document version.
#[derive(Debug, Clone)]
pub struct DocumentState {
    /// Text plus line index for position conversion.
    pub line_index: LineIndex,
    /// Document version from the client.
    pub version: i32,
}

impl DocumentState {
    pub fn new(source: String, version: i32) -> Self {
        Self {
            line_index: LineIndex::new(source),
            version,
        }
    }
}

/// Thread-safe storage for open documents.
///
/// Each update replaces the whole snapshot, so a request holding an
/// `Arc<DocumentState>` keeps reading the version it started with.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<DocumentState>>,
}

impl DocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Open or replace a document with the given source text.
    pub fn open(&self, uri: Url, source: String, version: i32) -> Arc<DocumentState> {
        let state = Arc::new(DocumentState::new(source, version));
        self.documents.insert(uri, Arc::clone(&state));
        state
    }

    /// Close a document.
    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Get a document's current snapshot.
    pub fn get(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.documents.get(uri).map(|r| Arc::clone(&r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textobj::TextSource;

    fn uri() -> Url {
        Url::parse("file:///tmp/main.rs").unwrap()
    }

    #[test]
    fn open_get_close() {
        let store = DocumentStore::new();
        store.open(uri(), "f(a)".to_string(), 1);

        let doc = store.get(&uri()).unwrap();
        assert_eq!(doc.version, 1);
        assert_eq!(doc.line_index.len(), 4);

        store.close(&uri());
        assert!(store.get(&uri()).is_none());
    }

    #[test]
    fn reopen_replaces_but_old_snapshot_survives() {
        let store = DocumentStore::new();
        let old = store.open(uri(), "f(a)".to_string(), 1);
        store.open(uri(), "g(a, b)".to_string(), 2);

        assert_eq!(old.line_index.len(), 4);
        let current = store.get(&uri()).unwrap();
        assert_eq!(current.version, 2);
        assert_eq!(current.line_index.len(), 7);
    }
}
