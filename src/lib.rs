//! Argument text-object language server.
//!
//! Serves "inner/outer argument" selections resolved by [`textobj`] over
//! LSP: through `textDocument/selectionRange` and the custom
//! `argsel/argumentRange` request.

use std::sync::OnceLock;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService};
use tracing::{debug, info, warn};

mod document;
mod lsp;
pub(crate) mod settings;
pub mod textobj;

pub use document::{DocumentState, DocumentStore, LineIndex};
pub use lsp::{
    argument_range_at, argument_spans, selection_ranges, ArgumentRangeParams,
    ARGUMENT_RANGE_METHOD,
};
pub use settings::{discover_settings, load_settings, SelectionOptions, Settings};
pub use textobj::{argument_range, find_argument_bounds, ArgumentError, ArgumentScope, TextSource};

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    options: OnceLock<SelectionOptions>,
}

impl Backend {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            options: OnceLock::new(),
        }
    }

    fn options(&self) -> SelectionOptions {
        self.options.get().copied().unwrap_or_default()
    }

    /// Handle `argsel/argumentRange`.
    ///
    /// Returns `null` when no argument is found; the failure is reported to
    /// the user unless disabled in settings.
    pub async fn argument_range(&self, params: ArgumentRangeParams) -> Result<Option<Range>> {
        let uri = &params.text_document.uri;
        let Some(doc) = self.documents.get(uri) else {
            debug!("argumentRange: no document found for {}", uri);
            return Ok(None);
        };

        let count = params.count.unwrap_or(1) as usize;
        debug!(
            "argumentRange: position={:?} count={} scope={:?}",
            params.position, count, params.scope
        );

        match lsp::argument_range_at(&doc.line_index, params.position, count, params.scope) {
            Ok(range) => Ok(Some(range)),
            Err(e) => {
                warn!("argumentRange: {} at {:?} in {}", e, params.position, uri);
                if self.options().report_failures {
                    self.client.show_message(MessageType::WARNING, e).await;
                }
                Ok(None)
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Extract workspace root from params
        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| {
                #[allow(deprecated)]
                params.root_uri.as_ref()?.to_file_path().ok()
            });

        let options = match workspace_root {
            Some(root) => {
                let (settings, settings_dir) = settings::discover_settings(&root);
                debug!("settings directory: {}", settings_dir.display());
                SelectionOptions::from_settings(&settings)
            }
            None => SelectionOptions::default(),
        };
        if self.options.set(options).is_err() {
            warn!("initialize called more than once, keeping earlier settings");
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                selection_range_provider: Some(SelectionRangeProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("argsel initialized with {:?}", self.options());
        self.client
            .log_message(MessageType::INFO, "argsel language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.documents.open(
            params.text_document.uri,
            params.text_document.text,
            params.text_document.version,
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // We use FULL sync, so there's exactly one change with the full text
        if let Some(change) = params.content_changes.into_iter().next() {
            self.documents.open(
                params.text_document.uri,
                change.text,
                params.text_document.version,
            );
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.close(&params.text_document.uri);
    }

    async fn selection_range(
        &self,
        params: SelectionRangeParams,
    ) -> Result<Option<Vec<SelectionRange>>> {
        let uri = &params.text_document.uri;
        let Some(doc) = self.documents.get(uri) else {
            debug!("selectionRange: no document found for {}", uri);
            return Ok(None);
        };

        debug!(
            "selectionRange: {} positions in {} (version {})",
            params.positions.len(),
            uri,
            doc.version
        );
        Ok(Some(lsp::selection_ranges(
            &doc.line_index,
            &params.positions,
            &self.options(),
        )))
    }
}

pub fn create_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::build(Backend::new)
        .custom_method(ARGUMENT_RANGE_METHOD, Backend::argument_range)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_can_be_created() {
        let (_service, _socket) = create_service();
    }
}
