//! Document catalog commands: list, select, inspect, delete.

use tracing::{debug, info, warn};

use super::SessionController;
use crate::api::{Document, DocumentId};
use crate::error::ErrorCode;
use crate::event::{Notice, SessionEvent};

pub const LOAD_FAILED_NOTICE: &str = "Failed to load documents. Make sure the backend server is running.";
pub const DETAILS_FAILED: &str = "Failed to load document details";
pub const DELETE_FAILED: &str = "Failed to delete document";

impl SessionController {
    /// Fetch the document list and replace the catalog snapshot.
    ///
    /// The composer is enabled iff the new list is non-empty. On failure the
    /// previous snapshot stays in place and an error notice is surfaced.
    /// Returns whether the fetch succeeded.
    pub async fn load_documents(&self) -> bool {
        match self.api().list_documents().await {
            Ok(documents) => {
                let count = documents.len();
                let cleared = self.update(|m| {
                    let cleared = m.session.replace_documents(documents);
                    m.composer.catalog_ready = m.session.has_documents();
                    cleared
                });
                if let Some(id) = cleared {
                    debug!(%id, "catalog: selected document no longer listed, selection cleared");
                }
                info!(count, "catalog: documents loaded");
                self.emit(SessionEvent::CatalogChanged);
                self.emit(SessionEvent::ComposerChanged);
                true
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "catalog: load failed");
                self.notify(Notice::error(LOAD_FAILED_NOTICE));
                false
            }
        }
    }

    /// Scope questions to one document. Selecting the active document again
    /// keeps it selected. Unknown ids are refused with a notice.
    pub fn select_document(&self, id: DocumentId) -> bool {
        let selected = self.update(|m| m.session.select(id));
        if selected {
            debug!(%id, "catalog: document selected");
            self.emit(SessionEvent::CatalogChanged);
        } else {
            self.notify(Notice::error(format!("Document {id} not found")));
        }
        selected
    }

    /// Return the question scope to every document.
    pub fn clear_selection(&self) {
        if self.update(|m| m.session.clear_selection()) {
            debug!("catalog: selection cleared");
            self.emit(SessionEvent::CatalogChanged);
        }
    }

    /// Fetch the full record for one document.
    pub async fn document_details(&self, id: DocumentId) -> Option<Document> {
        match self.api().get_document(id).await {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(%id, error = %e, code = e.error_code(), "catalog: details failed");
                self.notify(Notice::error(e.user_message(DETAILS_FAILED)));
                None
            }
        }
    }

    /// Delete a document, then refresh the catalog.
    pub async fn delete_document(&self, id: DocumentId) -> bool {
        match self.api().delete_document(id).await {
            Ok(receipt) => {
                info!(%id, "catalog: document deleted");
                self.load_documents().await;
                self.notify(Notice::success(receipt.message));
                true
            }
            Err(e) => {
                warn!(%id, error = %e, code = e.error_code(), "catalog: delete failed");
                self.notify(Notice::error(e.user_message(DELETE_FAILED)));
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
