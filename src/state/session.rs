use crate::api::{Document, DocumentId};

/// Documents known to the backend and the active filter scope.
///
/// The document list is a snapshot: every successful catalog fetch replaces
/// it wholesale.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub documents: Vec<Document>,
    pub selected_document_id: Option<DocumentId>,
}

impl SessionState {
    /// Replace the catalog snapshot. A selection that no longer exists is
    /// cleared and returned.
    pub fn replace_documents(&mut self, documents: Vec<Document>) -> Option<DocumentId> {
        self.documents = documents;
        match self.selected_document_id {
            Some(id) if !self.contains(id) => self.selected_document_id.take(),
            _ => None,
        }
    }

    /// Select a document by id. Returns `false` (and leaves the selection
    /// alone) if the id is not in the current snapshot. Re-selecting the
    /// active document keeps it selected.
    pub fn select(&mut self, id: DocumentId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected_document_id = Some(id);
        true
    }

    /// Drop the selection so questions search every document.
    pub fn clear_selection(&mut self) -> bool {
        self.selected_document_id.take().is_some()
    }

    #[must_use]
    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.iter().any(|d| d.id == id)
    }

    #[must_use]
    pub fn has_documents(&self) -> bool {
        !self.documents.is_empty()
    }

    #[must_use]
    pub fn selected_document(&self) -> Option<&Document> {
        let id = self.selected_document_id?;
        self.documents.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
