//! Backend API seam.
//!
//! DESIGN
//! ======
//! Pipelines talk to the backend only through [`DocsApi`], so tests swap in
//! an in-memory double and front ends can wrap the HTTP client. The real
//! implementation is [`HttpDocsApi`].

pub mod http;
pub mod types;

pub use http::HttpDocsApi;
pub use types::{
    Answer, AskRequest, DeleteReceipt, Document, DocumentId, DocumentStatus, Health, Source, UploadFile,
    UploadReceipt,
};

use crate::error::ClientError;

/// Provider-neutral async trait over the DocuChat backend. Enables mocking in tests.
#[async_trait::async_trait]
pub trait DocsApi: Send + Sync {
    /// `GET /api/documents/`
    async fn list_documents(&self) -> Result<Vec<Document>, ClientError>;

    /// `GET /api/documents/{id}`
    async fn get_document(&self, id: DocumentId) -> Result<Document, ClientError>;

    /// `DELETE /api/documents/{id}`
    async fn delete_document(&self, id: DocumentId) -> Result<DeleteReceipt, ClientError>;

    /// `POST /api/documents/upload` with the file in a multipart `file` field.
    async fn upload_document(&self, file: &UploadFile) -> Result<UploadReceipt, ClientError>;

    /// `POST /api/chat/ask`
    async fn ask(&self, request: &AskRequest) -> Result<Answer, ClientError>;

    /// `GET /health`
    async fn health(&self) -> Result<Health, ClientError>;
}
