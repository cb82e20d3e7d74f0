//! In-memory `DocsApi` double and fixtures for controller tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use crate::api::{
    Answer, AskRequest, DeleteReceipt, DocsApi, Document, DocumentId, DocumentStatus, Health, Source, UploadFile,
    UploadReceipt,
};
use crate::config::PipelineTimings;
use crate::error::ClientError;

use super::SessionController;

pub(crate) fn doc(id: i64, name: &str) -> Document {
    Document {
        id: DocumentId(id),
        filename: name.into(),
        file_size: 2048,
        chunk_count: Some(3),
        status: DocumentStatus::Completed,
        file_type: None,
        upload_date: None,
        preview: None,
        error: None,
    }
}

pub(crate) fn answer(text: &str, sources: Vec<Source>) -> Answer {
    Answer { answer: text.into(), sources }
}

pub(crate) fn backend(status: u16, detail: Option<&str>) -> ClientError {
    ClientError::Backend { status, detail: detail.map(str::to_owned) }
}

pub(crate) struct MockApi {
    pub documents: Mutex<Result<Vec<Document>, ClientError>>,
    pub upload_result: Mutex<Result<UploadReceipt, ClientError>>,
    pub upload_delay: Mutex<Duration>,
    pub ask_result: Mutex<Result<Answer, ClientError>>,
    /// When set, `ask` waits for a notification before answering.
    pub ask_gate: Mutex<Option<Arc<Notify>>>,
    pub asked: Mutex<Vec<AskRequest>>,
    pub uploaded: Mutex<Vec<String>>,
    pub list_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub ask_calls: AtomicUsize,
}

impl MockApi {
    pub(crate) fn new(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(Ok(documents)),
            upload_result: Mutex::new(Ok(UploadReceipt {
                filename: "uploaded".into(),
                id: Some(DocumentId(100)),
                chunk_count: Some(1),
                processing_status: Some("completed".into()),
            })),
            upload_delay: Mutex::new(Duration::ZERO),
            ask_result: Mutex::new(Ok(answer("ok", Vec::new()))),
            ask_gate: Mutex::new(None),
            asked: Mutex::new(Vec::new()),
            uploaded: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
            ask_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn set_documents(&self, documents: Result<Vec<Document>, ClientError>) {
        *self.documents.lock().unwrap() = documents;
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn ask_calls(&self) -> usize {
        self.ask_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DocsApi for MockApi {
    async fn list_documents(&self) -> Result<Vec<Document>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.documents.lock().unwrap().clone()
    }

    async fn get_document(&self, id: DocumentId) -> Result<Document, ClientError> {
        let documents = self.documents.lock().unwrap().clone()?;
        documents
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| backend(404, Some(&format!("Document {id} not found"))))
    }

    async fn delete_document(&self, id: DocumentId) -> Result<DeleteReceipt, ClientError> {
        let mut documents = self.documents.lock().unwrap();
        let list = documents.as_mut().map_err(|e| e.clone())?;
        let pos = list
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| backend(404, Some(&format!("Document {id} not found"))))?;
        let removed = list.remove(pos);
        Ok(DeleteReceipt { message: format!("Document '{}' deleted successfully", removed.filename) })
    }

    async fn upload_document(&self, file: &UploadFile) -> Result<UploadReceipt, ClientError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded.lock().unwrap().push(file.name.clone());
        let delay = *self.upload_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.upload_result.lock().unwrap().clone()
    }

    async fn ask(&self, request: &AskRequest) -> Result<Answer, ClientError> {
        self.ask_calls.fetch_add(1, Ordering::SeqCst);
        self.asked.lock().unwrap().push(request.clone());
        let gate = self.ask_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.ask_result.lock().unwrap().clone()
    }

    async fn health(&self) -> Result<Health, ClientError> {
        Ok(Health { status: "healthy".into(), version: Some("1.0.0".into()) })
    }
}

/// Controller over `api` with the default pipeline timings.
pub(crate) fn controller(api: &Arc<MockApi>) -> SessionController {
    SessionController::with_timings(api.clone(), PipelineTimings::default())
}
