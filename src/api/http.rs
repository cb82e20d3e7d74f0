//! `reqwest` implementation of [`DocsApi`].
//!
//! Thin HTTP wrapper: every call sends, reads the body as text, maps
//! non-2xx statuses to [`ClientError::Backend`] and parses the body with
//! the pure helpers at the bottom of this file.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use super::DocsApi;
use super::types::{
    Answer, AskRequest, DeleteReceipt, Document, DocumentId, ErrorBody, Health, UploadFile, UploadReceipt,
};
use crate::config::ClientConfig;
use crate::error::ClientError;

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpDocsApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDocsApi {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::HttpClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ClientError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(backend_error(status, &text));
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl DocsApi for HttpDocsApi {
    async fn list_documents(&self) -> Result<Vec<Document>, ClientError> {
        let text = self.send(self.http.get(self.url("/api/documents/"))).await?;
        parse_body(&text)
    }

    async fn get_document(&self, id: DocumentId) -> Result<Document, ClientError> {
        let text = self
            .send(self.http.get(self.url(&format!("/api/documents/{id}"))))
            .await?;
        parse_body(&text)
    }

    async fn delete_document(&self, id: DocumentId) -> Result<DeleteReceipt, ClientError> {
        let text = self
            .send(self.http.delete(self.url(&format!("/api/documents/{id}"))))
            .await?;
        parse_body(&text)
    }

    async fn upload_document(&self, file: &UploadFile) -> Result<UploadReceipt, ClientError> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part("file", part);
        let text = self
            .send(self.http.post(self.url("/api/documents/upload")).multipart(form))
            .await?;
        parse_body(&text)
    }

    async fn ask(&self, request: &AskRequest) -> Result<Answer, ClientError> {
        let text = self
            .send(self.http.post(self.url("/api/chat/ask")).json(request))
            .await?;
        parse_body(&text)
    }

    async fn health(&self) -> Result<Health, ClientError> {
        let text = self.send(self.http.get(self.url("/health"))).await?;
        parse_body(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Map a non-2xx response to a backend error, keeping the `detail` string if the body has one.
pub(crate) fn backend_error(status: u16, body: &str) -> ClientError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::detail_text);
    ClientError::Backend { status, detail }
}

pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
