//! Document list and document detail views.

use std::fmt::Write as _;

use crate::api::{Document, DocumentId};
use crate::format::{escape_html, format_file_size};
use crate::state::session::SessionState;

pub const EMPTY_CATALOG_TEXT: &str = "No documents uploaded yet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItemView {
    pub id: DocumentId,
    pub name: String,
    /// `"<size> • <n> chunks"`, with ` • ⚠️ Error` appended for failed documents.
    pub meta: String,
    pub active: bool,
    pub has_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub items: Vec<CatalogItemView>,
}

impl CatalogView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        if self.items.is_empty() {
            return format!("<p class=\"empty-state\">{EMPTY_CATALOG_TEXT}</p>");
        }
        let mut out = String::new();
        for item in &self.items {
            let class = if item.active { "document-item active" } else { "document-item" };
            let _ = write!(
                out,
                "<div class=\"{class}\" data-id=\"{}\"><div class=\"document-name\">{}</div><div class=\"document-meta\">{}</div></div>",
                item.id,
                escape_html(&item.name),
                escape_html(&item.meta),
            );
        }
        out
    }
}

fn document_meta(doc: &Document) -> String {
    let mut meta = format!("{} • {} chunks", format_file_size(doc.file_size), doc.chunk_count.unwrap_or(0));
    if doc.status.is_error() {
        meta.push_str(" • ⚠️ Error");
    }
    meta
}

#[must_use]
pub fn render_catalog(state: &SessionState) -> CatalogView {
    let items = state
        .documents
        .iter()
        .map(|doc| CatalogItemView {
            id: doc.id,
            name: doc.filename.clone(),
            meta: document_meta(doc),
            active: state.selected_document_id == Some(doc.id),
            has_error: doc.status.is_error(),
        })
        .collect();
    CatalogView { items }
}

// =============================================================================
// DETAIL
// =============================================================================

/// Label/value rows describing one document. Absent fields are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDetailView {
    pub title: String,
    pub rows: Vec<(&'static str, String)>,
}

impl DocumentDetailView {
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = self.title.clone();
        for (label, value) in &self.rows {
            let _ = write!(out, "\n  {label:<9} {value}");
        }
        out
    }
}

#[must_use]
pub fn render_document_detail(doc: &Document) -> DocumentDetailView {
    let mut rows = vec![("id", doc.id.to_string())];
    if let Some(file_type) = &doc.file_type {
        rows.push(("type", file_type.clone()));
    }
    rows.push(("size", format_file_size(doc.file_size)));
    rows.push(("chunks", doc.chunk_count.unwrap_or(0).to_string()));
    rows.push(("status", doc.status.as_str().to_owned()));
    if let Some(date) = &doc.upload_date {
        rows.push(("uploaded", date.clone()));
    }
    if let Some(preview) = &doc.preview {
        rows.push(("preview", preview.clone()));
    }
    if let Some(error) = &doc.error {
        rows.push(("error", error.clone()));
    }
    DocumentDetailView { title: doc.filename.clone(), rows }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
