use super::*;
use serde_json::json;

// =============================================================================
// Document
// =============================================================================

#[test]
fn document_parses_listing_row() {
    let row = json!({
        "id": 3,
        "filename": "handbook.pdf",
        "file_type": ".pdf",
        "file_size": 2048,
        "upload_date": "2025-01-02T03:04:05",
        "status": "completed",
        "chunk_count": 12,
        "preview": "Welcome to",
        "error": null
    });
    let doc: Document = serde_json::from_value(row).unwrap();
    assert_eq!(doc.id, DocumentId(3));
    assert_eq!(doc.filename, "handbook.pdf");
    assert_eq!(doc.file_size, 2048);
    assert_eq!(doc.chunk_count, Some(12));
    assert_eq!(doc.status, DocumentStatus::Completed);
    assert_eq!(doc.file_type.as_deref(), Some(".pdf"));
    assert!(doc.error.is_none());
}

#[test]
fn document_tolerates_missing_optional_fields() {
    let doc: Document = serde_json::from_value(json!({
        "id": 1, "filename": "a.txt", "file_size": 10, "chunk_count": null
    }))
    .unwrap();
    assert_eq!(doc.chunk_count, None);
    assert_eq!(doc.status, DocumentStatus::Pending);
}

#[test]
fn document_requires_file_size() {
    let result = serde_json::from_value::<Document>(json!({ "id": 1, "filename": "a.txt" }));
    assert!(result.is_err());
}

// =============================================================================
// DocumentStatus
// =============================================================================

#[test]
fn status_error_is_flagged() {
    let status: DocumentStatus = serde_json::from_value(json!("error")).unwrap();
    assert!(status.is_error());
    assert!(!DocumentStatus::Ready.is_error());
}

#[test]
fn status_unknown_string_round_trips_verbatim() {
    let status: DocumentStatus = serde_json::from_value(json!("uploaded_successfully")).unwrap();
    assert_eq!(status, DocumentStatus::Other("uploaded_successfully".into()));
    assert_eq!(serde_json::to_value(&status).unwrap(), json!("uploaded_successfully"));
}

// =============================================================================
// DocumentId
// =============================================================================

#[test]
fn document_id_parses_and_displays() {
    let id: DocumentId = " 42 ".parse().unwrap();
    assert_eq!(id, DocumentId(42));
    assert_eq!(id.to_string(), "42");
    assert!("abc".parse::<DocumentId>().is_err());
}

// =============================================================================
// UploadFile
// =============================================================================

#[test]
fn upload_file_extension_is_lowercased_after_last_dot() {
    assert_eq!(UploadFile::new("Report.Final.PDF", vec![]).extension().as_deref(), Some(".pdf"));
    assert_eq!(UploadFile::new("notes.txt", vec![]).extension().as_deref(), Some(".txt"));
    assert_eq!(UploadFile::new("README", vec![]).extension(), None);
}

#[test]
fn upload_file_size_is_byte_len() {
    assert_eq!(UploadFile::new("a.txt", vec![0; 17]).size(), 17);
}

// =============================================================================
// Chat wire types
// =============================================================================

#[test]
fn ask_request_serializes_missing_scope_as_null() {
    let req = AskRequest { question: "What is X?".into(), document_id: None, n_results: 5 };
    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        json!({ "question": "What is X?", "document_id": null, "n_results": 5 })
    );
}

#[test]
fn ask_request_serializes_selected_scope() {
    let req = AskRequest { question: "q".into(), document_id: Some(DocumentId(7)), n_results: 5 };
    assert_eq!(serde_json::to_value(&req).unwrap()["document_id"], json!(7));
}

#[test]
fn answer_ignores_question_echo() {
    let answer: Answer = serde_json::from_value(json!({
        "answer": "X is Y.",
        "question": "What is X?",
        "sources": [{ "document_id": 1, "similarity": 0.87, "text": "..." }]
    }))
    .unwrap();
    assert_eq!(answer.answer, "X is Y.");
    assert_eq!(answer.sources.len(), 1);
    assert_eq!(answer.sources[0].document_id, DocumentId(1));
}

#[test]
fn answer_without_sources_is_empty() {
    let answer: Answer = serde_json::from_value(json!({ "answer": "ok" })).unwrap();
    assert!(answer.sources.is_empty());
}

// =============================================================================
// ErrorBody
// =============================================================================

#[test]
fn error_body_keeps_string_detail_only() {
    let body: ErrorBody = serde_json::from_value(json!({ "detail": "Document not found" })).unwrap();
    assert_eq!(body.detail_text().as_deref(), Some("Document not found"));

    let structured: ErrorBody = serde_json::from_value(json!({ "detail": [{ "loc": ["body"] }] })).unwrap();
    assert_eq!(structured.detail_text(), None);
}
