use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::{Value, json};

use super::*;

type Captured = Arc<Mutex<Option<Value>>>;

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> HttpDocsApi {
    HttpDocsApi::new(&ClientConfig::new(base_url).unwrap()).unwrap()
}

// =============================================================================
// pure helpers
// =============================================================================

#[test]
fn backend_error_extracts_detail() {
    let err = backend_error(400, r#"{"detail":"File too large. Maximum size is 10MB."}"#);
    assert_eq!(
        err,
        ClientError::Backend { status: 400, detail: Some("File too large. Maximum size is 10MB.".into()) }
    );
}

#[test]
fn backend_error_tolerates_non_json_body() {
    let err = backend_error(502, "<html>Bad Gateway</html>");
    assert_eq!(err, ClientError::Backend { status: 502, detail: None });
}

#[test]
fn parse_body_maps_to_malformed_response() {
    let err = parse_body::<Answer>(r#"{"sources": []}"#).unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));
}

// =============================================================================
// list_documents
// =============================================================================

#[tokio::test]
async fn list_documents_parses_array() {
    let router = Router::new().route(
        "/api/documents/",
        get(|| async {
            Json(json!([
                { "id": 1, "filename": "a.pdf", "file_size": 512, "status": "completed", "chunk_count": 4 },
                { "id": 2, "filename": "b.txt", "file_size": 2048, "status": "error", "chunk_count": null }
            ]))
        }),
    );
    let api = client(&spawn_backend(router).await);

    let docs = api.list_documents().await.unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].filename, "a.pdf");
    assert!(docs[1].status.is_error());
}

#[tokio::test]
async fn list_documents_non_2xx_is_backend_error() {
    let router = Router::new().route(
        "/api/documents/",
        get(|| async {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "Could not list documents: db locked" })))
        }),
    );
    let api = client(&spawn_backend(router).await);

    let err = api.list_documents().await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Backend { status: 500, detail: Some("Could not list documents: db locked".into()) }
    );
}

#[tokio::test]
async fn list_documents_html_body_is_malformed() {
    let router = Router::new().route("/api/documents/", get(|| async { "<html>maintenance</html>" }));
    let api = client(&spawn_backend(router).await);

    let err = api.list_documents().await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api = client(&format!("http://{addr}"));

    let err = api.list_documents().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}

// =============================================================================
// get / delete
// =============================================================================

#[tokio::test]
async fn get_document_missing_is_backend_404() {
    let router = Router::new().route(
        "/api/documents/{id}",
        get(|Path(id): Path<i64>| async move {
            (StatusCode::NOT_FOUND, Json(json!({ "detail": format!("Document {id} not found") })))
        }),
    );
    let api = client(&spawn_backend(router).await);

    let err = api.get_document(DocumentId(77)).await.unwrap_err();
    assert_eq!(err, ClientError::Backend { status: 404, detail: Some("Document 77 not found".into()) });
}

#[tokio::test]
async fn delete_document_returns_message() {
    let router = Router::new().route(
        "/api/documents/{id}",
        axum::routing::delete(|Path(id): Path<i64>| async move {
            Json(json!({ "message": format!("Document '{id}.pdf' deleted successfully") }))
        }),
    );
    let api = client(&spawn_backend(router).await);

    let receipt = api.delete_document(DocumentId(5)).await.unwrap();
    assert_eq!(receipt.message, "Document '5.pdf' deleted successfully");
}

// =============================================================================
// upload_document
// =============================================================================

async fn capture_upload(State(seen): State<Captured>, mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        *seen.lock().unwrap() = Some(json!({
            "field": field_name,
            "file_name": file_name,
            "body": String::from_utf8_lossy(&bytes),
        }));
    }
    Json(json!({
        "id": 9,
        "filename": "notes.txt",
        "status": "uploaded_successfully",
        "chunk_count": 1,
        "processing_status": "completed"
    }))
}

#[tokio::test]
async fn upload_sends_single_file_field() {
    let seen: Captured = Arc::new(Mutex::new(None));
    let router = Router::new()
        .route("/api/documents/upload", post(capture_upload))
        .with_state(seen.clone());
    let api = client(&spawn_backend(router).await);

    let receipt = api
        .upload_document(&UploadFile::new("notes.txt", b"hello world".to_vec()))
        .await
        .unwrap();
    assert_eq!(receipt.filename, "notes.txt");
    assert_eq!(receipt.id, Some(DocumentId(9)));

    let seen = seen.lock().unwrap().clone().unwrap();
    assert_eq!(seen["field"], "file");
    assert_eq!(seen["file_name"], "notes.txt");
    assert_eq!(seen["body"], "hello world");
}

#[tokio::test]
async fn upload_rejection_carries_detail() {
    let router = Router::new().route(
        "/api/documents/upload",
        post(|| async {
            (StatusCode::BAD_REQUEST, Json(json!({ "detail": "File type .exe not supported." })))
        }),
    );
    let api = client(&spawn_backend(router).await);

    let err = api
        .upload_document(&UploadFile::new("x.exe", vec![1, 2, 3]))
        .await
        .unwrap_err();
    assert_eq!(err.user_message("Upload failed"), "File type .exe not supported.");
}

// =============================================================================
// ask
// =============================================================================

async fn capture_ask(State(seen): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
    *seen.lock().unwrap() = Some(body);
    Json(json!({
        "answer": "X is Y.",
        "question": "What is X?",
        "sources": [{ "document_id": 1, "similarity": 0.87, "text": "X is defined as Y" }]
    }))
}

#[tokio::test]
async fn ask_posts_json_payload() {
    let seen: Captured = Arc::new(Mutex::new(None));
    let router = Router::new()
        .route("/api/chat/ask", post(capture_ask))
        .with_state(seen.clone());
    let api = client(&spawn_backend(router).await);

    let request = AskRequest { question: "What is X?".into(), document_id: Some(DocumentId(1)), n_results: 5 };
    let answer = api.ask(&request).await.unwrap();
    assert_eq!(answer.answer, "X is Y.");
    assert_eq!(answer.sources.len(), 1);

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body, json!({ "question": "What is X?", "document_id": 1, "n_results": 5 }));
}

// =============================================================================
// health
// =============================================================================

#[tokio::test]
async fn health_reports_status_and_version() {
    let router = Router::new().route(
        "/health",
        get(|| async { Json(json!({ "status": "healthy", "version": "1.0.0" })) }),
    );
    let api = client(&spawn_backend(router).await);

    let health = api.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version.as_deref(), Some("1.0.0"));
}
