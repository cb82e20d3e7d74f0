use super::*;

// =============================================================================
// ComposerState
// =============================================================================

#[test]
fn composer_disabled_without_documents() {
    let c = ComposerState::default();
    assert!(!c.is_enabled());
    assert_eq!(c.placeholder(), PLACEHOLDER_NO_DOCUMENTS);
}

#[test]
fn composer_enabled_with_documents() {
    let c = ComposerState { catalog_ready: true, ..ComposerState::default() };
    assert!(c.is_enabled());
    assert_eq!(c.placeholder(), PLACEHOLDER_READY);
}

#[test]
fn composer_disabled_while_pending() {
    let c = ComposerState { catalog_ready: true, pending: true, ..ComposerState::default() };
    assert!(!c.is_enabled());
}

// =============================================================================
// UploadState
// =============================================================================

#[test]
fn upload_idle_is_not_busy() {
    assert!(!UploadState::default().is_busy());
}

#[test]
fn reset_clears_attempt_and_bumps_generation() {
    let mut u = UploadState {
        modal_open: true,
        phase: UploadPhase::Failed,
        file_name: Some("a.pdf".into()),
        progress: 40,
        status: "Upload failed: nope".into(),
        drag_over: true,
        generation: 3,
    };
    assert!(u.is_busy());
    u.reset();
    assert_eq!(u.phase, UploadPhase::Idle);
    assert_eq!(u.file_name, None);
    assert_eq!(u.progress, 0);
    assert!(u.status.is_empty());
    assert!(!u.drag_over);
    assert_eq!(u.generation, 4);
    assert!(u.modal_open);
}
