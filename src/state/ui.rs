//! Composer and upload-area state.

use serde::Serialize;

pub const PLACEHOLDER_NO_DOCUMENTS: &str = "Upload documents to start chatting...";
pub const PLACEHOLDER_READY: &str = "Ask a question about your documents...";

// =============================================================================
// COMPOSER
// =============================================================================

/// Question input plus its send control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerState {
    pub text: String,
    /// The catalog has at least one document.
    pub catalog_ready: bool,
    /// An exchange is in flight.
    pub pending: bool,
    pub focused: bool,
}

impl ComposerState {
    /// Input and send control are enabled together.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.catalog_ready && !self.pending
    }

    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        if self.catalog_ready { PLACEHOLDER_READY } else { PLACEHOLDER_NO_DOCUMENTS }
    }
}

// =============================================================================
// UPLOAD
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPhase {
    #[default]
    Idle,
    Validating,
    Uploading,
    Succeeded,
    Failed,
}

/// The upload modal and its single attempt.
///
/// `generation` increments on every reset. An attempt remembers the
/// generation it started in and its writes are dropped once the view has
/// moved on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    pub modal_open: bool,
    pub phase: UploadPhase,
    pub file_name: Option<String>,
    pub progress: u8,
    pub status: String,
    pub drag_over: bool,
    pub generation: u64,
}

impl UploadState {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase != UploadPhase::Idle
    }

    /// Back to the idle drop area. Starts a new generation.
    pub fn reset(&mut self) {
        self.phase = UploadPhase::Idle;
        self.file_name = None;
        self.progress = 0;
        self.status.clear();
        self.drag_over = false;
        self.generation += 1;
    }
}

#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;
