//! Render notifications emitted by the session controller.
//!
//! Every mutation is followed by exactly one event naming the region that
//! changed. Front ends re-render that region from the pure view functions.

use serde::Serialize;

use crate::state::ui::UploadPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Error,
    Success,
}

/// A transient user-visible notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Document list or selection changed.
    CatalogChanged,
    /// Composer text, enabled state, placeholder or focus changed.
    ComposerChanged,
    TranscriptChanged,
    UploadChanged { phase: UploadPhase, progress: u8 },
    Notice(Notice),
}
