//! Session controller: the single owner of client-side state.
//!
//! DESIGN
//! ======
//! `SessionController` is a cheap-to-clone handle over one `Inner`. All
//! state sits behind a std `Mutex` that is only ever locked for a
//! synchronous read or write, never across an `.await`, so a front end can
//! take snapshots while an upload or exchange is pending.
//!
//! Commands live in per-pipeline files (`catalog`, `upload`, `chat`). Each
//! mutation is followed by one [`SessionEvent`] naming the region to
//! re-render; front ends that do not subscribe can poll the snapshot
//! accessors and [`SessionController::drain_notices`] instead.
//!
//! ERROR HANDLING
//! ==============
//! Pipelines never return `ClientError` to the caller. Failures are logged
//! and turned into a notice, a transcript entry or an upload status line.

pub mod catalog;
pub mod chat;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::api::{DocsApi, Health};
use crate::config::PipelineTimings;
use crate::error::ClientError;
use crate::event::{Notice, SessionEvent};
use crate::state::session::SessionState;
use crate::state::transcript::{ScrollMetrics, Transcript};
use crate::state::ui::{ComposerState, UploadState};
use crate::view::{
    CatalogView, ComposerView, TranscriptView, UploadView, render_catalog, render_composer, render_transcript,
    render_upload,
};

pub use chat::ExchangeOutcome;
pub use upload::{UploadOutcome, validate_upload};

/// Everything the controller owns, locked as one unit.
#[derive(Debug, Default)]
pub(crate) struct SessionModel {
    pub session: SessionState,
    pub transcript: Transcript,
    pub composer: ComposerState,
    pub upload: UploadState,
    pub notices: Vec<Notice>,
}

struct Inner {
    api: Arc<dyn DocsApi>,
    timings: PipelineTimings,
    model: Mutex<SessionModel>,
    events: Mutex<Option<mpsc::UnboundedSender<SessionEvent>>>,
}

#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionController {
    pub fn new(api: Arc<dyn DocsApi>) -> Self {
        Self::with_timings(api, PipelineTimings::default())
    }

    pub fn with_timings(api: Arc<dyn DocsApi>, timings: PipelineTimings) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                timings,
                model: Mutex::new(SessionModel::default()),
                events: Mutex::new(None),
            }),
        }
    }

    /// Start receiving render events. A later call replaces the earlier receiver.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        *lock(&self.inner.events) = Some(tx);
        rx
    }

    pub(crate) fn api(&self) -> &dyn DocsApi {
        self.inner.api.as_ref()
    }

    pub(crate) fn timings(&self) -> PipelineTimings {
        self.inner.timings
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut SessionModel) -> R) -> R {
        f(&mut *lock(&self.inner.model))
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&SessionModel) -> R) -> R {
        f(&*lock(&self.inner.model))
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        let mut events = lock(&self.inner.events);
        let closed = match events.as_ref() {
            Some(tx) => tx.send(event).is_err(),
            None => false,
        };
        if closed {
            *events = None;
        }
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.update(|m| m.notices.push(notice.clone()));
        self.emit(SessionEvent::Notice(notice));
    }

    // =========================================================================
    // SNAPSHOTS
    // =========================================================================

    #[must_use]
    pub fn session(&self) -> SessionState {
        self.read(|m| m.session.clone())
    }

    #[must_use]
    pub fn transcript(&self) -> Transcript {
        self.read(|m| m.transcript.clone())
    }

    #[must_use]
    pub fn composer(&self) -> ComposerState {
        self.read(|m| m.composer.clone())
    }

    #[must_use]
    pub fn upload(&self) -> UploadState {
        self.read(|m| m.upload.clone())
    }

    #[must_use]
    pub fn catalog_view(&self) -> CatalogView {
        self.read(|m| render_catalog(&m.session))
    }

    #[must_use]
    pub fn transcript_view(&self) -> TranscriptView {
        self.read(|m| render_transcript(&m.transcript))
    }

    #[must_use]
    pub fn composer_view(&self) -> ComposerView {
        self.read(|m| render_composer(&m.composer))
    }

    #[must_use]
    pub fn upload_view(&self) -> UploadView {
        self.read(|m| render_upload(&m.upload))
    }

    /// Take every notice surfaced since the last call, oldest first.
    pub fn drain_notices(&self) -> Vec<Notice> {
        self.update(|m| std::mem::take(&mut m.notices))
    }

    // =========================================================================
    // TRANSCRIPT SCROLLING
    // =========================================================================

    pub fn on_scroll(&self, metrics: ScrollMetrics) {
        let changed = self.update(|m| {
            let before = m.transcript.jump_visible;
            m.transcript.on_scroll(metrics);
            before != m.transcript.jump_visible
        });
        if changed {
            self.emit(SessionEvent::TranscriptChanged);
        }
    }

    pub fn jump_to_latest(&self) {
        self.update(|m| m.transcript.jump_to_latest());
        self.emit(SessionEvent::TranscriptChanged);
    }

    /// Consume a pending scroll-to-latest request, if any.
    pub fn take_scroll_request(&self) -> bool {
        self.update(|m| m.transcript.take_scroll_request())
    }

    // =========================================================================
    // HEALTH
    // =========================================================================

    /// Probe the backend.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error unchanged; this is the one
    /// command that does not fold failures into a notice.
    pub async fn health(&self) -> Result<Health, ClientError> {
        let health = self.api().health().await?;
        tracing::debug!(status = %health.status, "session: backend healthy");
        Ok(health)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
