//! Upload pipeline.
//!
//! One attempt runs `Idle → Validating → Uploading → {Succeeded, Failed} →
//! Idle`. While the request is in flight a cosmetic progress counter ticks
//! toward the cap; the request and the ticker are joined at one `select!`
//! so the ticker stops exactly once, when the request settles.
//!
//! Every write to the upload view is tagged with the generation the attempt
//! started in. Dismissing the modal resets the view into a new generation,
//! after which the abandoned attempt's view writes are dropped.

use std::future::Future;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::SessionController;
use crate::api::{UploadFile, UploadReceipt};
use crate::error::{ErrorCode, ValidationError};
use crate::event::{Notice, SessionEvent};
use crate::state::ui::{UploadPhase, UploadState};

pub const ALLOWED_EXTENSIONS: [&str; 3] = [".pdf", ".docx", ".txt"];
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const STATUS_UPLOADING: &str = "Uploading...";
pub const STATUS_COMPLETE: &str = "Processing complete!";
pub const UPLOAD_FAILED: &str = "Upload failed";

/// Check a candidate file before any network call.
///
/// # Errors
///
/// Returns the first rule the file breaks: extension, then size.
pub fn validate_upload(file: &UploadFile) -> Result<(), ValidationError> {
    let extension = file.extension();
    let allowed = extension
        .as_deref()
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext));
    if !allowed {
        return Err(ValidationError::UnsupportedType { extension });
    }
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge { size: file.size() });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Failed local validation; nothing was sent.
    Rejected(ValidationError),
    /// Another attempt owns the upload view.
    Busy,
    Uploaded(UploadReceipt),
    /// The request failed; carries the reason shown in the status line.
    Failed(String),
}

impl SessionController {
    pub fn open_upload_modal(&self) {
        self.update(|m| m.upload.modal_open = true);
        self.emit_upload();
    }

    /// Dismiss the modal. Any attempt still running keeps going but no longer
    /// writes into the upload view.
    pub fn close_upload_modal(&self) {
        self.update(|m| {
            m.upload.modal_open = false;
            m.upload.reset();
        });
        self.emit_upload();
    }

    /// Highlight the drop area while a file is dragged over it.
    pub fn set_drag_over(&self, active: bool) {
        let changed = self.update(|m| {
            let changed = m.upload.drag_over != active;
            m.upload.drag_over = active;
            changed
        });
        if changed {
            self.emit_upload();
        }
    }

    /// Validate and upload one file, driving the progress view until it settles.
    pub async fn upload_file(&self, file: UploadFile) -> UploadOutcome {
        let claimed = self.update(|m| {
            if m.upload.is_busy() {
                return None;
            }
            m.upload.phase = UploadPhase::Validating;
            m.upload.file_name = Some(file.name.clone());
            Some(m.upload.generation)
        });
        let Some(generation) = claimed else {
            debug!(file = %file.name, "upload: view busy, attempt ignored");
            return UploadOutcome::Busy;
        };
        self.emit_upload();

        if let Err(e) = validate_upload(&file) {
            warn!(file = %file.name, size = file.size(), code = e.error_code(), "upload: rejected");
            self.update_upload(generation, UploadState::reset);
            self.notify(Notice::error(e.to_string()));
            return UploadOutcome::Rejected(e);
        }

        self.update_upload(generation, |u| {
            u.phase = UploadPhase::Uploading;
            u.progress = 0;
            u.status = STATUS_UPLOADING.to_owned();
        });
        info!(file = %file.name, size = file.size(), "upload: started");

        let result = self.drive_progress(generation, self.api().upload_document(&file)).await;
        let timings = self.timings();

        match result {
            Ok(receipt) => {
                info!(file = %file.name, id = ?receipt.id, "upload: complete");
                self.update_upload(generation, |u| {
                    u.phase = UploadPhase::Succeeded;
                    u.progress = 100;
                    u.status = STATUS_COMPLETE.to_owned();
                });
                tokio::time::sleep(timings.success_dismiss_delay).await;
                self.update_upload(generation, |u| {
                    u.modal_open = false;
                    u.reset();
                });
                self.load_documents().await;
                self.notify(Notice::success(format!("Document \"{}\" uploaded successfully!", file.name)));
                UploadOutcome::Uploaded(receipt)
            }
            Err(e) => {
                let reason = e.user_message(UPLOAD_FAILED);
                error!(file = %file.name, error = %e, code = e.error_code(), "upload: failed");
                self.update_upload(generation, |u| {
                    u.phase = UploadPhase::Failed;
                    u.status = format!("{UPLOAD_FAILED}: {reason}");
                });
                tokio::time::sleep(timings.failure_reset_delay).await;
                self.update_upload(generation, UploadState::reset);
                UploadOutcome::Failed(reason)
            }
        }
    }

    /// Await `request` while ticking cosmetic progress. The ticker is dropped
    /// as soon as the request resolves.
    async fn drive_progress<T>(&self, generation: u64, request: impl Future<Output = T>) -> T {
        let timings = self.timings();
        let mut ticker = tokio::time::interval_at(Instant::now() + timings.progress_tick, timings.progress_tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(request);

        loop {
            tokio::select! {
                biased;
                result = &mut request => return result,
                _ = ticker.tick() => {
                    self.update_upload(generation, |u| {
                        let next = u.progress.saturating_add(timings.progress_step);
                        if next <= timings.progress_cap {
                            u.progress = next;
                        }
                    });
                }
            }
        }
    }

    /// Apply `f` to the upload view if it is still on `generation`.
    fn update_upload(&self, generation: u64, f: impl FnOnce(&mut UploadState)) -> bool {
        let applied = self.update(|m| {
            if m.upload.generation != generation {
                return false;
            }
            f(&mut m.upload);
            true
        });
        if applied {
            self.emit_upload();
        } else {
            debug!(generation, "upload: view moved on, write dropped");
        }
        applied
    }

    fn emit_upload(&self) {
        let (phase, progress) = self.read(|m| (m.upload.phase, m.upload.progress));
        self.emit(SessionEvent::UploadChanged { phase, progress });
    }
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
