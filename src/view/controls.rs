//! Composer and upload-area views.

use crate::state::ui::{ComposerState, UploadPhase, UploadState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerView {
    pub input_enabled: bool,
    pub send_enabled: bool,
    pub placeholder: &'static str,
    pub text: String,
    pub focused: bool,
}

#[must_use]
pub fn render_composer(state: &ComposerState) -> ComposerView {
    let enabled = state.is_enabled();
    ComposerView {
        input_enabled: enabled,
        send_enabled: enabled,
        placeholder: state.placeholder(),
        text: state.text.clone(),
        focused: state.focused,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub modal_open: bool,
    /// The drop area shows while idle; the progress block replaces it otherwise.
    pub drop_area_visible: bool,
    pub progress_visible: bool,
    pub progress: u8,
    pub status: String,
    pub file_name: Option<String>,
    pub drag_over: bool,
}

impl UploadView {
    /// CSS width of the progress bar fill.
    #[must_use]
    pub fn progress_width(&self) -> String {
        format!("{}%", self.progress)
    }
}

#[must_use]
pub fn render_upload(state: &UploadState) -> UploadView {
    let idle = state.phase == UploadPhase::Idle;
    UploadView {
        modal_open: state.modal_open,
        drop_area_visible: idle,
        progress_visible: !idle,
        progress: state.progress,
        status: state.status.clone(),
        file_name: state.file_name.clone(),
        drag_over: state.drag_over,
    }
}

#[cfg(test)]
#[path = "controls_test.rs"]
mod tests;
