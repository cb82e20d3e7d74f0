//! Chat exchange pipeline.
//!
//! `send_question` appends the user message and a typing row, asks the
//! backend, then swaps the typing row for the answer or an error entry. An
//! [`ExchangeGuard`] re-enables the composer on every exit path, including
//! the exchange future being dropped mid-request.

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::SessionController;
use crate::api::AskRequest;
use crate::error::ErrorCode;
use crate::event::SessionEvent;
use crate::state::transcript::Message;

/// Excerpts requested per question.
pub const N_RESULTS: u32 = 5;
pub const ANSWER_FAILED: &str = "Failed to get answer";
pub const CANCELLED_REASON: &str = "request was cancelled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// Empty or whitespace-only question.
    Ignored,
    /// The composer was disabled (pending exchange or empty catalog).
    Rejected,
    Answered { answer: String, sources: usize },
    /// The request failed; carries the reason appended to the transcript.
    Errored(String),
}

/// Restores the composer when an exchange ends, however it ends.
struct ExchangeGuard<'a> {
    session: &'a SessionController,
    typing_id: Uuid,
}

impl Drop for ExchangeGuard<'_> {
    fn drop(&mut self) {
        let typing_id = self.typing_id;
        let abandoned = self.session.update(|m| {
            let abandoned = m.transcript.remove_typing(typing_id);
            if abandoned {
                m.transcript.push_message(Message::assistant(format!("Error: {CANCELLED_REASON}"), Vec::new()));
            }
            m.composer.pending = false;
            m.composer.focused = true;
            abandoned
        });
        if abandoned {
            warn!("chat: exchange dropped before completion");
            self.session.emit(SessionEvent::TranscriptChanged);
        }
        self.session.emit(SessionEvent::ComposerChanged);
    }
}

impl SessionController {
    /// Replace the composer text.
    pub fn set_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|m| m.composer.text = text);
        self.emit(SessionEvent::ComposerChanged);
    }

    /// Send whatever is in the composer.
    pub async fn send_draft(&self) -> ExchangeOutcome {
        let draft = self.read(|m| m.composer.text.clone());
        self.send_question(&draft).await
    }

    /// Run one question/answer exchange, scoped to the selected document if any.
    pub async fn send_question(&self, text: &str) -> ExchangeOutcome {
        let question = text.trim();
        if question.is_empty() {
            return ExchangeOutcome::Ignored;
        }

        let started = self.update(|m| {
            if !m.composer.is_enabled() {
                return None;
            }
            m.composer.pending = true;
            m.composer.focused = false;
            m.composer.text.clear();
            m.transcript.push_message(Message::user(question));
            let typing_id = m.transcript.push_typing();
            Some((typing_id, m.session.selected_document_id))
        });
        let Some((typing_id, document_id)) = started else {
            debug!("chat: composer disabled, question rejected");
            return ExchangeOutcome::Rejected;
        };
        self.emit(SessionEvent::ComposerChanged);
        self.emit(SessionEvent::TranscriptChanged);

        let _guard = ExchangeGuard { session: self, typing_id };
        let request = AskRequest { question: question.to_owned(), document_id, n_results: N_RESULTS };
        info!(document_id = ?document_id, question_len = question.len(), "chat: question sent");

        let result = self.api().ask(&request).await;

        let outcome = self.update(|m| {
            m.transcript.remove_typing(typing_id);
            match result {
                Ok(answer) => {
                    let outcome = ExchangeOutcome::Answered {
                        answer: answer.answer.clone(),
                        sources: answer.sources.len(),
                    };
                    m.transcript.push_message(Message::assistant(answer.answer, answer.sources));
                    Ok(outcome)
                }
                Err(e) => {
                    let reason = e.user_message(ANSWER_FAILED);
                    m.transcript.push_message(Message::assistant(format!("Error: {reason}"), Vec::new()));
                    Err((e, reason))
                }
            }
        });
        self.emit(SessionEvent::TranscriptChanged);

        match outcome {
            Ok(outcome) => {
                if let ExchangeOutcome::Answered { sources, .. } = &outcome {
                    info!(sources, "chat: answer received");
                }
                outcome
            }
            Err((e, reason)) => {
                warn!(error = %e, code = e.error_code(), "chat: ask failed");
                ExchangeOutcome::Errored(reason)
            }
        }
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
