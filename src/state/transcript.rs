//! Chat transcript model.
//!
//! Append-only log of user/assistant messages plus one ephemeral entry kind,
//! the typing indicator, which is removed (never edited) once the exchange
//! finishes. Scroll bookkeeping lives here too so every front end applies
//! the same "jump to latest" rule.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::Source;

/// Distance from the bottom, in pixels, past which the jump control shows.
pub const JUMP_THRESHOLD_PX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), role: Role::User, content: content.into(), sources: Vec::new() }
    }

    pub fn assistant(content: impl Into<String>, sources: Vec<Source>) -> Self {
        Self { id: Uuid::new_v4(), role: Role::Assistant, content: content.into(), sources }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Message(Message),
    /// Placeholder shown while an answer is pending.
    Typing { id: Uuid },
}

/// Viewport measurements reported by the front end on scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn is_far_from_bottom(&self) -> bool {
        self.scroll_height - self.scroll_top > self.client_height + JUMP_THRESHOLD_PX
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    entries: Vec<Entry>,
    pub welcome_visible: bool,
    pub jump_visible: bool,
    scroll_requested: bool,
}

impl Default for Transcript {
    fn default() -> Self {
        Self { entries: Vec::new(), welcome_visible: true, jump_visible: false, scroll_requested: false }
    }
}

impl Transcript {
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Message(m) => Some(m),
            Entry::Typing { .. } => None,
        })
    }

    /// Append a message. The first one hides the welcome banner.
    pub fn push_message(&mut self, message: Message) {
        self.welcome_visible = false;
        self.entries.push(Entry::Message(message));
        self.scroll_requested = true;
    }

    /// Append a typing indicator and return its id for later removal.
    pub fn push_typing(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(Entry::Typing { id });
        self.scroll_requested = true;
        id
    }

    /// Remove the typing indicator with `id`. Returns whether it was present.
    pub fn remove_typing(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !matches!(e, Entry::Typing { id: t } if *t == id));
        self.entries.len() != before
    }

    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        self.jump_visible = metrics.is_far_from_bottom();
    }

    /// Activate the jump control: request a scroll to the bottom.
    pub fn jump_to_latest(&mut self) {
        self.scroll_requested = true;
    }

    /// Consume a pending scroll-to-latest request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }
}

#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;
