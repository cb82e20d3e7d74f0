//! Transcript views: message bubbles, source citations and the typing row.

use std::fmt::Write as _;

use crate::api::{DocumentId, Source};
use crate::format::{escape_html, format_similarity};
use crate::state::transcript::{Entry, Message, Role, Transcript};

pub const TYPING_TEXT: &str = "Thinking...";
pub const SOURCES_TITLE: &str = "📚 Sources";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceView {
    pub document_id: DocumentId,
    /// `Document <id> • Similarity: <pct>%`
    pub meta: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub role: Role,
    pub label: &'static str,
    pub content: String,
    pub sources: Vec<SourceView>,
}

impl MessageView {
    #[must_use]
    pub fn to_html(&self) -> String {
        let role = match self.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        let mut sources = String::new();
        if !self.sources.is_empty() {
            let _ = write!(sources, "<div class=\"sources\"><div class=\"sources-title\">{SOURCES_TITLE}</div>");
            for source in &self.sources {
                let _ = write!(
                    sources,
                    "<div class=\"source-item\"><div class=\"source-meta\">{}</div><div class=\"source-text\">{}</div></div>",
                    escape_html(&source.meta),
                    escape_html(&source.text),
                );
            }
            sources.push_str("</div>");
        }
        format!(
            "<div class=\"message {role}\"><div class=\"message-label\">{}</div><div class=\"message-content\">{}{sources}</div></div>",
            self.label,
            escape_html(&self.content),
        )
    }

    /// Plain-text rendering for terminals.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!("{}: {}", self.label, self.content);
        if !self.sources.is_empty() {
            let _ = write!(out, "\n  {SOURCES_TITLE}");
            for source in &self.sources {
                let _ = write!(out, "\n    [{}] {}", source.meta, source.text);
            }
        }
        out
    }
}

fn label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    }
}

fn render_source(source: &Source) -> SourceView {
    SourceView {
        document_id: source.document_id,
        meta: format!("Document {} • Similarity: {}", source.document_id, format_similarity(source.similarity)),
        text: source.text.clone(),
    }
}

#[must_use]
pub fn render_message(message: &Message) -> MessageView {
    MessageView {
        role: message.role,
        label: label(message.role),
        content: message.content.clone(),
        sources: message.sources.iter().map(render_source).collect(),
    }
}

// =============================================================================
// TRANSCRIPT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryView {
    Message(MessageView),
    Typing,
}

impl EntryView {
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Message(m) => m.to_html(),
            Self::Typing => format!(
                "<div class=\"message assistant typing-indicator\"><div class=\"message-label\">Assistant</div><div class=\"message-content\">{TYPING_TEXT}</div></div>"
            ),
        }
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Message(m) => m.to_text(),
            Self::Typing => format!("Assistant: {TYPING_TEXT}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptView {
    pub entries: Vec<EntryView>,
    pub welcome_visible: bool,
    pub jump_visible: bool,
}

#[must_use]
pub fn render_transcript(transcript: &Transcript) -> TranscriptView {
    let entries = transcript
        .entries()
        .iter()
        .map(|entry| match entry {
            Entry::Message(m) => EntryView::Message(render_message(m)),
            Entry::Typing { .. } => EntryView::Typing,
        })
        .collect();
    TranscriptView {
        entries,
        welcome_visible: transcript.welcome_visible,
        jump_visible: transcript.jump_visible,
    }
}

#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;
