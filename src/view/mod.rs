//! Pure view functions.
//!
//! DESIGN
//! ======
//! Each function maps a state snapshot to a plain view description. Views
//! carry raw text; the `to_html` renderers escape every user-supplied
//! string on the way into markup. Rendering the same state twice yields
//! the same output.

pub mod catalog;
pub mod controls;
pub mod transcript;

pub use catalog::{CatalogItemView, CatalogView, DocumentDetailView, render_catalog, render_document_detail};
pub use controls::{ComposerView, UploadView, render_composer, render_upload};
pub use transcript::{EntryView, MessageView, SourceView, TranscriptView, render_message, render_transcript};
