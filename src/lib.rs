//! DocuChat session controller.
//!
//! UI-toolkit independent core for a document Q&A client: the session
//! state, the upload and chat pipelines, and pure view functions. Front ends
//! call named commands on [`SessionController`], listen for
//! [`SessionEvent`]s and re-render from the `view` module.
//!
//! ```text
//! front end ──commands──▶ SessionController ──DocsApi──▶ backend
//!     ▲                         │
//!     └──── SessionEvent ◀──────┘
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod format;
pub mod state;
pub mod view;

pub use api::{DocsApi, HttpDocsApi};
pub use config::{ClientConfig, PipelineTimings};
pub use controller::SessionController;
pub use error::{ClientError, ErrorCode, ValidationError};
pub use event::{Notice, NoticeLevel, SessionEvent};
