//! Client error taxonomy.
//!
//! DESIGN
//! ======
//! Every failure the session can hit falls into one of four runtime kinds:
//! validation (caught before any network call), network (request never
//! completed), backend (non-2xx with an optional `detail`), and malformed
//! response (2xx whose body does not parse). Pipelines never propagate these
//! past their own boundary; they turn them into notices or transcript
//! entries via [`ClientError::user_message`].

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code for structured logging.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

// =============================================================================
// VALIDATION
// =============================================================================

/// A candidate upload was rejected locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Extension is not one of `.pdf`, `.docx`, `.txt`.
    #[error("Invalid file type. Please upload .pdf, .docx, .txt files.")]
    UnsupportedType { extension: Option<String> },

    /// File is larger than the 10 MiB upload limit.
    #[error("File too large. Maximum size is 10MB.")]
    TooLarge { size: u64 },
}

impl ErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "E_UNSUPPORTED_TYPE",
            Self::TooLarge { .. } => "E_TOO_LARGE",
        }
    }
}

// =============================================================================
// CLIENT ERROR
// =============================================================================

/// Errors produced by backend API calls and client construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Local validation rejected the input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The HTTP request never completed.
    #[error("request failed: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}")]
    Backend { status: u16, detail: Option<String> },

    /// The backend answered 2xx but the body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A configuration value was rejected.
    #[error("config error: {0}")]
    Config(String),
}

impl ClientError {
    /// Message shown to the user for this failure.
    ///
    /// Backend errors surface their `detail` when the body carried one and
    /// `fallback` otherwise. Every other kind surfaces its own description.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Backend { detail: Some(detail), .. } if !detail.trim().is_empty() => detail.clone(),
            Self::Backend { .. } => fallback.to_owned(),
            other => other.to_string(),
        }
    }
}

impl ErrorCode for ClientError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Network(_) => "E_NETWORK",
            Self::Backend { .. } => "E_BACKEND",
            Self::MalformedResponse(_) => "E_MALFORMED_RESPONSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Config(_) => "E_CONFIG",
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
