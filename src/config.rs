//! Client configuration parsed from environment variables.

use std::time::Duration;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Config for an explicit backend URL with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the URL is empty or not `http(s)://`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, timeouts: Timeouts::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `DOCUCHAT_BASE_URL`: default `http://localhost:8000`
    /// - `DOCUCHAT_REQUEST_TIMEOUT_SECS`: default 120
    /// - `DOCUCHAT_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL is malformed.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        Self::from_lookup_with_base_url(None, lookup)
    }

    /// Like [`ClientConfig::from_env`], but an explicit `base_url` wins and
    /// `DOCUCHAT_BASE_URL` is not read at all.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the chosen base URL is malformed.
    pub fn from_env_with_base_url(base_url: Option<&str>) -> Result<Self, ClientError> {
        Self::from_lookup_with_base_url(base_url, |key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env_with_base_url`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the chosen base URL is malformed.
    pub fn from_lookup_with_base_url(
        base_url: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ClientError> {
        let base_url = match base_url {
            Some(url) => url.to_string(),
            None => lookup("DOCUCHAT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };
        let timeouts = Timeouts {
            request_secs: parse_u64(lookup("DOCUCHAT_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("DOCUCHAT_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { base_url: normalize_base_url(&base_url)?, timeouts })
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match host {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(ClientError::Config(format!("base URL must be http(s)://host, got '{raw}'"))),
    }
}

// =============================================================================
// PIPELINE TIMINGS
// =============================================================================

/// Fixed cadences for the upload pipeline's cosmetic progress and delayed resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineTimings {
    /// Interval between cosmetic progress increments.
    pub progress_tick: Duration,
    /// Percentage points added per tick.
    pub progress_step: u8,
    /// Highest percentage shown while the request is pending.
    pub progress_cap: u8,
    /// Pause on the completed view before the modal is dismissed.
    pub success_dismiss_delay: Duration,
    /// Pause on the failure message before the upload area resets.
    pub failure_reset_delay: Duration,
}

impl Default for PipelineTimings {
    fn default() -> Self {
        Self {
            progress_tick: Duration::from_millis(200),
            progress_step: 10,
            progress_cap: 90,
            success_dismiss_delay: Duration::from_millis(1000),
            failure_reset_delay: Duration::from_millis(3000),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
