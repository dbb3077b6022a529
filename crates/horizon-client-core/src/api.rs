use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::account::Profile;
use crate::error_report::HttpFailure;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("failed to decode response (status={status}): {message}")]
    Decode { status: u16, message: String },
}

impl ApiError {
    /// Projects the error onto what the error reporter classifies. Transport
    /// and decode failures carry no usable body, so they end up as the
    /// generic message.
    #[must_use]
    pub fn failure(&self) -> HttpFailure {
        match self {
            Self::Status { status, body } => HttpFailure::new(*status, body.clone()),
            Self::Transport(_) => HttpFailure::new(0, String::new()),
            Self::Decode { status, .. } => HttpFailure::new(*status, String::new()),
        }
    }
}

/// Backend calls the shell makes. Futures are `!Send`; everything runs on
/// the page's event loop.
#[async_trait(?Send)]
pub trait StorefrontApi {
    async fn fetch_account(&self) -> Result<Profile, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
}

#[must_use]
pub fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

pub fn check_status(status: u16, raw: &str) -> Result<(), ApiError> {
    if is_success(status) {
        return Ok(());
    }
    Err(ApiError::Status {
        status,
        body: raw.to_string(),
    })
}

pub fn decode_response<T: DeserializeOwned>(status: u16, raw: &str) -> Result<T, ApiError> {
    check_status(status, raw)?;
    serde_json::from_str(raw).map_err(|error| ApiError::Decode {
        status,
        message: error.to_string(),
    })
}
