use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error};

use crate::notification::{NotificationRecord, Severity, Toaster};
use crate::surface::Navigator;

pub const GENERIC_ERROR_MESSAGE: &str =
    "An internal error occurred during the operation. Please, try again.";
pub const ERROR_TOAST_DURATION: Duration = Duration::from_millis(3000);
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// The parts of a failed response the reporter looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFailure {
    pub status: u16,
    pub body: String,
}

impl HttpFailure {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == STATUS_UNAUTHORIZED
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDisposition {
    RedirectToLogin,
    Notify(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorBodyError {
    #[error("invalid json: {0}")]
    Json(String),
    #[error("error body is not an object")]
    NotObject,
    #[error("error body carries no messages")]
    Empty,
}

/// Decides what a failed response turns into. A 401 always redirects; the
/// body is not even looked at.
#[must_use]
pub fn classify_failure(failure: &HttpFailure) -> ErrorDisposition {
    if failure.is_unauthorized() {
        return ErrorDisposition::RedirectToLogin;
    }

    match first_error_message(&failure.body) {
        Ok(message) => ErrorDisposition::Notify(message),
        Err(parse_error) => {
            error!(
                status = failure.status,
                error = %parse_error,
                raw_body = %failure.body,
                "failed to parse error response"
            );
            ErrorDisposition::Notify(GENERIC_ERROR_MESSAGE.to_string())
        }
    }
}

/// First field message of a `{ field: message }` error body, in document
/// order.
pub fn first_error_message(body: &str) -> Result<String, ErrorBodyError> {
    let parsed: Value =
        serde_json::from_str(body).map_err(|error| ErrorBodyError::Json(error.to_string()))?;
    let Value::Object(fields) = parsed else {
        return Err(ErrorBodyError::NotObject);
    };
    let Some((field, value)) = fields.into_iter().next() else {
        return Err(ErrorBodyError::Empty);
    };
    debug!(%field, "using first error field");
    Ok(render_message(value))
}

fn render_message(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Array(items) => items
            .into_iter()
            .map(render_message)
            .collect::<Vec<_>>()
            .join(","),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub trait FailureSink {
    fn report(&self, failure: &HttpFailure);
}

#[derive(Debug, Clone)]
pub struct ErrorReporter<N, T> {
    navigator: N,
    toaster: T,
    login_path: String,
    toast_duration: Duration,
}

impl<N: Navigator, T: Toaster> ErrorReporter<N, T> {
    pub fn new(
        navigator: N,
        toaster: T,
        login_path: impl Into<String>,
        toast_duration: Duration,
    ) -> Self {
        Self {
            navigator,
            toaster,
            login_path: login_path.into(),
            toast_duration,
        }
    }
}

impl<N: Navigator, T: Toaster> FailureSink for ErrorReporter<N, T> {
    fn report(&self, failure: &HttpFailure) {
        match classify_failure(failure) {
            ErrorDisposition::RedirectToLogin => {
                debug!(login_path = %self.login_path, "session expired; redirecting");
                self.navigator.redirect(&self.login_path);
            }
            ErrorDisposition::Notify(message) => {
                self.toaster.toast(NotificationRecord::new(
                    message,
                    Severity::Error,
                    self.toast_duration,
                ));
            }
        }
    }
}
