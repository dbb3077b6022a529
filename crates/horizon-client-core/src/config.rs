use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::header::{HeaderConfig, UserMenuItem};

pub const DEFAULT_ACCOUNT_ENDPOINT: &str = "/api/account/";
pub const DEFAULT_LOGOUT_ENDPOINT: &str = "/api/auth/logout/";
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login/";
pub const DEFAULT_SELLER_PATH: &str = "/seller";
pub const DEFAULT_ERROR_TOAST_DURATION_MS: u64 = 3_000;
pub const DEFAULT_TOAST_EXIT_DELAY_MS: u64 = 350;
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Longest delay a browser timer honors; larger values fire at once.
pub const MAX_TIMER_DELAY_MS: u64 = 0x7fff_ffff;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid json: {0}")]
    Json(String),
    #[error("{field} must be a path starting with '/', got {value:?}")]
    InvalidPath { field: &'static str, value: String },
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
    #[error("{field} must be at most {max} ms, got {value}", max = MAX_TIMER_DELAY_MS)]
    DurationTooLong { field: &'static str, value: u64 },
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

/// Page-level settings. Every field has a default, so pages only override
/// what differs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorefrontConfig {
    pub account_endpoint: String,
    pub logout_endpoint: String,
    pub login_path: String,
    pub seller_path: String,
    pub error_toast_duration_ms: u64,
    pub toast_exit_delay_ms: u64,
    pub active_menu_item: Option<UserMenuItem>,
    pub log_level: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            account_endpoint: DEFAULT_ACCOUNT_ENDPOINT.to_string(),
            logout_endpoint: DEFAULT_LOGOUT_ENDPOINT.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            seller_path: DEFAULT_SELLER_PATH.to_string(),
            error_toast_duration_ms: DEFAULT_ERROR_TOAST_DURATION_MS,
            toast_exit_delay_ms: DEFAULT_TOAST_EXIT_DELAY_MS,
            active_menu_item: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl StorefrontConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|error| ConfigError::Json(error.to_string()))?;
        config.validated()
    }

    /// Normalizes paths (trimmed) and checks every field.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.account_endpoint = normalize_path("accountEndpoint", &self.account_endpoint)?;
        self.logout_endpoint = normalize_path("logoutEndpoint", &self.logout_endpoint)?;
        self.login_path = normalize_path("loginPath", &self.login_path)?;
        self.seller_path = normalize_path("sellerPath", &self.seller_path)?;
        check_duration("errorToastDurationMs", self.error_toast_duration_ms)?;
        check_duration("toastExitDelayMs", self.toast_exit_delay_ms)?;
        self.log_level_filter()?;
        Ok(self)
    }

    #[must_use]
    pub fn error_toast_duration(&self) -> Duration {
        Duration::from_millis(self.error_toast_duration_ms)
    }

    #[must_use]
    pub fn toast_exit_delay(&self) -> Duration {
        Duration::from_millis(self.toast_exit_delay_ms)
    }

    #[must_use]
    pub fn header_config(&self) -> HeaderConfig {
        HeaderConfig {
            active_item: self.active_menu_item,
        }
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

fn check_duration(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::ZeroDuration { field });
    }
    if value > MAX_TIMER_DELAY_MS {
        return Err(ConfigError::DurationTooLong { field, value });
    }
    Ok(())
}

pub fn normalize_path(field: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('/') || trimmed.starts_with("//") {
        return Err(ConfigError::InvalidPath {
            field,
            value: raw.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
