//! Application-level configuration constants.

use std::time::Duration;

// Service
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const PREDICT_PATH: &str = "predict";
pub const HEALTH_PATH: &str = "health";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Result presentation
pub const MAX_ALTERNATIVES: usize = 2;
pub const CHART_CANVAS_ID: &str = "probChart";
pub const CHART_DATASET_LABEL: &str = "Confidence (%)";
pub const GENERIC_SERVICE_ERROR: &str = "An error occurred";

// Notifications
pub const NOTIFICATION_DISMISS_MS: u32 = 5_000;

/// Settings fixed once at startup and never changed during a session.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Build the config from the `CROP_API_BASE_URL` value baked in at
    /// compile time, falling back to the local development server.
    pub fn from_build_env() -> Self {
        match option_env!("CROP_API_BASE_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_API_BASE_URL),
        }
    }

    /// Absolute URL for a service endpoint such as `predict` or `/health`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
