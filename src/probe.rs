//! One-shot startup check that the prediction service is reachable.
//!
//! Purely advisory: the outcome may produce a notification, but it never
//! touches the submission workflow.

use crate::client::PredictionService;
use crate::config::NOTIFICATION_DISMISS_MS;
use crate::model::HealthStatus;
use log::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Reachable(Option<HealthStatus>),
    /// The server answered with a non-2xx status.
    Unhealthy(u16),
    Unreachable(String),
}

/// A dismissible toast shown on top of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub dismiss_after_ms: u32,
}

impl ProbeOutcome {
    pub fn advisory(&self) -> Option<Notification> {
        let message = match self {
            ProbeOutcome::Reachable(_) => return None,
            ProbeOutcome::Unhealthy(status) => format!(
                "Backend server responded with status {}. Predictions may fail.",
                status
            ),
            ProbeOutcome::Unreachable(_) => {
                "Backend server not detected. Please ensure the prediction server is running."
                    .to_string()
            }
        };
        Some(Notification {
            message,
            dismiss_after_ms: NOTIFICATION_DISMISS_MS,
        })
    }
}

pub async fn probe<S: PredictionService>(service: &S) -> ProbeOutcome {
    match service.health().await {
        Ok(report) if report.is_success() => {
            match &report.details {
                Some(details) => {
                    info!("Backend connection successful: {:?}", details);
                    if details.model_loaded == Some(false)
                        || details.label_encoder_loaded == Some(false)
                    {
                        warn!("Backend is up but its model is not loaded");
                    }
                }
                None => info!("Backend connection successful"),
            }
            ProbeOutcome::Reachable(report.details)
        }
        Ok(report) => {
            warn!("Backend health check failed with status {}", report.status);
            ProbeOutcome::Unhealthy(report.status)
        }
        Err(e) => {
            warn!("Cannot connect to backend: {}", e);
            ProbeOutcome::Unreachable(e.to_string())
        }
    }
}
