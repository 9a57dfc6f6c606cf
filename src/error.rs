//! Error types for the prediction workflow.

use std::any::Any;
use thiserror::Error;

/// Coarse failure classes reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Service,
    Malformed,
    Unexpected,
}

/// Failure of a call to the prediction service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Transport failure or timeout; no response was received.
    #[error("Network error: {0}. Please ensure the backend server is running.")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// A 2xx body that does not have the documented shape.
    #[error("The server returned a response that could not be understood.")]
    MalformedResponse(String),
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Network(_) => FailureKind::Network,
            ClientError::Service { .. } => FailureKind::Service,
            ClientError::MalformedResponse(_) => FailureKind::Malformed,
        }
    }

    /// Text shown to the operator in the error view.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Failure while pushing a view into the page.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("could not update {slot}: {reason}")]
    Slot { slot: &'static str, reason: String },
}

/// Text carried by a panic payload; `panic!` produces `&str` or `String`.
pub fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
