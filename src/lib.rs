//! Crop Advisor core: validates soil and climate measurements, asks the
//! recommendation service for a crop, and turns the answer into views.
//!
//! The page itself lives in `main.rs`; everything here is independent of the
//! browser so it can be exercised from ordinary tests.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod interpreter;
pub mod model;
pub mod probe;
pub mod validation;
pub mod view;

pub use client::{classify_response, HttpPredictionClient, PredictionService};
pub use config::AppConfig;
pub use controller::{SubmissionState, SubmitOutcome, UiSlots, WorkflowController};
pub use error::{panic_detail, ClientError, FailureKind, RenderError};
pub use interpreter::{interpret, Interpretation};
pub use model::{
    Field, HealthReport, HealthStatus, MeasurementInput, PredictionResponse, RankedCrop, RawFields,
};
pub use probe::{probe, Notification, ProbeOutcome};
pub use validation::{validate, ValidationOutcome};
pub use view::{
    render_alternatives, render_error, render_primary, render_unexpected, AlternativesView, ChartRenderer,
    ChartSeries, ChartSurface, ErrorView, PrimaryView,
};
