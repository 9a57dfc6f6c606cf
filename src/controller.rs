//! Submission lifecycle: validate, call the service, interpret, render.
//!
//! The controller runs on the page's single event loop. Its state lives in a
//! [`Cell`] and the chart renderer in a [`RefCell`]; neither is borrowed
//! across an `.await`. Only one submission can be in flight: a submit that
//! arrives while busy is ignored.

use crate::client::PredictionService;
use crate::error::{FailureKind, RenderError};
use crate::interpreter::interpret;
use crate::model::{MeasurementInput, PredictionResponse, RawFields};
use crate::validation::{validate, ValidationOutcome};
use crate::view::{
    render_alternatives, render_error, render_primary, render_unexpected, AlternativesView,
    ChartRenderer,
    ChartSurface, ErrorView, PrimaryView,
};
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};

/// Page regions the controller writes to.
pub trait UiSlots {
    /// Disable the submit affordance and show the loading indicator, or undo both.
    fn set_busy(&self, busy: bool);

    fn hide_results(&self);

    /// Fails with [`RenderError::Slot`] when the result region has left the page.
    fn show_primary(&self, view: PrimaryView) -> Result<(), RenderError>;

    fn show_alternatives(&self, view: AlternativesView) -> Result<(), RenderError>;

    /// Replace the result region with an error card. Must not fail: this is
    /// the fallback for every other failure.
    fn show_error(&self, view: ErrorView);

    fn reset_form(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Rendering,
}

impl SubmissionState {
    pub fn is_busy(self) -> bool {
        !matches!(self, SubmissionState::Idle)
    }
}

/// What a single call to [`WorkflowController::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was already in flight.
    Ignored,
    Invalid,
    Succeeded,
    Failed(FailureKind),
}

/// Puts the page back into the idle state when dropped, whichever way the
/// busy phase ends.
struct BusyGuard<'a, U: UiSlots> {
    state: &'a Cell<SubmissionState>,
    ui: &'a U,
}

impl<'a, U: UiSlots> BusyGuard<'a, U> {
    fn enter(state: &'a Cell<SubmissionState>, ui: &'a U) -> Self {
        state.set(SubmissionState::Validating);
        ui.set_busy(true);
        ui.hide_results();
        Self { state, ui }
    }
}

impl<U: UiSlots> Drop for BusyGuard<'_, U> {
    fn drop(&mut self) {
        self.state.set(SubmissionState::Idle);
        self.ui.set_busy(false);
    }
}

pub struct WorkflowController<S, U, C>
where
    S: PredictionService,
    U: UiSlots,
    C: ChartSurface,
{
    service: S,
    ui: U,
    charts: RefCell<ChartRenderer<C>>,
    state: Cell<SubmissionState>,
}

impl<S, U, C> WorkflowController<S, U, C>
where
    S: PredictionService,
    U: UiSlots,
    C: ChartSurface,
{
    pub fn new(service: S, ui: U, chart_surface: C) -> Self {
        Self {
            service,
            ui,
            charts: RefCell::new(ChartRenderer::new(chart_surface)),
            state: Cell::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    pub fn is_busy(&self) -> bool {
        self.state.get().is_busy()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn chart_drawn(&self) -> bool {
        self.charts.borrow().is_drawn()
    }

    /// Run one full submission for the given form contents.
    pub async fn submit(&self, raw: &RawFields) -> SubmitOutcome {
        if self.is_busy() {
            debug!("submit ignored: {:?} in progress", self.state());
            return SubmitOutcome::Ignored;
        }

        let _guard = BusyGuard::enter(&self.state, &self.ui);

        match self.run_cycle(raw).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("unexpected failure during submission: {}", e);
                self.show_failure(render_unexpected(&e));
                SubmitOutcome::Failed(FailureKind::Unexpected)
            }
        }
    }

    /// Retry affordance: clear the form and any visible result.
    pub fn reset(&self) {
        if self.is_busy() {
            debug!("reset ignored while busy");
            return;
        }
        self.charts.borrow_mut().clear();
        self.ui.reset_form();
        self.ui.hide_results();
    }

    /// Leave the busy phase after a panic cut a submission short, and show
    /// what went wrong. The chart is left alone if it is still borrowed.
    pub fn recover_from_panic(&self, detail: &str) {
        error!("unexpected failure: {}", detail);
        self.state.set(SubmissionState::Idle);
        self.ui.set_busy(false);
        match self.charts.try_borrow_mut() {
            Ok(mut charts) => charts.clear(),
            Err(_) => warn!("chart busy during recovery; leaving it in place"),
        }
        if let Err(e) = self.ui.show_alternatives(AlternativesView::default()) {
            warn!("could not clear alternatives: {}", e);
        }
        self.ui.show_error(render_unexpected(detail));
    }

    async fn run_cycle(&self, raw: &RawFields) -> Result<SubmitOutcome, RenderError> {
        self.state.set(SubmissionState::Validating);
        let input = match validate(raw) {
            ValidationOutcome::Valid(input) => input,
            ValidationOutcome::Invalid(errors) => {
                debug!("validation rejected {} field(s)", errors.len());
                self.show_failure(render_error(errors));
                return Ok(SubmitOutcome::Invalid);
            }
        };

        self.state.set(SubmissionState::Submitting);
        let response = match self.service.predict(&input).await {
            Ok(response) => response,
            Err(e) => {
                warn!("prediction request failed: {:?}", e);
                self.show_failure(render_error([e.user_message()]));
                return Ok(SubmitOutcome::Failed(e.kind()));
            }
        };

        self.state.set(SubmissionState::Rendering);
        self.render_success(response, &input)?;
        Ok(SubmitOutcome::Succeeded)
    }

    fn render_success(
        &self,
        response: PredictionResponse,
        input: &MeasurementInput,
    ) -> Result<(), RenderError> {
        let result = interpret(response);
        info!(
            "recommended {} ({:?}% confidence, {} alternative(s))",
            result.primary,
            result.confidence,
            result.alternatives.len()
        );

        self.ui
            .show_primary(render_primary(&result.primary, result.confidence, input))?;
        self.ui
            .show_alternatives(render_alternatives(&result.alternatives))?;
        self.charts.borrow_mut().render(&result.ranked)?;
        Ok(())
    }

    /// Errors and results share one slot, so stale alternatives and chart go too.
    fn show_failure(&self, view: ErrorView) {
        debug!("showing error: {}", view.message());
        self.charts.borrow_mut().clear();
        if let Err(e) = self.ui.show_alternatives(AlternativesView::default()) {
            warn!("could not clear alternatives: {}", e);
        }
        self.ui.show_error(view);
    }
}
