//! Main module for the Crop Advisor page using Yew.
//! Wires the measurement form, the workflow controller and the result views.

use crop_advisor::config::CHART_CANVAS_ID;
use crop_advisor::view::{AlternativesView, ErrorView, PrimaryView};
use crop_advisor::{
    panic_detail, probe, AppConfig, ClientError, Field, HttpPredictionClient, RenderError,
    UiSlots, WorkflowController,
};
use gloo_timers::callback::Timeout;
use log::{debug, error};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;

mod chart;
mod components;
mod hooks;

use chart::ChartJsSurface;
use components::{
    alternatives_section, error_card, loading_indicator, measurement_field, primary_card,
    submit_button, NotificationToast,
};
use hooks::{use_measurement_form, FormAction, FormState};

type PageController = WorkflowController<HttpPredictionClient, PageSlots, ChartJsSurface>;
type SharedController = Rc<Result<PageController, ClientError>>;

thread_local! {
    /// Controller the panic hook reports into once the page has mounted.
    static PANIC_TARGET: RefCell<Option<SharedController>> = RefCell::new(None);
}

// ──────────────────────────────────────────────────────────────────────────────
// UI slots

/// What occupies the result card: a recommendation or an error, never both.
#[derive(Clone, PartialEq)]
enum ResultPanel {
    Primary(PrimaryView),
    Error(ErrorView),
}

/// Page state handles the controller writes into.
struct PageSlots {
    busy: UseStateHandle<bool>,
    results_visible: UseStateHandle<bool>,
    panel: UseStateHandle<Option<ResultPanel>>,
    alternatives: UseStateHandle<AlternativesView>,
    form: UseReducerDispatcher<FormState>,
    form_ref: NodeRef,
    results_ref: NodeRef,
}

impl PageSlots {
    fn show_panel(&self, panel: ResultPanel) {
        self.panel.set(Some(panel));
        self.results_visible.set(true);
    }
}

/// A result can only be shown while the results region is in the document.
fn require_mounted(node: &NodeRef, slot: &'static str) -> Result<(), RenderError> {
    match node.get() {
        Some(_) => Ok(()),
        None => Err(RenderError::Slot {
            slot,
            reason: "results region is not mounted".to_string(),
        }),
    }
}

impl UiSlots for PageSlots {
    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }

    fn hide_results(&self) {
        self.results_visible.set(false);
    }

    fn show_primary(&self, view: PrimaryView) -> Result<(), RenderError> {
        require_mounted(&self.results_ref, "result card")?;
        self.show_panel(ResultPanel::Primary(view));
        Ok(())
    }

    fn show_alternatives(&self, view: AlternativesView) -> Result<(), RenderError> {
        require_mounted(&self.results_ref, "alternatives")?;
        self.alternatives.set(view);
        Ok(())
    }

    fn show_error(&self, view: ErrorView) {
        self.show_panel(ResultPanel::Error(view));
    }

    fn reset_form(&self) {
        self.form.dispatch(FormAction::Reset);
        scroll_into_view(&self.form_ref);
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

fn scroll_into_view(node: &NodeRef) {
    if let Some(element) = node.cast::<web_sys::Element>() {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

fn build_controller(slots: PageSlots) -> Result<PageController, ClientError> {
    let config = AppConfig::from_build_env();
    debug!("using prediction service at {}", config.base_url);
    let client = HttpPredictionClient::new(config)?;
    Ok(WorkflowController::new(
        client,
        slots,
        ChartJsSurface::new(CHART_CANVAS_ID),
    ))
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let form = use_measurement_form();
    let busy = use_state(|| false);
    let results_visible = use_state(|| false);
    let panel = use_state(|| None::<ResultPanel>);
    let alternatives = use_state(AlternativesView::default);
    let notification = use_state(|| None::<AttrValue>);
    let dismiss_timer = use_mut_ref(|| None::<Timeout>);
    let form_ref = use_node_ref();
    let results_ref = use_node_ref();

    // The controller is built once; the handles it captures stay valid for
    // the lifetime of the component.
    let controller = {
        let slots = PageSlots {
            busy: busy.clone(),
            results_visible: results_visible.clone(),
            panel: panel.clone(),
            alternatives: alternatives.clone(),
            form: form.state.dispatcher(),
            form_ref: form_ref.clone(),
            results_ref: results_ref.clone(),
        };
        use_memo((), move |_| build_controller(slots))
    };

    // Panics surface as an error card instead of a frozen page
    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            PANIC_TARGET.with(|target| *target.borrow_mut() = Some(controller));
            || {
                PANIC_TARGET.with(|target| target.borrow_mut().take());
            }
        });
    }

    // Startup reachability check, advisory only
    {
        let controller = controller.clone();
        let notification = notification.clone();
        let dismiss_timer = dismiss_timer.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let ctrl = match &*controller {
                    Ok(ctrl) => ctrl,
                    Err(e) => {
                        error!("prediction client unavailable: {}", e);
                        return;
                    }
                };
                if let Some(note) = probe(ctrl.service()).await.advisory() {
                    notification.set(Some(note.message.into()));
                    let clear = notification.clone();
                    let handle = Timeout::new(note.dismiss_after_ms, move || clear.set(None));
                    *dismiss_timer.borrow_mut() = Some(handle);
                }
            });
        });
    }

    // Bring the result card into view whenever it appears
    {
        let results_ref = results_ref.clone();
        use_effect_with(*results_visible, move |visible| {
            if *visible {
                scroll_into_view(&results_ref);
            }
            || ()
        });
    }

    let onsubmit = {
        let controller = controller.clone();
        let raw = form.state.values.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let controller = controller.clone();
            let raw = raw.clone();
            spawn_local(async move {
                match &*controller {
                    Ok(ctrl) => {
                        let outcome = ctrl.submit(&raw).await;
                        debug!("submission finished: {:?}", outcome);
                    }
                    Err(e) => error!("prediction client unavailable: {}", e),
                }
            });
        })
    };

    let on_retry = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            if let Ok(ctrl) = &*controller {
                ctrl.reset();
            }
        })
    };

    let on_dismiss = {
        let notification = notification.clone();
        let dismiss_timer = dismiss_timer.clone();
        Callback::from(move |_: MouseEvent| {
            // Dropping the timeout cancels it
            dismiss_timer.borrow_mut().take();
            notification.set(None);
        })
    };

    html! {
        <div class="container mx-auto px-4 py-8 max-w-4xl">
            <h1 class="text-4xl font-bold text-center text-gray-800 mb-2">{ "Crop Recommendation" }</h1>
            <p class="text-center text-gray-600 mb-8">
                { "Enter your soil and climate measurements to find the best crop to plant." }
            </p>

            <form id="cropForm" ref={form_ref} novalidate=true {onsubmit}
                class="bg-white rounded-xl shadow-lg p-6 mb-8">
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4 mb-6">
                    { for Field::ALL.into_iter().map(|field| {
                        measurement_field(field, form.state.text(field), &form.on_input)
                    }) }
                </div>
                { submit_button(*busy) }
            </form>

            { loading_indicator(*busy) }

            <div id="results" ref={results_ref}
                class={classes!("space-y-6", (!*results_visible).then_some("hidden"))}>
                <div id="resultContent">
                    {
                        match &*panel {
                            Some(ResultPanel::Primary(view)) => primary_card(view, &on_retry),
                            Some(ResultPanel::Error(view)) => error_card(view, &on_retry),
                            None => html! {},
                        }
                    }
                </div>
                <div id="secondaryContent">
                    { alternatives_section(&alternatives) }
                </div>
                <div class="chart-section relative h-64">
                    <canvas id={CHART_CANVAS_ID}></canvas>
                </div>
            </div>

            if let Some(message) = &*notification {
                <NotificationToast message={message.clone()} {on_dismiss} />
            }
        </div>
    }
}

/// Log panics to the console, then leave the busy phase with an error card.
fn install_panic_hook() {
    console_error_panic_hook::set_once();
    let console_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        console_hook(info);
        let detail = panic_detail(info.payload());
        PANIC_TARGET.with(|target| {
            // Already borrowed means the panic came from mounting or unmounting.
            if let Ok(target) = target.try_borrow() {
                if let Some(Ok(ctrl)) = target.as_deref() {
                    ctrl.recover_from_panic(&detail);
                }
            }
        });
    }));
}

/// Entry point: initializes logging and the Yew renderer for the App component.
fn main() {
    install_panic_hook();
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
