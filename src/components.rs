//! Pure Yew view components for the Crop Advisor page.
//!
//! Each function maps a view model from the library onto markup; none of
//! them hold state.

use crop_advisor::view::{AlternativesView, ErrorView, PrimaryView};
use crop_advisor::Field;
use yew::prelude::*;

/// One labelled numeric input of the measurement form.
pub fn measurement_field(field: Field, text: &str, on_input: &Callback<(Field, InputEvent)>) -> Html {
    let range = field.range();
    let oninput = on_input.reform(move |e: InputEvent| (field, e));

    html! {
        <div class="form-group">
            <label for={field.key()} class="block text-sm font-medium text-gray-700 mb-1">
                { field.caption() }
            </label>
            <input
                type="number"
                step="any"
                id={field.key()}
                name={field.key()}
                min={range.start().to_string()}
                max={range.end().to_string()}
                value={text.to_string()}
                class="w-full px-3 py-2 border border-gray-300 rounded-lg"
                {oninput}
            />
        </div>
    }
}

/// Submit button; disabled and relabelled while a prediction is running.
pub fn submit_button(busy: bool) -> Html {
    html! {
        <button type="submit"
            id="submitBtn"
            disabled={busy}
            class="w-full bg-green-600 hover:bg-green-700 text-white font-semibold py-3 rounded-lg"
        >
            if busy {
                <><i class="fas fa-spinner fa-spin mr-2"></i>{ "Analyzing..." }</>
            } else {
                <><i class="fas fa-magic mr-2"></i>{ "Get Crop Recommendation" }</>
            }
        </button>
    }
}

pub fn loading_indicator(busy: bool) -> Html {
    html! {
        <div id="loading" class={classes!("text-center", "py-6", (!busy).then_some("hidden"))}>
            <i class="fas fa-spinner fa-spin text-3xl text-green-600"></i>
            <p class="mt-2 text-gray-600">{ "Analyzing soil and climate conditions..." }</p>
        </div>
    }
}

/// Success card for the recommended crop.
pub fn primary_card(view: &PrimaryView, on_retry: &Callback<MouseEvent>) -> Html {
    html! {
        <div class="bg-gradient-to-r from-green-100 to-blue-100 rounded-xl p-8 border-2 border-green-200">
            <div class="text-center">
                <div class="mb-4">
                    <i class="fas fa-seedling text-6xl text-green-600 mb-4"></i>
                </div>
                <h4 class="text-3xl font-bold text-gray-800 mb-2">{ &view.crop }</h4>
                <p class="text-lg text-gray-600 mb-4">{ view.tagline }</p>
                if let Some(badge) = &view.confidence_badge {
                    <div class="inline-flex items-center px-4 py-2 bg-green-500 text-white rounded-full text-sm font-semibold">
                        <i class="fas fa-chart-line mr-2"></i>
                        { badge }
                    </div>
                }
            </div>

            <div class="mt-6 pt-6 border-t border-green-200">
                <h5 class="text-lg font-semibold text-gray-700 mb-3">{ "Your Input Summary:" }</h5>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4 text-sm">
                    { for view.summary.iter().map(|item| html! {
                        <div class="bg-white rounded-lg p-3 text-center">
                            <div class="font-semibold text-gray-600">{ item.label }</div>
                            <div class={classes!("text-lg", "font-bold", item.accent.css_class())}>
                                { &item.value }
                            </div>
                        </div>
                    }) }
                </div>
            </div>

            <div class="mt-4 text-center">
                <button onclick={on_retry.clone()}
                    class="bg-blue-500 hover:bg-blue-600 text-white px-6 py-2 rounded-lg transition-colors duration-200">
                    <i class="fas fa-redo mr-2"></i>
                    { view.retry_label }
                </button>
            </div>
        </div>
    }
}

/// Error card; every message gets its own line.
pub fn error_card(view: &ErrorView, on_retry: &Callback<MouseEvent>) -> Html {
    html! {
        <div class="bg-red-100 border-2 border-red-200 rounded-xl p-8">
            <div class="text-center">
                <i class="fas fa-exclamation-triangle text-4xl text-red-500 mb-4"></i>
                <h4 class="text-xl font-bold text-red-800 mb-2">{ view.title }</h4>
                { for view.lines.iter().map(|line| html! {
                    <p class="text-red-600">{ line }</p>
                }) }
                <button onclick={on_retry.clone()}
                    class="mt-4 bg-red-500 hover:bg-red-600 text-white px-6 py-2 rounded-lg transition-colors duration-200">
                    <i class="fas fa-redo mr-2"></i>
                    { view.retry_label }
                </button>
            </div>
        </div>
    }
}

/// Alternative crop cards; renders nothing when there are none.
pub fn alternatives_section(view: &AlternativesView) -> Html {
    if view.is_empty() {
        return html! {};
    }

    html! {
        <>
            <h4 class="text-lg font-semibold text-gray-700 mb-3">
                <i class="fas fa-list text-green-600 mr-2"></i>
                { view.heading }
            </h4>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                { for view.cards.iter().map(|card| {
                    let shade = if card.emphasized { "bg-green-200" } else { "bg-green-100" };
                    html! {
                        <div class="bg-white border rounded-xl p-4 shadow-sm">
                            <div class="flex items-center justify-between">
                                <div class="flex items-center gap-3">
                                    <div class={classes!("w-10", "h-10", "rounded-full", "flex", "items-center", "justify-center", shade)}>
                                        <i class="fas fa-leaf text-green-700"></i>
                                    </div>
                                    <div>
                                        <div class="text-sm text-gray-500">{ &card.title }</div>
                                        <div class="text-lg font-semibold text-gray-800">{ &card.crop }</div>
                                    </div>
                                </div>
                                <div class="text-sm font-semibold text-green-700">{ &card.probability_label }</div>
                            </div>
                        </div>
                    }
                }) }
            </div>
        </>
    }
}

/// Advisory toast in the top-right corner.
#[derive(Properties, PartialEq)]
pub struct NotificationToastProps {
    pub message: AttrValue,
    pub on_dismiss: Callback<MouseEvent>,
}

#[function_component(NotificationToast)]
pub fn notification_toast(props: &NotificationToastProps) -> Html {
    html! {
        <div class="fixed top-4 right-4 bg-yellow-100 border border-yellow-400 text-yellow-700 px-4 py-3 rounded shadow-lg z-50">
            <div class="flex items-center">
                <i class="fas fa-exclamation-triangle mr-2"></i>
                <span>{ &props.message }</span>
                <button class="ml-3 text-yellow-800" aria-label="Dismiss" onclick={props.on_dismiss.clone()}>
                    <i class="fas fa-times"></i>
                </button>
            </div>
        </div>
    }
}
