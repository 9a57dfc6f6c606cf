use crop_advisor::{Field, RawFields};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Raw text of every measurement input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub values: RawFields,
}

impl FormState {
    pub fn text(&self, field: Field) -> &str {
        self.values.get(field.key()).map(String::as_str).unwrap_or_default()
    }
}

pub enum FormAction {
    Set(Field, String),
    Reset,
}

impl Reducible for FormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            FormAction::Set(field, text) => {
                let mut next = (*self).clone();
                next.values.insert(field.key().to_string(), text);
                next.into()
            }
            FormAction::Reset => Rc::new(FormState::default()),
        }
    }
}

/// Holds the form state and the callback shared by all seven inputs.
#[derive(Clone)]
pub struct MeasurementForm {
    pub state: UseReducerHandle<FormState>,
    /// Emitted by each input's `oninput` with the field it belongs to.
    pub on_input: Callback<(Field, InputEvent)>,
}

/// Custom hook to manage the measurement form.
#[hook]
pub fn use_measurement_form() -> MeasurementForm {
    let state = use_reducer(FormState::default);

    let on_input = {
        let dispatcher = state.dispatcher();
        Callback::from(move |(field, e): (Field, InputEvent)| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(FormAction::Set(field, input.value()));
        })
    };

    MeasurementForm { state, on_input }
}
