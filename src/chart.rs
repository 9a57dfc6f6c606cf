//! JavaScript interop for Chart.js visualization.
//! Provides Rust bindings to chart helper functions defined in chart_helpers.js.

use crop_advisor::{ChartSeries, ChartSurface, RenderError};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/chart_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = createProbabilityChart, catch)]
    fn create_probability_chart(canvas_id: &str, series: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = destroyChart)]
    fn destroy_chart(chart: &JsValue);
}

/// Draws the probability bar chart on a `<canvas>` that is always present in the page.
pub struct ChartJsSurface {
    canvas_id: &'static str,
}

impl ChartJsSurface {
    pub fn new(canvas_id: &'static str) -> Self {
        Self { canvas_id }
    }
}

impl ChartSurface for ChartJsSurface {
    type Handle = JsValue;

    fn create(&mut self, series: &ChartSeries) -> Result<JsValue, RenderError> {
        if gloo_utils::document()
            .get_element_by_id(self.canvas_id)
            .is_none()
        {
            return Err(RenderError::Chart(format!(
                "canvas #{} not found",
                self.canvas_id
            )));
        }

        let data = serde_wasm_bindgen::to_value(series)
            .map_err(|e| RenderError::Chart(e.to_string()))?;
        create_probability_chart(self.canvas_id, data)
            .map_err(|e| RenderError::Chart(js_error_message(&e)))
    }

    fn destroy(&mut self, handle: JsValue) {
        destroy_chart(&handle);
    }
}

fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
