//! Turns a service reply into a primary pick plus ranked alternatives.

use crate::config::MAX_ALTERNATIVES;
use crate::model::{PredictionResponse, RankedCrop};

/// A prediction reduced to what the result views need.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub primary: String,
    pub confidence: Option<f64>,
    /// Next-ranked crops other than the primary, at most [`MAX_ALTERNATIVES`].
    pub alternatives: Vec<RankedCrop>,
    /// The service's full ranked list in its original order.
    pub ranked: Vec<RankedCrop>,
}

pub fn interpret(response: PredictionResponse) -> Interpretation {
    let ranked = response.top_predictions.unwrap_or_default();

    // Exact match only: a differently cased primary is not filtered out.
    let alternatives = ranked
        .iter()
        .filter(|candidate| candidate.crop != response.best_crop)
        .take(MAX_ALTERNATIVES)
        .cloned()
        .collect();

    Interpretation {
        primary: response.best_crop,
        confidence: response.confidence,
        alternatives,
        ranked,
    }
}
