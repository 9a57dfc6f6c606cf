//! Stateless view models for the result area.
//!
//! Each `render_*` function maps data to a plain struct that the page turns
//! into markup. Keeping construction here means every view can be checked
//! without a browser. The one stateful piece is [`ChartRenderer`], which owns
//! the single live chart instance.

use crate::config::CHART_DATASET_LABEL;
use crate::error::RenderError;
use crate::model::{Field, MeasurementInput, RankedCrop};
use log::debug;
use serde::Serialize;
use std::fmt;

/// Accent used for one input-summary tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Red,
    Orange,
    Purple,
    Indigo,
}

impl Accent {
    pub fn css_class(&self) -> &'static str {
        match self {
            Accent::Red => "text-red-600",
            Accent::Orange => "text-orange-600",
            Accent::Purple => "text-purple-600",
            Accent::Indigo => "text-indigo-600",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryItem {
    pub label: &'static str,
    pub value: String,
    pub accent: Accent,
}

/// Success card for the recommended crop.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryView {
    pub crop: String,
    pub tagline: &'static str,
    /// `"94% Confidence"`; `None` hides the badge.
    pub confidence_badge: Option<String>,
    pub summary: Vec<SummaryItem>,
    pub retry_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeCard {
    pub title: String,
    pub crop: String,
    pub probability_label: String,
    /// The first card is drawn a shade darker.
    pub emphasized: bool,
}

/// Secondary suggestions below the success card. No cards means the region
/// is cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlternativesView {
    pub heading: &'static str,
    pub cards: Vec<AlternativeCard>,
}

impl AlternativesView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Error card shown in place of a result.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorView {
    pub title: &'static str,
    pub lines: Vec<String>,
    pub retry_label: &'static str,
}

impl ErrorView {
    /// All lines joined for plain-text contexts such as logs.
    pub fn message(&self) -> String {
        self.lines.join("\n")
    }
}

/// Bar-chart data handed to the charting primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Labels by crop name; probabilities are clamped to `[0, 100]`.
    pub fn from_ranked(ranked: &[RankedCrop]) -> Self {
        Self {
            label: CHART_DATASET_LABEL,
            labels: ranked.iter().map(|r| r.crop.clone()).collect(),
            values: ranked.iter().map(|r| r.probability.clamp(0.0, 100.0)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Format a percentage the way the service sends it: `94`, `3.5`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", value)
}

pub fn render_primary(crop: &str, confidence: Option<f64>, input: &MeasurementInput) -> PrimaryView {
    let summary = [
        (Field::Nitrogen, Accent::Red),
        (Field::Phosphorus, Accent::Orange),
        (Field::Potassium, Accent::Purple),
        (Field::Ph, Accent::Indigo),
    ]
    .into_iter()
    .map(|(field, accent)| SummaryItem {
        label: field.label(),
        value: input.value(field).to_string(),
        accent,
    })
    .collect();

    PrimaryView {
        crop: crop.to_string(),
        tagline: "is the recommended crop for your conditions",
        confidence_badge: confidence.map(|c| format!("{} Confidence", format_percent(c))),
        summary,
        retry_label: "Try Another Prediction",
    }
}

pub fn render_alternatives(alternatives: &[RankedCrop]) -> AlternativesView {
    let cards = alternatives
        .iter()
        .enumerate()
        .map(|(i, alt)| AlternativeCard {
            title: format!("Alternative {}", i + 1),
            crop: alt.crop.clone(),
            probability_label: format_percent(alt.probability),
            emphasized: i == 0,
        })
        .collect();

    AlternativesView {
        heading: "Other likely crops",
        cards,
    }
}

pub fn render_error<I, S>(lines: I) -> ErrorView
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ErrorView {
        title: "Error",
        lines: lines.into_iter().map(Into::into).collect(),
        retry_label: "Try Again",
    }
}

/// Error card for a failure outside the expected paths.
pub fn render_unexpected(detail: impl fmt::Display) -> ErrorView {
    render_error([format!("Unexpected error: {}", detail)])
}

/// The charting primitive: draws bars from a series and tears them down.
pub trait ChartSurface {
    type Handle;

    fn create(&mut self, series: &ChartSeries) -> Result<Self::Handle, RenderError>;

    fn destroy(&mut self, handle: Self::Handle);
}

/// Owns the one live chart instance and releases it before drawing another.
pub struct ChartRenderer<C: ChartSurface> {
    surface: C,
    current: Option<C::Handle>,
}

impl<C: ChartSurface> ChartRenderer<C> {
    pub fn new(surface: C) -> Self {
        Self {
            surface,
            current: None,
        }
    }

    /// Replace the chart with one for `ranked`. An empty list only clears.
    /// Returns whether a chart is now drawn.
    pub fn render(&mut self, ranked: &[RankedCrop]) -> Result<bool, RenderError> {
        self.clear();

        let series = ChartSeries::from_ranked(ranked);
        if series.is_empty() {
            return Ok(false);
        }

        let handle = self.surface.create(&series)?;
        debug!("chart drawn with {} bars", series.labels.len());
        self.current = Some(handle);
        Ok(true)
    }

    pub fn clear(&mut self) {
        if let Some(handle) = self.current.take() {
            self.surface.destroy(handle);
        }
    }

    pub fn is_drawn(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSurface {
        next_id: u32,
        live: Vec<u32>,
        fail: bool,
    }

    impl ChartSurface for CountingSurface {
        type Handle = u32;

        fn create(&mut self, _series: &ChartSeries) -> Result<u32, RenderError> {
            if self.fail {
                return Err(RenderError::Chart("canvas missing".into()));
            }
            self.next_id += 1;
            self.live.push(self.next_id);
            Ok(self.next_id)
        }

        fn destroy(&mut self, handle: u32) {
            self.live.retain(|&h| h != handle);
        }
    }

    fn sample_input() -> MeasurementInput {
        MeasurementInput {
            nitrogen: 90.0,
            phosphorus: 42.0,
            potassium: 43.0,
            temperature: 20.8,
            humidity: 82.0,
            ph: 6.5,
            rainfall: 202.9,
        }
    }

    fn ranked() -> Vec<RankedCrop> {
        vec![
            RankedCrop::new("rice", 94.0),
            RankedCrop::new("jute", 3.0),
            RankedCrop::new("maize", 2.0),
        ]
    }

    #[test]
    fn primary_view_shows_badge_and_echo() {
        let view = render_primary("rice", Some(94.0), &sample_input());
        assert_eq!(view.crop, "rice");
        assert_eq!(view.confidence_badge.as_deref(), Some("94% Confidence"));
        let echo: Vec<(&str, &str)> = view
            .summary
            .iter()
            .map(|s| (s.label, s.value.as_str()))
            .collect();
        assert_eq!(echo, vec![("N", "90"), ("P", "42"), ("K", "43"), ("pH", "6.5")]);
    }

    #[test]
    fn primary_view_without_confidence_has_no_badge() {
        let view = render_primary("rice", None, &sample_input());
        assert!(view.confidence_badge.is_none());
    }

    #[test]
    fn alternative_cards_are_numbered_in_order() {
        let view = render_alternatives(&ranked()[1..]);
        let cards: Vec<(&str, &str, &str)> = view
            .cards
            .iter()
            .map(|c| (c.title.as_str(), c.crop.as_str(), c.probability_label.as_str()))
            .collect();
        assert_eq!(
            cards,
            vec![("Alternative 1", "jute", "3%"), ("Alternative 2", "maize", "2%")]
        );
        assert!(view.cards[0].emphasized);
        assert!(!view.cards[1].emphasized);
    }

    #[test]
    fn empty_alternatives_clear_the_region() {
        assert!(render_alternatives(&[]).is_empty());
    }

    #[test]
    fn error_view_keeps_every_line() {
        let view = render_error(vec!["N is required and must be a number", "pH must be between 0 and 14"]);
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.retry_label, "Try Again");
        assert_eq!(
            view.message(),
            "N is required and must be a number\npH must be between 0 and 14"
        );
    }

    #[test]
    fn unexpected_error_names_the_cause() {
        let view = render_unexpected(RenderError::Chart("canvas missing".into()));
        assert_eq!(view.title, "Error");
        assert_eq!(view.lines, vec!["Unexpected error: chart rendering failed: canvas missing"]);
    }

    #[test]
    fn series_values_are_clamped_for_display() {
        let series = ChartSeries::from_ranked(&[
            RankedCrop::new("rice", 120.0),
            RankedCrop::new("jute", -4.0),
            RankedCrop::new("maize", 55.5),
        ]);
        assert_eq!(series.labels, vec!["rice", "jute", "maize"]);
        assert_eq!(series.values, vec![100.0, 0.0, 55.5]);
        assert_eq!(series.label, "Confidence (%)");
    }

    #[test]
    fn rendering_twice_leaves_one_chart() {
        let mut charts = ChartRenderer::new(CountingSurface::default());
        assert!(charts.render(&ranked()).unwrap());
        assert!(charts.render(&ranked()).unwrap());
        assert_eq!(charts.surface.live.len(), 1);
        assert_eq!(charts.surface.live, vec![2]);
    }

    #[test]
    fn empty_list_destroys_existing_chart() {
        let mut charts = ChartRenderer::new(CountingSurface::default());
        charts.render(&ranked()).unwrap();
        assert!(!charts.render(&[]).unwrap());
        assert!(charts.surface.live.is_empty());
        assert!(!charts.is_drawn());
    }

    #[test]
    fn failed_create_leaves_no_chart() {
        let mut charts = ChartRenderer::new(CountingSurface::default());
        charts.render(&ranked()).unwrap();
        charts.surface.fail = true;
        assert!(charts.render(&ranked()).is_err());
        assert!(charts.surface.live.is_empty());
        assert!(!charts.is_drawn());
    }
}
