//! Dashboard configuration.
//!
//! Every field has a working default; a deployment may override any subset
//! with a JSON object.

use crate::metric::Metric;
use crate::tables::{ClimatologyShape, ObservationTable};
use serde::{Deserialize, Serialize};

/// Which year is drawn with the heavier line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightPolicy {
    /// The maximum `Year` present in the observation table.
    #[default]
    MaxYearPresent,
    /// A specific year, whether or not it is selected.
    Fixed(i32),
}

impl HighlightPolicy {
    pub fn highlighted_year(&self, observations: &ObservationTable) -> Option<i32> {
        match self {
            HighlightPolicy::MaxYearPresent => observations.max_year(),
            HighlightPolicy::Fixed(year) => Some(*year),
        }
    }
}

/// Colours and line weights applied by the series assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub highlight_width: f64,
    pub year_width: f64,
    pub climatology_width: f64,
    pub highlight_color: String,
    /// Cycled over the non-highlighted years.
    pub year_palette: Vec<String>,
    pub climatology_color: String,
    pub band_line_color: String,
    pub band_fill_color: String,
    pub median_color: String,
    pub imputed_marker_color: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            highlight_width: 3.5,
            year_width: 1.5,
            climatology_width: 2.0,
            highlight_color: "#D32F2F".to_string(),
            year_palette: [
                "#1f77b4", "#ff7f0e", "#2ca02c", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
                "#bcbd22", "#17becf",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            climatology_color: "#424242".to_string(),
            band_line_color: "rgba(120, 144, 156, 0.6)".to_string(),
            band_fill_color: "rgba(144, 164, 174, 0.25)".to_string(),
            median_color: "#607D8B".to_string(),
            imputed_marker_color: "#000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub observations_url: String,
    pub climatology_url: String,
    /// DOM id of the element Plotly renders into.
    pub chart_container_id: String,
    pub highlight: HighlightPolicy,
    pub default_metric: Metric,
    /// How many of the most recent years are selected on first load.
    pub default_year_count: usize,
    /// Table derived from the observations when no climatology file loads.
    pub derived_climatology: ClimatologyShape,
    pub style: ChartStyle,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            observations_url: "data/arlington_daily.csv".to_string(),
            climatology_url: "data/climatology_doy365_mean.csv".to_string(),
            chart_container_id: "wx-chart".to_string(),
            highlight: HighlightPolicy::MaxYearPresent,
            default_metric: Metric::Tavg,
            default_year_count: 5,
            derived_climatology: ClimatologyShape::Mean,
            style: ChartStyle::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses overrides. Invalid JSON yields the defaults.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config: ignoring invalid configuration: {}", e);
                Self::default()
            }
        }
    }
}
