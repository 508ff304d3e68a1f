//! Composes traces and layout into the object handed to Plotly.
//!
//! Field names follow Plotly's `scatter` trace and layout schema. The
//! builder is a pure function of its inputs; every call produces a complete
//! specification that replaces whatever was rendered before.

use crate::calendar::{self, Doy};
use crate::interval::Interval;
use crate::metric::Metric;
use crate::series::{Fill, LineStyle, MarkerStyle, Mode, Trace, TraceKind};
use crate::ticks::Tick;
use serde::Serialize;

pub const X_AXIS_TITLE: &str = "Day of year";

pub const SNOW_CAVEAT: &str =
    "Percentile bands and climatology are available for temperature and precipitation only, not for snowfall or snow depth.";

pub const IMPUTED_NOTE: &str = "Open circles mark imputed (reconstructed) temperature values.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<PlotlyTrace>,
    pub layout: Layout,
    pub config: PlotConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotlyTrace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub name: String,
    pub x: Vec<Doy>,
    /// `None` serializes as `null`, which Plotly draws as a gap.
    pub y: Vec<Option<f64>>,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    pub fill: Fill,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    /// Calendar label per point, referenced by the hover template.
    pub text: Vec<String>,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    pub title: AxisTitle,
    pub range: [Doy; 2],
    pub tickmode: &'static str,
    pub tickvals: Vec<Doy>,
    pub ticktext: Vec<String>,
    pub zeroline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    pub title: AxisTitle,
    pub zeroline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub orientation: &'static str,
    pub x: f64,
    pub y: f64,
    pub xanchor: &'static str,
    pub yanchor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: f64,
    pub y: f64,
    pub xanchor: &'static str,
    pub yanchor: &'static str,
    pub showarrow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: AxisTitle,
    pub xaxis: XAxis,
    pub yaxis: YAxis,
    pub legend: Legend,
    pub hovermode: &'static str,
    pub margin: Margin,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    pub responsive: bool,
    pub displaylogo: bool,
}

impl ChartSpec {
    pub fn data_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.data)
    }

    pub fn layout_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.layout)
    }

    pub fn config_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.config)
    }
}

/// `"Average temperature (°C)"`.
pub fn y_axis_title(metric: Metric) -> String {
    format!("{} ({})", metric.title(), metric.unit())
}

pub fn build(traces: &[Trace], metric: Metric, interval: Interval, ticks: &[Tick]) -> ChartSpec {
    let data = traces.iter().map(|t| plotly_trace(t, metric)).collect();

    let mut caveats = Vec::new();
    if !metric.is_percentile_eligible() {
        caveats.push(SNOW_CAVEAT);
    }
    if traces.iter().any(|t| matches!(t.kind, TraceKind::Imputed { .. })) {
        caveats.push(IMPUTED_NOTE);
    }
    let annotations = caveats
        .into_iter()
        .enumerate()
        .map(|(i, text)| Annotation {
            text: text.to_string(),
            xref: "paper",
            yref: "paper",
            x: 0.0,
            y: 1.0 + 0.05 * (i as f64 + 1.0),
            xanchor: "left",
            yanchor: "bottom",
            showarrow: false,
        })
        .collect();

    let range_label = if interval.is_full_year() {
        "full year".to_string()
    } else {
        format!(
            "{} to {}",
            calendar::doy_label(interval.start()),
            calendar::doy_label(interval.end())
        )
    };

    ChartSpec {
        data,
        layout: Layout {
            title: AxisTitle {
                text: format!("{}, {}", metric.title(), range_label),
            },
            xaxis: XAxis {
                title: AxisTitle {
                    text: X_AXIS_TITLE.to_string(),
                },
                range: [interval.start(), interval.end()],
                tickmode: "array",
                tickvals: ticks.iter().map(|t| t.doy).collect(),
                ticktext: ticks.iter().map(|t| t.label.clone()).collect(),
                zeroline: false,
            },
            yaxis: YAxis {
                title: AxisTitle {
                    text: y_axis_title(metric),
                },
                zeroline: metric.is_temperature(),
            },
            legend: Legend {
                orientation: "h",
                x: 0.0,
                y: -0.18,
                xanchor: "left",
                yanchor: "top",
            },
            hovermode: "x unified",
            margin: Margin {
                l: 60,
                r: 20,
                t: 80,
                b: 40,
            },
            annotations,
        },
        config: PlotConfig {
            responsive: true,
            displaylogo: false,
        },
    }
}

fn plotly_trace(trace: &Trace, metric: Metric) -> PlotlyTrace {
    PlotlyTrace {
        trace_type: "scatter",
        name: trace.name.clone(),
        x: trace.x.clone(),
        y: trace.y.clone(),
        mode: trace.mode,
        line: trace.line.clone(),
        marker: trace.marker.clone(),
        fill: trace.fill,
        fillcolor: trace.fill_color.clone(),
        showlegend: trace.show_legend,
        legendgroup: trace.legend_group.clone(),
        text: trace.x.iter().map(|d| calendar::doy_label(*d)).collect(),
        hovertemplate: format!(
            "{}<br>%{{text}}: %{{y:.1f}} {}<extra></extra>",
            trace.name,
            metric.unit()
        ),
    }
}
