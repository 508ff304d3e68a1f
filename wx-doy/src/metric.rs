//! The six station metrics and their display metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A daily observation metric, keyed by its CSV column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Tmin_C")]
    Tmin,
    #[serde(rename = "Tmax_C")]
    Tmax,
    #[serde(rename = "Tavg_C")]
    Tavg,
    #[serde(rename = "PRCP_mm")]
    Prcp,
    #[serde(rename = "SNOW_mm")]
    Snow,
    #[serde(rename = "SNWD_mm")]
    Snwd,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Tmin,
        Metric::Tmax,
        Metric::Tavg,
        Metric::Prcp,
        Metric::Snow,
        Metric::Snwd,
    ];

    /// Column name in the observation and climatology CSVs.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Tmin => "Tmin_C",
            Metric::Tmax => "Tmax_C",
            Metric::Tavg => "Tavg_C",
            Metric::Prcp => "PRCP_mm",
            Metric::Snow => "SNOW_mm",
            Metric::Snwd => "SNWD_mm",
        }
    }

    /// Axis title for the y-axis.
    pub fn title(self) -> &'static str {
        match self {
            Metric::Tmin => "Minimum temperature",
            Metric::Tmax => "Maximum temperature",
            Metric::Tavg => "Average temperature",
            Metric::Prcp => "Precipitation",
            Metric::Snow => "Snowfall",
            Metric::Snwd => "Snow depth",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Tmin | Metric::Tmax | Metric::Tavg => "°C",
            Metric::Prcp | Metric::Snow | Metric::Snwd => "mm",
        }
    }

    pub fn is_temperature(self) -> bool {
        matches!(self, Metric::Tmin | Metric::Tmax | Metric::Tavg)
    }

    /// Temperature and precipitation carry climatology; snow metrics do not.
    pub fn is_percentile_eligible(self) -> bool {
        !matches!(self, Metric::Snow | Metric::Snwd)
    }

    /// Position in fixed-size per-metric arrays.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown metric: {s}"))
    }
}

/// One optional value per metric, indexed by [`Metric`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricValues([Option<f64>; 6]);

impl MetricValues {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0[metric.index()]
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        self.0[metric.index()] = value;
    }
}
