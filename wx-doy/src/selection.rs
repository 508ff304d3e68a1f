//! The current UI selection, assembled once per rebuild.

use crate::interval::Interval;
use crate::metric::Metric;
use crate::tables::Percentile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileToggles {
    pub p10: bool,
    pub p50: bool,
    pub p90: bool,
}

impl PercentileToggles {
    pub const NONE: PercentileToggles = PercentileToggles {
        p10: false,
        p50: false,
        p90: false,
    };

    pub const ALL: PercentileToggles = PercentileToggles {
        p10: true,
        p50: true,
        p90: true,
    };

    pub fn is_enabled(&self, percentile: Percentile) -> bool {
        match percentile {
            Percentile::P10 => self.p10,
            Percentile::P50 => self.p50,
            Percentile::P90 => self.p90,
        }
    }

    pub fn set(&mut self, percentile: Percentile, enabled: bool) {
        match percentile {
            Percentile::P10 => self.p10 = enabled,
            Percentile::P50 => self.p50 = enabled,
            Percentile::P90 => self.p90 = enabled,
        }
    }

    /// p10 and p90 both on: the band is filled.
    pub fn is_band(&self) -> bool {
        self.p10 && self.p90
    }
}

impl Default for PercentileToggles {
    fn default() -> Self {
        PercentileToggles::ALL
    }
}

/// Everything a rebuild reads from the page, as plain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub metric: Metric,
    pub years: Vec<i32>,
    pub interval: Interval,
    pub percentiles: PercentileToggles,
    /// Draw the climatology mean (mean-shaped climatology only).
    pub show_climatology: bool,
    /// Overlay markers on imputed temperature values.
    pub show_imputed: bool,
}

impl Selection {
    pub fn new(metric: Metric, years: Vec<i32>, interval: Interval) -> Self {
        Self {
            metric,
            years,
            interval,
            percentiles: PercentileToggles::default(),
            show_climatology: true,
            show_imputed: true,
        }
    }

    /// Selected years, ascending and distinct.
    pub fn sorted_years(&self) -> Vec<i32> {
        let mut years = self.years.clone();
        years.sort_unstable();
        years.dedup();
        years
    }
}
