//! Derives a climatology table from the observation table.
//!
//! Used when no climatology file is published, or it fails to load. Means
//! and percentiles are computed per day-of-year over all observed years for
//! the percentile-eligible metrics; missing values are ignored.

use crate::calendar::{Doy, FIRST_DOY, LAST_DOY};
use crate::metric::Metric;
use crate::tables::{
    ClimatologyRow, ClimatologyShape, ClimatologyTable, ObservationTable, Percentile,
};

impl ClimatologyTable {
    /// Long-run mean per day-of-year.
    pub fn mean_from_observations(observations: &ObservationTable) -> Self {
        let rows = derive_rows(observations, |row, metric, values| {
            row.mean.set(metric, mean(values));
        });
        ClimatologyTable::from_rows(ClimatologyShape::Mean, rows)
    }

    /// p10/p50/p90 per day-of-year.
    pub fn percentiles_from_observations(observations: &ObservationTable) -> Self {
        let rows = derive_rows(observations, |row, metric, values| {
            for p in Percentile::ALL {
                row.percentile_mut(p)
                    .set(metric, percentile(values, p.fraction()));
            }
        });
        ClimatologyTable::from_rows(ClimatologyShape::Percentile, rows)
    }
}

fn derive_rows<F>(observations: &ObservationTable, mut fill: F) -> Vec<ClimatologyRow>
where
    F: FnMut(&mut ClimatologyRow, Metric, &mut [f64]),
{
    let eligible: Vec<Metric> = Metric::ALL
        .into_iter()
        .filter(|m| m.is_percentile_eligible())
        .collect();

    // samples[doy - 1][metric] -> values over all years
    let mut samples: Vec<Vec<Vec<f64>>> =
        vec![vec![Vec::new(); eligible.len()]; LAST_DOY as usize];
    for obs in observations.rows() {
        let day = &mut samples[(obs.doy - FIRST_DOY) as usize];
        for (i, metric) in eligible.iter().enumerate() {
            if let Some(v) = obs.values.get(*metric) {
                day[i].push(v);
            }
        }
    }

    let mut rows = Vec::with_capacity(LAST_DOY as usize);
    for (offset, mut day) in samples.into_iter().enumerate() {
        let mut row = ClimatologyRow::new(FIRST_DOY + offset as Doy);
        for (i, metric) in eligible.iter().enumerate() {
            fill(&mut row, *metric, day[i].as_mut_slice());
        }
        rows.push(row);
    }
    rows
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Linear interpolation between closest ranks. Sorts `values` in place.
fn percentile(values: &mut [f64], fraction: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let rank = fraction.clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(values[lower] + (values[upper] - values[lower]) * weight)
}
