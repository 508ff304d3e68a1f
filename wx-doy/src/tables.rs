//! Typed observation and climatology tables built from parsed CSV rows.

use crate::calendar::{self, Doy, FIRST_DOY, LAST_DOY};
use crate::csv_table::{CsvTable, Row};
use crate::error::{Result, WxError};
use crate::metric::{Metric, MetricValues};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const YEAR_COLUMN: &str = "Year";
pub const DOY_365_COLUMN: &str = "DOY_365";
pub const DOY_366_COLUMN: &str = "DOY_366";
pub const DATE_COLUMN: &str = "Date";
pub const IMPUTED_COLUMN: &str = "ImputedTempFlag";

/// One station-day.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
    pub year: i32,
    pub doy: Doy,
    pub values: MetricValues,
    /// Temperature values on this day were reconstructed, not observed.
    pub imputed: bool,
}

/// All station-days, ordered by (year, doy).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    rows: Vec<ObservationRow>,
}

impl ObservationTable {
    pub fn from_csv(source_name: &str, text: &str) -> Result<Self> {
        let table = CsvTable::parse(source_name, text)?;
        Self::from_table(source_name, &table)
    }

    /// Builds typed rows. Rows without a usable year or day-of-year (Feb 29
    /// included) are skipped; a table left with no rows is a load error.
    pub fn from_table(source_name: &str, table: &CsvTable) -> Result<Self> {
        let mut by_key: BTreeMap<(i32, Doy), ObservationRow> = BTreeMap::new();
        let mut skipped = 0u32;
        for row in table.rows() {
            match observation_from_row(&row) {
                Some(obs) => {
                    if by_key.insert((obs.year, obs.doy), obs).is_some() {
                        skipped += 1;
                    }
                }
                None => skipped += 1,
            }
        }
        if by_key.is_empty() {
            return Err(WxError::load(
                source_name,
                "no rows with a usable Year and day-of-year",
            ));
        }
        if skipped > 0 {
            log::warn!(
                "tables: {}: skipped {} rows without a unique Year/DOY_365",
                source_name,
                skipped
            );
        }
        log::info!("tables: loaded {} observation rows", by_key.len());
        Ok(Self {
            rows: by_key.into_values().collect(),
        })
    }

    /// Rows outside 1..=365 are dropped.
    pub fn from_rows(mut rows: Vec<ObservationRow>) -> Self {
        rows.retain(|r| (FIRST_DOY..=LAST_DOY).contains(&r.doy));
        rows.sort_by_key(|r| (r.year, r.doy));
        rows.dedup_by_key(|r| (r.year, r.doy));
        Self { rows }
    }

    pub fn rows(&self) -> &[ObservationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|r| r.year).collect();
        years.dedup();
        years
    }

    pub fn max_year(&self) -> Option<i32> {
        self.rows.last().map(|r| r.year)
    }

    /// Rows of one year, in day order.
    pub fn year_rows(&self, year: i32) -> &[ObservationRow] {
        let start = self.rows.partition_point(|r| r.year < year);
        let end = self.rows.partition_point(|r| r.year <= year);
        &self.rows[start..end]
    }
}

fn observation_from_row(row: &Row<'_>) -> Option<ObservationRow> {
    let date = row.get(DATE_COLUMN).and_then(calendar::parse_iso_date);
    let year = row
        .integer(YEAR_COLUMN)
        .map(|y| y as i32)
        .or_else(|| date.map(|d| chrono::Datelike::year(&d)))?;
    let doy = row
        .integer(DOY_365_COLUMN)
        .filter(|d| (FIRST_DOY as i64..=LAST_DOY as i64).contains(d))
        .map(|d| d as Doy)
        .or_else(|| date.and_then(calendar::doy365_from_date))
        .or_else(|| {
            row.integer(DOY_366_COLUMN)
                .and_then(|d| u32::try_from(d).ok())
                .and_then(|d| calendar::doy365_from_doy366(year, d))
        })?;

    let mut values = MetricValues::default();
    for metric in Metric::ALL {
        values.set(metric, row.number(metric.key()));
    }
    let imputed = row.number(IMPUTED_COLUMN).is_some_and(|v| v != 0.0);
    Some(ObservationRow {
        year,
        doy,
        values,
        imputed,
    })
}

/// Which climatology file variant was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimatologyShape {
    /// One long-run mean per metric per day.
    #[default]
    Mean,
    /// `<metric>_p10`, `_p50`, `_p90` columns per day.
    Percentile,
}

/// A historical percentile level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Percentile {
    P10,
    P50,
    P90,
}

impl Percentile {
    pub const ALL: [Percentile; 3] = [Percentile::P10, Percentile::P50, Percentile::P90];

    pub fn suffix(self) -> &'static str {
        match self {
            Percentile::P10 => "p10",
            Percentile::P50 => "p50",
            Percentile::P90 => "p90",
        }
    }

    pub fn fraction(self) -> f64 {
        match self {
            Percentile::P10 => 0.10,
            Percentile::P50 => 0.50,
            Percentile::P90 => 0.90,
        }
    }

    pub fn column(self, metric: Metric) -> String {
        format!("{}_{}", metric.key(), self.suffix())
    }
}

/// Climatology statistics for one day-of-year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClimatologyRow {
    pub doy: Doy,
    pub mean: MetricValues,
    pub p10: MetricValues,
    pub p50: MetricValues,
    pub p90: MetricValues,
}

impl ClimatologyRow {
    pub fn new(doy: Doy) -> Self {
        Self {
            doy,
            ..Default::default()
        }
    }

    pub fn percentile(&self, percentile: Percentile) -> &MetricValues {
        match percentile {
            Percentile::P10 => &self.p10,
            Percentile::P50 => &self.p50,
            Percentile::P90 => &self.p90,
        }
    }

    pub fn percentile_mut(&mut self, percentile: Percentile) -> &mut MetricValues {
        match percentile {
            Percentile::P10 => &mut self.p10,
            Percentile::P50 => &mut self.p50,
            Percentile::P90 => &mut self.p90,
        }
    }
}

/// Per-day climatology, one row per day-of-year, ordered by day.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimatologyTable {
    shape: ClimatologyShape,
    rows: Vec<ClimatologyRow>,
}

impl ClimatologyTable {
    pub fn from_csv(source_name: &str, text: &str) -> Result<Self> {
        let table = CsvTable::parse(source_name, text)?;
        Self::from_table(source_name, &table)
    }

    /// The shape is detected from the header: any `<metric>_pNN` column
    /// selects the percentile variant.
    pub fn from_table(source_name: &str, table: &CsvTable) -> Result<Self> {
        let shape = if Metric::ALL.iter().any(|m| {
            Percentile::ALL
                .iter()
                .any(|p| table.has_column(&p.column(*m)))
        }) {
            ClimatologyShape::Percentile
        } else {
            ClimatologyShape::Mean
        };

        let mut by_doy: BTreeMap<Doy, ClimatologyRow> = BTreeMap::new();
        for row in table.rows() {
            let Some(doy) = row
                .integer(DOY_365_COLUMN)
                .filter(|d| (FIRST_DOY as i64..=LAST_DOY as i64).contains(d))
                .map(|d| d as Doy)
            else {
                continue;
            };
            let mut clim = ClimatologyRow::new(doy);
            for metric in Metric::ALL {
                match shape {
                    ClimatologyShape::Mean => clim.mean.set(metric, row.number(metric.key())),
                    ClimatologyShape::Percentile => {
                        for p in Percentile::ALL {
                            clim.percentile_mut(p)
                                .set(metric, row.number(&p.column(metric)));
                        }
                    }
                }
            }
            by_doy.insert(doy, clim);
        }

        if by_doy.is_empty() {
            return Err(WxError::load(source_name, "no rows with a usable DOY_365"));
        }
        if by_doy.len() != LAST_DOY as usize {
            log::warn!(
                "tables: {}: climatology covers {} of {} days",
                source_name,
                by_doy.len(),
                LAST_DOY
            );
        }
        log::info!("tables: loaded {:?} climatology, {} rows", shape, by_doy.len());
        Ok(Self {
            shape,
            rows: by_doy.into_values().collect(),
        })
    }

    pub fn from_rows(shape: ClimatologyShape, mut rows: Vec<ClimatologyRow>) -> Self {
        rows.retain(|r| (FIRST_DOY..=LAST_DOY).contains(&r.doy));
        rows.sort_by_key(|r| r.doy);
        rows.dedup_by_key(|r| r.doy);
        Self { shape, rows }
    }

    pub fn shape(&self) -> ClimatologyShape {
        self.shape
    }

    pub fn rows(&self) -> &[ClimatologyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY: &str = "\
Date,Year,DOY_366,DOY_365,Tmin_C,Tmax_C,Tavg_C,PRCP_mm,SNOW_mm,SNWD_mm,ImputedTempFlag
2024-02-28,2024,59,59.0,1.0,8.0,4.5,0,0,0,0
2024-02-29,2024,60,,2.0,9.0,5.5,0,0,0,0
2024-03-01,2024,61,60.0,3.0,,6.5,1.2,,,1
2023-12-31,2023,365,365,0.5,7.5,4.0,0,0,0,0
";

    #[test]
    fn observations_skip_feb_29_and_sort() {
        let table = ObservationTable::from_csv("daily", DAILY).unwrap();
        assert_eq!(table.len(), 3);
        let rows = table.rows();
        assert_eq!((rows[0].year, rows[0].doy), (2023, 365));
        assert_eq!((rows[1].year, rows[1].doy), (2024, 59));
        assert_eq!((rows[2].year, rows[2].doy), (2024, 60));
        assert_eq!(table.years(), vec![2023, 2024]);
        assert_eq!(table.max_year(), Some(2024));
    }

    #[test]
    fn from_rows_drops_days_outside_the_year() {
        let rows = [0, 1, 365, 366]
            .into_iter()
            .map(|doy| ObservationRow {
                year: 2022,
                doy,
                values: MetricValues::default(),
                imputed: false,
            })
            .collect();
        let table = ObservationTable::from_rows(rows);
        let days: Vec<Doy> = table.rows().iter().map(|r| r.doy).collect();
        assert_eq!(days, vec![1, 365]);

        let clim = ClimatologyTable::from_rows(
            ClimatologyShape::Mean,
            vec![ClimatologyRow::new(0), ClimatologyRow::new(2)],
        );
        assert_eq!(clim.len(), 1);
    }

    #[test]
    fn observation_values_and_flags() {
        let table = ObservationTable::from_csv("daily", DAILY).unwrap();
        let mar1 = &table.year_rows(2024)[1];
        assert_eq!(mar1.values.get(Metric::Tmax), None);
        assert_eq!(mar1.values.get(Metric::Prcp), Some(1.2));
        assert_eq!(mar1.values.get(Metric::Snow), None);
        assert!(mar1.imputed);
        assert!(!table.year_rows(2024)[0].imputed);
    }

    #[test]
    fn doy_derived_from_date_when_column_missing() {
        let csv = "\
Date,Tavg_C
2024-03-01,6.5
2024-02-29,5.5
";
        let table = ObservationTable::from_csv("daily", csv).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].year, 2024);
        assert_eq!(table.rows()[0].doy, 60);
    }

    #[test]
    fn doy_derived_from_doy366() {
        let csv = "Year,DOY_366,Tavg_C\n2024,366,1.0\n2023,60,2.0\n";
        let table = ObservationTable::from_csv("daily", csv).unwrap();
        assert_eq!(table.year_rows(2024)[0].doy, 365);
        assert_eq!(table.year_rows(2023)[0].doy, 60);
    }

    #[test]
    fn year_rows_of_absent_year_is_empty() {
        let table = ObservationTable::from_csv("daily", DAILY).unwrap();
        assert!(table.year_rows(1999).is_empty());
    }

    #[test]
    fn observations_without_keys_fail_to_load() {
        let err = ObservationTable::from_csv("daily", "Tavg_C\n5\n").unwrap_err();
        assert!(err.is_load());
    }

    #[test]
    fn climatology_mean_shape() {
        let csv = "DOY_365,Tmin_C,Tmax_C,Tavg_C,PRCP_mm\n1,-1.0,7.0,3.0,2.5\n2.0,-1.5,6.5,2.5,\n";
        let clim = ClimatologyTable::from_csv("clim", csv).unwrap();
        assert_eq!(clim.shape(), ClimatologyShape::Mean);
        assert_eq!(clim.len(), 2);
        assert_eq!(clim.rows()[0].mean.get(Metric::Tavg), Some(3.0));
        assert_eq!(clim.rows()[1].mean.get(Metric::Prcp), None);
        assert_eq!(clim.rows()[0].p10.get(Metric::Tavg), None);
    }

    #[test]
    fn climatology_percentile_shape() {
        let csv = "DOY_365,Tavg_C_p10,Tavg_C_p50,Tavg_C_p90\n1,-2.0,3.0,8.0\n";
        let clim = ClimatologyTable::from_csv("clim", csv).unwrap();
        assert_eq!(clim.shape(), ClimatologyShape::Percentile);
        let row = &clim.rows()[0];
        assert_eq!(row.percentile(Percentile::P10).get(Metric::Tavg), Some(-2.0));
        assert_eq!(row.percentile(Percentile::P50).get(Metric::Tavg), Some(3.0));
        assert_eq!(row.percentile(Percentile::P90).get(Metric::Tavg), Some(8.0));
        assert_eq!(row.mean.get(Metric::Tavg), None);
    }
}
