//! The two loaded tables plus configuration, built once at start-up.
//!
//! After construction a session is read-only; every rebuild is a pure
//! function of the session and the current [`Selection`].

use crate::chart_spec::{self, ChartSpec};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::interval::Interval;
use crate::selection::Selection;
use crate::series;
use crate::tables::{ClimatologyShape, ClimatologyTable, ObservationTable};
use crate::ticks;

pub const OBSERVATIONS_SOURCE: &str = "daily observations";
pub const CLIMATOLOGY_SOURCE: &str = "climatology";

#[derive(Debug, Clone)]
pub struct Session {
    observations: ObservationTable,
    climatology: Option<ClimatologyTable>,
    config: DashboardConfig,
}

impl Session {
    pub fn new(
        observations: ObservationTable,
        climatology: Option<ClimatologyTable>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            observations,
            climatology,
            config,
        }
    }

    /// Both tables must load.
    pub fn from_csv(observations: &str, climatology: &str) -> Result<Self> {
        let observations = ObservationTable::from_csv(OBSERVATIONS_SOURCE, observations)?;
        let climatology = ClimatologyTable::from_csv(CLIMATOLOGY_SOURCE, climatology)?;
        Ok(Self::new(observations, Some(climatology), DashboardConfig::default()))
    }

    /// Observations must load. A missing or unusable climatology file is
    /// replaced by a climatology derived from the observations, shaped by
    /// `config.derived_climatology`.
    pub fn load(
        observations: &str,
        climatology: Option<&str>,
        config: DashboardConfig,
    ) -> Result<Self> {
        let observations = ObservationTable::from_csv(OBSERVATIONS_SOURCE, observations)?;
        let parsed = climatology.map(|text| ClimatologyTable::from_csv(CLIMATOLOGY_SOURCE, text));
        let climatology = match parsed {
            Some(Ok(table)) => table,
            Some(Err(e)) => {
                log::warn!("session: {}; deriving climatology from observations", e);
                derive_climatology(&observations, config.derived_climatology)
            }
            None => {
                log::warn!("session: no climatology file; deriving from observations");
                derive_climatology(&observations, config.derived_climatology)
            }
        };
        Ok(Self::new(observations, Some(climatology), config))
    }

    pub fn observations(&self) -> &ObservationTable {
        &self.observations
    }

    pub fn climatology(&self) -> Option<&ClimatologyTable> {
        self.climatology.as_ref()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn years(&self) -> Vec<i32> {
        self.observations.years()
    }

    pub fn highlight_year(&self) -> Option<i32> {
        self.config.highlight.highlighted_year(&self.observations)
    }

    /// Initial selection: configured metric, the most recent years, full year.
    pub fn default_selection(&self) -> Selection {
        let years = self.years();
        let skip = years.len().saturating_sub(self.config.default_year_count);
        Selection::new(
            self.config.default_metric,
            years[skip..].to_vec(),
            Interval::FULL_YEAR,
        )
    }

    /// One full rebuild: traces, ticks and layout for `selection`.
    pub fn rebuild(&self, selection: &Selection) -> ChartSpec {
        let traces = series::assemble(
            &self.observations,
            self.climatology.as_ref(),
            selection,
            self.highlight_year(),
            &self.config.style,
        );
        let ticks = ticks::ticks(selection.interval);
        chart_spec::build(&traces, selection.metric, selection.interval, &ticks)
    }
}

fn derive_climatology(
    observations: &ObservationTable,
    shape: ClimatologyShape,
) -> ClimatologyTable {
    match shape {
        ClimatologyShape::Mean => ClimatologyTable::mean_from_observations(observations),
        ClimatologyShape::Percentile => {
            ClimatologyTable::percentiles_from_observations(observations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Endpoint;
    use crate::metric::Metric;
    use crate::selection::PercentileToggles;
    use crate::series::Fill;

    const DAILY: &str = "\
Date,Year,DOY_366,DOY_365,Tmin_C,Tmax_C,Tavg_C,PRCP_mm,SNOW_mm,SNWD_mm,ImputedTempFlag
2020-01-01,2020,1,1,1,9,5,0,0,0,0
2020-01-02,2020,2,2,,,,0,0,0,0
2021-01-01,2021,1,1,0,6,3,1.5,0,0,0
2021-01-02,2021,2,2,-1,5,2,0,12,40,1
";

    fn percentile_csv() -> String {
        let mut csv = String::from("DOY_365,Tavg_C_p10,Tavg_C_p50,Tavg_C_p90\n");
        for doy in 1..=365 {
            csv.push_str(&format!("{doy},0,4,8\n"));
        }
        csv
    }

    #[test]
    fn end_to_end_gap_for_empty_field() {
        let csv = "Year,DOY_365,Tavg_C\n2020,1,5\n2020,2,\n";
        let session = Session::load(csv, None, DashboardConfig::default()).unwrap();
        let selection = Selection::new(Metric::Tavg, vec![2020], Interval::new(1, 2));
        let spec = session.rebuild(&selection);
        let year = spec.data.iter().find(|t| t.name == "2020").unwrap();
        assert_eq!(year.y, vec![Some(5.0), None]);
        assert_eq!(year.x, vec![1, 2]);
        assert_eq!(year.text.len(), 2);
    }

    #[test]
    fn end_to_end_swapped_month_days() {
        let interval = Interval::resolve(&Endpoint::month_day(12, 31), &Endpoint::month_day(1, 1));
        assert_eq!((interval.start(), interval.end()), (1, 365));
    }

    #[test]
    fn band_survives_full_rebuild() {
        let session = Session::from_csv(DAILY, &percentile_csv()).unwrap();
        let mut selection = session.default_selection();
        selection.percentiles = PercentileToggles::ALL;
        let spec = session.rebuild(&selection);
        let names: Vec<&str> = spec.data.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            &names[..3],
            &["p10 (historical)", "p10-p90 band (historical)", "p50 (historical)"]
        );
        assert_eq!(spec.data[1].fill, Fill::ToPrevious);
        assert_eq!(
            spec.data.iter().filter(|t| t.fill == Fill::ToPrevious).count(),
            1
        );
    }

    #[test]
    fn default_selection_takes_most_recent_years() {
        let mut config = DashboardConfig::default();
        config.default_year_count = 1;
        let session = Session::load(DAILY, None, config).unwrap();
        let selection = session.default_selection();
        assert_eq!(selection.years, vec![2021]);
        assert_eq!(selection.metric, Metric::Tavg);
        assert!(selection.interval.is_full_year());
        assert_eq!(session.highlight_year(), Some(2021));
    }

    #[test]
    fn unusable_climatology_is_derived() {
        let session =
            Session::load(DAILY, Some("DOY_365,Tavg_C\n"), DashboardConfig::default()).unwrap();
        let clim = session.climatology().unwrap();
        assert_eq!(clim.shape(), ClimatologyShape::Mean);
        assert_eq!(clim.rows()[0].mean.get(Metric::Tavg), Some(4.0));
    }

    #[test]
    fn derived_percentiles_draw_the_band() {
        let mut config = DashboardConfig::default();
        config.derived_climatology = ClimatologyShape::Percentile;
        let session = Session::load(DAILY, None, config).unwrap();
        let clim = session.climatology().unwrap();
        assert_eq!(clim.shape(), ClimatologyShape::Percentile);
        assert_eq!(clim.rows()[0].p50.get(Metric::Tavg), Some(4.0));

        let spec = session.rebuild(&session.default_selection());
        let band = spec
            .data
            .iter()
            .find(|t| t.name == "p10-p90 band (historical)")
            .unwrap();
        assert_eq!(band.fill, Fill::ToPrevious);
        assert_eq!(band.y[0], Some(4.8));
    }

    #[test]
    fn missing_observations_is_a_load_error() {
        let err = Session::load("Year,DOY_365\n", None, DashboardConfig::default()).unwrap_err();
        assert!(err.is_load());
        assert!(Session::from_csv(DAILY, "").unwrap_err().is_load());
    }

    #[test]
    fn rebuild_is_repeatable() {
        let session = Session::from_csv(DAILY, &percentile_csv()).unwrap();
        let selection = session.default_selection();
        assert_eq!(session.rebuild(&selection), session.rebuild(&selection));
    }

    #[test]
    fn highlighted_year_gets_heavier_line_in_chart() {
        let session = Session::from_csv(DAILY, &percentile_csv()).unwrap();
        let spec = session.rebuild(&session.default_selection());
        let width = |name: &str| {
            spec.data
                .iter()
                .find(|t| t.name == name)
                .and_then(|t| t.line.as_ref())
                .map(|l| l.width)
                .unwrap()
        };
        assert!(width("2021") > width("2020"));
    }
}
