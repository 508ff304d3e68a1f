//! Assembles the ordered trace list for one rebuild.
//!
//! Climatology traces come first so the year lines draw on top of them.
//! Within the percentile group the order is p10, p90, p50: the p90 trace
//! fills back to the trace immediately before it, so p10 must directly
//! precede it or the band is lost.

use crate::calendar::Doy;
use crate::config::ChartStyle;
use crate::interval::Interval;
use crate::metric::Metric;
use crate::selection::Selection;
use crate::tables::{
    ClimatologyRow, ClimatologyShape, ClimatologyTable, ObservationTable, Percentile,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Lines,
    Markers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Fill {
    #[default]
    #[serde(rename = "none")]
    None,
    /// Fill the region between this trace and the one before it.
    #[serde(rename = "tonexty")]
    ToPrevious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    Solid,
    Dash,
    Dot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub width: f64,
    pub color: String,
    pub dash: Dash,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub symbol: &'static str,
    pub size: f64,
    pub color: String,
}

/// What a trace represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    ClimatologyMean,
    Percentile(Percentile),
    Year { year: i32, highlighted: bool },
    Imputed { year: i32 },
}

/// One series of (day-of-year, value) points plus display metadata.
///
/// `x` and `y` always have the same length; a missing value is `None` at its
/// index so the line shows a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub kind: TraceKind,
    pub x: Vec<Doy>,
    pub y: Vec<Option<f64>>,
    pub mode: Mode,
    pub line: Option<LineStyle>,
    pub marker: Option<MarkerStyle>,
    pub fill: Fill,
    pub fill_color: Option<String>,
    pub show_legend: bool,
    pub legend_group: Option<String>,
}

impl Trace {
    fn line(
        name: String,
        kind: TraceKind,
        x: Vec<Doy>,
        y: Vec<Option<f64>>,
        line: LineStyle,
    ) -> Self {
        Self {
            name,
            kind,
            x,
            y,
            mode: Mode::Lines,
            line: Some(line),
            marker: None,
            fill: Fill::None,
            fill_color: None,
            show_legend: true,
            legend_group: None,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// One year's points inside the interval, aligned index by index.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSeries {
    pub year: i32,
    pub x: Vec<Doy>,
    pub y: Vec<Option<f64>>,
    pub imputed: Vec<bool>,
}

impl YearSeries {
    pub fn collect(
        observations: &ObservationTable,
        year: i32,
        metric: Metric,
        interval: Interval,
    ) -> Self {
        let rows = observations
            .year_rows(year)
            .iter()
            .filter(|r| interval.contains(r.doy));
        let mut series = YearSeries {
            year,
            x: Vec::new(),
            y: Vec::new(),
            imputed: Vec::new(),
        };
        for row in rows {
            series.x.push(row.doy);
            series.y.push(row.values.get(metric));
            series.imputed.push(row.imputed);
        }
        series
    }

    /// Points flagged as imputed, same x/y values as the full series.
    pub fn imputed_points(&self) -> (Vec<Doy>, Vec<Option<f64>>) {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.imputed)
            .filter(|(_, imputed)| **imputed)
            .map(|((x, y), _)| (*x, *y))
            .unzip()
    }
}

/// Builds every trace for `selection`, climatology first.
pub fn assemble(
    observations: &ObservationTable,
    climatology: Option<&ClimatologyTable>,
    selection: &Selection,
    highlight_year: Option<i32>,
    style: &ChartStyle,
) -> Vec<Trace> {
    let mut traces = Vec::new();
    if let Some(climatology) = climatology {
        traces.extend(climatology_traces(climatology, selection, style));
    }
    traces.extend(year_traces(observations, selection, highlight_year, style));
    log::debug!(
        "series: {} traces for {} over {:?}",
        traces.len(),
        selection.metric,
        selection.interval
    );
    traces
}

/// Mean line, or the p10/p90 band and p50 line.
pub fn climatology_traces(
    climatology: &ClimatologyTable,
    selection: &Selection,
    style: &ChartStyle,
) -> Vec<Trace> {
    let metric = selection.metric;
    if !metric.is_percentile_eligible() {
        return Vec::new();
    }
    let rows: Vec<&ClimatologyRow> = climatology
        .rows()
        .iter()
        .filter(|r| selection.interval.contains(r.doy))
        .collect();
    let x: Vec<Doy> = rows.iter().map(|r| r.doy).collect();

    match climatology.shape() {
        ClimatologyShape::Mean => {
            let y: Vec<Option<f64>> = rows.iter().map(|r| r.mean.get(metric)).collect();
            if !selection.show_climatology || y.iter().all(Option::is_none) {
                return Vec::new();
            }
            vec![Trace::line(
                "Climatology (mean)".to_string(),
                TraceKind::ClimatologyMean,
                x,
                y,
                LineStyle {
                    width: style.climatology_width,
                    color: style.climatology_color.clone(),
                    dash: Dash::Dash,
                },
            )]
        }
        ClimatologyShape::Percentile => {
            let toggles = selection.percentiles;
            let mut traces = Vec::new();
            for p in [Percentile::P10, Percentile::P90, Percentile::P50] {
                if !toggles.is_enabled(p) {
                    continue;
                }
                let y = rows.iter().map(|r| r.percentile(p).get(metric)).collect();
                let line = match p {
                    Percentile::P50 => LineStyle {
                        width: style.climatology_width,
                        color: style.median_color.clone(),
                        dash: Dash::Dash,
                    },
                    _ => LineStyle {
                        width: 1.0,
                        color: style.band_line_color.clone(),
                        dash: Dash::Solid,
                    },
                };
                let mut trace = Trace::line(
                    format!("{} (historical)", p.suffix()),
                    TraceKind::Percentile(p),
                    x.clone(),
                    y,
                    line,
                );
                if p == Percentile::P90 && toggles.p10 {
                    trace.name = "p10-p90 band (historical)".to_string();
                    trace.fill = Fill::ToPrevious;
                    trace.fill_color = Some(style.band_fill_color.clone());
                }
                traces.push(trace);
            }
            traces
        }
    }
}

/// One line per selected year, each followed by its imputed-value markers.
pub fn year_traces(
    observations: &ObservationTable,
    selection: &Selection,
    highlight_year: Option<i32>,
    style: &ChartStyle,
) -> Vec<Trace> {
    let mut traces = Vec::new();
    let mut palette = style.year_palette.iter().cycle();
    for year in selection.sorted_years() {
        let series = YearSeries::collect(observations, year, selection.metric, selection.interval);
        if series.x.is_empty() {
            log::debug!("series: no rows for {} in {:?}", year, selection.interval);
        }
        let highlighted = highlight_year == Some(year);
        let color = if highlighted {
            style.highlight_color.clone()
        } else {
            palette.next().cloned().unwrap_or_else(|| style.highlight_color.clone())
        };
        let width = if highlighted {
            style.highlight_width
        } else {
            style.year_width
        };

        let markers = if selection.show_imputed && selection.metric.is_temperature() {
            let (x, y) = series.imputed_points();
            (!x.is_empty()).then(|| Trace {
                name: format!("{year} imputed"),
                kind: TraceKind::Imputed { year },
                x,
                y,
                mode: Mode::Markers,
                line: None,
                marker: Some(MarkerStyle {
                    symbol: "circle-open",
                    size: 6.0,
                    color: style.imputed_marker_color.clone(),
                }),
                fill: Fill::None,
                fill_color: None,
                show_legend: false,
                legend_group: Some(year.to_string()),
            })
        } else {
            None
        };

        let mut trace = Trace::line(
            year.to_string(),
            TraceKind::Year { year, highlighted },
            series.x,
            series.y,
            LineStyle {
                width,
                color,
                dash: Dash::Solid,
            },
        );
        trace.legend_group = Some(year.to_string());
        traces.push(trace);
        traces.extend(markers);
    }
    traces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::MetricValues;
    use crate::selection::PercentileToggles;
    use crate::tables::ObservationRow;

    fn percentile_climatology() -> ClimatologyTable {
        let mut csv = String::from(
            "DOY_365,Tavg_C_p10,Tavg_C_p50,Tavg_C_p90,PRCP_mm_p10,PRCP_mm_p50,PRCP_mm_p90\n",
        );
        for doy in 1..=365 {
            csv.push_str(&format!("{doy},1.0,5.0,9.0,0.0,0.5,4.0\n"));
        }
        ClimatologyTable::from_csv("pctl", &csv).unwrap()
    }

    fn observations() -> ObservationTable {
        ObservationTable::from_csv(
            "daily",
            "\
Year,DOY_365,Tavg_C,SNOW_mm,ImputedTempFlag
2020,1,5,0,0
2020,2,,0,1
2020,3,7,,1
2021,1,3,5,0
2021,2,4,0,0
",
        )
        .unwrap()
    }

    fn selection(metric: Metric, interval: Interval) -> Selection {
        Selection::new(metric, vec![2020, 2021], interval)
    }

    #[test]
    fn snow_metrics_emit_no_percentile_traces() {
        let clim = percentile_climatology();
        for metric in [Metric::Snow, Metric::Snwd] {
            let mut sel = selection(metric, Interval::FULL_YEAR);
            sel.percentiles = PercentileToggles::ALL;
            let traces = climatology_traces(&clim, &sel, &ChartStyle::default());
            assert!(traces.is_empty());
        }
    }

    #[test]
    fn percentile_traces_are_clipped_to_interval() {
        let clim = percentile_climatology();
        let sel = selection(Metric::Tavg, Interval::new(60, 90));
        let traces = climatology_traces(&clim, &sel, &ChartStyle::default());
        assert_eq!(traces.len(), 3);
        for trace in &traces {
            assert_eq!(trace.len(), 31);
            assert_eq!(trace.y.len(), 31);
            assert!(trace.x.iter().all(|d| (60..=90).contains(d)));
        }
    }

    #[test]
    fn band_order_puts_p90_right_after_p10() {
        let clim = percentile_climatology();
        let sel = selection(Metric::Prcp, Interval::FULL_YEAR);
        let traces = assemble(&observations(), Some(&clim), &sel, None, &ChartStyle::default());
        let p10 = traces
            .iter()
            .position(|t| t.kind == TraceKind::Percentile(Percentile::P10))
            .unwrap();
        assert_eq!(traces[p10 + 1].kind, TraceKind::Percentile(Percentile::P90));
        let filled: Vec<_> = traces.iter().filter(|t| t.fill == Fill::ToPrevious).collect();
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].kind, TraceKind::Percentile(Percentile::P90));
    }

    #[test]
    fn p90_without_p10_is_unfilled() {
        let clim = percentile_climatology();
        let mut sel = selection(Metric::Tavg, Interval::FULL_YEAR);
        sel.percentiles = PercentileToggles {
            p10: false,
            p50: true,
            p90: true,
        };
        let traces = climatology_traces(&clim, &sel, &ChartStyle::default());
        assert_eq!(traces.len(), 2);
        assert!(traces.iter().all(|t| t.fill == Fill::None));
    }

    #[test]
    fn climatology_precedes_years() {
        let clim = percentile_climatology();
        let sel = selection(Metric::Tavg, Interval::FULL_YEAR);
        let traces = assemble(
            &observations(),
            Some(&clim),
            &sel,
            Some(2021),
            &ChartStyle::default(),
        );
        let first_year = traces
            .iter()
            .position(|t| matches!(t.kind, TraceKind::Year { .. }))
            .unwrap();
        assert!(traces[..first_year]
            .iter()
            .all(|t| matches!(t.kind, TraceKind::Percentile(_))));
    }

    #[test]
    fn missing_value_is_a_gap_not_zero() {
        let sel = selection(Metric::Tavg, Interval::new(1, 2));
        let traces = year_traces(&observations(), &sel, None, &ChartStyle::default());
        let y2020 = traces
            .iter()
            .find(|t| t.kind == TraceKind::Year { year: 2020, highlighted: false })
            .unwrap();
        assert_eq!(y2020.x, vec![1, 2]);
        assert_eq!(y2020.y, vec![Some(5.0), None]);
    }

    #[test]
    fn year_series_arrays_stay_aligned() {
        let series = YearSeries::collect(&observations(), 2020, Metric::Snow, Interval::FULL_YEAR);
        assert_eq!(series.x, vec![1, 2, 3]);
        assert_eq!(series.y, vec![Some(0.0), Some(0.0), None]);
        assert_eq!(series.imputed, vec![false, true, true]);
    }

    #[test]
    fn highlighted_year_is_heavier() {
        let style = ChartStyle::default();
        let sel = selection(Metric::Tavg, Interval::FULL_YEAR);
        let traces = year_traces(&observations(), &sel, Some(2021), &style);
        let width = |year| {
            traces
                .iter()
                .find(|t| matches!(t.kind, TraceKind::Year { year: y, .. } if y == year))
                .and_then(|t| t.line.as_ref())
                .map(|l| l.width)
                .unwrap()
        };
        assert_eq!(width(2021), style.highlight_width);
        assert_eq!(width(2020), style.year_width);
        assert!(width(2021) > width(2020));
    }

    #[test]
    fn imputed_markers_follow_their_year() {
        let sel = selection(Metric::Tavg, Interval::FULL_YEAR);
        let traces = year_traces(&observations(), &sel, None, &ChartStyle::default());
        let kinds: Vec<_> = traces.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TraceKind::Year { year: 2020, highlighted: false },
                TraceKind::Imputed { year: 2020 },
                TraceKind::Year { year: 2021, highlighted: false },
            ]
        );
        let markers = &traces[1];
        assert_eq!(markers.x, vec![2, 3]);
        assert_eq!(markers.y, vec![None, Some(7.0)]);
        assert_eq!(markers.mode, Mode::Markers);
        assert!(!markers.show_legend);
    }

    #[test]
    fn no_imputed_markers_for_non_temperature() {
        let sel = selection(Metric::Snow, Interval::FULL_YEAR);
        let traces = year_traces(&observations(), &sel, None, &ChartStyle::default());
        assert!(traces.iter().all(|t| matches!(t.kind, TraceKind::Year { .. })));
    }

    #[test]
    fn mean_climatology_emits_one_dashed_line() {
        let rows = (1..=365)
            .map(|doy| {
                let mut row = ClimatologyRow::new(doy);
                row.mean.set(Metric::Tavg, Some(doy as f64 / 10.0));
                row
            })
            .collect();
        let clim = ClimatologyTable::from_rows(ClimatologyShape::Mean, rows);
        let sel = selection(Metric::Tavg, Interval::new(10, 19));
        let traces = climatology_traces(&clim, &sel, &ChartStyle::default());
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].kind, TraceKind::ClimatologyMean);
        assert_eq!(traces[0].len(), 10);

        let mut hidden = sel.clone();
        hidden.show_climatology = false;
        assert!(climatology_traces(&clim, &hidden, &ChartStyle::default()).is_empty());

        let snow = selection(Metric::Snow, Interval::FULL_YEAR);
        assert!(climatology_traces(&clim, &snow, &ChartStyle::default()).is_empty());
    }

    #[test]
    fn mean_file_with_snow_column_draws_no_snow_climatology() {
        let mut csv = String::from("DOY_365,Tavg_C,SNOW_mm,SNWD_mm\n");
        for doy in 1..=365 {
            csv.push_str(&format!("{doy},4.0,2.5,30.0\n"));
        }
        let clim = ClimatologyTable::from_csv("mean", &csv).unwrap();
        assert_eq!(clim.rows()[0].mean.get(Metric::Snow), Some(2.5));
        for metric in [Metric::Snow, Metric::Snwd] {
            let sel = selection(metric, Interval::FULL_YEAR);
            assert!(climatology_traces(&clim, &sel, &ChartStyle::default()).is_empty());
        }
        let sel = selection(Metric::Tavg, Interval::FULL_YEAR);
        assert_eq!(climatology_traces(&clim, &sel, &ChartStyle::default()).len(), 1);
    }

    #[test]
    fn synthetic_rows_without_csv() {
        let mut values = MetricValues::default();
        values.set(Metric::Tmax, Some(30.0));
        let table = ObservationTable::from_rows(vec![ObservationRow {
            year: 1999,
            doy: 200,
            values,
            imputed: false,
        }]);
        let sel = Selection::new(Metric::Tmax, vec![1999], Interval::new(199, 201));
        let traces = assemble(&table, None, &sel, table.max_year(), &ChartStyle::default());
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].kind, TraceKind::Year { year: 1999, highlighted: true });
        assert_eq!(traces[0].y, vec![Some(30.0)]);
    }
}
