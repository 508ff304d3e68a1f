//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the loaded session and every selector's current value.
//! Child components retrieve it with `use_context::<AppState>()`; the rebuild
//! effect turns it into a plain [`Selection`] once per change.

use dioxus::prelude::*;
use std::rc::Rc;
use wx_doy::calendar::REFERENCE_YEAR;
use wx_doy::{Endpoint, Interval, Metric, PercentileToggles, Preset, Selection, Session};

#[derive(Clone, Copy)]
pub struct AppState {
    /// Loaded tables (None until both fetches finish)
    pub session: Signal<Option<Rc<Session>>>,
    /// Whether the initial fetch is still running
    pub loading: Signal<bool>,
    /// Load failure; the chart area shows this instead of a chart
    pub error_msg: Signal<Option<String>>,
    /// Rendering failure from the last rebuild
    pub render_error: Signal<Option<String>>,
    pub metric: Signal<Metric>,
    pub years: Signal<Vec<i32>>,
    /// `YYYY-MM-DD` from the start date input; only month/day are used
    pub start_date: Signal<String>,
    /// `YYYY-MM-DD` from the end date input
    pub end_date: Signal<String>,
    pub percentiles: Signal<PercentileToggles>,
    pub show_climatology: Signal<bool>,
    pub show_imputed: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        let (start, end) = Preset::FullYear.endpoints();
        Self {
            session: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            render_error: Signal::new(None),
            metric: Signal::new(Metric::Tavg),
            years: Signal::new(Vec::new()),
            start_date: Signal::new(endpoint_date(&start)),
            end_date: Signal::new(endpoint_date(&end)),
            percentiles: Signal::new(PercentileToggles::default()),
            show_climatology: Signal::new(true),
            show_imputed: Signal::new(true),
        }
    }

    /// Install a freshly loaded session and its default selection.
    pub fn install_session(&mut self, session: Session) {
        let defaults = session.default_selection();
        self.metric.set(defaults.metric);
        self.years.set(defaults.years);
        self.session.set(Some(Rc::new(session)));
    }

    /// Snapshot of every selector as plain data.
    pub fn selection(&self) -> Selection {
        let start = Endpoint::Date((self.start_date)());
        let end = Endpoint::Date((self.end_date)());
        Selection {
            metric: (self.metric)(),
            years: (self.years)(),
            interval: Interval::resolve(&start, &end),
            percentiles: (self.percentiles)(),
            show_climatology: (self.show_climatology)(),
            show_imputed: (self.show_imputed)(),
        }
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        let (start, end) = preset.endpoints();
        self.start_date.set(endpoint_date(&start));
        self.end_date.set(endpoint_date(&end));
    }

    pub fn toggle_year(&mut self, year: i32) {
        let mut years = (self.years)();
        match years.iter().position(|y| *y == year) {
            Some(i) => {
                years.remove(i);
            }
            None => {
                years.push(year);
                years.sort_unstable();
            }
        }
        self.years.set(years);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Date-input value for an endpoint, placed on the reference year.
pub fn endpoint_date(endpoint: &Endpoint) -> String {
    match endpoint {
        Endpoint::Date(s) => s.clone(),
        Endpoint::MonthDay { .. } => {
            let (month, day) = endpoint
                .to_doy()
                .map(wx_doy::calendar::doy_to_md)
                .unwrap_or((1, 1));
            format!("{REFERENCE_YEAR:04}-{month:02}-{day:02}")
        }
    }
}
