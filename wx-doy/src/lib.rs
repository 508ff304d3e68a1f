//! Day-of-year normalization and multi-year overlay engine.
//!
//! Daily station observations from many years are mapped onto a common
//! 1..=365 day-of-year axis (Feb 29 has no representation), clipped to a
//! user-chosen interval, and assembled into chart traces together with the
//! historical climatology mean or percentile band.
//!
//! The crate is pure: it never touches the DOM. The browser app feeds it the
//! raw CSV text once, then calls [`Session::rebuild`] on every selection
//! change and hands the resulting [`chart_spec::ChartSpec`] to Plotly.
//!
//! ```rust
//! use wx_doy::{Interval, Metric, Selection, Session};
//!
//! let observations = "Year,DOY_365,Tavg_C,ImputedTempFlag\n2020,1,5,0\n2020,2,,0\n";
//! let climatology = "DOY_365,Tavg_C\n1,2.5\n2,2.7\n";
//! let session = Session::from_csv(observations, climatology).unwrap();
//!
//! let selection = Selection::new(Metric::Tavg, vec![2020], Interval::new(1, 2));
//! let spec = session.rebuild(&selection);
//! assert_eq!(spec.data.last().unwrap().y, vec![Some(5.0), None]);
//! ```

pub mod calendar;
pub mod chart_spec;
pub mod climatology;
pub mod config;
pub mod csv_table;
pub mod error;
pub mod interval;
pub mod metric;
pub mod selection;
pub mod series;
pub mod session;
pub mod tables;
pub mod ticks;

pub use config::{DashboardConfig, HighlightPolicy};
pub use error::{Result, WxError};
pub use interval::{Endpoint, Interval, Preset};
pub use metric::Metric;
pub use selection::{PercentileToggles, Selection};
pub use session::Session;
