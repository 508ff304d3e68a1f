//! Reusable Dioxus RSX components for the overlay chart.

mod chart_container;
mod chart_header;
mod date_range_picker;
mod error_display;
mod loading_spinner;
mod metric_selector;
mod overlay_toggles;
mod year_selector;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use date_range_picker::DateRangePicker;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use metric_selector::MetricSelector;
pub use overlay_toggles::OverlayToggles;
pub use year_selector::YearSelector;
