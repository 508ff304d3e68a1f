//! Daily Weather Overlay Chart
//!
//! Overlays the selected years of daily station observations on one
//! day-of-year axis (Jan 1 = 1 through Dec 31 = 365, Feb 29 dropped), with
//! the historical climatology mean or p10/p50/p90 band drawn underneath.
//!
//! Data flow:
//! 1. On mount, the observation and climatology CSVs are fetched once.
//! 2. Both are parsed into a `Session`; a failed observation load replaces
//!    the chart area with an error message.
//! 3. Every selector change reruns one synchronous rebuild: the current
//!    `Selection` goes through `Session::rebuild` and the resulting chart
//!    specification fully replaces the previous chart via `Plotly.react`.

use dioxus::prelude::*;
use wx_chart_ui::components::{
    ChartContainer, ChartHeader, DateRangePicker, ErrorDisplay, LoadingSpinner, MetricSelector,
    OverlayToggles, YearSelector,
};
use wx_chart_ui::state::AppState;
use wx_chart_ui::{fetch, js_bridge};
use wx_doy::{DashboardConfig, Session};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("wx-overlay-root"))
        .launch(App);
}

/// Fetch both files and build the session. Only the observation file is required.
async fn load_session(config: DashboardConfig) -> wx_doy::Result<Session> {
    let observations = fetch::fetch_text(&config.observations_url)
        .await
        .map_err(|e| wx_doy::WxError::load(&config.observations_url, e.to_string()))?;
    let climatology = match fetch::fetch_text(&config.climatology_url).await {
        Ok(text) => Some(text),
        Err(e) => {
            log::warn!("climatology fetch failed: {}", e);
            None
        }
    };
    Session::load(&observations, climatology.as_deref(), config)
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let config = use_hook(js_bridge::load_config);
    let container_id = config.chart_container_id.clone();

    // Initial load; runs once
    let load_config = config.clone();
    use_future(move || {
        let config = load_config.clone();
        async move {
            match load_session(config).await {
                Ok(session) => {
                    log::info!(
                        "loaded {} observation rows for years {:?}",
                        session.observations().len(),
                        session.years()
                    );
                    state.install_session(session);
                }
                Err(e) => {
                    log::error!("initial load failed: {}", e);
                    state.error_msg.set(Some(e.to_string()));
                }
            }
            state.loading.set(false);
        }
    });

    // Full rebuild on every selection change
    let render_target = container_id.clone();
    use_effect(move || {
        if (state.loading)() || (state.error_msg)().is_some() {
            return;
        }
        let Some(session) = state.session.read().clone() else {
            return;
        };
        let selection = state.selection();
        let spec = session.rebuild(&selection);
        match js_bridge::render_chart(&render_target, &spec) {
            Ok(()) => {
                if state.render_error.peek().is_some() {
                    state.render_error.set(None);
                }
            }
            Err(e) => {
                log::error!("render failed: {}", e);
                js_bridge::destroy_chart(&render_target);
                state.render_error.set(Some(e.to_string()));
            }
        }
    });

    let metric = (state.metric)();
    let coverage = state
        .session
        .read()
        .as_ref()
        .map(|s| s.years())
        .and_then(|years| Some(format!("{} - {}", years.first()?, years.last()?)))
        .unwrap_or_default();

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Daily Weather by Day of Year".to_string(),
                metric: metric,
                coverage: coverage,
            }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err, reload_hint: true }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end; margin-bottom: 8px;",
                    MetricSelector {}
                    DateRangePicker {}
                }
                YearSelector {}
                OverlayToggles {}

                if let Some(err) = (state.render_error)() {
                    ErrorDisplay { message: err }
                }
                ChartContainer {
                    id: container_id.clone(),
                    min_height: 480,
                }
            }
        }
    }
}
