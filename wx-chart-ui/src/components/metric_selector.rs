//! Dropdown selector for the plotted metric.

use crate::state::AppState;
use dioxus::prelude::*;
use wx_doy::Metric;

#[component]
pub fn MetricSelector() -> Element {
    let mut state = use_context::<AppState>();
    let selected = (state.metric)();
    let options: Vec<(&'static str, String, bool)> = Metric::ALL
        .iter()
        .map(|m| (m.key(), format!("{} ({})", m.title(), m.unit()), *m == selected))
        .collect();

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<Metric>() {
        Ok(metric) => state.metric.set(metric),
        Err(e) => log::warn!("metric_selector: {}", e),
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "metric-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Metric: "
            }
            select {
                id: "metric-select",
                onchange: on_change,
                for (key, label, is_selected) in options {
                    option {
                        key: "{key}",
                        value: "{key}",
                        selected: is_selected,
                        "{label}"
                    }
                }
            }
        }
    }
}
