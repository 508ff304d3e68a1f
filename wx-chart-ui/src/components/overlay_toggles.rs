//! Checkboxes for percentile lines, the climatology mean and imputed markers.

use crate::state::AppState;
use dioxus::prelude::*;
use wx_doy::tables::{ClimatologyShape, Percentile};

#[component]
pub fn OverlayToggles() -> Element {
    let mut state = use_context::<AppState>();
    let shape = state
        .session
        .read()
        .as_ref()
        .and_then(|s| s.climatology().map(|c| c.shape()));
    let metric = (state.metric)();
    let toggles = (state.percentiles)();
    let show_climatology = (state.show_climatology)();
    let show_imputed = (state.show_imputed)();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; flex-wrap: wrap; gap: 12px; align-items: center;",
            if shape == Some(ClimatologyShape::Percentile) && metric.is_percentile_eligible() {
                for (p, suffix) in Percentile::ALL.map(|p| (p, p.suffix())) {
                    label {
                        key: "{suffix}",
                        input {
                            r#type: "checkbox",
                            checked: toggles.is_enabled(p),
                            onchange: move |_| {
                                let mut next = (state.percentiles)();
                                next.set(p, !next.is_enabled(p));
                                state.percentiles.set(next);
                            },
                        }
                        " {suffix}"
                    }
                }
            }
            if shape == Some(ClimatologyShape::Mean) && metric.is_percentile_eligible() {
                label {
                    input {
                        r#type: "checkbox",
                        checked: show_climatology,
                        onchange: move |_| state.show_climatology.set(!show_climatology),
                    }
                    " Climatology mean"
                }
            }
            if metric.is_temperature() {
                label {
                    input {
                        r#type: "checkbox",
                        checked: show_imputed,
                        onchange: move |_| state.show_imputed.set(!show_imputed),
                    }
                    " Mark imputed values"
                }
            }
        }
    }
}
