//! Interval inputs: two date fields plus named presets.
//!
//! Only month and day of each date are used. The fields may be set in either
//! order; the resolver swaps them.

use crate::state::AppState;
use dioxus::prelude::*;
use wx_doy::Preset;

#[component]
pub fn DateRangePicker() -> Element {
    let mut state = use_context::<AppState>();
    let start = (state.start_date)();
    let end = (state.end_date)();
    let presets = Preset::ALL.map(|p| (p.key(), p.label()));

    let on_start_change = move |evt: Event<FormData>| {
        state.start_date.set(evt.value());
    };

    let on_end_change = move |evt: Event<FormData>| {
        state.end_date.set(evt.value());
    };

    let on_preset_change = move |evt: Event<FormData>| {
        if let Ok(preset) = evt.value().parse::<Preset>() {
            state.apply_preset(preset);
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "From: "
                input {
                    r#type: "date",
                    value: "{start}",
                    onchange: on_start_change,
                }
            }
            label {
                style: "font-weight: bold;",
                "To: "
                input {
                    r#type: "date",
                    value: "{end}",
                    onchange: on_end_change,
                }
            }
            label {
                style: "font-weight: bold;",
                "Range: "
                select {
                    onchange: on_preset_change,
                    option { value: "", "Custom" }
                    for (key, label) in presets {
                        option {
                            key: "{key}",
                            value: "{key}",
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}
