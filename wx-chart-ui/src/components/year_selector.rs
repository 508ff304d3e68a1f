//! Multi-select of years as a row of checkboxes.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn YearSelector() -> Element {
    let mut state = use_context::<AppState>();
    let available = state
        .session
        .read()
        .as_ref()
        .map(|s| s.years())
        .unwrap_or_default();
    let selected = (state.years)();
    let all = available.clone();

    rsx! {
        div {
            style: "margin: 8px 0;",
            div {
                style: "display: flex; gap: 8px; align-items: center; margin-bottom: 4px;",
                span { style: "font-weight: bold;", "Years: " }
                button {
                    r#type: "button",
                    onclick: move |_| state.years.set(all.clone()),
                    "All"
                }
                button {
                    r#type: "button",
                    onclick: move |_| state.years.set(Vec::new()),
                    "None"
                }
            }
            div {
                style: "display: flex; flex-wrap: wrap; gap: 4px 12px; max-height: 96px; overflow-y: auto; font-size: 13px;",
                for year in available {
                    label {
                        key: "{year}",
                        input {
                            r#type: "checkbox",
                            checked: selected.contains(&year),
                            onchange: move |_| state.toggle_year(year),
                        }
                        " {year}"
                    }
                }
            }
        }
    }
}
