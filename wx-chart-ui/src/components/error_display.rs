//! In-place error message shown instead of the chart.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Add a reload hint (failed initial load has no retry).
    #[props(default = false)]
    pub reload_hint: bool,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "Error: " }
            "{props.message}"
            if props.reload_hint {
                div {
                    style: "margin-top: 6px; font-size: 12px;",
                    "Reload the page to try again."
                }
            }
        }
    }
}
