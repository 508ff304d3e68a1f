//! Title line with the selected metric and its unit.

use dioxus::prelude::*;
use wx_doy::Metric;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    pub metric: Metric,
    /// e.g. "1995 - 2024"
    #[props(default = String::new())]
    pub coverage: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    let metric = props.metric;
    let axis = format!("{} ({})", metric.title(), metric.unit());
    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            p {
                style: "margin: 0; font-size: 12px; color: #666;",
                "Y-axis: {axis}"
                if !props.coverage.is_empty() {
                    " | Years on file: {props.coverage}"
                }
            }
            if !metric.is_percentile_eligible() {
                p {
                    style: "margin: 4px 0 0 0; font-size: 12px; color: #8D6E63;",
                    "Historical percentiles and climatology are not computed for snowfall or snow depth."
                }
            }
        }
    }
}
