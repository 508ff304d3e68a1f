//! Typed wrappers around the page's `Plotly` global.
//!
//! The chart specification is serialized to JSON by `wx-doy`, parsed into JS
//! objects here and handed to `Plotly.react`, which replaces whatever the
//! container showed before.

use wasm_bindgen::{JsCast, JsValue};
use wx_doy::chart_spec::ChartSpec;
use wx_doy::{DashboardConfig, WxError};

/// Global a deployment may set to a JSON string of config overrides.
pub const CONFIG_GLOBAL: &str = "WX_DOY_CONFIG";

fn precondition(message: impl Into<String>) -> WxError {
    WxError::RenderPrecondition(message.into())
}

fn parse_json(json: &str) -> wx_doy::Result<JsValue> {
    js_sys::JSON::parse(json).map_err(|_| precondition("browser rejected chart JSON"))
}

/// Render `spec` into the element with id `container_id`.
pub fn render_chart(container_id: &str, spec: &ChartSpec) -> wx_doy::Result<()> {
    let window = web_sys::window().ok_or_else(|| precondition("no window object"))?;
    let container = window
        .document()
        .and_then(|d| d.get_element_by_id(container_id))
        .ok_or_else(|| precondition(format!("chart container #{container_id} is missing")))?;

    let plotly = js_sys::Reflect::get(&window, &JsValue::from_str("Plotly"))
        .unwrap_or(JsValue::UNDEFINED);
    if plotly.is_undefined() || plotly.is_null() {
        return Err(precondition("the Plotly library is not loaded"));
    }
    let react = js_sys::Reflect::get(&plotly, &JsValue::from_str("react"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        .ok_or_else(|| precondition("Plotly.react is not a function"))?;

    let args = js_sys::Array::new();
    args.push(&JsValue::from(container));
    args.push(&parse_json(&spec.data_json()?)?);
    args.push(&parse_json(&spec.layout_json()?)?);
    args.push(&parse_json(&spec.config_json()?)?);

    react.apply(&plotly, &args).map_err(|e| {
        precondition(
            e.as_string()
                .unwrap_or_else(|| "Plotly.react threw an exception".to_string()),
        )
    })?;
    log::debug!("js_bridge: rendered {} traces into #{}", spec.data.len(), container_id);
    Ok(())
}

/// Clear a chart container.
pub fn destroy_chart(container_id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(container_id))
    else {
        return;
    };
    if let Ok(plotly) = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("Plotly")) {
        if let Some(purge) = js_sys::Reflect::get(&plotly, &JsValue::from_str("purge"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        {
            let _ = purge.call1(&plotly, &element);
        }
    }
    element.set_inner_html("");
}

/// Read config overrides from `window.WX_DOY_CONFIG`, falling back to defaults.
pub fn load_config() -> DashboardConfig {
    let json = web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str(CONFIG_GLOBAL)).ok())
        .and_then(|v| v.as_string());
    match json {
        Some(json) => DashboardConfig::from_json(&json),
        None => DashboardConfig::default(),
    }
}
