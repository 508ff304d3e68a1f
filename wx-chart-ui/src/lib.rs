//! Shared Dioxus components and Plotly bridge for the daily weather overlay.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers around the `Plotly` global via `js_sys::Reflect`
//! - `fetch`: one-shot text download of the CSV inputs
//! - `state`: reactive AppState with Dioxus Signals
//! - `components`: selectors, toggles, interval inputs, containers

pub mod components;
pub mod fetch;
pub mod js_bridge;
pub mod state;
