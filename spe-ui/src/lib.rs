//! Shared Dioxus state, browser bridge and components for the pricing dashboard.
//!
//! This crate provides:
//! - `js_bridge`: the `fetch` implementation of `PricingApi`, file reads and downloads
//! - `state`: Reactive AppState with Dioxus Signals wrapping the selection controller
//! - `components`: Reusable RSX components (selector, day controls, metric cards, etc.)

pub mod components;
pub mod js_bridge;
pub mod state;
