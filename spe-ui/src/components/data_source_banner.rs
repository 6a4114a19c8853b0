//! Data-source badges and banners.

use crate::components::ErrorDisplay;
use crate::state::AppState;
use dioxus::prelude::*;
use spe_core::controller::{Message, SourceState};
use spe_core::data_source::DataSource;

const BADGE_STYLE: &str =
    "display: inline-block; padding: 2px 8px; border-radius: 10px; font-size: 12px; color: white;";

/// Header badges: active custom source, error flag, available custom data.
#[component]
pub fn SourceBadges() -> Element {
    let state = use_context::<AppState>();
    let controller = state.controller.read();
    let source_state = controller.source_state();
    let has_error = controller.error().is_some();
    let offer_custom = controller.custom_available() && !controller.source().is_custom();
    drop(controller);

    rsx! {
        div {
            style: "display: flex; gap: 6px; margin-top: 6px;",
            match source_state {
                SourceState::Custom => rsx! {
                    span { style: "{BADGE_STYLE} background: #16A34A;", "Using Custom Data" }
                },
                SourceState::SwitchingToCustom | SourceState::SwitchingToDemo => rsx! {
                    span { style: "{BADGE_STYLE} background: #6B7280;", "Switching data source..." }
                },
                SourceState::Demo => rsx! {},
            }
            if has_error {
                span { style: "{BADGE_STYLE} background: #DC2626;", "Data Error" }
            }
            if offer_custom {
                span {
                    style: "{BADGE_STYLE} background: #2563EB; cursor: pointer;",
                    onclick: move |_| state.send(Message::SwitchSource(DataSource::Custom)),
                    "Custom Data Available"
                }
            }
        }
    }
}

/// Offers the uploaded dataset while the demo data is active.
#[component]
pub fn CustomDataBanner() -> Element {
    let state = use_context::<AppState>();
    let controller = state.controller.read();
    let count = controller
        .status()
        .filter(|s| s.has_custom_data && !controller.source().is_custom())
        .map(|s| s.product_count);
    drop(controller);

    let Some(count) = count else {
        return rsx! {};
    };

    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #EFF6FF; color: #1E3A8A; border-radius: 4px; border: 1px solid #93C5FD;",
            strong { "Custom Data Available: " }
            "You have uploaded data with {count} products."
            button {
                style: "margin-left: 12px;",
                onclick: move |_| state.send(Message::SwitchSource(DataSource::Custom)),
                "Switch to Custom Data"
            }
        }
    }
}

/// The controller's error banner, with a way back to demo data.
#[component]
pub fn DataErrorBanner() -> Element {
    let state = use_context::<AppState>();
    let controller = state.controller.read();
    let error = controller.error().map(str::to_string);
    let on_custom = controller.source().is_custom();
    drop(controller);

    let Some(message) = error else {
        return rsx! {};
    };

    rsx! {
        ErrorDisplay { title: "Data Error".to_string(), message }
        if on_custom {
            button {
                style: "margin-bottom: 8px;",
                onclick: move |_| state.send(Message::SwitchSource(DataSource::Demo)),
                "Switch to Demo Data"
            }
        }
    }
}
