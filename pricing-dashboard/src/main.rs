//! Smart Dynamic Pricing Engine dashboard
//!
//! Product picker, day counter, headline metrics and three tabs (pricing
//! dashboard, regional map, data upload) over the pricing API served from
//! the same origin.
//!
//! Data flow:
//! 1. On mount: send `Start`, which checks the data status and loads the
//!    demo product list (switching to uploaded data if the API has some).
//! 2. Every user action becomes a controller message; the controller decides
//!    which requests to issue and which responses are still current.
//! 3. Components render straight from the controller signal.

use dioxus::prelude::*;
use spe_core::controller::Message;
use spe_ui::components::{
    CustomDataBanner, DataErrorBanner, DayControls, ErrorDisplay, MetricCards, ProductSelector,
    RecommendationPanel, SourceBadges, StateMap, TabBar, UploadForm,
};
use spe_ui::state::{AppState, Tab};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("pricing-dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);

    // Reads no signals, so this runs once.
    use_effect(move || {
        log::info!("Pricing dashboard mounted");
        state.send(Message::Start);
    });

    let tab = (state.active_tab)();

    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            div {
                style: "display: flex; flex-wrap: wrap; justify-content: space-between; align-items: flex-start; gap: 12px; margin-bottom: 12px;",
                div {
                    h1 { style: "margin: 0 0 4px 0;", "Smart Dynamic Pricing Engine" }
                    p {
                        style: "margin: 0; color: #666;",
                        "Pricing optimization to reduce waste and maximize revenue"
                    }
                    SourceBadges {}
                }
                div {
                    style: "display: flex; gap: 8px; align-items: center;",
                    DayControls {}
                    ExportButton {}
                }
            }

            if let Some(err) = state.export_error.read().as_ref() {
                ErrorDisplay { title: "Export".to_string(), message: err.clone() }
            }
            CustomDataBanner {}
            DataErrorBanner {}
            ProductSelector {}
            MetricCards {}

            TabBar {}
            match tab {
                Tab::Dashboard => rsx! { RecommendationPanel {} },
                Tab::RegionalMap => rsx! { StateMap {} },
                Tab::DataUpload => rsx! { UploadForm {} },
            }
        }
    }
}

/// Downloads the report for the active source; disabled while there is
/// nothing to report on.
#[component]
fn ExportButton() -> Element {
    let state = use_context::<AppState>();
    let can_export = state.controller.read().can_export();
    let exporting = (state.exporting)();

    rsx! {
        button {
            style: "padding: 6px 14px; border-radius: 6px; border: 1px solid #7C3AED; background: #7C3AED; color: white; cursor: pointer;",
            disabled: !can_export || exporting,
            onclick: move |_| state.export_report(),
            if exporting { "Exporting..." } else { "Export Report" }
        }
    }
}
