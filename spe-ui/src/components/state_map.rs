//! Regional tab: state markers, the picked state's figures and totals.

use crate::components::{ErrorDisplay, SectionHeader};
use crate::state::AppState;
use dioxus::prelude::*;
use spe_core::region::{format_millions, StateStats};

#[derive(Props, Clone, PartialEq)]
struct StatTileProps {
    label: String,
    value: String,
    #[props(default = "#222".to_string())]
    color: String,
}

#[component]
fn StatTile(props: StatTileProps) -> Element {
    rsx! {
        div {
            style: "padding: 8px 0;",
            p { style: "margin: 0; font-size: 12px; color: #666;", "{props.label}" }
            p {
                style: "margin: 2px 0 0 0; font-size: 20px; font-weight: bold; color: {props.color};",
                "{props.value}"
            }
        }
    }
}

#[component]
pub fn StateMap() -> Element {
    let mut state = use_context::<AppState>();
    let stats = use_hook(StateStats::embedded);
    let states = match stats {
        Ok(states) => states,
        Err(e) => {
            return rsx! {
                ErrorDisplay { message: e.display_message() }
            }
        }
    };

    let picked_name = (state.selected_state)();
    let picked = picked_name
        .as_deref()
        .and_then(|name| StateStats::find(&states, name))
        .cloned();
    let total_sales = format_millions(StateStats::total_sales(&states));
    let total_stores = StateStats::total_stores(&states).to_string();

    let markers: Vec<(String, String, String)> = states
        .iter()
        .map(|s| {
            let is_picked = picked_name.as_deref() == Some(s.name.as_str());
            let style = format!(
                "position: absolute; left: {}%; top: {}%; width: 20px; height: 20px; margin: -10px 0 0 -10px; border-radius: 50%; cursor: pointer; background: {}; border: 2px solid rgba(0,0,0,0.25); opacity: {}; transform: scale({});",
                s.marker_x,
                s.marker_y,
                s.color,
                if is_picked { 1.0 } else { 0.7 },
                if is_picked { 1.2 } else { 1.0 },
            );
            let tooltip = format!(
                "{}\nSales: {}\nStores: {}",
                s.name,
                format_millions(s.sales),
                s.stores
            );
            (s.name.clone(), style, tooltip)
        })
        .collect();

    rsx! {
        div {
            style: "padding: 12px; border: 1px solid #e0e0e0; border-radius: 6px;",
            SectionHeader { title: "India - State-wise Distribution".to_string() }
            div {
                style: "display: flex; flex-wrap: wrap; gap: 16px;",
                div {
                    style: "flex: 1 1 320px; position: relative; min-height: 420px; background: #F8FAFC; border-radius: 6px;",
                    for (name, style, tooltip) in markers {
                        div {
                            key: "{name}",
                            style: "{style}",
                            title: "{tooltip}",
                            onclick: move |_| state.selected_state.set(Some(name.clone())),
                        }
                    }
                }
                div {
                    style: "flex: 1 1 240px;",
                    match picked {
                        Some(s) => {
                            let region = s.region().label();
                            rsx! {
                                SectionHeader { title: s.name.clone() }
                                StatTile { label: "Annual Sales".to_string(), value: format_millions(s.sales) }
                                StatTile {
                                    label: "Revenue".to_string(),
                                    value: format_millions(s.revenue),
                                    color: "#16A34A".to_string(),
                                }
                                StatTile {
                                    label: "Store Count".to_string(),
                                    value: s.stores.to_string(),
                                    color: "#2563EB".to_string(),
                                }
                                span {
                                    style: "display: inline-block; padding: 2px 8px; border-radius: 10px; font-size: 12px; color: white; background: #7C3AED;",
                                    "Region: {region}"
                                }
                            }
                        }
                        None => rsx! {
                            p { style: "color: #666; text-align: center; padding: 24px 0;", "Click on a state to view detailed information" }
                        },
                    }
                    div {
                        style: "display: flex; gap: 24px; margin-top: 12px; border-top: 1px solid #e0e0e0;",
                        StatTile { label: "Total Sales".to_string(), value: total_sales }
                        StatTile { label: "Total Stores".to_string(), value: total_stores }
                    }
                }
            }
        }
    }
}
