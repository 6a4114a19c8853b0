//! Row of headline figures for the current recommendation.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
struct MetricCardProps {
    label: String,
    value: String,
    #[props(default = "#222".to_string())]
    color: String,
}

#[component]
fn MetricCard(props: MetricCardProps) -> Element {
    rsx! {
        div {
            style: "flex: 1 1 150px; padding: 12px; border: 1px solid #e0e0e0; border-radius: 6px;",
            p {
                style: "margin: 0; font-size: 12px; color: #666;",
                "{props.label}"
            }
            p {
                style: "margin: 4px 0 0 0; font-size: 22px; font-weight: bold; color: {props.color};",
                "{props.value}"
            }
        }
    }
}

/// Hidden until a recommendation is available for the selected product.
#[component]
pub fn MetricCards() -> Element {
    let state = use_context::<AppState>();
    let Some(rec) = state
        .controller
        .read()
        .visible_recommendation()
        .map(|(_, rec)| rec.clone())
    else {
        return rsx! {};
    };

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 12px; margin: 12px 0;",
            MetricCard { label: "Current Price".to_string(), value: rec.predicted_price_text() }
            MetricCard {
                label: "Recommended Discount".to_string(),
                value: rec.discount_text(),
                color: "#EA580C".to_string(),
            }
            MetricCard {
                label: "Final Price".to_string(),
                value: rec.discounted_price_text(),
                color: "#16A34A".to_string(),
            }
            MetricCard { label: "Expected Revenue".to_string(), value: rec.estimated_revenue_text() }
            MetricCard {
                label: "Waste Reduction".to_string(),
                value: rec.waste_reduction_text(),
                color: "#16A34A".to_string(),
            }
        }
    }
}
