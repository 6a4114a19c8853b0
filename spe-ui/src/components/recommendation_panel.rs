//! Dashboard tab: the selected product next to its recommendation.

use crate::components::{LoadingSpinner, SectionHeader};
use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
struct DetailRowProps {
    label: String,
    value: String,
}

#[component]
fn DetailRow(props: DetailRowProps) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: space-between; padding: 4px 0; border-bottom: 1px solid #f0f0f0;",
            span { style: "color: #666;", "{props.label}" }
            span { style: "font-weight: bold;", "{props.value}" }
        }
    }
}

#[component]
pub fn RecommendationPanel() -> Element {
    let state = use_context::<AppState>();
    let controller = state.controller.read();
    let product = controller.selected_product().cloned();
    let recommendation = controller.recommendation().cloned();
    let day = controller.day();
    let loading = controller.is_loading();
    let source = controller.source();
    drop(controller);

    let Some(product) = product else {
        return rsx! {
            p { style: "color: #666;", "Select a product to see its pricing recommendation." }
        };
    };
    let band = product.expiry_band();
    let caption = format!("Day {} on {} data", day, source.label());

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 16px;",
            div {
                style: "flex: 1 1 280px; padding: 12px; border: 1px solid #e0e0e0; border-radius: 6px;",
                SectionHeader { title: product.name.clone(), caption: product.category_or_unknown().to_string() }
                DetailRow { label: "Unit price".to_string(), value: format!("${:.2}", product.unit_price) }
                DetailRow { label: "Days to expiry".to_string(), value: format!("{}", product.days_to_expiry) }
                DetailRow { label: "Freshness".to_string(), value: band.label().to_string() }
            }
            div {
                style: "flex: 1 1 280px; padding: 12px; border: 1px solid #e0e0e0; border-radius: 6px;",
                SectionHeader { title: "Pricing Recommendation".to_string(), caption }
                match recommendation {
                    Some(rec) => rsx! {
                        DetailRow { label: "Predicted price".to_string(), value: rec.predicted_price_text() }
                        DetailRow { label: "Discount".to_string(), value: rec.discount_text() }
                        DetailRow { label: "Discounted price".to_string(), value: rec.discounted_price_text() }
                        DetailRow { label: "Estimated revenue".to_string(), value: rec.estimated_revenue_text() }
                        DetailRow { label: "Waste reduction".to_string(), value: rec.waste_reduction_text() }
                    },
                    None if loading => rsx! {
                        LoadingSpinner { label: "Calculating price...".to_string() }
                    },
                    None => rsx! {
                        p { style: "color: #666;", "No recommendation available." }
                    },
                }
            }
        }
    }
}
