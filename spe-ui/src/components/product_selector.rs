//! Dropdown selector for choosing a product.

use crate::components::{LoadingSpinner, SectionHeader};
use crate::state::AppState;
use dioxus::prelude::*;
use spe_core::controller::Message;
use spe_core::data_source::DataSource;

/// Product dropdown selector.
/// Reads the product list from the controller and sends `SelectProduct` on change.
/// The refresh button re-reads the list for the active source.
#[component]
pub fn ProductSelector() -> Element {
    let state = use_context::<AppState>();
    let controller = state.controller.read();
    let products = controller.products().to_vec();
    let selected = controller.selected().map(str::to_string);
    let loading = controller.is_loading();
    let on_custom = controller.source().is_custom();
    drop(controller);

    let on_change = move |evt: Event<FormData>| {
        state.send(Message::SelectProduct(evt.value()));
    };

    let title = format!("Product Selection ({} products available)", products.len());
    let options: Vec<(String, String, &'static str)> = products
        .iter()
        .map(|p| {
            let text = format!("{} {} [{}]", p.name, p.caption(), p.category_or_unknown());
            (p.name.clone(), text, p.expiry_band().color())
        })
        .collect();
    let badge = selected
        .as_deref()
        .and_then(|name| products.iter().find(|p| p.name == name))
        .map(|p| {
            let band = p.expiry_band();
            (format!("{} · {}", p.category_or_unknown(), band.label()), band.color())
        });

    rsx! {
        div {
            style: "margin: 8px 0; padding: 12px; border: 1px solid #e0e0e0; border-radius: 6px;",
            SectionHeader { title }
            button {
                style: "margin-bottom: 8px; padding: 4px 10px; font-size: 12px;",
                disabled: loading,
                onclick: move |_| state.send(Message::RefreshProducts),
                if loading { "Refreshing..." } else { "Refresh" }
            }

            if loading && products.is_empty() {
                LoadingSpinner { label: "Loading products...".to_string() }
            } else if products.is_empty() {
                div {
                    style: "text-align: center; padding: 16px; color: #666;",
                    p {
                        if on_custom {
                            "No custom data available. Please upload a CSV file."
                        } else {
                            "No products available."
                        }
                    }
                    if on_custom {
                        button {
                            onclick: move |_| state.send(Message::SwitchSource(DataSource::Demo)),
                            "Use Demo Data"
                        }
                    }
                }
            } else {
                select {
                    id: "product-select",
                    style: "width: 100%; padding: 6px;",
                    onchange: on_change,
                    if selected.is_none() {
                        option { value: "", disabled: true, selected: true, "Choose a product" }
                    }
                    for (name, text, color) in options {
                        option {
                            key: "{name}",
                            value: "{name}",
                            selected: selected.as_deref() == Some(name.as_str()),
                            style: "color: {color};",
                            "{text}"
                        }
                    }
                }
                if let Some((text, color)) = badge {
                    span {
                        style: "display: inline-block; margin-top: 6px; padding: 2px 8px; border-radius: 10px; font-size: 12px; color: white; background: {color};",
                        "{text}"
                    }
                }
            }
        }
    }
}
