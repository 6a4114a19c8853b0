//! Tab strip switching between dashboard views.

use crate::state::{AppState, Tab};
use dioxus::prelude::*;

#[component]
pub fn TabBar() -> Element {
    let mut state = use_context::<AppState>();
    let active = (state.active_tab)();

    rsx! {
        div {
            style: "display: flex; gap: 4px; margin: 12px 0; border-bottom: 2px solid #e0e0e0;",
            for (tab, label) in Tab::ALL.map(|t| (t, t.label())) {
                button {
                    key: "{label}",
                    style: if tab == active {
                        "padding: 8px 16px; border: none; border-bottom: 2px solid #7C3AED; margin-bottom: -2px; background: none; font-weight: bold; cursor: pointer;"
                    } else {
                        "padding: 8px 16px; border: none; background: none; color: #666; cursor: pointer;"
                    },
                    onclick: move |_| state.active_tab.set(tab),
                    "{label}"
                }
            }
        }
    }
}
