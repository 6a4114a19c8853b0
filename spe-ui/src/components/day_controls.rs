//! Simulated-day counter with previous / next / reset buttons.

use crate::state::AppState;
use dioxus::prelude::*;
use spe_core::controller::{DayAdjust, Message};

#[component]
pub fn DayControls() -> Element {
    let state = use_context::<AppState>();
    let day = state.controller.read().day();

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 6px; padding: 4px 8px; border: 1px solid #e0e0e0; border-radius: 6px;",
            button {
                disabled: day <= 1,
                title: "Previous day",
                onclick: move |_| state.send(Message::AdjustDay(DayAdjust::Decrement)),
                "‹"
            }
            span {
                style: "font-weight: bold; padding: 0 8px;",
                "Day {day}"
            }
            button {
                title: "Next day",
                onclick: move |_| state.send(Message::AdjustDay(DayAdjust::Increment)),
                "›"
            }
            button {
                title: "Back to day 1",
                style: "margin-left: 6px;",
                onclick: move |_| state.send(Message::AdjustDay(DayAdjust::Reset)),
                "↺"
            }
        }
    }
}
