//! Data upload tab: pick a CSV and send it to the API.

use crate::components::{ErrorDisplay, SectionHeader};
use crate::state::{AppState, UploadStatus, UPLOAD_INPUT_ID};
use dioxus::prelude::*;

const REQUIRED_COLUMNS: &str = "Product_Name, Unit_Price, Days_to_Expiry, Catagory";

#[component]
pub fn UploadForm() -> Element {
    let state = use_context::<AppState>();
    let uploading = (state.uploading)();
    let status = (state.upload_status)();

    rsx! {
        div {
            style: "padding: 12px; border: 1px solid #e0e0e0; border-radius: 6px;",
            SectionHeader {
                title: "Upload Your Data".to_string(),
                caption: format!("CSV with columns: {}", REQUIRED_COLUMNS),
            }
            div {
                style: "display: flex; gap: 8px; align-items: center; margin: 8px 0;",
                input {
                    id: UPLOAD_INPUT_ID,
                    r#type: "file",
                    accept: ".csv,text/csv",
                    disabled: uploading,
                }
                button {
                    disabled: uploading,
                    onclick: move |_| state.upload_selected_file(),
                    if uploading { "Uploading..." } else { "Upload" }
                }
            }
            match status {
                Some(UploadStatus::Succeeded(message)) => rsx! {
                    div {
                        style: "padding: 12px 16px; margin: 8px 0; background: #F0FDF4; color: #166534; border-radius: 4px; border: 1px solid #86EFAC;",
                        "{message}. Pricing now uses your data."
                    }
                },
                Some(UploadStatus::Failed(message)) => rsx! {
                    ErrorDisplay { title: "Upload failed".to_string(), message }
                },
                None => rsx! {},
            }
        }
    }
}
