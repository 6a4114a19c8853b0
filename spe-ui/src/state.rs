//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//!
//! The selection controller lives in one signal. [`dispatch`] applies a
//! message and spawns a root-scoped task per resulting effect; each task
//! feeds its completion back through `dispatch`. Completions may arrive in any
//! order, the controller drops the stale ones.

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use log::{info, warn};
use spe_core::api::PricingApi;
use spe_core::controller::{Controller, Message};
use spe_core::runtime::perform;

use crate::js_bridge::{self, WebApi, REPORT_FILE_NAME};

/// Id of the dataset `<input type="file">` on the upload tab.
pub const UPLOAD_INPUT_ID: &str = "dataset-file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    RegionalMap,
    DataUpload,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Dashboard, Tab::RegionalMap, Tab::DataUpload];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::RegionalMap => "Regional Map",
            Tab::DataUpload => "Data Upload",
        }
    }

    /// Tab to show once an upload completes. A successful upload moves the
    /// user to the dashboard for the new dataset.
    pub fn after_upload(self, success: bool) -> Tab {
        if success {
            Tab::Dashboard
        } else {
            self
        }
    }
}

/// Outcome of the last upload, shown on the upload tab.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    Succeeded(String),
    Failed(String),
}

/// Shared application state for the pricing dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Source, product list, selection, day and recommendation
    pub controller: Signal<Controller>,
    pub active_tab: Signal<Tab>,
    /// State picked on the regional map
    pub selected_state: Signal<Option<String>>,
    pub uploading: Signal<bool>,
    pub upload_status: Signal<Option<UploadStatus>>,
    pub exporting: Signal<bool>,
    /// Export failures are reported here, not in the controller's banner
    pub export_error: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            controller: Signal::new(Controller::new()),
            active_tab: Signal::new(Tab::default()),
            selected_state: Signal::new(None),
            uploading: Signal::new(false),
            upload_status: Signal::new(None),
            exporting: Signal::new(false),
            export_error: Signal::new(None),
        }
    }

    pub fn send(self, message: Message) {
        dispatch(self.controller, message);
    }

    /// Download the report for the active source.
    pub fn export_report(mut self) {
        let source = self.controller.read().source();
        self.exporting.set(true);
        self.export_error.set(None);
        spawn_forever(async move {
            let result = match WebApi.export_report(source).await {
                Ok(bytes) => js_bridge::download_bytes(REPORT_FILE_NAME, &bytes),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                warn!("Export of {} report failed: {}", source, e);
                self.export_error.set(Some(e.display_message()));
            }
            self.exporting.set(false);
        });
    }

    /// Upload the file picked in the dataset input, then tell the controller.
    pub fn upload_selected_file(mut self) {
        self.uploading.set(true);
        self.upload_status.set(None);
        spawn_forever(async move {
            let status = match js_bridge::read_selected_file(UPLOAD_INPUT_ID).await {
                Ok(None) => UploadStatus::Failed("Choose a CSV file first".to_string()),
                Ok(Some((name, contents))) => {
                    info!("Uploading {} ({} bytes)", name, contents.len());
                    match WebApi.upload_dataset(&name, contents).await {
                        Ok(receipt) => {
                            self.send(Message::UploadFinished {
                                success: receipt.success,
                            });
                            let current = *self.active_tab.peek();
                            self.active_tab.set(current.after_upload(receipt.success));
                            if receipt.success {
                                let count = receipt
                                    .product_count
                                    .map(|n| format!(" ({} products)", n))
                                    .unwrap_or_default();
                                UploadStatus::Succeeded(format!("Uploaded {}{}", name, count))
                            } else {
                                UploadStatus::Failed(
                                    receipt
                                        .message
                                        .unwrap_or_else(|| "Upload rejected".to_string()),
                                )
                            }
                        }
                        Err(e) => {
                            self.send(Message::UploadFinished { success: false });
                            UploadStatus::Failed(e.display_message())
                        }
                    }
                }
                Err(e) => UploadStatus::Failed(e.display_message()),
            };
            self.upload_status.set(Some(status));
            self.uploading.set(false);
        });
    }
}

/// Apply `message` and run the effects it triggers as tasks that outlive
/// the calling component.
pub fn dispatch(mut controller: Signal<Controller>, message: Message) {
    let effects = controller.write().update(message);
    for effect in effects {
        spawn_forever(async move {
            let completion = perform(&WebApi, effect).await;
            dispatch(controller, completion);
        });
    }
}
