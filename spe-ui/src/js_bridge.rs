//! Browser interop via `web_sys`.
//!
//! [`WebApi`] implements `PricingApi` on top of `window.fetch` with relative
//! URLs, so the dashboard always talks to the origin that served it. The
//! remaining helpers read a picked file and save a report through a
//! temporary object URL.

use async_trait::async_trait;
use js_sys::{Array, Uint8Array};
use spe_core::api::{self, PricingApi};
use spe_core::data_source::{DataSource, DataStatus, UploadReceipt, STATUS_PATH, UPLOAD_PATH};
use spe_core::error::{Error, Result};
use spe_core::product::Product;
use spe_core::recommendation::{Recommendation, RecommendationRequest};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, HtmlAnchorElement, HtmlInputElement, Request, RequestInit, RequestMode, Response};

/// File name the exported report is saved under.
pub const REPORT_FILE_NAME: &str = "pricing-report.csv";

fn js_error(context: &str, value: JsValue) -> Error {
    let detail = value.as_string().unwrap_or_else(|| format!("{:?}", value));
    Error::Transport(format!("{}: {}", context, detail))
}

fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| Error::Transport("no window".to_string()))
}

enum Body {
    Empty,
    Json(String),
    Form(web_sys::FormData),
}

/// `PricingApi` over the page's own origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WebApi;

impl WebApi {
    async fn send(&self, method: &str, path: &str, body: Body) -> Result<Response> {
        let init = RequestInit::new();
        init.set_method(method);
        init.set_mode(RequestMode::SameOrigin);
        match &body {
            Body::Empty => {}
            Body::Json(text) => init.set_body(&JsValue::from_str(text)),
            Body::Form(form) => init.set_body(form),
        }

        let request =
            Request::new_with_str_and_init(path, &init).map_err(|e| js_error("request", e))?;
        if matches!(body, Body::Json(_)) {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(|e| js_error("headers", e))?;
        }

        let value = JsFuture::from(window()?.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("fetch", e))?;
        value
            .dyn_into::<Response>()
            .map_err(|e| js_error("fetch returned a non-Response", e))
    }

    async fn send_for_text(&self, method: &str, path: &str, body: Body) -> Result<(u16, String)> {
        let response = self.send(method, path, body).await?;
        let promise = response.text().map_err(|e| js_error("body", e))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("body", e))?
            .as_string()
            .unwrap_or_default();
        Ok((response.status(), text))
    }
}

#[async_trait(?Send)]
impl PricingApi for WebApi {
    async fn data_status(&self) -> Result<DataStatus> {
        let (status, body) = self.send_for_text("GET", STATUS_PATH, Body::Empty).await?;
        api::decode_status(status, &body)
    }

    async fn list_products(&self, source: DataSource) -> Result<Vec<Product>> {
        let (status, body) = self
            .send_for_text("GET", source.products_path(), Body::Empty)
            .await?;
        api::decode_products(status, &body)
    }

    async fn recommendation(
        &self,
        source: DataSource,
        product: &str,
        day: u32,
    ) -> Result<Recommendation> {
        let payload = serde_json::to_string(&RecommendationRequest {
            product_name: product,
            current_day: day,
        })?;
        let (status, body) = self
            .send_for_text("POST", source.recommendation_path(), Body::Json(payload))
            .await?;
        api::decode_recommendation(status, &body)
    }

    async fn export_report(&self, source: DataSource) -> Result<Vec<u8>> {
        let response = self.send("GET", source.export_path(), Body::Empty).await?;
        let promise = response.array_buffer().map_err(|e| js_error("body", e))?;
        let buffer = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("body", e))?;
        api::check_export(response.status(), Uint8Array::new(&buffer).to_vec())
    }

    async fn upload_dataset(&self, file_name: &str, contents: Vec<u8>) -> Result<UploadReceipt> {
        let blob = bytes_to_blob(&contents)?;
        let form = web_sys::FormData::new().map_err(|e| js_error("form", e))?;
        form.append_with_blob_and_filename("file", &blob, file_name)
            .map_err(|e| js_error("form", e))?;
        let (status, body) = self
            .send_for_text("POST", UPLOAD_PATH, Body::Form(form))
            .await?;
        api::decode_upload(status, &body)
    }
}

fn bytes_to_blob(bytes: &[u8]) -> Result<Blob> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes).buffer());
    Blob::new_with_u8_array_sequence(&parts).map_err(|e| js_error("blob", e))
}

/// Read the first file picked in the `<input type="file">` with id `input_id`.
/// `Ok(None)` when nothing is picked.
pub async fn read_selected_file(input_id: &str) -> Result<Option<(String, Vec<u8>)>> {
    let document = window()?
        .document()
        .ok_or_else(|| Error::Transport("no document".to_string()))?;
    let Some(element) = document.get_element_by_id(input_id) else {
        return Ok(None);
    };
    let input = element
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| Error::Transport(format!("#{} is not an input", input_id)))?;
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| js_error("file read", e))?;
    Ok(Some((file.name(), Uint8Array::new(&buffer).to_vec())))
}

/// Save `bytes` as a download named `file_name`.
pub fn download_bytes(file_name: &str, bytes: &[u8]) -> Result<()> {
    let document = window()?
        .document()
        .ok_or_else(|| Error::Transport("no document".to_string()))?;
    let blob = bytes_to_blob(bytes)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| js_error("url", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| js_error("anchor", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| Error::Transport("anchor cast failed".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}
