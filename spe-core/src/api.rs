//! The pricing API seam.
//!
//! [`PricingApi`] is implemented by the native `reqwest` client (feature
//! `api`) and by the browser `fetch` bridge in `spe-ui`. Both hand raw
//! `(status, body)` pairs to the decoders below so the error-payload rules
//! live in one place.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::data_source::{DataSource, DataStatus, UploadReceipt};
use crate::error::{Error, Result};
use crate::product::Product;
use crate::recommendation::Recommendation;

pub const LIST_FAILED_MESSAGE: &str = "Failed to load products";
pub const RECOMMENDATION_FAILED_MESSAGE: &str = "Failed to get pricing recommendation";
pub const STATUS_FAILED_MESSAGE: &str = "Failed to check data status";
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload data";
pub const EXPORT_FAILED_MESSAGE: &str = "Export failed";

/// Opaque HTTP collaborator. `?Send` so browser futures qualify.
#[async_trait(?Send)]
pub trait PricingApi {
    async fn data_status(&self) -> Result<DataStatus>;

    async fn list_products(&self, source: DataSource) -> Result<Vec<Product>>;

    async fn recommendation(
        &self,
        source: DataSource,
        product: &str,
        day: u32,
    ) -> Result<Recommendation>;

    /// Raw report bytes; the format is owned by the API.
    async fn export_report(&self, source: DataSource) -> Result<Vec<u8>>;

    async fn upload_dataset(&self, file_name: &str, contents: Vec<u8>) -> Result<UploadReceipt>;
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Turn a response into JSON, mapping error payloads and bad statuses.
///
/// - unparsable body: `Api` with `fallback_message` on a bad status,
///   `InvalidPayload` otherwise
/// - object with an `error` field, or a bad status: `Api`, carrying the
///   payload's `fallbackToDemo` flag
pub fn decode_json(status: u16, body: &str, fallback_message: &str) -> Result<serde_json::Value> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) if is_success(status) => return Err(Error::InvalidPayload(e.to_string())),
        Err(_) => {
            return Err(Error::Api {
                status: Some(status),
                message: fallback_message.to_string(),
                fallback_to_demo: false,
            })
        }
    };

    let error_field = value.get("error").filter(|e| !e.is_null());
    if error_field.is_some() || !is_success(status) {
        let message = match error_field {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            Some(other) if !other.is_string() => other.to_string(),
            _ => fallback_message.to_string(),
        };
        let fallback_to_demo = value
            .get("fallbackToDemo")
            .and_then(|f| f.as_bool())
            .unwrap_or(false);
        return Err(Error::Api {
            status: Some(status),
            message,
            fallback_to_demo,
        });
    }
    Ok(value)
}

fn decode_as<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

pub fn decode_products(status: u16, body: &str) -> Result<Vec<Product>> {
    Product::parse_product_list(decode_json(status, body, LIST_FAILED_MESSAGE)?)
}

pub fn decode_recommendation(status: u16, body: &str) -> Result<Recommendation> {
    decode_as(decode_json(status, body, RECOMMENDATION_FAILED_MESSAGE)?)
}

pub fn decode_status(status: u16, body: &str) -> Result<DataStatus> {
    decode_as(decode_json(status, body, STATUS_FAILED_MESSAGE)?)
}

/// A 2xx body without an explicit `success` flag counts as success.
pub fn decode_upload(status: u16, body: &str) -> Result<UploadReceipt> {
    let value = decode_json(status, body, UPLOAD_FAILED_MESSAGE)?;
    let explicit = value.get("success").is_some();
    let mut receipt: UploadReceipt = decode_as(value)?;
    if !explicit {
        receipt.success = true;
    }
    Ok(receipt)
}

/// Export bodies are opaque; only the status matters.
pub fn check_export(status: u16, body: Vec<u8>) -> Result<Vec<u8>> {
    if is_success(status) {
        Ok(body)
    } else {
        let text = String::from_utf8_lossy(&body);
        Err(decode_json(status, &text, EXPORT_FAILED_MESSAGE)
            .err()
            .unwrap_or_else(|| Error::Api {
                status: Some(status),
                message: EXPORT_FAILED_MESSAGE.to_string(),
                fallback_to_demo: false,
            }))
    }
}
