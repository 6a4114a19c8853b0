use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A sellable item as returned by the product listing endpoints.
///
/// The display name doubles as the identifier; the API has no surrogate key.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "Product_Name")]
    pub name: String,
    #[serde(rename = "Unit_Price", default, deserialize_with = "lenient_number")]
    pub unit_price: f64,
    #[serde(rename = "Days_to_Expiry", default, deserialize_with = "lenient_number")]
    pub days_to_expiry: f64,
    /// The API spells this column `Catagory`; uploaded datasets may use the
    /// correct spelling.
    #[serde(
        rename = "Catagory",
        alias = "Category",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
}

/// Urgency bucket derived from days until expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryBand {
    /// Two days or fewer.
    Critical,
    /// Five days or fewer.
    Soon,
    Fresh,
}

impl ExpiryBand {
    pub fn for_days(days: f64) -> Self {
        if days <= 2.0 {
            ExpiryBand::Critical
        } else if days <= 5.0 {
            ExpiryBand::Soon
        } else {
            ExpiryBand::Fresh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryBand::Critical => "critical",
            ExpiryBand::Soon => "soon",
            ExpiryBand::Fresh => "fresh",
        }
    }

    /// Badge colour used by the product picker.
    pub fn color(&self) -> &'static str {
        match self {
            ExpiryBand::Critical => "#DC2626",
            ExpiryBand::Soon => "#EA580C",
            ExpiryBand::Fresh => "#16A34A",
        }
    }
}

impl Product {
    pub fn expiry_band(&self) -> ExpiryBand {
        ExpiryBand::for_days(self.days_to_expiry)
    }

    pub fn category_or_unknown(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => "Unknown",
        }
    }

    /// Short picker caption, e.g. `($2.5 • 3d)`.
    pub fn caption(&self) -> String {
        format!("(${} • {}d)", self.unit_price, self.days_to_expiry)
    }

    /// Decode a product listing body.
    ///
    /// The body must be a JSON array. Entries that are not objects or that
    /// lack a non-empty `Product_Name` are skipped rather than failing the
    /// whole list.
    pub fn parse_product_list(value: serde_json::Value) -> Result<Vec<Product>> {
        let entries = match value {
            serde_json::Value::Array(entries) => entries,
            other => {
                return Err(Error::InvalidPayload(format!(
                    "expected product array, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut products = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<Product>(entry) {
                Ok(product) if !product.name.trim().is_empty() => products.push(product),
                Ok(_) => warn!("Skipping product at index {} with empty name", index),
                Err(e) => warn!("Skipping invalid product at index {}: {}", index, e),
            }
        }
        Ok(products)
    }
}

/// Accepts numbers, numeric strings and null (as 0). Uploaded CSVs are
/// forwarded by the API without type coercion.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => Ok(n.as_f64().unwrap_or_default()),
        serde_json::Value::String(s) => Ok(s.trim().parse::<f64>().unwrap_or_default()),
        serde_json::Value::Null => Ok(0.0),
        other => Err(serde::de::Error::custom(format!(
            "expected number, got {}",
            json_kind(&other)
        ))),
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
