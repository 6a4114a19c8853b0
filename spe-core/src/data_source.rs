use serde::{Deserialize, Serialize};

/// Which dataset the API should answer from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// The fixed dataset bundled with the API.
    #[default]
    Demo,
    /// The dataset most recently uploaded by the user.
    Custom,
}

/// Endpoint paths, relative to the API base URL.
pub const STATUS_PATH: &str = "/api/data-status";
pub const UPLOAD_PATH: &str = "/api/upload-data";

impl DataSource {
    pub fn is_custom(&self) -> bool {
        matches!(self, DataSource::Custom)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Demo => "demo",
            DataSource::Custom => "custom",
        }
    }

    pub fn products_path(&self) -> &'static str {
        match self {
            DataSource::Demo => "/api/products",
            DataSource::Custom => "/api/products/custom",
        }
    }

    pub fn recommendation_path(&self) -> &'static str {
        match self {
            DataSource::Demo => "/api/pricing-recommendation",
            DataSource::Custom => "/api/pricing-recommendation/custom",
        }
    }

    pub fn export_path(&self) -> &'static str {
        match self {
            DataSource::Demo => "/api/export-report",
            DataSource::Custom => "/api/export-report/custom",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Response of the data-status endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStatus {
    #[serde(default)]
    pub has_custom_data: bool,
    #[serde(default)]
    pub product_count: u64,
}

/// Outcome reported by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub product_count: Option<u64>,
}
