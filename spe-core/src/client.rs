//! Native HTTP client for the pricing API (feature `api`).

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{multipart, Client};

use crate::api::{self, PricingApi};
use crate::data_source::{DataSource, DataStatus, UploadReceipt, STATUS_PATH, UPLOAD_PATH};
use crate::error::{Error, Result};
use crate::product::Product;
use crate::recommendation::{Recommendation, RecommendationRequest};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Join an endpoint path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

pub struct HttpClient {
    config: ApiConfig,
    client: Client,
}

impl HttpClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        info!("Pricing API at {}", config.base_url);
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_text(&self, path: &str) -> Result<(u16, String)> {
        let url = self.config.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        Ok((status, response.text().await?))
    }
}

#[async_trait(?Send)]
impl PricingApi for HttpClient {
    async fn data_status(&self) -> Result<DataStatus> {
        let (status, body) = self.get_text(STATUS_PATH).await?;
        api::decode_status(status, &body)
    }

    async fn list_products(&self, source: DataSource) -> Result<Vec<Product>> {
        let (status, body) = self.get_text(source.products_path()).await?;
        api::decode_products(status, &body)
    }

    async fn recommendation(
        &self,
        source: DataSource,
        product: &str,
        day: u32,
    ) -> Result<Recommendation> {
        let url = self.config.url(source.recommendation_path());
        debug!("POST {} ({:?}, day {})", url, product, day);
        let response = self
            .client
            .post(&url)
            .json(&RecommendationRequest {
                product_name: product,
                current_day: day,
            })
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        api::decode_recommendation(status, &body)
    }

    async fn export_report(&self, source: DataSource) -> Result<Vec<u8>> {
        let url = self.config.url(source.export_path());
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        api::check_export(status, body)
    }

    async fn upload_dataset(&self, file_name: &str, contents: Vec<u8>) -> Result<UploadReceipt> {
        let url = self.config.url(UPLOAD_PATH);
        debug!("POST {} ({}, {} bytes)", url, file_name, contents.len());
        let part = multipart::Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = multipart::Form::new().part("file", part);
        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        api::decode_upload(status, &body)
    }
}
