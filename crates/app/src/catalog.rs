//! Headless CMS image lookup.
//!
//! Only the purchase notification uses this; every failure degrades to "no
//! image" so enrichment can never block or fail settlement.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::domain::products::models::ProductId;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    data: Vec<CatalogProduct>,
}

#[derive(Debug, Deserialize)]
struct CatalogProduct {
    #[serde(default)]
    imagen: Vec<CatalogImage>,
}

#[derive(Debug, Deserialize)]
struct CatalogImage {
    url: String,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(base_url: String) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// First image URL of the product, absolute, or `None` on any failure.
    pub async fn image_url(&self, product: ProductId) -> Option<String> {
        let url = format!(
            "{}/api/productos?filters[id][$eq]={}&populate=*",
            self.base_url, product
        );

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(error) => {
                debug!(%product, %error, "catalog image fetch failed");
                return None;
            }
        };

        let body: CatalogResponse = match response.json().await {
            Ok(body) => body,
            Err(error) => {
                debug!(%product, %error, "catalog image response unreadable");
                return None;
            }
        };

        let raw = body.data.first()?.imagen.first()?.url.clone();

        if raw.starts_with("http") {
            Some(raw)
        } else {
            Some(format!("{}{raw}", self.base_url))
        }
    }
}
