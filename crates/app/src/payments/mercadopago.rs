//! MercadoPago REST client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::payments::{
    errors::GatewayError,
    gateway::PaymentGateway,
    models::{PaymentRecord, Preference, PreferenceRequest},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(12);

/// Processor credentials and endpoint.
#[derive(Debug, Clone)]
pub struct MercadoPagoConfig {
    pub access_token: String,
    /// API base, `https://api.mercadopago.com` outside of tests.
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct MercadoPagoGateway {
    http: reqwest::Client,
    config: MercadoPagoConfig,
}

impl MercadoPagoGateway {
    /// Build a gateway with a bounded request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(config: MercadoPagoConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, config })
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        Err(GatewayError::Status {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl PaymentGateway for MercadoPagoGateway {
    async fn create_preference(
        &self,
        preference: &PreferenceRequest,
    ) -> Result<Preference, GatewayError> {
        debug!(
            external_reference = %preference.external_reference,
            items = preference.items.len(),
            "creating payment preference"
        );

        let response = self
            .http
            .post(format!("{}/checkout/preferences", self.config.api_base))
            .bearer_auth(&self.config.access_token)
            .json(preference)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn get_payment(&self, payment_id: &str) -> Result<PaymentRecord, GatewayError> {
        let response = self
            .http
            .get(format!("{}/v1/payments/{payment_id}", self.config.api_base))
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }
}
