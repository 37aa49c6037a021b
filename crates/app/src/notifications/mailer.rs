//! Notifier seam and the HTTP mail-relay implementation.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use thiserror::Error;

use crate::notifications::{
    models::PurchaseEmail,
    render::{purchase_html, purchase_subject},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("mail relay request failed")]
    Http(#[from] reqwest::Error),

    #[error("mail relay responded {status}")]
    Status { status: u16 },
}

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a purchase confirmation. Callers treat failures as
    /// log-and-forget; this must never influence order state.
    async fn send_purchase_confirmation(&self, email: &PurchaseEmail) -> Result<(), NotifyError>;
}

/// Delivery endpoint and sender identity.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// HTTP endpoint of the email-delivery service.
    pub endpoint: String,
    pub sender: String,
}

#[derive(Debug, Serialize)]
struct OutboundMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    html: String,
}

#[derive(Debug, Clone)]
pub struct HttpMailer {
    http: reqwest::Client,
    config: MailerConfig,
}

impl HttpMailer {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(config: MailerConfig) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn send_purchase_confirmation(&self, email: &PurchaseEmail) -> Result<(), NotifyError> {
        let message = OutboundMessage {
            from: &self.config.sender,
            to: &email.to,
            subject: purchase_subject(email.order_id),
            html: purchase_html(email),
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&message)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(NotifyError::Status {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
