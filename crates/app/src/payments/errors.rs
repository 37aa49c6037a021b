//! Payment gateway errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("payment processor request failed")]
    Http(#[from] reqwest::Error),

    #[error("payment processor responded {status}: {body}")]
    Status { status: u16, body: String },
}
