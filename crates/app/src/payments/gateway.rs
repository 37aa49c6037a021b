//! Payment gateway seam.

use async_trait::async_trait;
use mockall::automock;

use crate::payments::{
    errors::GatewayError,
    models::{PaymentRecord, Preference, PreferenceRequest},
};

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a preference the customer is redirected to.
    async fn create_preference(
        &self,
        preference: &PreferenceRequest,
    ) -> Result<Preference, GatewayError>;

    /// Fetch the authoritative payment record by processor payment id.
    async fn get_payment(&self, payment_id: &str) -> Result<PaymentRecord, GatewayError>;
}
