//! Orders service errors.

use sqlx::Error;
use thiserror::Error;
use tienda::QuoteError;

use crate::payments::GatewayError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("the cart is empty")]
    EmptyCart,

    #[error("no items with sufficient stock to continue")]
    NoEligibleItems,

    #[error("address not found")]
    AddressNotFound,

    #[error("order not found")]
    OrderNotFound,

    #[error("pricing failed")]
    Pricing(#[from] QuoteError),

    #[error("payment processor call failed")]
    PaymentGateway(#[source] GatewayError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::OrderNotFound;
        }

        Self::Sql(error)
    }
}
