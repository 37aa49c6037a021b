//! Payment processor integration.

pub mod errors;
mod gateway;
mod mercadopago;
pub mod models;

pub use errors::GatewayError;
pub use gateway::{MockPaymentGateway, PaymentGateway};
pub use mercadopago::{MercadoPagoConfig, MercadoPagoGateway};
