//! Orders
//!
//! Order assembly at checkout, the payment-webhook reconciliation state
//! machine, and settlement side effects.

pub mod errors;
pub mod models;
mod preference;
mod repositories;
pub mod service;
mod settlement;

pub(crate) use repositories::{PgOrderLinesRepository, PgOrdersRepository};

pub use errors::OrdersServiceError;
pub use service::*;
