//! Cart pricing for the checkout pipeline.
//!
//! Pure computation over line items: subtotal, percentage coupon discount,
//! flat-or-free shipping, and the clamped grand total. No I/O lives here;
//! persistence and the payment processor are the `tienda-app` crate's job.

pub mod lines;
pub mod quote;

pub use lines::PricedLine;
pub use quote::{Quote, QuoteError, ShippingPolicy};
