//! Storefront Domain Concerns

pub mod addresses;
pub mod carts;
pub mod coupons;
pub mod customers;
pub mod orders;
pub mod products;

pub(crate) mod rows;

use crate::ids::TypedId;

/// Marker for customer ids.
///
/// Customers are owned by the identity provider; the checkout pipeline only
/// ever handles their id (and, for notifications, their email).
#[derive(Debug)]
pub enum Customer {}

/// Typed id for [`Customer`].
pub type CustomerId = TypedId<Customer>;
