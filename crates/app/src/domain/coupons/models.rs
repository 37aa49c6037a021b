//! Coupon Models

use rust_decimal::Decimal;

use crate::ids::TypedId;

/// Typed id for [`Coupon`].
pub type CouponId = TypedId<Coupon>;

/// A percentage discount coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    /// Percentage off the subtotal, `0..=100`.
    pub percentage: Decimal,
    pub active: bool,
}
