//! Quote computation.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lines::PricedLine;

/// Shipping cost policy applied to a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Subtotals at or above this amount ship for free.
    pub free_shipping_threshold: u64,
    /// Flat cost charged below the threshold.
    pub flat_cost: u64,
}

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// A line total or the subtotal overflowed the representable range.
    #[error("amounts overflow the representable range")]
    AmountOverflow,

    /// The discount percentage is outside `0..=100`.
    #[error("discount percentage {0} is out of range")]
    InvalidPercentage(Decimal),
}

/// A priced cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Sum of line totals before discount and shipping.
    pub subtotal: u64,
    /// Coupon discount, applied to the subtotal only.
    pub discount: u64,
    /// Shipping cost after the free-shipping threshold.
    pub shipping: u64,
    /// `max(0, subtotal − discount) + shipping`.
    pub total: u64,
}

impl Quote {
    /// Price a set of lines with an optional percentage discount.
    ///
    /// The discount never applies to shipping, and the total is clamped so
    /// it cannot go negative regardless of the discount.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::AmountOverflow`]: an amount overflowed `u64`.
    /// - [`QuoteError::InvalidPercentage`]: percentage outside `0..=100`.
    pub fn price(
        lines: &[PricedLine],
        discount_percentage: Option<Decimal>,
        shipping: &ShippingPolicy,
    ) -> Result<Self, QuoteError> {
        let subtotal = lines
            .iter()
            .try_fold(0_u64, |acc, line| {
                line.line_total().and_then(|total| acc.checked_add(total))
            })
            .ok_or(QuoteError::AmountOverflow)?;

        let discount = match discount_percentage {
            Some(percentage) => discount_amount(subtotal, percentage)?,
            None => 0,
        };

        let shipping = if subtotal >= shipping.free_shipping_threshold {
            0
        } else {
            shipping.flat_cost
        };

        let total = subtotal
            .saturating_sub(discount)
            .checked_add(shipping)
            .ok_or(QuoteError::AmountOverflow)?;

        Ok(Self {
            subtotal,
            discount,
            shipping,
            total,
        })
    }
}

fn discount_amount(subtotal: u64, percentage: Decimal) -> Result<u64, QuoteError> {
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(QuoteError::InvalidPercentage(percentage));
    }

    (Decimal::from(subtotal) * percentage / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(QuoteError::AmountOverflow)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const POLICY: ShippingPolicy = ShippingPolicy {
        free_shipping_threshold: 150_000,
        flat_cost: 10_000,
    };

    fn line(unit_price: u64, engraving_surcharge: u64, quantity: u32) -> PricedLine {
        PricedLine {
            unit_price,
            engraving_surcharge,
            quantity,
        }
    }

    #[test]
    fn engraved_lines_below_threshold_pay_flat_shipping() -> TestResult {
        // 2 × (1000 + 200) = 2400, well below the threshold.
        let quote = Quote::price(&[line(1000, 200, 2)], None, &POLICY)?;

        assert_eq!(quote.subtotal, 2400);
        assert_eq!(quote.discount, 0);
        assert_eq!(quote.shipping, 10_000);
        assert_eq!(quote.total, 12_400);

        Ok(())
    }

    #[test]
    fn subtotal_at_threshold_ships_free() -> TestResult {
        let quote = Quote::price(&[line(150_000, 0, 1)], None, &POLICY)?;

        assert_eq!(quote.shipping, 0);
        assert_eq!(quote.total, 150_000);

        Ok(())
    }

    #[test]
    fn subtotal_just_below_threshold_pays_shipping() -> TestResult {
        let quote = Quote::price(&[line(149_999, 0, 1)], None, &POLICY)?;

        assert_eq!(quote.shipping, 10_000);
        assert_eq!(quote.total, 159_999);

        Ok(())
    }

    #[test]
    fn discount_applies_to_subtotal_only() -> TestResult {
        // 10% of 20000 = 2000; shipping is added after the discount.
        let quote = Quote::price(&[line(20_000, 0, 1)], Some(Decimal::from(10)), &POLICY)?;

        assert_eq!(quote.subtotal, 20_000);
        assert_eq!(quote.discount, 2000);
        assert_eq!(quote.shipping, 10_000);
        assert_eq!(quote.total, 28_000);

        Ok(())
    }

    #[test]
    fn fractional_percentage_rounds_half_up() -> TestResult {
        // 10.5% of 1000 = 105.0; 10.5% of 990 = 103.95 → 104.
        let quote = Quote::price(&[line(990, 0, 1)], Some(Decimal::new(105, 1)), &POLICY)?;

        assert_eq!(quote.discount, 104);

        Ok(())
    }

    #[test]
    fn full_discount_still_charges_shipping() -> TestResult {
        let quote = Quote::price(&[line(5000, 0, 1)], Some(Decimal::ONE_HUNDRED), &POLICY)?;

        assert_eq!(quote.discount, 5000);
        assert_eq!(quote.total, 10_000);

        Ok(())
    }

    #[test]
    fn total_is_never_negative() -> TestResult {
        let free = ShippingPolicy {
            free_shipping_threshold: 0,
            flat_cost: 0,
        };

        let quote = Quote::price(&[line(100, 0, 1)], Some(Decimal::ONE_HUNDRED), &free)?;

        assert_eq!(quote.total, 0);

        Ok(())
    }

    #[test]
    fn percentage_above_one_hundred_is_rejected() {
        let result = Quote::price(&[line(100, 0, 1)], Some(Decimal::from(101)), &POLICY);

        assert!(
            matches!(result, Err(QuoteError::InvalidPercentage(_))),
            "expected InvalidPercentage, got {result:?}"
        );
    }

    #[test]
    fn negative_percentage_is_rejected() {
        let result = Quote::price(&[line(100, 0, 1)], Some(Decimal::from(-5)), &POLICY);

        assert!(
            matches!(result, Err(QuoteError::InvalidPercentage(_))),
            "expected InvalidPercentage, got {result:?}"
        );
    }

    #[test]
    fn overflowing_lines_are_rejected() {
        let lines = [line(u64::MAX, 0, 2)];

        assert_eq!(
            Quote::price(&lines, None, &POLICY),
            Err(QuoteError::AmountOverflow)
        );
    }

    #[test]
    fn empty_lines_price_to_shipping_only() -> TestResult {
        let quote = Quote::price(&[], None, &POLICY)?;

        assert_eq!(quote.subtotal, 0);
        assert_eq!(quote.total, 10_000);

        Ok(())
    }
}
