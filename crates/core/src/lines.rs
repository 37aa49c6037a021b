//! Priced line items.

use serde::{Deserialize, Serialize};

/// A cart line as seen by the pricing engine.
///
/// Prices are minor units, captured when the line was added to the cart;
/// the engine never re-fetches live product prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    /// Unit price in minor units.
    pub unit_price: u64,
    /// Engraving surcharge per unit, zero when the line is not engraved.
    pub engraving_surcharge: u64,
    /// Units requested.
    pub quantity: u32,
}

impl PricedLine {
    /// Line total: `(unit_price + engraving_surcharge) × quantity`.
    ///
    /// `None` when the amount overflows `u64`.
    #[must_use]
    pub fn line_total(&self) -> Option<u64> {
        self.unit_price
            .checked_add(self.engraving_surcharge)?
            .checked_mul(u64::from(self.quantity))
    }
}
