//! Cart Models

use tienda::PricedLine;

use crate::{
    domain::{CustomerId, products::models::ProductId},
    ids::TypedId,
};

/// Longest engraving text a line may carry, in characters.
pub const MAX_ENGRAVING_LEN: usize = 40;

/// Typed id for [`Cart`].
pub type CartId = TypedId<Cart>;

/// Typed id for [`CartLine`].
pub type CartLineId = TypedId<CartLine>;

/// Cart lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStatus {
    /// The single mutable, not-yet-checked-out cart for a customer.
    Active,
    /// Spent by a settled order; never reopened.
    Closed,
}

impl CartStatus {
    #[must_use]
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Active => "activo",
            Self::Closed => "cerrado",
        }
    }

    #[must_use]
    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "activo" => Some(Self::Active),
            "cerrado" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Cart Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: CartId,
    pub customer: CustomerId,
    pub status: CartStatus,
    /// Cached total, recomputed after every mutation.
    pub total: u64,
}

/// Cart line as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub id: CartLineId,
    pub cart: CartId,
    pub product: ProductId,
    pub quantity: u32,
    /// Captured at add-time, not re-fetched live.
    pub unit_price: u64,
    pub engraving_text: Option<String>,
    pub engraving_surcharge: u64,
    pub color: Option<String>,
}

/// Cart line joined with its product's live name and stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: CartLineId,
    pub product: ProductId,
    pub name: String,
    pub stock: i64,
    pub quantity: u32,
    pub unit_price: u64,
    pub engraving_text: Option<String>,
    pub engraving_surcharge: u64,
    pub color: Option<String>,
}

impl CartItemView {
    /// Whether the requested quantity is covered by current stock.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        i64::from(self.quantity) <= self.stock
    }

    /// The line as the pricing engine sees it.
    #[must_use]
    pub fn priced(&self) -> PricedLine {
        PricedLine {
            unit_price: self.unit_price,
            engraving_surcharge: self.engraving_surcharge,
            quantity: self.quantity,
        }
    }
}

/// A line to add to a customer's active cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product: ProductId,
    pub quantity: u32,
    pub color: Option<String>,
    pub engraving_text: Option<String>,
    pub engraving_surcharge: u64,
}

/// The active cart with its item views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub cart: CartId,
    pub total: u64,
    pub items: Vec<CartItemView>,
}

/// Result of a cart mutation: the owning cart and its recomputed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartMutation {
    pub cart: CartId,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(quantity: u32, stock: i64) -> CartItemView {
        CartItemView {
            id: CartLineId::from_i64(1),
            product: ProductId::from_i64(1),
            name: "Mate Imperial".to_owned(),
            stock,
            quantity,
            unit_price: 1000,
            engraving_text: None,
            engraving_surcharge: 200,
            color: None,
        }
    }

    #[test]
    fn eligibility_is_quantity_against_stock() {
        assert!(view(2, 5).is_eligible());
        assert!(view(5, 5).is_eligible());
        assert!(!view(6, 5).is_eligible());
        assert!(!view(1, 0).is_eligible());
    }

    #[test]
    fn priced_line_carries_surcharge() {
        let line = view(2, 5).priced();

        assert_eq!(line.line_total(), Some(2400));
    }
}
