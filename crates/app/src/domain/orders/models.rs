//! Order Models

use jiff::Timestamp;
use tienda::ShippingPolicy;

use crate::{
    domain::{
        CustomerId,
        addresses::models::{AddressId, NewAddress},
        carts::models::CartId,
        coupons::models::CouponId,
        products::models::ProductId,
    },
    ids::TypedId,
};

/// Typed id for [`Order`].
pub type OrderId = TypedId<Order>;

/// Payment leg of an order.
///
/// `Approved` is absorbing: once reached, settlement has run (or is
/// running) and no later webhook may transition the order again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

impl PaymentStatus {
    #[must_use]
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::Approved => "aprobado",
            Self::Rejected => "rechazado",
        }
    }

    #[must_use]
    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "pendiente" => Some(Self::Pending),
            "aprobado" => Some(Self::Approved),
            "rechazado" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Map the processor's status vocabulary; anything unrecognised is
    /// still pending as far as settlement is concerned.
    #[must_use]
    pub fn from_processor(status: &str) -> Self {
        match status {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }

    /// Whether the status admits no further transition.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// Fulfillment leg, independent of payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentStatus {
    Pending,
    Preparing,
    InTransit,
    Delivered,
}

impl FulfillmentStatus {
    #[must_use]
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::Preparing => "preparando",
            Self::InTransit => "en_camino",
            Self::Delivered => "entregado",
        }
    }

    #[must_use]
    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "pendiente" => Some(Self::Pending),
            "preparando" => Some(Self::Preparing),
            "en_camino" => Some(Self::InTransit),
            "entregado" => Some(Self::Delivered),
            _ => None,
        }
    }
}

/// Shipping address fields copied onto the order at creation; later edits
/// to the address book never touch settled orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSnapshot {
    /// Street and number collapsed into one display line.
    pub street_line: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerId,
    /// The cart this order spent; closed at settlement.
    pub cart: CartId,
    pub total: u64,
    pub payment_status: PaymentStatus,
    pub fulfillment_status: FulfillmentStatus,
    pub carrier: Option<String>,
    /// Processor payment id, assigned by the first webhook that lands.
    pub payment_ref: Option<String>,
    pub shipping: AddressSnapshot,
    pub address: Option<AddressId>,
    pub created_at: Timestamp,
}

/// Input to the orders repository insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: CustomerId,
    pub cart: CartId,
    pub total: u64,
    pub payment_status: PaymentStatus,
    pub shipping: AddressSnapshot,
    pub address: Option<AddressId>,
}

/// Immutable snapshot of a purchased line, joined with the product name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineView {
    pub product: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub engraving_text: Option<String>,
    pub engraving_surcharge: u64,
}

/// The shipping destination for a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRef {
    /// A saved address; must belong to the customer.
    Saved(AddressId),
    /// An inline address, deduplicated by exact match before insert.
    New(NewAddress),
}

/// A checkout to assemble into an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub customer: CustomerId,
    pub coupon: Option<CouponId>,
    pub address: AddressRef,
    /// Demo checkouts settle synchronously instead of going through the
    /// payment processor.
    pub demo: bool,
}

/// A successfully started checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutCreated {
    pub order: OrderId,
    /// Where to send the customer: the processor's checkout page, or the
    /// local success page for demo orders.
    pub init_point: String,
}

/// Order header plus its line snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub order: Order,
    pub items: Vec<OrderLineView>,
}

/// Checkout-wide pricing and URL policy.
#[derive(Debug, Clone)]
pub struct CheckoutPolicy {
    pub shipping: ShippingPolicy,
    /// Public base URL of the storefront, for redirect targets.
    pub frontend_url: String,
    /// Public base URL of this API, for the webhook callback.
    pub backend_url: String,
}
