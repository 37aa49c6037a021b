//! Payment processor wire models.
//!
//! Field names follow the processor's JSON vocabulary, so these serialize
//! without renames.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency every preference is quoted in.
pub const CURRENCY_ID: &str = "ARS";

/// One billable line of a preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceItem {
    pub title: String,
    pub quantity: u32,
    /// Unit price with the coupon discount already applied.
    pub unit_price: Decimal,
    pub currency_id: String,
}

/// Redirect targets the processor sends the customer back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

/// Opaque values echoed back on the payment record; how the webhook learns
/// which customer and coupon a payment belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMetadata {
    pub cliente_id: Option<i64>,
    pub cupon_id: Option<i64>,
}

/// A preference to create on the processor side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
    pub metadata: PaymentMetadata,
    pub back_urls: BackUrls,
    pub auto_return: String,
    /// The local order id, stringified.
    pub external_reference: String,
    pub notification_url: String,
}

/// The processor's answer to a created preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub id: String,
    /// Where to redirect the customer to pay.
    pub init_point: String,
}

/// The authoritative payment record, re-fetched on every webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: i64,
    pub status: String,
    pub external_reference: Option<String>,
    #[serde(default)]
    pub metadata: PaymentMetadata,
}
