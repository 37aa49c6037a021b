//! Notification payloads.

/// One purchased item as rendered in the confirmation email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub engraving_surcharge: u64,
    pub engraving_text: Option<String>,
    /// Best-effort CMS enrichment; absent when the lookup failed.
    pub image_url: Option<String>,
}

/// A purchase confirmation ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseEmail {
    pub to: String,
    pub order_id: i64,
    pub items: Vec<EmailItem>,
    pub total: u64,
}
