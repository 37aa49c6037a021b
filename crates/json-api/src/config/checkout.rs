//! Checkout Policy Config

use clap::Args;

/// Checkout pricing thresholds and public URLs.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Subtotals at or above this amount ship for free
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value = "150000")]
    pub free_shipping_threshold: u64,

    /// Flat shipping cost below the threshold
    #[arg(long, env = "FLAT_SHIPPING_COST", default_value = "10000")]
    pub flat_shipping_cost: u64,

    /// Public base URL of the storefront frontend
    #[arg(long, env = "FRONTEND_URL", default_value = "http://localhost:5173")]
    pub frontend_url: String,

    /// Public base URL of this API (webhook callback target)
    #[arg(long, env = "BACKEND_URL", default_value = "http://localhost:3000")]
    pub backend_url: String,

    /// Base URL of the headless CMS (notification image enrichment)
    #[arg(long, env = "CATALOG_URL", default_value = "http://127.0.0.1:1337")]
    pub catalog_url: String,
}
