//! Payment Processor Config

use clap::Args;

/// MercadoPago settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Access token for the payment processor
    #[arg(long, env = "MP_ACCESS_TOKEN")]
    pub mp_access_token: String,

    /// Payment processor API base URL
    #[arg(long, env = "MP_API_BASE", default_value = "https://api.mercadopago.com")]
    pub mp_api_base: String,
}
