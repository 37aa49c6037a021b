//! Server configuration module

use clap::Parser;
use tienda::ShippingPolicy;
use tienda_app::{
    context::AppConfig,
    domain::orders::models::CheckoutPolicy,
    notifications::MailerConfig,
    payments::MercadoPagoConfig,
};

use crate::config::{
    checkout::CheckoutConfig, db::DatabaseConfig, logging::LoggingConfig, mail::MailConfig,
    payments::PaymentsConfig, server::ServerRuntimeConfig,
};

pub(crate) mod checkout;
pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod mail;
pub(crate) mod payments;
pub(crate) mod server;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "tienda-json", about = "Storefront checkout API server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Payment processor settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Purchase notification settings.
    #[command(flatten)]
    pub mail: MailConfig,

    /// Checkout pricing and URL policy.
    #[command(flatten)]
    pub checkout: CheckoutConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// The app-crate configuration this server config resolves to.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database.database_url.clone(),
            mercadopago: MercadoPagoConfig {
                access_token: self.payments.mp_access_token.clone(),
                api_base: self.payments.mp_api_base.clone(),
            },
            mailer: MailerConfig {
                endpoint: self.mail.mail_endpoint.clone(),
                sender: self.mail.mail_sender.clone(),
            },
            catalog_base_url: self.checkout.catalog_url.clone(),
            checkout: CheckoutPolicy {
                shipping: ShippingPolicy {
                    free_shipping_threshold: self.checkout.free_shipping_threshold,
                    flat_cost: self.checkout.flat_shipping_cost,
                },
                frontend_url: self.checkout.frontend_url.clone(),
                backend_url: self.checkout.backend_url.clone(),
            },
        }
    }
}
