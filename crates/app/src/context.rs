//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    catalog::CatalogClient,
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        coupons::{CouponsService, PgCouponsService},
        orders::{OrdersService, PgOrdersService, models::CheckoutPolicy},
    },
    notifications::{HttpMailer, MailerConfig, NotifyError},
    payments::{GatewayError, MercadoPagoConfig, MercadoPagoGateway},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to build payment gateway client")]
    Gateway(#[source] GatewayError),

    #[error("failed to build mail client")]
    Mailer(#[source] NotifyError),

    #[error("failed to build catalog client")]
    Catalog(#[source] reqwest::Error),
}

/// Everything the app needs to build its services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub mercadopago: MercadoPagoConfig,
    pub mailer: MailerConfig,
    /// Base URL of the headless CMS, for notification image enrichment.
    pub catalog_base_url: String,
    pub checkout: CheckoutPolicy,
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub coupons: Arc<dyn CouponsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the database connection or an outbound HTTP
    /// client cannot be established.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        let gateway =
            MercadoPagoGateway::new(config.mercadopago).map_err(AppInitError::Gateway)?;

        let notifier = HttpMailer::new(config.mailer).map_err(AppInitError::Mailer)?;

        let catalog =
            CatalogClient::new(config.catalog_base_url).map_err(AppInitError::Catalog)?;

        Ok(Self {
            carts: Arc::new(PgCartsService::new(db.clone())),
            coupons: Arc::new(PgCouponsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(
                db,
                Arc::new(gateway),
                Arc::new(notifier),
                catalog,
                config.checkout,
            )),
        })
    }
}
