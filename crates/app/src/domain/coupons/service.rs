//! Coupons service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        CustomerId,
        coupons::{errors::CouponsServiceError, models::Coupon, repository::PgCouponsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    coupons: PgCouponsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            coupons: PgCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn validate(
        &self,
        code: &str,
        customer: CustomerId,
    ) -> Result<Coupon, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupon = self
            .coupons
            .find_active_by_code(&mut tx, code)
            .await?
            .ok_or(CouponsServiceError::NotFound)?;

        let used = self.coupons.usage_exists(&mut tx, customer, coupon.id).await?;

        tx.commit().await?;

        if used {
            return Err(CouponsServiceError::AlreadyUsed);
        }

        Ok(coupon)
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Check a code against the active flag and the per-customer usage
    /// ledger. Side-effect free; usage is recorded at settlement, so a
    /// validated-but-unsettled coupon stays usable.
    async fn validate(
        &self,
        code: &str,
        customer: CustomerId,
    ) -> Result<Coupon, CouponsServiceError>;
}
