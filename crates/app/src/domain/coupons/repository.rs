//! Coupons Repository

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    CustomerId,
    coupons::models::{Coupon, CouponId},
    orders::models::OrderId,
};

const FIND_ACTIVE_BY_CODE_SQL: &str = include_str!("sql/find_active_coupon_by_code.sql");
const FIND_ACTIVE_BY_ID_SQL: &str = include_str!("sql/find_active_coupon_by_id.sql");
const FIND_USAGE_SQL: &str = include_str!("sql/find_coupon_usage.sql");
const INSERT_USAGE_SQL: &str = include_str!("sql/insert_coupon_usage.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_active_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<Coupon>, sqlx::Error> {
        query_as::<Postgres, Coupon>(FIND_ACTIVE_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_active_by_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponId,
    ) -> Result<Option<Coupon>, sqlx::Error> {
        query_as::<Postgres, Coupon>(FIND_ACTIVE_BY_ID_SQL)
            .bind(coupon.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn usage_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerId,
        coupon: CouponId,
    ) -> Result<bool, sqlx::Error> {
        let row = query(FIND_USAGE_SQL)
            .bind(customer.into_i64())
            .bind(coupon.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.is_some())
    }

    /// Record a usage in the ledger. The unique constraint makes a replay a
    /// no-op (zero rows affected) rather than an error.
    pub(crate) async fn record_usage(
        &self,
        pool: &PgPool,
        customer: CustomerId,
        coupon: CouponId,
        order: OrderId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INSERT_USAGE_SQL)
            .bind(customer.into_i64())
            .bind(coupon.into_i64())
            .bind(order.into_i64())
            .bind(Uuid::new_v4())
            .execute(pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Coupon {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CouponId::from_i64(row.try_get("id")?),
            code: row.try_get("codigo")?,
            percentage: row.try_get::<Decimal, _>("porcentaje")?,
            active: row.try_get("activo")?,
        })
    }
}
