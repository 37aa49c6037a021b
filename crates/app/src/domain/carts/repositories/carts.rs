//! Carts Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    CustomerId,
    carts::models::{Cart, CartId, CartStatus},
    rows::try_get_amount,
};

const FIND_ACTIVE_CART_SQL: &str = include_str!("../sql/find_active_cart.sql");
const INSERT_ACTIVE_CART_SQL: &str = include_str!("../sql/insert_active_cart.sql");
const CLOSE_CART_SQL: &str = include_str!("../sql/close_cart.sql");
const RECOMPUTE_CART_TOTAL_SQL: &str = include_str!("../sql/recompute_cart_total.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerId,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(FIND_ACTIVE_CART_SQL)
            .bind(customer.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a fresh active cart for the customer.
    ///
    /// Returns `None` when the partial unique index reports the customer
    /// already has one (concurrent get-or-create).
    pub(crate) async fn insert_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerId,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(INSERT_ACTIVE_CART_SQL)
            .bind(customer.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// The single active cart for the customer, created when absent.
    pub(crate) async fn get_or_create_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerId,
    ) -> Result<Cart, sqlx::Error> {
        if let Some(cart) = self.find_active(tx, customer).await? {
            return Ok(cart);
        }

        if let Some(cart) = self.insert_active(tx, customer).await? {
            return Ok(cart);
        }

        // Lost the insert race; the winner's cart is visible now.
        self.find_active(tx, customer)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn close(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLOSE_CART_SQL)
            .bind(cart.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Recompute the cached total from the remaining lines and persist it.
    pub(crate) async fn recompute_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<u64, sqlx::Error> {
        let row = query(RECOMPUTE_CART_TOTAL_SQL)
            .bind(cart.into_i64())
            .fetch_one(&mut **tx)
            .await?;

        try_get_amount(&row, "precio_total")
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let estado: String = row.try_get("estado")?;

        let status =
            CartStatus::from_db_str(&estado).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "estado".to_string(),
                source: format!("unknown cart status {estado:?}").into(),
            })?;

        Ok(Self {
            id: CartId::from_i64(row.try_get("id")?),
            customer: CustomerId::from_i64(row.try_get("cliente_id")?),
            status,
            total: try_get_amount(row, "precio_total")?,
        })
    }
}
