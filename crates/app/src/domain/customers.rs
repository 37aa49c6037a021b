//! Customer email lookup.
//!
//! Customers are owned by the identity provider; the only column this
//! pipeline reads is the email the purchase confirmation goes to.

use sqlx::{PgPool, Row, query};

use crate::domain::CustomerId;

const GET_CUSTOMER_EMAIL_SQL: &str = "SELECT email FROM usuarios WHERE id = $1";

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_email(
        &self,
        pool: &PgPool,
        customer: CustomerId,
    ) -> Result<Option<String>, sqlx::Error> {
        let row = query(GET_CUSTOMER_EMAIL_SQL)
            .bind(customer.into_i64())
            .fetch_optional(pool)
            .await?;

        row.map(|row| row.try_get("email")).transpose()
    }
}
