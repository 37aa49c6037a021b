//! Addresses Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    CustomerId,
    addresses::models::{Address, AddressId, NewAddress},
};

const GET_OWNED_ADDRESS_SQL: &str = include_str!("sql/get_owned_address.sql");
const FIND_EXACT_ADDRESS_SQL: &str = include_str!("sql/find_exact_address.sql");
const INSERT_ADDRESS_SQL: &str = include_str!("sql/insert_address.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAddressesRepository;

impl PgAddressesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// The address, but only when it belongs to the customer.
    pub(crate) async fn get_owned(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: AddressId,
        customer: CustomerId,
    ) -> Result<Option<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(GET_OWNED_ADDRESS_SQL)
            .bind(address.into_i64())
            .bind(customer.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_exact(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerId,
        address: &NewAddress,
    ) -> Result<Option<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(FIND_EXACT_ADDRESS_SQL)
            .bind(customer.into_i64())
            .bind(&address.street)
            .bind(&address.number)
            .bind(&address.city)
            .bind(&address.province)
            .bind(&address.country)
            .bind(&address.postal_code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerId,
        address: &NewAddress,
    ) -> Result<Address, sqlx::Error> {
        query_as::<Postgres, Address>(INSERT_ADDRESS_SQL)
            .bind(customer.into_i64())
            .bind(&address.street)
            .bind(&address.number)
            .bind(&address.city)
            .bind(&address.province)
            .bind(&address.country)
            .bind(&address.postal_code)
            .bind(address.phone.as_deref())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Address {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: AddressId::from_i64(row.try_get("id")?),
            customer: CustomerId::from_i64(row.try_get("usuario_id")?),
            street: row.try_get("calle")?,
            number: row.try_get("numero")?,
            city: row.try_get("ciudad")?,
            province: row.try_get("provincia")?,
            country: row.try_get("pais")?,
            postal_code: row.try_get("codigo_postal")?,
            phone: row.try_get("telefono")?,
        })
    }
}
