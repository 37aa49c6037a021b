//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    CustomerId,
    addresses::models::AddressId,
    carts::models::CartId,
    orders::models::{
        AddressSnapshot, FulfillmentStatus, NewOrder, Order, OrderId, PaymentStatus,
    },
    rows::try_get_amount,
};

const INSERT_ORDER_SQL: &str = include_str!("../sql/insert_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const TRANSITION_PAYMENT_STATUS_SQL: &str = include_str!("../sql/transition_payment_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<Order, sqlx::Error> {
        let total_i64 = i64::try_from(order.total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "monto_total".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, Order>(INSERT_ORDER_SQL)
            .bind(total_i64)
            .bind(order.payment_status.as_db_str())
            .bind(order.customer.into_i64())
            .bind(&order.shipping.street_line)
            .bind(&order.shipping.city)
            .bind(&order.shipping.province)
            .bind(&order.shipping.country)
            .bind(&order.shipping.postal_code)
            .bind(order.address.map(AddressId::into_i64))
            .bind(order.cart.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Compare-and-set: moves the payment status and records the processor
    /// payment id only while the order is not yet approved. The returned
    /// row count is the idempotence signal: zero means another delivery
    /// already settled (or is settling) this order.
    pub(crate) async fn transition_payment_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        status: PaymentStatus,
        payment_ref: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(TRANSITION_PAYMENT_STATUS_SQL)
            .bind(status.as_db_str())
            .bind(payment_ref)
            .bind(order.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let estado_pago: String = row.try_get("estado_pago")?;

        let payment_status =
            PaymentStatus::from_db_str(&estado_pago).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "estado_pago".to_string(),
                source: format!("unknown payment status {estado_pago:?}").into(),
            })?;

        let estado_pedido: String = row.try_get("estado_pedido")?;

        let fulfillment_status = FulfillmentStatus::from_db_str(&estado_pedido).ok_or_else(
            || sqlx::Error::ColumnDecode {
                index: "estado_pedido".to_string(),
                source: format!("unknown fulfillment status {estado_pedido:?}").into(),
            },
        )?;

        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            customer: CustomerId::from_i64(row.try_get("cliente_id")?),
            cart: CartId::from_i64(row.try_get("carrito_id")?),
            total: try_get_amount(row, "monto_total")?,
            payment_status,
            fulfillment_status,
            carrier: row.try_get("transportista")?,
            payment_ref: row.try_get("pago_id")?,
            shipping: AddressSnapshot {
                street_line: row.try_get("direccion_envio")?,
                city: row.try_get("ciudad_envio")?,
                province: row.try_get("provincia_envio")?,
                country: row.try_get("pais_envio")?,
                postal_code: row.try_get("codigo_postal_envio")?,
            },
            address: row
                .try_get::<Option<i64>, _>("domicilio_id")?
                .map(AddressId::from_i64),
            created_at: row
                .try_get::<SqlxTimestamp, _>("fecha_creacion")?
                .to_jiff(),
        })
    }
}
