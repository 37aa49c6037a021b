//! Order Lines Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    orders::models::{OrderId, OrderLineView},
    products::models::ProductId,
    rows::{try_get_amount, try_get_quantity},
};

const INSERT_ORDER_LINE_SQL: &str = include_str!("../sql/insert_order_line.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("../sql/get_order_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderLinesRepository;

impl PgOrderLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        line: &OrderLineView,
    ) -> Result<(), sqlx::Error> {
        let unit_price_i64 =
            i64::try_from(line.unit_price).map_err(|e| sqlx::Error::ColumnDecode {
                index: "precio_unitario".to_string(),
                source: Box::new(e),
            })?;

        let surcharge_i64 =
            i64::try_from(line.engraving_surcharge).map_err(|e| sqlx::Error::ColumnDecode {
                index: "costo_grabado".to_string(),
                source: Box::new(e),
            })?;

        query(INSERT_ORDER_LINE_SQL)
            .bind(order.into_i64())
            .bind(line.product.into_i64())
            .bind(i64::from(line.quantity))
            .bind(unit_price_i64)
            .bind(line.engraving_text.as_deref())
            .bind(surcharge_i64)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Vec<OrderLineView>, sqlx::Error> {
        query_as::<Postgres, OrderLineView>(GET_ORDER_LINES_SQL)
            .bind(order.into_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineView {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: ProductId::from_i64(row.try_get("producto_id")?),
            name: row.try_get("nombre")?,
            quantity: try_get_quantity(row, "cantidad")?,
            unit_price: try_get_amount(row, "precio_unitario")?,
            engraving_text: row.try_get("grabado_texto")?,
            engraving_surcharge: try_get_amount(row, "costo_grabado")?,
        })
    }
}
