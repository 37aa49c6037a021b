//! Cart Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::models::{CartId, CartItemView, CartLine, CartLineId, NewCartItem},
    products::models::ProductId,
    rows::{try_get_amount, try_get_quantity},
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const FIND_MATCHING_LINE_SQL: &str = include_str!("../sql/find_matching_line.sql");
const SUM_PRODUCT_QUANTITY_SQL: &str = include_str!("../sql/sum_product_quantity.sql");
const INCREMENT_LINE_QUANTITY_SQL: &str = include_str!("../sql/increment_line_quantity.sql");
const INSERT_LINE_SQL: &str = include_str!("../sql/insert_line.sql");
const GET_LINE_SQL: &str = include_str!("../sql/get_line.sql");
const SET_LINE_QUANTITY_SQL: &str = include_str!("../sql/set_line_quantity.sql");
const DELETE_LINE_SQL: &str = include_str!("../sql/delete_line.sql");
const DELETE_CART_LINES_SQL: &str = include_str!("../sql/delete_cart_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// All lines of the cart joined with product name and live stock.
    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Vec<CartItemView>, sqlx::Error> {
        query_as::<Postgres, CartItemView>(GET_CART_ITEMS_SQL)
            .bind(cart.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// The line matching (product, engraving text, color), if any.
    pub(crate) async fn find_matching(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: &NewCartItem,
    ) -> Result<Option<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(FIND_MATCHING_LINE_SQL)
            .bind(cart.into_i64())
            .bind(item.product.into_i64())
            .bind(item.engraving_text.as_deref())
            .bind(item.color.as_deref())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Total quantity of the product across every line of the cart.
    pub(crate) async fn sum_product_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let row = query(SUM_PRODUCT_QUANTITY_SQL)
            .bind(cart.into_i64())
            .bind(product.into_i64())
            .fetch_one(&mut **tx)
            .await?;

        try_get_amount(&row, "total")
    }

    pub(crate) async fn increment_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineId,
        by: u32,
    ) -> Result<(), sqlx::Error> {
        query(INCREMENT_LINE_QUANTITY_SQL)
            .bind(i64::from(by))
            .bind(line.into_i64())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: &NewCartItem,
        unit_price: u64,
    ) -> Result<CartLine, sqlx::Error> {
        let unit_price_i64 = i64::try_from(unit_price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "precio_unitario".to_string(),
            source: Box::new(e),
        })?;

        let surcharge_i64 =
            i64::try_from(item.engraving_surcharge).map_err(|e| sqlx::Error::ColumnDecode {
                index: "costo_grabado".to_string(),
                source: Box::new(e),
            })?;

        query_as::<Postgres, CartLine>(INSERT_LINE_SQL)
            .bind(cart.into_i64())
            .bind(item.product.into_i64())
            .bind(i64::from(item.quantity))
            .bind(unit_price_i64)
            .bind(item.engraving_text.as_deref())
            .bind(surcharge_i64)
            .bind(item.color.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineId,
    ) -> Result<Option<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(GET_LINE_SQL)
            .bind(line.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineId,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        query(SET_LINE_QUANTITY_SQL)
            .bind(i64::from(quantity))
            .bind(line.into_i64())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LINE_SQL)
            .bind(line.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_all(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINES_SQL)
            .bind(cart.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartLineId::from_i64(row.try_get("id")?),
            cart: CartId::from_i64(row.try_get("carrito_id")?),
            product: ProductId::from_i64(row.try_get("producto_id")?),
            quantity: try_get_quantity(row, "cantidad")?,
            unit_price: try_get_amount(row, "precio_unitario")?,
            engraving_text: row.try_get("grabado_texto")?,
            engraving_surcharge: try_get_amount(row, "costo_grabado")?,
            color: row.try_get("color")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemView {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartLineId::from_i64(row.try_get("id")?),
            product: ProductId::from_i64(row.try_get("producto_id")?),
            name: row.try_get("nombre")?,
            stock: row.try_get("stock")?,
            quantity: try_get_quantity(row, "cantidad")?,
            unit_price: try_get_amount(row, "precio_unitario")?,
            engraving_text: row.try_get("grabado_texto")?,
            engraving_surcharge: try_get_amount(row, "costo_grabado")?,
            color: row.try_get("color")?,
        })
    }
}
