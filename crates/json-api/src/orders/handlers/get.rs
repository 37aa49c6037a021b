//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tienda_app::domain::orders::models::{Order, OrderDetail, OrderId, OrderLineView};

use crate::{checkout::errors::into_status_error, extensions::*, state::State};

/// Order header as persisted at checkout time.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderHeaderResponse {
    pub id: i64,
    pub monto_total: u64,
    pub estado_pago: String,
    pub estado_pedido: String,
    pub transportista: Option<String>,
    pub pago_id: Option<String>,
    pub fecha_creacion: String,
    pub cliente_id: i64,
    pub direccion_envio: String,
    pub ciudad_envio: String,
    pub provincia_envio: String,
    pub pais_envio: String,
    pub codigo_postal_envio: String,
    pub carrito_id: i64,
}

impl From<Order> for OrderHeaderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.into_i64(),
            monto_total: order.total,
            estado_pago: order.payment_status.as_db_str().to_owned(),
            estado_pedido: order.fulfillment_status.as_db_str().to_owned(),
            transportista: order.carrier,
            pago_id: order.payment_ref,
            fecha_creacion: order.created_at.to_string(),
            cliente_id: order.customer.into_i64(),
            direccion_envio: order.shipping.street_line,
            ciudad_envio: order.shipping.city,
            provincia_envio: order.shipping.province,
            pais_envio: order.shipping.country,
            codigo_postal_envio: order.shipping.postal_code,
            carrito_id: order.cart.into_i64(),
        }
    }
}

/// One purchased line snapshot.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub producto_id: i64,
    pub nombre: String,
    pub cantidad: u32,
    pub precio_unitario: u64,
    pub grabado_texto: Option<String>,
    pub costo_grabado: u64,
}

impl From<OrderLineView> for OrderItemResponse {
    fn from(line: OrderLineView) -> Self {
        Self {
            producto_id: line.product.into_i64(),
            nombre: line.name,
            cantidad: line.quantity,
            precio_unitario: line.unit_price,
            grabado_texto: line.engraving_text,
            costo_grabado: line.engraving_surcharge,
        }
    }
}

/// Get Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub orden: OrderHeaderResponse,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderDetail> for OrderResponse {
    fn from(detail: OrderDetail) -> Self {
        Self {
            orden: detail.order.into(),
            items: detail.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Order Handler
///
/// Returns the order header plus its immutable line snapshots.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order header and items"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let detail = state
        .app
        .orders
        .get_order(OrderId::from_i64(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tienda_app::domain::{
        CustomerId,
        carts::models::CartId,
        orders::{
            MockOrdersService, OrdersServiceError,
            models::{AddressSnapshot, FulfillmentStatus, PaymentStatus},
        },
        products::models::ProductId,
    };

    use crate::test_helpers::orders_service;

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{id}").get(handler))
    }

    fn make_detail() -> OrderDetail {
        OrderDetail {
            order: Order {
                id: OrderId::from_i64(42),
                customer: CustomerId::from_i64(1),
                cart: CartId::from_i64(10),
                total: 12_400,
                payment_status: PaymentStatus::Approved,
                fulfillment_status: FulfillmentStatus::Pending,
                carrier: None,
                payment_ref: Some("123".to_owned()),
                shipping: AddressSnapshot {
                    street_line: "Av. Siempreviva 742".to_owned(),
                    city: "Springfield".to_owned(),
                    province: "Buenos Aires".to_owned(),
                    country: "Argentina".to_owned(),
                    postal_code: "1414".to_owned(),
                },
                address: None,
                created_at: Timestamp::UNIX_EPOCH,
            },
            items: vec![OrderLineView {
                product: ProductId::from_i64(7),
                name: "Mate Imperial".to_owned(),
                quantity: 2,
                unit_price: 1000,
                engraving_text: None,
                engraving_surcharge: 200,
            }],
        }
    }

    #[tokio::test]
    async fn test_get_order_returns_header_and_items() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(|order| *order == OrderId::from_i64(42))
            .return_once(|_| Ok(make_detail()));

        let mut res = TestClient::get("http://example.com/orders/42")
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.orden.id, 42);
        assert_eq!(body.orden.estado_pago, "aprobado");
        assert_eq!(body.orden.direccion_envio, "Av. Siempreviva 742");
        assert_eq!(body.items.len(), 1);
        assert_eq!(
            body.items.first().map(|item| item.cantidad),
            Some(2)
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_is_404() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::OrderNotFound));

        let res = TestClient::get("http://example.com/orders/999")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
