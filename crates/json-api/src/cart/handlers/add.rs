//! Add To Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tienda_app::domain::{
    CustomerId,
    carts::models::NewCartItem,
    products::models::ProductId,
};

use crate::{
    cart::{errors::into_status_error, responses::CartMutationResponse},
    extensions::*,
    state::State,
};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    #[serde(rename = "clienteId")]
    pub cliente_id: i64,
    #[serde(rename = "productoId")]
    pub producto_id: i64,
    #[serde(default = "default_cantidad")]
    pub cantidad: u32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub grabado_texto: Option<String>,
    #[serde(default)]
    pub costo_grabado: u64,
}

fn default_cantidad() -> u32 {
    1
}

impl AddToCartRequest {
    fn into_parts(self) -> (CustomerId, NewCartItem) {
        (
            CustomerId::from_i64(self.cliente_id),
            NewCartItem {
                product: ProductId::from_i64(self.producto_id),
                quantity: self.cantidad,
                color: self.color,
                engraving_text: self.grabado_texto,
                engraving_surcharge: self.costo_grabado,
            },
        )
    }
}

/// Add To Cart Handler
///
/// Merges into an identical line when one exists; the requested quantity
/// plus everything already in the cart must fit within the product's stock.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::OK, description = "Line added, new cart total"),
        (status_code = StatusCode::BAD_REQUEST, description = "Insufficient stock or invalid payload"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let (customer, item) = json.into_inner().into_parts();

    let mutation = state
        .app
        .carts
        .add_item(customer, item)
        .await
        .map_err(into_status_error)?;

    Ok(Json(mutation.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tienda_app::domain::carts::{
        CartsServiceError, MockCartsService,
        models::{CartId, CartMutation},
    };

    use crate::test_helpers::carts_service;

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/add").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_merges_and_returns_total() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|customer, item| {
                *customer == CustomerId::from_i64(1)
                    && *item
                        == NewCartItem {
                            product: ProductId::from_i64(7),
                            quantity: 2,
                            color: None,
                            engraving_text: Some("Feliz cumple".to_owned()),
                            engraving_surcharge: 200,
                        }
            })
            .return_once(|_, _| {
                Ok(CartMutation {
                    cart: CartId::from_i64(10),
                    total: 2400,
                })
            });

        let mut res = TestClient::post("http://example.com/cart/add")
            .json(&json!({
                "clienteId": 1,
                "productoId": 7,
                "cantidad": 2,
                "grabado_texto": "Feliz cumple",
                "costo_grabado": 200,
            }))
            .send(&make_service(carts))
            .await;

        let body: CartMutationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.ok, "expected ok response");
        assert_eq!(body.carrito_id, 10);
        assert_eq!(body.precio_total, 2400);

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_is_400() {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().once().return_once(|_, _| {
            Err(CartsServiceError::InsufficientStock {
                name: "Mate Imperial".to_owned(),
                stock: 5,
                in_cart: 4,
                requested: 3,
            })
        });

        let res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "clienteId": 1, "productoId": 7, "cantidad": 3 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_unknown_product_is_404() {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ProductNotFound));

        let res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "clienteId": 1, "productoId": 999 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_missing_required_fields_is_400() {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "productoId": 7 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
