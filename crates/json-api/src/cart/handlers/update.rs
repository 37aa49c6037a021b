//! Update Line Quantity Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tienda_app::domain::carts::models::CartLineId;

use crate::{
    cart::{errors::into_status_error, responses::CartMutationResponse},
    extensions::*,
    state::State,
};

/// Update Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateQuantityRequest {
    pub cantidad: u32,
}

/// Update Line Quantity Handler
#[endpoint(
    tags("cart"),
    summary = "Update Line Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated, new cart total"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity below 1"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let mutation = state
        .app
        .carts
        .update_quantity(CartLineId::from_i64(id.into_inner()), json.cantidad)
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
        carts_service(carts, Router::with_path("cart/update/{id}").put(handler))
    }

    #[tokio::test]
    async fn test_update_quantity_returns_new_total() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .withf(|line, quantity| *line == CartLineId::from_i64(5) && *quantity == 3)
            .return_once(|_, _| {
                Ok(CartMutation {
                    cart: CartId::from_i64(10),
                    total: 3600,
                })
            });

        let mut res = TestClient::put("http://example.com/cart/update/5")
            .json(&json!({ "cantidad": 3 }))
            .send(&make_service(carts))
            .await;

        let body: CartMutationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.precio_total, 3600);

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_quantity_is_400() {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::put("http://example.com/cart/update/5")
            .json(&json!({ "cantidad": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_unknown_line_is_404() {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _| Err(CartsServiceError::LineNotFound));

        let res = TestClient::put("http://example.com/cart/update/99")
            .json(&json!({ "cantidad": 2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
