//! Remove Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use tienda_app::domain::carts::models::CartLineId;

use crate::{
    cart::{errors::into_status_error, responses::CartMutationResponse},
    extensions::*,
    state::State,
};

/// Remove Line Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Line from Cart",
    responses(
        (status_code = StatusCode::OK, description = "Line removed, new cart total"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let mutation = state
        .app
        .carts
        .remove_item(CartLineId::from_i64(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(mutation.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tienda_app::domain::carts::{
        CartsServiceError, MockCartsService,
        models::{CartId, CartMutation},
    };

    use crate::test_helpers::carts_service;

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/remove/{id}").delete(handler))
    }

    #[tokio::test]
    async fn test_remove_line_returns_new_total() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(|line| *line == CartLineId::from_i64(5))
            .return_once(|_| {
                Ok(CartMutation {
                    cart: CartId::from_i64(10),
                    total: 0,
                })
            });

        let mut res = TestClient::delete("http://example.com/cart/remove/5")
            .send(&make_service(carts))
            .await;

        let body: CartMutationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.precio_total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_line_is_404() {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_| Err(CartsServiceError::LineNotFound));

        let res = TestClient::delete("http://example.com/cart/remove/99")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
