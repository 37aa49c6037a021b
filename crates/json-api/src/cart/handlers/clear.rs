//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tienda_app::domain::CustomerId;

use crate::{cart::errors::into_status_error, extensions::*, state::State};

/// Cart Cleared Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartClearedResponse {
    pub ok: bool,
}

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Active Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart emptied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing clienteId"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartClearedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cliente_id: i64 = req
        .query("clienteId")
        .ok_or_else(|| StatusError::bad_request().brief("clienteId is required"))?;

    state
        .app
        .carts
        .clear(CustomerId::from_i64(cliente_id))
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartClearedResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tienda_app::domain::carts::MockCartsService;

    use crate::test_helpers::carts_service;

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/clear").delete(handler))
    }

    #[tokio::test]
    async fn test_clear_empties_the_cart() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear()
            .once()
            .withf(|customer| *customer == CustomerId::from_i64(1))
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete("http://example.com/cart/clear?clienteId=1")
            .send(&make_service(carts))
            .await;

        let body: CartClearedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.ok, "expected ok response");

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_without_cliente_id_is_400() {
        let mut carts = MockCartsService::new();

        carts.expect_clear().never();

        let res = TestClient::delete("http://example.com/cart/clear")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
