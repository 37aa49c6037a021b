//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tienda_app::domain::CustomerId;

use crate::{
    cart::{errors::into_status_error, responses::CartItemResponse},
    extensions::*,
    state::State,
};

/// Active Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    #[serde(rename = "carritoId")]
    pub carrito_id: i64,
    pub precio_total: u64,
    pub items: Vec<CartItemResponse>,
}

/// Get Cart Handler
///
/// Returns the customer's active cart, creating an empty one when absent.
#[endpoint(
    tags("cart"),
    summary = "Get Active Cart",
    responses(
        (status_code = StatusCode::OK, description = "Active cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing clienteId"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cliente_id: i64 = req
        .query("clienteId")
        .ok_or_else(|| StatusError::bad_request().brief("clienteId is required"))?;

    let view = state
        .app
        .carts
        .get_cart(CustomerId::from_i64(cliente_id))
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse {
        carrito_id: view.cart.into_i64(),
        precio_total: view.total,
        items: view.items.into_iter().map(CartItemResponse::from).collect(),
    }))
}
