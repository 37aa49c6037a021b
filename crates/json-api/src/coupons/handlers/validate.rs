//! Validate Coupon Handler

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tienda_app::domain::CustomerId;

use crate::{coupons::errors::into_status_error, extensions::*, state::State};

/// Validate Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateCouponRequest {
    pub codigo: String,
    #[serde(rename = "clienteId")]
    pub cliente_id: i64,
}

/// Validated Coupon Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    pub ok: bool,
    pub id: i64,
    pub codigo: String,
    pub porcentaje: f64,
}

/// Validate Coupon Handler
///
/// Side-effect free: usage is recorded only when an order settles, so a
/// validated coupon stays usable until then.
#[endpoint(
    tags("coupons"),
    summary = "Validate Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Coupon is active and unused"),
        (status_code = StatusCode::BAD_REQUEST, description = "Coupon already used"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon invalid or expired"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidateCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let coupon = state
        .app
        .coupons
        .validate(&request.codigo, CustomerId::from_i64(request.cliente_id))
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponResponse {
        ok: true,
        id: coupon.id.into_i64(),
        codigo: coupon.code,
        porcentaje: coupon.percentage.to_f64().unwrap_or_default(),
    }))
}
