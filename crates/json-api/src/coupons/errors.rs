//! Errors

use salvo::http::StatusError;
use tracing::error;

use tienda_app::domain::coupons::CouponsServiceError;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::NotFound => {
            StatusError::not_found().brief("Coupon invalid or expired")
        }
        CouponsServiceError::AlreadyUsed => {
            StatusError::bad_request().brief("Coupon already used by this customer")
        }
        CouponsServiceError::Sql(source) => {
            error!("coupon validation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
