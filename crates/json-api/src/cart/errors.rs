//! Errors

use salvo::http::StatusError;
use tracing::error;

use tienda_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        insufficient @ CartsServiceError::InsufficientStock { .. } => {
            StatusError::bad_request().brief(insufficient.to_string())
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::EngravingTooLong => {
            StatusError::bad_request().brief("Engraving text is too long")
        }
        CartsServiceError::LineNotFound => StatusError::not_found().brief("Cart line not found"),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart payload"),
        CartsServiceError::Sql(source) => {
            error!("cart operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
