//! Errors

use salvo::http::StatusError;
use tracing::error;

use tienda_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("The cart is empty"),
        OrdersServiceError::NoEligibleItems => {
            StatusError::bad_request().brief("No items with sufficient stock to continue")
        }
        OrdersServiceError::AddressNotFound => StatusError::not_found().brief("Address not found"),
        OrdersServiceError::OrderNotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Pricing(source) => {
            error!("pricing failed: {source}");

            StatusError::bad_request().brief("Could not price the cart")
        }
        OrdersServiceError::PaymentGateway(source) => {
            error!("payment processor call failed: {source}");

            StatusError::internal_server_error().brief("Could not start checkout")
        }
        OrdersServiceError::Sql(source) => {
            error!("checkout storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
