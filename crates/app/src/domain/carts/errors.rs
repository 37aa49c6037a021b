//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::carts::models::MAX_ENGRAVING_LEN;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error(
        "not enough stock of \"{name}\": {stock} available, {in_cart} already in the cart, {requested} requested"
    )]
    InsufficientStock {
        name: String,
        stock: i64,
        in_cart: u64,
        requested: u64,
    },

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("engraving text is longer than {MAX_ENGRAVING_LEN} characters")]
    EngravingTooLong,

    #[error("cart line not found")]
    LineNotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::LineNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_line_not_found() {
        let error = CartsServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, CartsServiceError::LineNotFound),
            "expected LineNotFound, got {error:?}"
        );
    }

    #[test]
    fn insufficient_stock_message_names_the_product() {
        let error = CartsServiceError::InsufficientStock {
            name: "Mate Imperial".to_owned(),
            stock: 5,
            in_cart: 4,
            requested: 3,
        };

        let message = error.to_string();

        assert!(message.contains("Mate Imperial"), "got {message}");
        assert!(message.contains('5'), "got {message}");
    }
}
