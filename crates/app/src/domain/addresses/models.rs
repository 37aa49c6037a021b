//! Address Models

use crate::{domain::CustomerId, ids::TypedId};

/// Typed id for [`Address`].
pub type AddressId = TypedId<Address>;

/// A saved shipping address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub customer: CustomerId,
    pub street: String,
    pub number: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
    pub phone: Option<String>,
}

/// An address supplied inline at checkout, deduplicated before insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub street: String,
    pub number: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
    pub phone: Option<String>,
}
