//! Addresses

pub mod models;
mod repository;

pub(crate) use repository::PgAddressesRepository;
