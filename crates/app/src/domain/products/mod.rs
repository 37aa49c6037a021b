//! Products
//!
//! The catalog itself is owned by the external CMS and its sync jobs; the
//! checkout pipeline only reads price/stock/name and decrements stock at
//! settlement.

pub mod models;
mod repository;

pub(crate) use repository::PgProductsRepository;
