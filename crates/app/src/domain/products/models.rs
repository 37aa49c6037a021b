//! Product Models

use crate::ids::TypedId;

/// Typed id for [`Product`].
pub type ProductId = TypedId<Product>;

/// The slice of a product the pipeline cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Current list price in minor units.
    pub price: u64,
    /// Authoritative stock count; only ever read and decremented here.
    pub stock: i64,
}
