//! Shared cart response shapes.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use tienda_app::domain::carts::models::{CartItemView, CartMutation};

/// Result of any cart mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartMutationResponse {
    pub ok: bool,
    #[serde(rename = "carritoId")]
    pub carrito_id: i64,
    pub precio_total: u64,
}

impl From<CartMutation> for CartMutationResponse {
    fn from(mutation: CartMutation) -> Self {
        Self {
            ok: true,
            carrito_id: mutation.cart.into_i64(),
            precio_total: mutation.total,
        }
    }
}

/// One cart line with its product's name and live stock.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub id: i64,
    pub cantidad: u32,
    pub precio_unitario: u64,
    pub grabado_texto: Option<String>,
    pub costo_grabado: u64,
    pub color: Option<String>,
    pub producto_id: i64,
    pub nombre: String,
    pub stock: i64,
}

impl From<CartItemView> for CartItemResponse {
    fn from(item: CartItemView) -> Self {
        Self {
            id: item.id.into_i64(),
            cantidad: item.quantity,
            precio_unitario: item.unit_price,
            grabado_texto: item.engraving_text,
            costo_grabado: item.engraving_surcharge,
            color: item.color,
            producto_id: item.product.into_i64(),
            nombre: item.name,
            stock: item.stock,
        }
    }
}
