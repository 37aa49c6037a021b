//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        CustomerId,
        carts::{
            errors::CartsServiceError,
            models::{
                CartLineId, CartMutation, CartView, MAX_ENGRAVING_LEN, NewCartItem,
            },
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts: PgCartsRepository,
    items: PgCartItemsRepository,
    products: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            items: PgCartItemsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, customer: CustomerId) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts.get_or_create_active(&mut tx, customer).await?;
        let items = self.items.get_cart_items(&mut tx, cart.id).await?;

        tx.commit().await?;

        Ok(CartView {
            cart: cart.id,
            total: cart.total,
            items,
        })
    }

    async fn add_item(
        &self,
        customer: CustomerId,
        item: NewCartItem,
    ) -> Result<CartMutation, CartsServiceError> {
        if item.quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        if item
            .engraving_text
            .as_ref()
            .is_some_and(|text| text.chars().count() > MAX_ENGRAVING_LEN)
        {
            return Err(CartsServiceError::EngravingTooLong);
        }

        let mut tx = self.db.begin().await?;

        let product = self
            .products
            .get_product(&mut tx, item.product)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let cart = self.carts.get_or_create_active(&mut tx, customer).await?;

        // Ceiling is global per product, not per line: the same product split
        // across colors or engravings still competes for the same stock.
        let in_cart = self
            .items
            .sum_product_quantity(&mut tx, cart.id, item.product)
            .await?;

        let requested = u64::from(item.quantity);

        if in_cart + requested > u64::try_from(product.stock).unwrap_or(0) {
            return Err(CartsServiceError::InsufficientStock {
                name: product.name,
                stock: product.stock,
                in_cart,
                requested,
            });
        }

        match self.items.find_matching(&mut tx, cart.id, &item).await? {
            Some(line) => {
                self.items
                    .increment_quantity(&mut tx, line.id, item.quantity)
                    .await?;
            }
            None => {
                self.items
                    .insert(&mut tx, cart.id, &item, product.price)
                    .await?;
            }
        }

        let total = self.carts.recompute_total(&mut tx, cart.id).await?;

        tx.commit().await?;

        Ok(CartMutation {
            cart: cart.id,
            total,
        })
    }

    async fn update_quantity(
        &self,
        line: CartLineId,
        quantity: u32,
    ) -> Result<CartMutation, CartsServiceError> {
        if quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let line = self
            .items
            .get_line(&mut tx, line)
            .await?
            .ok_or(CartsServiceError::LineNotFound)?;

        self.items.set_quantity(&mut tx, line.id, quantity).await?;

        let total = self.carts.recompute_total(&mut tx, line.cart).await?;

        tx.commit().await?;

        Ok(CartMutation {
            cart: line.cart,
            total,
        })
    }

    async fn remove_item(&self, line: CartLineId) -> Result<CartMutation, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let line = self
            .items
            .get_line(&mut tx, line)
            .await?
            .ok_or(CartsServiceError::LineNotFound)?;

        self.items.delete(&mut tx, line.id).await?;

        let total = self.carts.recompute_total(&mut tx, line.cart).await?;

        tx.commit().await?;

        Ok(CartMutation {
            cart: line.cart,
            total,
        })
    }

    async fn clear(&self, customer: CustomerId) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts.get_or_create_active(&mut tx, customer).await?;

        self.items.delete_all(&mut tx, cart.id).await?;
        self.carts.recompute_total(&mut tx, cart.id).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The customer's active cart with its items, created when absent.
    async fn get_cart(&self, customer: CustomerId) -> Result<CartView, CartsServiceError>;

    /// Add a line, merging into an identical one, under the global
    /// per-product stock ceiling.
    async fn add_item(
        &self,
        customer: CustomerId,
        item: NewCartItem,
    ) -> Result<CartMutation, CartsServiceError>;

    /// Overwrite a line's quantity. Stock is not re-checked here; checkout
    /// filters by stock again.
    async fn update_quantity(
        &self,
        line: CartLineId,
        quantity: u32,
    ) -> Result<CartMutation, CartsServiceError>;

    /// Delete a line.
    async fn remove_item(&self, line: CartLineId) -> Result<CartMutation, CartsServiceError>;

    /// Delete every line of the active cart and zero its total.
    async fn clear(&self, customer: CustomerId) -> Result<(), CartsServiceError>;
}
