//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tienda::Quote;
use tracing::warn;

use crate::{
    catalog::CatalogClient,
    database::Db,
    domain::{
        CustomerId,
        addresses::{PgAddressesRepository, models::AddressId},
        carts::{
            PgCartItemsRepository, PgCartsRepository,
            models::CartItemView,
        },
        coupons::{
            PgCouponsRepository,
            models::{Coupon, CouponId},
        },
        customers::PgCustomersRepository,
        orders::{
            errors::OrdersServiceError,
            models::{
                AddressRef, AddressSnapshot, CheckoutCreated, CheckoutPolicy, CheckoutRequest,
                NewOrder, OrderDetail, OrderId, OrderLineView, PaymentStatus,
            },
            preference::build_preference,
            repositories::{PgOrderLinesRepository, PgOrdersRepository},
        },
        products::PgProductsRepository,
    },
    notifications::Notifier,
    payments::PaymentGateway,
};

pub struct PgOrdersService {
    pub(crate) db: Db,
    pub(crate) carts: PgCartsRepository,
    pub(crate) cart_items: PgCartItemsRepository,
    pub(crate) products: PgProductsRepository,
    pub(crate) coupons: PgCouponsRepository,
    pub(crate) addresses: PgAddressesRepository,
    pub(crate) customers: PgCustomersRepository,
    pub(crate) orders: PgOrdersRepository,
    pub(crate) lines: PgOrderLinesRepository,
    pub(crate) gateway: Arc<dyn PaymentGateway>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) catalog: CatalogClient,
    pub(crate) policy: CheckoutPolicy,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(
        db: Db,
        gateway: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn Notifier>,
        catalog: CatalogClient,
        policy: CheckoutPolicy,
    ) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            cart_items: PgCartItemsRepository::new(),
            products: PgProductsRepository::new(),
            coupons: PgCouponsRepository::new(),
            addresses: PgAddressesRepository::new(),
            customers: PgCustomersRepository::new(),
            orders: PgOrdersRepository::new(),
            lines: PgOrderLinesRepository::new(),
            gateway,
            notifier,
            catalog,
            policy,
        }
    }

    /// An invalid or already-used coupon never fails the checkout; the
    /// customer simply pays full price.
    async fn resolve_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponId,
        customer: CustomerId,
    ) -> Result<Option<Coupon>, OrdersServiceError> {
        let Some(coupon) = self.coupons.find_active_by_id(tx, coupon).await? else {
            warn!(%customer, "ignoring unknown or inactive coupon at checkout");
            return Ok(None);
        };

        if self.coupons.usage_exists(tx, customer, coupon.id).await? {
            warn!(%customer, coupon = %coupon.id, "ignoring already-used coupon at checkout");
            return Ok(None);
        }

        Ok(Some(coupon))
    }

    async fn resolve_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerId,
        address: &AddressRef,
    ) -> Result<(AddressSnapshot, Option<AddressId>), OrdersServiceError> {
        let resolved = match address {
            AddressRef::Saved(id) => self
                .addresses
                .get_owned(tx, *id, customer)
                .await?
                .ok_or(OrdersServiceError::AddressNotFound)?,
            AddressRef::New(new) => match self.addresses.find_exact(tx, customer, new).await? {
                Some(existing) => existing,
                None => self.addresses.insert(tx, customer, new).await?,
            },
        };

        Ok((
            AddressSnapshot {
                street_line: format!("{} {}", resolved.street, resolved.number),
                city: resolved.city,
                province: resolved.province,
                country: resolved.country,
                postal_code: resolved.postal_code,
            },
            Some(resolved.id),
        ))
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutCreated, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts
            .get_or_create_active(&mut tx, request.customer)
            .await?;

        let items = self.cart_items.get_cart_items(&mut tx, cart.id).await?;

        if items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        // Best-effort checkout: lines the stock no longer covers drop out
        // of pricing and the order instead of blocking the purchase.
        let (eligible, skipped) = partition_eligible(items);

        if eligible.is_empty() {
            return Err(OrdersServiceError::NoEligibleItems);
        }

        if !skipped.is_empty() {
            warn!(
                customer = %request.customer,
                skipped = skipped.len(),
                "excluding out-of-stock lines from checkout"
            );
        }

        let coupon = match request.coupon {
            Some(coupon) => {
                self.resolve_coupon(&mut tx, coupon, request.customer)
                    .await?
            }
            None => None,
        };

        let priced: Vec<_> = eligible.iter().map(CartItemView::priced).collect();

        let quote = Quote::price(
            &priced,
            coupon.as_ref().map(|coupon| coupon.percentage),
            &self.policy.shipping,
        )?;

        let (shipping, address) = self
            .resolve_address(&mut tx, request.customer, &request.address)
            .await?;

        let payment_status = if request.demo {
            PaymentStatus::Approved
        } else {
            PaymentStatus::Pending
        };

        let order = self
            .orders
            .insert(
                &mut tx,
                &NewOrder {
                    customer: request.customer,
                    cart: cart.id,
                    total: quote.total,
                    payment_status,
                    shipping,
                    address,
                },
            )
            .await?;

        let order_lines: Vec<OrderLineView> = eligible.iter().map(to_order_line).collect();

        for line in &order_lines {
            self.lines.insert(&mut tx, order.id, line).await?;
        }

        tx.commit().await?;

        if request.demo {
            self.settle(&order, &order_lines, coupon.as_ref().map(|coupon| coupon.id))
                .await?;

            return Ok(CheckoutCreated {
                order: order.id,
                init_point: format!(
                    "{}/checkout/success?orderId={}",
                    self.policy.frontend_url, order.id
                ),
            });
        }

        let preference = build_preference(
            order.id,
            request.customer,
            coupon.as_ref(),
            &eligible,
            &quote,
            &self.policy,
        );

        // The pending order stays behind if this fails; reconciliation
        // against the processor never sees it, which is the accepted cost.
        let created = self
            .gateway
            .create_preference(&preference)
            .await
            .map_err(OrdersServiceError::PaymentGateway)?;

        Ok(CheckoutCreated {
            order: order.id,
            init_point: created.init_point,
        })
    }

    async fn get_order(&self, order: OrderId) -> Result<OrderDetail, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .orders
            .find(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::OrderNotFound)?;

        let items = self.lines.get_order_lines(&mut tx, order.id).await?;

        tx.commit().await?;

        Ok(OrderDetail { order, items })
    }

    async fn process_payment_event(&self, payment_id: &str) -> Result<(), OrdersServiceError> {
        // The webhook body is untrusted; the processor's payment record is
        // the authority for status and reference.
        let payment = self
            .gateway
            .get_payment(payment_id)
            .await
            .map_err(OrdersServiceError::PaymentGateway)?;

        let status = PaymentStatus::from_processor(&payment.status);

        let Some(order_id) = payment
            .external_reference
            .as_deref()
            .and_then(|reference| reference.parse::<i64>().ok())
            .map(OrderId::from_i64)
        else {
            warn!(payment = payment_id, "payment without usable external reference");
            return Ok(());
        };

        let mut tx = self.db.begin().await?;

        let Some(order) = self.orders.find(&mut tx, order_id).await? else {
            tx.commit().await?;
            return Ok(());
        };

        if order.payment_status.is_terminal() {
            tx.commit().await?;
            return Ok(());
        }

        let transitioned = self
            .orders
            .transition_payment_status(&mut tx, order_id, status, payment_id)
            .await?;

        tx.commit().await?;

        // Zero rows: a concurrent delivery won the compare-and-set.
        if transitioned == 0 || status != PaymentStatus::Approved {
            return Ok(());
        }

        let mut tx = self.db.begin().await?;
        let lines = self.lines.get_order_lines(&mut tx, order_id).await?;
        tx.commit().await?;

        let coupon = payment.metadata.cupon_id.map(CouponId::from_i64);

        self.settle(&order, &lines, coupon).await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Assemble the customer's active cart into a persisted order and hand
    /// the customer to the payment processor (or settle immediately for
    /// demo checkouts).
    async fn create_order(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutCreated, OrdersServiceError>;

    /// Order header plus its immutable line snapshots.
    async fn get_order(&self, order: OrderId) -> Result<OrderDetail, OrdersServiceError>;

    /// Reconcile one processor payment event into local order state.
    /// Business-level non-matches (unknown order, already settled) return
    /// `Ok` so the caller acknowledges and the processor stops retrying.
    async fn process_payment_event(&self, payment_id: &str) -> Result<(), OrdersServiceError>;
}

/// Split cart lines into those current stock covers and those it does not.
pub(crate) fn partition_eligible(
    items: Vec<CartItemView>,
) -> (Vec<CartItemView>, Vec<CartItemView>) {
    items.into_iter().partition(CartItemView::is_eligible)
}

fn to_order_line(item: &CartItemView) -> OrderLineView {
    OrderLineView {
        product: item.product,
        name: item.name.clone(),
        quantity: item.quantity,
        unit_price: item.unit_price,
        engraving_text: item.engraving_text.clone(),
        engraving_surcharge: item.engraving_surcharge,
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{carts::models::CartLineId, products::models::ProductId};

    use super::*;

    fn item(id: i64, quantity: u32, stock: i64) -> CartItemView {
        CartItemView {
            id: CartLineId::from_i64(id),
            product: ProductId::from_i64(id),
            name: format!("Producto {id}"),
            stock,
            quantity,
            unit_price: 1000,
            engraving_text: None,
            engraving_surcharge: 0,
            color: None,
        }
    }

    #[test]
    fn partition_keeps_covered_lines_and_drops_the_rest() {
        let (eligible, skipped) =
            partition_eligible(vec![item(1, 2, 5), item(2, 1, 0), item(3, 4, 4)]);

        assert_eq!(eligible.len(), 2);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped.first().map(|item| item.product.into_i64()), Some(2));
    }

    #[test]
    fn order_line_snapshot_copies_the_priced_fields() {
        let view = CartItemView {
            engraving_text: Some("Feliz cumple".to_owned()),
            engraving_surcharge: 200,
            ..item(1, 2, 5)
        };

        let line = to_order_line(&view);

        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, 1000);
        assert_eq!(line.engraving_surcharge, 200);
        assert_eq!(line.engraving_text.as_deref(), Some("Feliz cumple"));
    }
}
