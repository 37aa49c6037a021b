//! Settlement side effects.
//!
//! Runs at most once per order, gated by the payment-status
//! compare-and-set in the service: decrement stock, record coupon usage,
//! roll the spent cart over, and hand off the confirmation email.

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    catalog::CatalogClient,
    database::Db,
    domain::{
        CustomerId,
        coupons::models::CouponId,
        customers::PgCustomersRepository,
        orders::{
            errors::OrdersServiceError,
            models::{Order, OrderLineView},
            service::PgOrdersService,
        },
    },
    notifications::{
        Notifier, NotifyError,
        models::{EmailItem, PurchaseEmail},
    },
};

use std::sync::Arc;

#[derive(Debug, Error)]
enum NotificationError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

impl PgOrdersService {
    /// Apply the irreversible side effects of an approved payment.
    ///
    /// Eligibility was validated when the order was assembled; the
    /// decrements here trust those snapshots and do not re-check stock.
    pub(crate) async fn settle(
        &self,
        order: &Order,
        lines: &[OrderLineView],
        coupon: Option<CouponId>,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        for line in lines {
            self.products
                .decrement_stock(&mut tx, line.product, line.quantity)
                .await?;
        }

        self.carts.close(&mut tx, order.cart).await?;
        self.carts.insert_active(&mut tx, order.customer).await?;

        tx.commit().await?;

        // Never roll an approved payment back over the ledger: a replayed
        // insert is a constraint-level no-op, anything else is logged and
        // swallowed.
        if let Some(coupon) = coupon {
            match self
                .coupons
                .record_usage(self.db.pool(), order.customer, coupon, order.id)
                .await
            {
                Ok(0) => debug!(order = %order.id, %coupon, "coupon usage already recorded"),
                Ok(_) => {}
                Err(error) => {
                    warn!(order = %order.id, %coupon, %error, "failed to record coupon usage");
                }
            }
        }

        self.spawn_purchase_notification(order, lines);

        Ok(())
    }

    /// Fire-and-forget: the task owns everything it needs and its outcome
    /// can only ever reach the logs.
    fn spawn_purchase_notification(&self, order: &Order, lines: &[OrderLineView]) {
        let db = self.db.clone();
        let customers = self.customers.clone();
        let catalog = self.catalog.clone();
        let notifier = Arc::clone(&self.notifier);
        let order_id = order.id.into_i64();
        let customer = order.customer;
        let total = order.total;
        let lines = lines.to_vec();

        drop(tokio::spawn(async move {
            let outcome = notify_purchase(
                &db,
                &customers,
                &catalog,
                notifier.as_ref(),
                order_id,
                customer,
                total,
                lines,
            )
            .await;

            if let Err(error) = outcome {
                warn!(order = order_id, %error, "purchase confirmation not sent");
            }
        }));
    }
}

#[expect(
    clippy::too_many_arguments,
    reason = "free function body of the detached notification task"
)]
async fn notify_purchase(
    db: &Db,
    customers: &PgCustomersRepository,
    catalog: &CatalogClient,
    notifier: &dyn Notifier,
    order_id: i64,
    customer: CustomerId,
    total: u64,
    lines: Vec<OrderLineView>,
) -> Result<(), NotificationError> {
    let Some(to) = customers.find_email(db.pool(), customer).await? else {
        debug!(order = order_id, %customer, "no email on file, skipping confirmation");
        return Ok(());
    };

    let mut items = Vec::with_capacity(lines.len());

    for line in lines {
        // Image enrichment is best-effort by construction.
        let image_url = catalog.image_url(line.product).await;

        items.push(EmailItem {
            name: line.name,
            quantity: line.quantity,
            unit_price: line.unit_price,
            engraving_surcharge: line.engraving_surcharge,
            engraving_text: line.engraving_text,
            image_url,
        });
    }

    notifier
        .send_purchase_confirmation(&PurchaseEmail {
            to,
            order_id,
            items,
            total,
        })
        .await?;

    Ok(())
}
