//! Payment preference assembly.

use rust_decimal::Decimal;
use tienda::Quote;

use crate::{
    domain::{
        CustomerId,
        carts::models::CartItemView,
        coupons::models::Coupon,
        orders::models::{CheckoutPolicy, OrderId},
    },
    payments::models::{
        BackUrls, CURRENCY_ID, PaymentMetadata, PreferenceItem, PreferenceRequest,
    },
};

/// Line item the processor shows for shipping.
const SHIPPING_TITLE: &str = "Costo de Envío";

/// Build the processor preference for an assembled order.
///
/// The coupon is applied multiplicatively on each unit price (the processor
/// has no subtotal-level discount field), and shipping rides along as a
/// synthetic one-unit item when it is charged at all.
pub(crate) fn build_preference(
    order: OrderId,
    customer: CustomerId,
    coupon: Option<&Coupon>,
    eligible: &[CartItemView],
    quote: &Quote,
    policy: &CheckoutPolicy,
) -> PreferenceRequest {
    let factor = coupon.map_or(Decimal::ONE, |coupon| {
        Decimal::ONE - coupon.percentage / Decimal::ONE_HUNDRED
    });

    let mut items: Vec<PreferenceItem> = eligible
        .iter()
        .map(|item| {
            let unit =
                Decimal::from(item.unit_price.saturating_add(item.engraving_surcharge)) * factor;

            PreferenceItem {
                title: item.name.clone(),
                quantity: item.quantity,
                unit_price: unit,
                currency_id: CURRENCY_ID.to_owned(),
            }
        })
        .collect();

    if quote.shipping > 0 {
        items.push(PreferenceItem {
            title: SHIPPING_TITLE.to_owned(),
            quantity: 1,
            unit_price: Decimal::from(quote.shipping),
            currency_id: CURRENCY_ID.to_owned(),
        });
    }

    PreferenceRequest {
        items,
        metadata: PaymentMetadata {
            cliente_id: Some(customer.into_i64()),
            cupon_id: coupon.map(|coupon| coupon.id.into_i64()),
        },
        back_urls: BackUrls {
            success: format!("{}/checkout/success", policy.frontend_url),
            failure: format!("{}/checkout/failure", policy.frontend_url),
            pending: format!("{}/checkout/pending", policy.frontend_url),
        },
        auto_return: "approved".to_owned(),
        external_reference: order.to_string(),
        notification_url: format!("{}/checkout/webhook", policy.backend_url),
    }
}

#[cfg(test)]
mod tests {
    use tienda::ShippingPolicy;

    use crate::domain::{carts::models::CartLineId, coupons::models::CouponId,
        products::models::ProductId};

    use super::*;

    fn policy() -> CheckoutPolicy {
        CheckoutPolicy {
            shipping: ShippingPolicy {
                free_shipping_threshold: 150_000,
                flat_cost: 10_000,
            },
            frontend_url: "https://tienda.example".to_owned(),
            backend_url: "https://api.tienda.example".to_owned(),
        }
    }

    fn item(unit_price: u64, engraving_surcharge: u64, quantity: u32) -> CartItemView {
        CartItemView {
            id: CartLineId::from_i64(1),
            product: ProductId::from_i64(7),
            name: "Mate Imperial".to_owned(),
            stock: 10,
            quantity,
            unit_price,
            engraving_text: None,
            engraving_surcharge,
            color: None,
        }
    }

    #[expect(clippy::unwrap_used, reason = "test fixture amounts cannot overflow")]
    fn quote(items: &[CartItemView], coupon: Option<&Coupon>) -> Quote {
        let lines: Vec<_> = items.iter().map(CartItemView::priced).collect();

        Quote::price(
            &lines,
            coupon.map(|coupon| coupon.percentage),
            &policy().shipping,
        )
        .unwrap()
    }

    fn coupon(percentage: i64) -> Coupon {
        Coupon {
            id: CouponId::from_i64(3),
            code: "DESCUENTO".to_owned(),
            percentage: Decimal::from(percentage),
            active: true,
        }
    }

    #[test]
    fn discount_is_applied_per_unit() {
        let items = [item(1000, 200, 2)];
        let coupon = coupon(10);
        let quote = quote(&items, Some(&coupon));

        let preference = build_preference(
            OrderId::from_i64(42),
            CustomerId::from_i64(1),
            Some(&coupon),
            &items,
            &quote,
            &policy(),
        );

        let first = preference.items.first().map(|item| item.unit_price);

        // (1000 + 200) × 0.9
        assert_eq!(first, Some(Decimal::from(1080)));
    }

    #[test]
    fn shipping_rides_along_as_a_synthetic_item() {
        let items = [item(1000, 0, 1)];
        let quote = quote(&items, None);

        let preference = build_preference(
            OrderId::from_i64(42),
            CustomerId::from_i64(1),
            None,
            &items,
            &quote,
            &policy(),
        );

        assert_eq!(preference.items.len(), 2);

        let shipping = preference.items.last();

        assert_eq!(
            shipping.map(|item| item.unit_price),
            Some(Decimal::from(10_000))
        );
        assert_eq!(shipping.map(|item| item.quantity), Some(1));
    }

    #[test]
    fn free_shipping_adds_no_synthetic_item() {
        let items = [item(200_000, 0, 1)];
        let quote = quote(&items, None);

        let preference = build_preference(
            OrderId::from_i64(42),
            CustomerId::from_i64(1),
            None,
            &items,
            &quote,
            &policy(),
        );

        assert_eq!(preference.items.len(), 1);
    }

    #[test]
    fn order_and_customer_are_threaded_through() {
        let items = [item(1000, 0, 1)];
        let coupon = coupon(10);
        let quote = quote(&items, Some(&coupon));

        let preference = build_preference(
            OrderId::from_i64(42),
            CustomerId::from_i64(9),
            Some(&coupon),
            &items,
            &quote,
            &policy(),
        );

        assert_eq!(preference.external_reference, "42");
        assert_eq!(preference.metadata.cliente_id, Some(9));
        assert_eq!(preference.metadata.cupon_id, Some(3));
        assert_eq!(
            preference.notification_url,
            "https://api.tienda.example/checkout/webhook"
        );
        assert_eq!(preference.auto_return, "approved");
    }
}
