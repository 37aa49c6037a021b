//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use tienda_app::{
    context::AppContext,
    domain::{
        carts::MockCartsService, coupons::MockCouponsService, orders::MockOrdersService,
    },
};

use crate::state::State;

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear().never();

    carts
}

fn strict_coupons_mock() -> MockCouponsService {
    let mut coupons = MockCouponsService::new();

    coupons.expect_validate().never();

    coupons
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_get_order().never();
    orders.expect_process_payment_event().never();

    orders
}

fn make_state(
    carts: MockCartsService,
    coupons: MockCouponsService,
    orders: MockOrdersService,
) -> Arc<State> {
    Arc::new(State::new(AppContext {
        carts: Arc::new(carts),
        coupons: Arc::new(coupons),
        orders: Arc::new(orders),
    }))
}

fn make_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    make_service(
        make_state(carts, strict_coupons_mock(), strict_orders_mock()),
        route,
    )
}

pub(crate) fn coupons_service(coupons: MockCouponsService, route: Router) -> Service {
    make_service(
        make_state(strict_carts_mock(), coupons, strict_orders_mock()),
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    make_service(
        make_state(strict_carts_mock(), strict_coupons_mock(), orders),
        route,
    )
}
