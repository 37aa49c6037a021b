//! App Router

use salvo::Router;

use crate::{cart, checkout, coupons, orders};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("cart")
                .get(cart::get::handler)
                .push(Router::with_path("add").post(cart::add::handler))
                .push(Router::with_path("update/{id}").put(cart::update::handler))
                .push(Router::with_path("remove/{id}").delete(cart::remove::handler))
                .push(Router::with_path("clear").delete(cart::clear::handler)),
        )
        .push(
            Router::with_path("checkout")
                .push(Router::with_path("create").post(checkout::create::handler))
                .push(Router::with_path("webhook").post(checkout::webhook::handler)),
        )
        .push(Router::with_path("coupons/validate").post(coupons::validate::handler))
        .push(Router::with_path("orders/{id}").get(orders::get::handler))
}
