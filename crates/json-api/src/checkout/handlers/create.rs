//! Create Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tienda_app::domain::{
    CustomerId,
    addresses::models::{AddressId, NewAddress},
    coupons::models::CouponId,
    orders::models::{AddressRef, CheckoutRequest},
};

use crate::{checkout::errors::into_status_error, extensions::*, state::State};

/// Inline shipping address.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NewAddressRequest {
    pub calle: String,
    pub numero: String,
    pub ciudad: String,
    pub provincia: String,
    pub pais: String,
    pub codigo_postal: String,
    #[serde(default)]
    pub telefono: Option<String>,
}

impl From<NewAddressRequest> for NewAddress {
    fn from(request: NewAddressRequest) -> Self {
        NewAddress {
            street: request.calle,
            number: request.numero,
            city: request.ciudad,
            province: request.provincia,
            country: request.pais,
            postal_code: request.codigo_postal,
            phone: request.telefono,
        }
    }
}

/// Create Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCheckoutRequest {
    #[serde(rename = "clienteId")]
    pub cliente_id: i64,
    #[serde(rename = "cuponId", default)]
    pub cupon_id: Option<i64>,
    #[serde(rename = "domicilioId", default)]
    pub domicilio_id: Option<i64>,
    #[serde(rename = "nuevaDireccion", default)]
    pub nueva_direccion: Option<NewAddressRequest>,
    #[serde(rename = "esDemo", default)]
    pub es_demo: bool,
}

/// Checkout Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutCreatedResponse {
    pub ok: bool,
    #[serde(rename = "orderId")]
    pub order_id: i64,
    /// Where to redirect the customer: the processor's checkout page, or
    /// the local success page for demo orders.
    pub init_point: String,
}

/// Create Checkout Handler
///
/// Assembles the active cart into a pending order and hands the customer
/// to the payment processor; demo checkouts settle immediately.
#[endpoint(
    tags("checkout"),
    summary = "Create Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Checkout started"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart, no eligible items, or missing address"),
        (status_code = StatusCode::NOT_FOUND, description = "Address not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Could not start checkout"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<CheckoutCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let address = match (request.domicilio_id, request.nueva_direccion) {
        (Some(id), _) => AddressRef::Saved(AddressId::from_i64(id)),
        (None, Some(new)) => AddressRef::New(new.into()),
        (None, None) => {
            return Err(
                StatusError::bad_request().brief("domicilioId or nuevaDireccion is required")
            );
        }
    };

    let created = state
        .app
        .orders
        .create_order(CheckoutRequest {
            customer: CustomerId::from_i64(request.cliente_id),
            coupon: request.cupon_id.map(CouponId::from_i64),
            address,
            demo: request.es_demo,
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(CheckoutCreatedResponse {
        ok: true,
        order_id: created.order.into_i64(),
        init_point: created.init_point,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tienda_app::domain::orders::{
        MockOrdersService, OrdersServiceError,
        models::{CheckoutCreated, OrderId},
    };

    use crate::test_helpers::orders_service;

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("checkout/create").post(handler))
    }

    #[tokio::test]
    async fn test_checkout_with_saved_address() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(|request| {
                request.customer == CustomerId::from_i64(1)
                    && request.coupon == Some(CouponId::from_i64(3))
                    && request.address == AddressRef::Saved(AddressId::from_i64(8))
                    && !request.demo
            })
            .return_once(|_| {
                Ok(CheckoutCreated {
                    order: OrderId::from_i64(42),
                    init_point: "https://pay.example/pref/1".to_owned(),
                })
            });

        let mut res = TestClient::post("http://example.com/checkout/create")
            .json(&json!({ "clienteId": 1, "cuponId": 3, "domicilioId": 8 }))
            .send(&make_service(orders))
            .await;

        let body: CheckoutCreatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.ok, "expected ok response");
        assert_eq!(body.order_id, 42);
        assert_eq!(body.init_point, "https://pay.example/pref/1");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_with_new_address_in_demo_mode() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(|request| {
                request.demo
                    && matches!(
                        &request.address,
                        AddressRef::New(address) if address.street == "Av. Siempreviva"
                    )
            })
            .return_once(|_| {
                Ok(CheckoutCreated {
                    order: OrderId::from_i64(43),
                    init_point: "http://localhost:5173/checkout/success?orderId=43".to_owned(),
                })
            });

        let res = TestClient::post("http://example.com/checkout/create")
            .json(&json!({
                "clienteId": 1,
                "esDemo": true,
                "nuevaDireccion": {
                    "calle": "Av. Siempreviva",
                    "numero": "742",
                    "ciudad": "Springfield",
                    "provincia": "Buenos Aires",
                    "pais": "Argentina",
                    "codigo_postal": "1414",
                },
            }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_address_is_400_without_service_call() {
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().never();

        let res = TestClient::post("http://example.com/checkout/create")
            .json(&json!({ "clienteId": 1 }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_empty_cart_is_400() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::EmptyCart));

        let res = TestClient::post("http://example.com/checkout/create")
            .json(&json!({ "clienteId": 1, "domicilioId": 8 }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_gateway_failure_is_500() {
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().once().return_once(|_| {
            Err(OrdersServiceError::PaymentGateway(
                tienda_app::payments::GatewayError::Status {
                    status: 401,
                    body: "invalid token".to_owned(),
                },
            ))
        });

        let res = TestClient::post("http://example.com/checkout/create")
            .json(&json!({ "clienteId": 1, "domicilioId": 8 }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
