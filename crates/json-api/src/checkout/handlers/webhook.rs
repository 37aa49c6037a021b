//! Payment Webhook Handler
//!
//! Processor callbacks are acknowledged with 200 for every business-level
//! outcome, including events we ignore; only an unexpected internal fault
//! returns 500 so the processor retries.

use std::sync::Arc;

use salvo::prelude::*;
use serde_json::Value;
use tracing::error;

use crate::state::State;

fn value_as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Payment Webhook Handler
#[handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let topic = req
        .query::<String>("topic")
        .or_else(|| req.query::<String>("type"));

    let mut payment_id = req
        .query::<String>("id")
        .or_else(|| req.query::<String>("data.id"));

    if payment_id.is_none() {
        payment_id = req
            .parse_json::<Value>()
            .await
            .ok()
            .as_ref()
            .and_then(|body| body.pointer("/data/id"))
            .and_then(value_as_id);
    }

    // Not a payment event, or no id to look up: acknowledge so the
    // processor does not retry a message we will never care about.
    let (Some("payment"), Some(payment_id)) = (topic.as_deref(), payment_id) else {
        res.status_code(StatusCode::OK);
        return;
    };

    let Ok(state) = depot.obtain::<Arc<State>>() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    match state.app.orders.process_payment_event(&payment_id).await {
        Ok(()) => {
            res.status_code(StatusCode::OK);
        }
        Err(error) => {
            error!(payment = %payment_id, "webhook processing failed: {error}");

            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use tienda_app::domain::orders::{MockOrdersService, OrdersServiceError};
    use tienda_app::payments::GatewayError;

    use crate::test_helpers::orders_service;

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("checkout/webhook").post(handler))
    }

    #[tokio::test]
    async fn test_payment_topic_is_processed_and_acknowledged() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_process_payment_event()
            .once()
            .withf(|payment| payment == "123")
            .return_once(|_| Ok(()));

        let res = TestClient::post("http://example.com/checkout/webhook?topic=payment&id=123")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_non_payment_topic_is_acknowledged_without_processing() {
        let mut orders = MockOrdersService::new();

        orders.expect_process_payment_event().never();

        let res =
            TestClient::post("http://example.com/checkout/webhook?topic=merchant_order&id=123")
                .send(&make_service(orders))
                .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_missing_payment_id_is_acknowledged_without_processing() {
        let mut orders = MockOrdersService::new();

        orders.expect_process_payment_event().never();

        let res = TestClient::post("http://example.com/checkout/webhook?topic=payment")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_payment_id_falls_back_to_the_body() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_process_payment_event()
            .once()
            .withf(|payment| payment == "456")
            .return_once(|_| Ok(()));

        let res = TestClient::post("http://example.com/checkout/webhook?type=payment")
            .json(&serde_json::json!({ "data": { "id": 456 } }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_replayed_webhook_is_acknowledged() {
        // Idempotent replay: the service reports success for an
        // already-settled order and the processor must not retry.
        let mut orders = MockOrdersService::new();

        orders
            .expect_process_payment_event()
            .times(2)
            .returning(|_| Ok(()));

        let service = make_service(orders);

        for _ in 0..2 {
            let res = TestClient::post("http://example.com/checkout/webhook?topic=payment&id=123")
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::OK));
        }
    }

    #[tokio::test]
    async fn test_internal_fault_requests_a_retry() {
        let mut orders = MockOrdersService::new();

        orders.expect_process_payment_event().once().return_once(|_| {
            Err(OrdersServiceError::PaymentGateway(GatewayError::Status {
                status: 500,
                body: "unavailable".to_owned(),
            }))
        });

        let res = TestClient::post("http://example.com/checkout/webhook?topic=payment&id=123")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
