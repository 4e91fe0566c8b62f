//! HTTP service tests against a mock backend
//!
//! Each test checks the method, path and body a service sends and how it
//! interprets the envelope that comes back.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use orderdesk_api::{
    ApiConfig, CreateOrder, CreateProduct, HttpOrdersApi, HttpProductsApi, Money, OrderId,
    OrderLine, OrderStatus, OrdersApi, ProductId, ProductsApi, Transport, UpdateOrderItems,
    UpdateOrderStatus, UpdateProduct,
};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer) -> Transport {
    let config = ApiConfig::new(&server.uri(), Duration::from_secs(2)).unwrap();
    Transport::new(&config).unwrap()
}

fn envelope(status: u16, data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "status": status,
        "data": data,
    }))
}

fn summary_json(id: &str, number: &str, status: &str) -> Value {
    json!({
        "id": id,
        "orderNumber": number,
        "date": "2024-05-01T10:00:00.000Z",
        "status": status,
        "productCount": 1,
        "finalPrice": 21.0,
    })
}

fn detail_json(id: &str, number: &str, status: &str) -> Value {
    let mut detail = summary_json(id, number, status);
    detail["items"] = json!([{
        "productId": "p-1",
        "productName": "Widget",
        "quantity": 2,
        "priceAtOrder": 10.5,
        "totalPrice": 21.0,
    }]);
    detail
}

#[tokio::test]
async fn list_orders_decodes_summaries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(envelope(
            200,
            json!([
                summary_json("o-1", "A-1", "PENDING"),
                summary_json("o-2", "A-2", "COMPLETED"),
            ]),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let orders = HttpOrdersApi::new(transport(&server)).list().await.unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1].status, OrderStatus::Completed);
    assert_eq!(orders[0].final_price, Money::from_cents(2100));
}

#[tokio::test]
async fn get_order_returns_none_on_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "status": 404,
            "data": { "message": "Order not found" },
        })))
        .mount(&server)
        .await;

    let order = HttpOrdersApi::new(transport(&server))
        .get(OrderId::new("missing"))
        .await;

    assert!(order.is_none());
}

#[tokio::test]
async fn create_order_posts_minimal_payload_and_requires_201() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_json(json!({
            "orderNumber": "A-9",
            "items": [{ "productId": "p-1", "quantity": 2 }],
        })))
        .respond_with(envelope(201, detail_json("o-9", "A-9", "PENDING")))
        .expect(1)
        .mount(&server)
        .await;

    let created = HttpOrdersApi::new(transport(&server))
        .create(CreateOrder {
            order_number: "A-9".to_string(),
            items: vec![OrderLine {
                product_id: ProductId::new("p-1"),
                quantity: 2,
            }],
        })
        .await
        .unwrap();

    assert_eq!(created.id(), &OrderId::new("o-9"));
    assert_eq!(created.items.len(), 1);
}

#[tokio::test]
async fn create_order_with_status_200_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(envelope(200, detail_json("o-9", "A-9", "PENDING")))
        .mount(&server)
        .await;

    let created = HttpOrdersApi::new(transport(&server))
        .create(CreateOrder {
            order_number: "A-9".to_string(),
            items: Vec::new(),
        })
        .await;

    assert!(created.is_none());
}

#[tokio::test]
async fn update_items_patches_data_path() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/orders/data/o-1"))
        .and(body_json(json!({ "items": [{ "productId": "p-1", "quantity": 5 }] })))
        .respond_with(envelope(200, detail_json("o-1", "A-1", "PENDING")))
        .expect(1)
        .mount(&server)
        .await;

    let updated = HttpOrdersApi::new(transport(&server))
        .update_items(
            OrderId::new("o-1"),
            UpdateOrderItems {
                order_number: None,
                items: Some(vec![OrderLine {
                    product_id: ProductId::new("p-1"),
                    quantity: 5,
                }]),
            },
        )
        .await;

    assert!(updated.is_some());
}

#[tokio::test]
async fn update_status_patches_status_path() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/orders/status/o-1"))
        .and(body_json(json!({ "status": "IN_PROGRESS" })))
        .respond_with(envelope(200, detail_json("o-1", "A-1", "IN_PROGRESS")))
        .expect(1)
        .mount(&server)
        .await;

    let updated = HttpOrdersApi::new(transport(&server))
        .update_status(
            OrderId::new("o-1"),
            UpdateOrderStatus {
                status: OrderStatus::InProgress,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.summary.status, OrderStatus::InProgress);
}

#[tokio::test]
async fn delete_order_reports_outcome_as_bool() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/orders/o-1"))
        .respond_with(envelope(200, json!({ "message": "deleted" })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/orders/o-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "status": 409,
            "data": { "message": "Order in progress" },
        })))
        .mount(&server)
        .await;

    let api = HttpOrdersApi::new(transport(&server));

    assert!(api.delete(OrderId::new("o-1")).await);
    assert!(!api.delete(OrderId::new("o-2")).await);
}

#[tokio::test]
async fn malformed_payload_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(envelope(200, json!({ "unexpected": true })))
        .mount(&server)
        .await;

    assert!(HttpOrdersApi::new(transport(&server)).list().await.is_none());
}

#[tokio::test]
async fn unreachable_backend_is_a_failure() {
    let server = MockServer::start().await;
    let transport = transport(&server);
    drop(server);

    assert!(HttpOrdersApi::new(transport.clone()).list().await.is_none());
    assert!(!HttpProductsApi::new(transport).delete(ProductId::new("p-1")).await);
}

#[tokio::test]
async fn product_crud_uses_product_paths() {
    let server = MockServer::start().await;
    let product = json!({ "id": "p-1", "name": "Widget", "unitPrice": 10.5 });

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(envelope(200, json!([product.clone()])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/p-1"))
        .respond_with(envelope(200, product.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(json!({ "name": "Widget", "unitPrice": 10.5 })))
        .respond_with(envelope(201, product.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/products/p-1"))
        .and(body_json(json!({ "name": "Gadget" })))
        .respond_with(envelope(
            200,
            json!({ "id": "p-1", "name": "Gadget", "unitPrice": 10.5 }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpProductsApi::new(transport(&server));

    let listed = api.list().await.unwrap();
    assert_eq!(listed[0].unit_price, Money::from_cents(1050));

    let fetched = api.get(ProductId::new("p-1")).await.unwrap();
    assert_eq!(fetched.name, "Widget");

    let created = api
        .create(CreateProduct {
            name: "Widget".to_string(),
            unit_price: Money::from_cents(1050),
        })
        .await
        .unwrap();
    assert_eq!(created.id, ProductId::new("p-1"));

    let updated = api
        .update(
            ProductId::new("p-1"),
            UpdateProduct {
                name: Some("Gadget".to_string()),
                unit_price: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Gadget");
}
