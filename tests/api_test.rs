//! HTTP tests for the order routes, run against the in-memory store.

use std::sync::Arc;

use actix_web::http::header::ContentType;
use actix_web::{http::StatusCode, test, web, App};
use order_pricing_service::application::order_service::OrderService;
use order_pricing_service::configure;
use order_pricing_service::domain::ports::OrderStore;
use order_pricing_service::handlers::orders::OrderResponse;
use order_pricing_service::infrastructure::memory_store::InMemoryOrderStore;
use serde_json::{json, Value};

fn service_data() -> web::Data<order_pricing_service::SharedOrderService> {
    let store: Arc<dyn OrderStore> = Arc::new(InMemoryOrderStore::new());
    web::Data::new(OrderService::new(store))
}

/// `line_items` identical lines, each with `quantity` units at `price`.
fn order_body(customer_id: i64, line_items: i64, quantity: i32, price: Value) -> Value {
    let items: Vec<Value> = (1..=line_items)
        .map(|id| {
            json!({
                "product": { "id": id, "price": price.clone() },
                "quantity": quantity
            })
        })
        .collect();
    json!({
        "customer": { "id": customer_id, "name": "Katherine Johnson", "email": "kj@example.com" },
        "order_items": items
    })
}

macro_rules! app {
    ($data:expr) => {
        test::init_service(App::new().app_data($data.clone()).configure(configure)).await
    };
}

#[actix_web::test]
async fn create_order_applies_discount_rule() {
    let data = service_data();
    let app = app!(data);

    // (line items, quantity of each, price of each, expected total)
    let cases = [
        (3, 2, json!(1.5), "8.10"),
        (1, 1, json!(24.99), "24.99"),
        (1, 1, json!(25), "22.50"),
        (1, 1, json!(25.01), "22.509"),
        (3, 4, json!(8), "86.40"),
        (1, 1, json!(30), "27.00"),
        (1, 4, json!("8"), "28.80"),
    ];

    for (line_items, quantity, price, expected_total) in cases {
        let body = order_body(1, line_items, quantity, price.clone());
        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED, "price {price}");

        let order: OrderResponse = test::read_body_json(resp).await;
        assert_eq!(order.total, expected_total, "price {price}");
        assert_eq!(order.order_items.len(), line_items as usize);
        assert!(order.order_items.iter().all(|i| i.quantity == quantity));
    }
}

#[actix_web::test]
async fn created_order_round_trips_through_get() {
    let data = service_data();
    let app = app!(data);

    let body = json!({
        "customer": { "id": 77, "name": "Margaret Hamilton", "email": "mh@example.com" },
        "order_items": [
            { "product": { "id": 5, "price": "2.25" }, "quantity": 1 },
            { "product": { "id": 3, "price": "10" }, "quantity": 2 }
        ],
        "total": "0.01"
    });
    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(&body)
        .to_request();
    let created: OrderResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(created.customer.id, 77);
    assert_eq!(created.customer.name, "Margaret Hamilton");
    assert_eq!(created.order_items[0].product.id, 5);
    assert_eq!(created.order_items[0].product.price, "2.25");
    assert_eq!(created.order_items[1].product.id, 3);
    assert_eq!(created.order_items[1].quantity, 2);
    assert_eq!(created.total, "22.25");

    let req = test::TestRequest::get()
        .uri(&format!("/orders/{}", created.id))
        .to_request();
    let fetched: OrderResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn get_unknown_order_returns_404() {
    let data = service_data();
    let app = app!(data);

    let req = test::TestRequest::get().uri("/orders/12345").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Order 12345 not found");
}

#[actix_web::test]
async fn customer_orders_are_listed() {
    let data = service_data();
    let app = app!(data);

    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(order_body(12345, 1, 1, json!("3")))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }
    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(order_body(1, 1, 1, json!("3")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/orders/customer/12345")
        .to_request();
    let orders: Vec<OrderResponse> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(orders.len(), 5);
    assert!(orders.iter().all(|o| o.customer.id == 12345));
}

#[actix_web::test]
async fn unknown_customer_has_no_orders() {
    let data = service_data();
    let app = app!(data);

    let req = test::TestRequest::get().uri("/orders/customer/404").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let orders: Vec<OrderResponse> = test::read_body_json(resp).await;
    assert!(orders.is_empty());
}

#[actix_web::test]
async fn invalid_orders_are_rejected_and_not_stored() {
    let data = service_data();
    let app = app!(data);

    let invalid = [
        json!({ "customer": { "id": 9 }, "order_items": [] }),
        order_body(9, 1, 0, json!("5")),
        order_body(9, 1, 1, json!("-1")),
        order_body(9, 1, 1, json!("abc")),
        json!({
            "customer": { "id": 9 },
            "order_items": [{ "product": { "id": 0, "price": "5" }, "quantity": 1 }]
        }),
        json!({ "customer": { "id": 9 } }),
    ];

    for body in invalid {
        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {body}");
        let err: Value = test::read_body_json(resp).await;
        assert!(err["error"].is_string(), "body {body}");
    }

    let req = test::TestRequest::get().uri("/orders/customer/9").to_request();
    let orders: Vec<OrderResponse> = test::call_and_read_body_json(&app, req).await;
    assert!(orders.is_empty());
}

#[actix_web::test]
async fn openapi_document_lists_order_routes() {
    let data = service_data();
    let app = app!(data);

    let req = test::TestRequest::get()
        .uri("/api-docs/openapi.json")
        .to_request();
    let doc: Value = test::call_and_read_body_json(&app, req).await;

    assert!(doc["paths"]["/orders"].is_object());
    assert!(doc["paths"]["/orders/{id}"].is_object());
    assert!(doc["paths"]["/orders/customer/{customer_id}"].is_object());
}

#[actix_web::test]
async fn number_price_just_below_threshold_is_not_discounted() {
    let data = service_data();
    let app = app!(data);

    let req = test::TestRequest::post()
        .uri("/orders")
        .insert_header(ContentType::json())
        .set_payload(
            r#"{
                "customer": { "id": 3, "name": "Dorothy Vaughan", "email": "dv@example.com" },
                "order_items": [
                    { "product": { "id": 1, "price": 24.9999999999999999 }, "quantity": 1 }
                ]
            }"#,
        )
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let order: OrderResponse = test::read_body_json(resp).await;
    assert_eq!(order.order_items[0].product.price, "24.9999999999999999");
    assert_eq!(order.total, "24.9999999999999999");
}

#[actix_web::test]
async fn tiny_prices_round_trip_in_plain_notation() {
    let data = service_data();
    let app = app!(data);

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(order_body(4, 1, 1, json!("0.0000001")))
        .to_request();
    let created: OrderResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(created.order_items[0].product.price, "0.0000001");
    assert_eq!(created.total, "0.0000001");

    let req = test::TestRequest::get()
        .uri(&format!("/orders/{}", created.id))
        .to_request();
    let fetched: OrderResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn versioned_routes_share_the_same_orders() {
    let data = service_data();
    let app = app!(data);

    let req = test::TestRequest::post()
        .uri("/v1/orders")
        .set_json(order_body(12345, 3, 2, json!(1.5)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: OrderResponse = test::read_body_json(resp).await;
    assert_eq!(created.total, "8.10");

    let req = test::TestRequest::get()
        .uri(&format!("/orders/{}", created.id))
        .to_request();
    let fetched: OrderResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::get()
        .uri("/v1/orders/customer/12345")
        .to_request();
    let orders: Vec<OrderResponse> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(orders, vec![created]);
}

#[actix_web::test]
async fn malformed_path_ids_return_json_errors() {
    let data = service_data();
    let app = app!(data);

    for uri in ["/orders/abc", "/v1/orders/customer/xyz"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri {uri}");
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string(), "uri {uri}");
    }
}
