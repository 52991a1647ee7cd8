//! Tests for the item handlers.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::inbound::http::test_utils::order_app;
use crate::test_support::InMemoryOrderStore;

#[fixture]
fn store() -> Arc<InMemoryOrderStore> {
    Arc::new(InMemoryOrderStore::new())
}

async fn seed_orders(store: &InMemoryOrderStore) {
    use crate::domain::ports::OrderRepository;
    use crate::domain::{OrderDraft, OrderStatus};

    for customer_id in [4352, 9000] {
        OrderRepository::create(
            store,
            &OrderDraft {
                customer_id,
                tracking_id: None,
                created_time: None,
                status: OrderStatus::Placed,
                order_items: None,
            },
        )
        .await
        .expect("seed order");
    }
}

fn item_body(order_id: i32) -> Value {
    json!({ "order_id": order_id, "product_id": 42, "quantity": 3, "price": 9.99 })
}

async fn status_of(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    request: actix_test::TestRequest,
) -> StatusCode {
    actix_test::call_service(app, request.to_request())
        .await
        .status()
}

#[rstest]
#[actix_web::test]
async fn add_item_returns_created_with_location(store: Arc<InMemoryOrderStore>) {
    seed_orders(&store).await;
    let app = actix_test::init_service(order_app(store)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/orders/1/items")
            .set_json(item_body(1))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(location.as_deref(), Some("/orders/1/items/1"));
    assert_eq!(body["product_id"], 42);
    assert_eq!(body["price"], 9.99);
}

#[rstest]
#[case(item_body(2), StatusCode::BAD_REQUEST)]
#[case(json!({ "order_id": 1, "product_id": 42, "quantity": 3 }), StatusCode::BAD_REQUEST)]
#[case(
    json!({ "order_id": 1, "product_id": "x", "quantity": 3, "price": 1.0 }),
    StatusCode::BAD_REQUEST
)]
#[actix_web::test]
async fn add_item_rejects_invalid_bodies(
    store: Arc<InMemoryOrderStore>,
    #[case] body: Value,
    #[case] expected: StatusCode,
) {
    seed_orders(&store).await;
    let app = actix_test::init_service(order_app(store)).await;
    let request = actix_test::TestRequest::post()
        .uri("/orders/1/items")
        .set_json(body);
    assert_eq!(status_of(&app, request).await, expected);
}

#[rstest]
#[actix_web::test]
async fn add_item_to_missing_order_is_not_found(store: Arc<InMemoryOrderStore>) {
    let app = actix_test::init_service(order_app(store)).await;
    let request = actix_test::TestRequest::post()
        .uri("/orders/7/items")
        .set_json(item_body(7));
    assert_eq!(status_of(&app, request).await, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn items_are_only_reachable_through_their_order(store: Arc<InMemoryOrderStore>) {
    seed_orders(&store).await;
    let app = actix_test::init_service(order_app(store.clone())).await;
    let created = actix_test::TestRequest::post()
        .uri("/orders/1/items")
        .set_json(item_body(1));
    assert_eq!(status_of(&app, created).await, StatusCode::CREATED);

    let own = actix_test::TestRequest::get().uri("/orders/1/items/1");
    let foreign = actix_test::TestRequest::get().uri("/orders/2/items/1");
    assert_eq!(status_of(&app, own).await, StatusCode::OK);
    assert_eq!(status_of(&app, foreign).await, StatusCode::NOT_FOUND);

    let foreign_delete = actix_test::TestRequest::delete().uri("/orders/2/items/1");
    assert_eq!(status_of(&app, foreign_delete).await, StatusCode::NO_CONTENT);
    assert_eq!(store.item_count(), 1);
}

#[rstest]
#[actix_web::test]
async fn update_item_replaces_fields(store: Arc<InMemoryOrderStore>) {
    seed_orders(&store).await;
    let app = actix_test::init_service(order_app(store)).await;
    let created = actix_test::TestRequest::post()
        .uri("/orders/1/items")
        .set_json(item_body(1));
    assert_eq!(status_of(&app, created).await, StatusCode::CREATED);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/orders/1/items/1")
            .set_json(json!({ "order_id": 1, "product_id": 43, "quantity": 1, "price": 5 }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["product_id"], 43);
    assert_eq!(body["quantity"], 1);
    assert_eq!(body["price"], 5.0);
}

#[rstest]
#[actix_web::test]
async fn list_items_of_missing_order_is_not_found(store: Arc<InMemoryOrderStore>) {
    let app = actix_test::init_service(order_app(store)).await;
    let request = actix_test::TestRequest::get().uri("/orders/3/items");
    assert_eq!(status_of(&app, request).await, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn delete_item_then_list_is_empty(store: Arc<InMemoryOrderStore>) {
    seed_orders(&store).await;
    let app = actix_test::init_service(order_app(store)).await;
    let created = actix_test::TestRequest::post()
        .uri("/orders/1/items")
        .set_json(item_body(1));
    assert_eq!(status_of(&app, created).await, StatusCode::CREATED);

    let delete = actix_test::TestRequest::delete().uri("/orders/1/items/1");
    assert_eq!(status_of(&app, delete).await, StatusCode::NO_CONTENT);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/orders/1/items")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Value> = actix_test::read_body_json(response).await;
    assert!(body.is_empty());
}
