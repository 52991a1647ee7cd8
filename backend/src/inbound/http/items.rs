//! Item HTTP handlers, always addressed through their order.
//!
//! ```text
//! GET    /orders/{order_id}/items
//! POST   /orders/{order_id}/items
//! GET    /orders/{order_id}/items/{item_id}
//! PUT    /orders/{order_id}/items/{item_id}
//! DELETE /orders/{order_id}/items/{item_id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use crate::domain::ItemPayload;
use crate::inbound::http::ApiResult;
use crate::inbound::http::orders::order_location;
use crate::inbound::http::schemas::{ErrorSchema, ItemInputSchema, ItemSchema};
use crate::inbound::http::state::HttpState;

fn item_location(order_id: i32, item_id: i32) -> String {
    format!("{}/items/{item_id}", order_location(order_id))
}

/// List the items of an order.
#[utoipa::path(
    get,
    path = "/orders/{order_id}/items",
    params(("order_id" = i32, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Items of the order", body = [ItemSchema]),
        (status = 404, description = "No such order", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/orders/{order_id}/items")]
pub async fn list_items(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<ItemPayload>>> {
    let items = state.orders_query.list_items(path.into_inner()).await?;
    Ok(web::Json(items))
}

/// Add an item to an order. The body's `order_id` must match the path.
#[utoipa::path(
    post,
    path = "/orders/{order_id}/items",
    params(("order_id" = i32, Path, description = "Order identifier")),
    request_body = ItemInputSchema,
    responses(
        (
            status = 201,
            description = "Item created",
            headers(("Location" = String, description = "URL of the new item")),
            body = ItemSchema
        ),
        (status = 400, description = "Invalid item", body = ErrorSchema),
        (status = 404, description = "No such order", body = ErrorSchema),
        (status = 415, description = "Body is not JSON", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "addItem"
)]
#[post("/orders/{order_id}/items")]
pub async fn add_item(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let order_id = path.into_inner();
    let item = state.orders.add_item(order_id, payload.into_inner()).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, item_location(order_id, item.id)))
        .json(item))
}

/// Fetch one item of an order.
#[utoipa::path(
    get,
    path = "/orders/{order_id}/items/{item_id}",
    params(
        ("order_id" = i32, Path, description = "Order identifier"),
        ("item_id" = i32, Path, description = "Item identifier")
    ),
    responses(
        (status = 200, description = "The item", body = ItemSchema),
        (status = 404, description = "No such item on this order", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "getItem"
)]
#[get("/orders/{order_id}/items/{item_id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    path: web::Path<(i32, i32)>,
) -> ApiResult<web::Json<ItemPayload>> {
    let (order_id, item_id) = path.into_inner();
    let item = state.orders_query.get_item(order_id, item_id).await?;
    Ok(web::Json(item))
}

/// Replace an item's fields.
#[utoipa::path(
    put,
    path = "/orders/{order_id}/items/{item_id}",
    params(
        ("order_id" = i32, Path, description = "Order identifier"),
        ("item_id" = i32, Path, description = "Item identifier")
    ),
    request_body = ItemInputSchema,
    responses(
        (status = 200, description = "Updated item", body = ItemSchema),
        (status = 400, description = "Invalid item", body = ErrorSchema),
        (status = 404, description = "No such item on this order", body = ErrorSchema),
        (status = 415, description = "Body is not JSON", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "updateItem"
)]
#[put("/orders/{order_id}/items/{item_id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    path: web::Path<(i32, i32)>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<ItemPayload>> {
    let (order_id, item_id) = path.into_inner();
    let item = state
        .orders
        .update_item(order_id, item_id, payload.into_inner())
        .await?;
    Ok(web::Json(item))
}

/// Remove an item from an order. Removing an absent item succeeds.
#[utoipa::path(
    delete,
    path = "/orders/{order_id}/items/{item_id}",
    params(
        ("order_id" = i32, Path, description = "Order identifier"),
        ("item_id" = i32, Path, description = "Item identifier")
    ),
    responses(
        (status = 204, description = "Item removed"),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "deleteItem"
)]
#[delete("/orders/{order_id}/items/{item_id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    path: web::Path<(i32, i32)>,
) -> ApiResult<HttpResponse> {
    let (order_id, item_id) = path.into_inner();
    state.orders.delete_item(order_id, item_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
