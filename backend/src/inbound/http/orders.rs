//! Order HTTP handlers.
//!
//! ```text
//! GET    /orders
//! POST   /orders
//! GET    /orders/{order_id}
//! PUT    /orders/{order_id}
//! DELETE /orders/{order_id}
//! PUT    /orders/{order_id}/cancel
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::IntoParams;

use crate::domain::ports::OrderFilter;
use crate::domain::{Error, OrderPayload, OrderStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, OrderInputSchema, OrderSchema};
use crate::inbound::http::state::HttpState;

/// Query string accepted by `GET /orders`.
///
/// At most one filter applies; when several are given the first present in
/// the order `customer_id`, `status`, `product_id` wins.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrdersQuery {
    /// Only orders placed by this customer.
    pub customer_id: Option<i32>,
    /// Only orders in this status, e.g. `PAID`.
    pub status: Option<String>,
    /// Only orders containing an item for this product.
    pub product_id: Option<i32>,
}

impl ListOrdersQuery {
    /// Resolve the query into a single repository filter.
    pub fn into_filter(self) -> Result<OrderFilter, Error> {
        if let Some(customer_id) = self.customer_id {
            return Ok(OrderFilter::Customer(customer_id));
        }
        if let Some(status) = self.status {
            let status: OrderStatus = status.parse().map_err(|err| {
                Error::invalid_request(format!("Invalid Order: {err}")).with_details(json!({
                    "field": "status",
                    "code": "unknown_status",
                }))
            })?;
            return Ok(OrderFilter::Status(status));
        }
        Ok(self
            .product_id
            .map_or(OrderFilter::All, OrderFilter::Product))
    }
}

pub(crate) fn order_location(order_id: i32) -> String {
    format!("/orders/{order_id}")
}

/// List orders, optionally filtered.
#[utoipa::path(
    get,
    path = "/orders",
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "Matching orders", body = [OrderSchema]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    query: web::Query<ListOrdersQuery>,
) -> ApiResult<web::Json<Vec<OrderPayload>>> {
    let filter = query.into_inner().into_filter()?;
    let orders = state.orders_query.list_orders(filter).await?;
    Ok(web::Json(orders))
}

/// Create an order together with any nested items.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderInputSchema,
    responses(
        (
            status = 201,
            description = "Order created",
            headers(("Location" = String, description = "URL of the new order")),
            body = OrderSchema
        ),
        (status = 400, description = "Invalid order", body = ErrorSchema),
        (status = 415, description = "Body is not JSON", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let order = state.orders.create_order(payload.into_inner()).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, order_location(order.id)))
        .json(order))
}

/// Fetch one order with its items.
#[utoipa::path(
    get,
    path = "/orders/{order_id}",
    params(("order_id" = i32, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "The order", body = OrderSchema),
        (status = 404, description = "No such order", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{order_id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<OrderPayload>> {
    let order = state.orders_query.get_order(path.into_inner()).await?;
    Ok(web::Json(order))
}

/// Replace an order's fields, and its items when `order_items` is given.
#[utoipa::path(
    put,
    path = "/orders/{order_id}",
    params(("order_id" = i32, Path, description = "Order identifier")),
    request_body = OrderInputSchema,
    responses(
        (status = 200, description = "Updated order", body = OrderSchema),
        (status = 400, description = "Invalid order", body = ErrorSchema),
        (status = 404, description = "No such order", body = ErrorSchema),
        (status = 415, description = "Body is not JSON", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "updateOrder"
)]
#[put("/orders/{order_id}")]
pub async fn update_order(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<OrderPayload>> {
    let order = state
        .orders
        .update_order(path.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(order))
}

/// Delete an order and its items. Deleting an absent order succeeds.
#[utoipa::path(
    delete,
    path = "/orders/{order_id}",
    params(("order_id" = i32, Path, description = "Order identifier")),
    responses(
        (status = 204, description = "Order removed"),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "deleteOrder"
)]
#[delete("/orders/{order_id}")]
pub async fn delete_order(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.orders.delete_order(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Cancel an order that has not shipped yet.
#[utoipa::path(
    put,
    path = "/orders/{order_id}/cancel",
    params(("order_id" = i32, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Cancelled order", body = OrderSchema),
        (status = 404, description = "No such order", body = ErrorSchema),
        (status = 409, description = "Order already shipped or delivered", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "cancelOrder"
)]
#[put("/orders/{order_id}/cancel")]
pub async fn cancel_order(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<OrderPayload>> {
    let order = state.orders.cancel_order(path.into_inner()).await?;
    Ok(web::Json(order))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
