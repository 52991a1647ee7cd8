//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`; these
//! wrappers mirror their serialised shape for the generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with the resource's state.
    #[schema(rename = "conflict")]
    Conflict,
    /// The body is not JSON.
    #[schema(rename = "unsupported_media_type")]
    UnsupportedMediaType,
    /// The database is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "Invalid Order: missing customer_id")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::OrderStatus`].
#[derive(ToSchema)]
#[schema(as = OrderStatus)]
pub enum OrderStatusSchema {
    #[schema(rename = "PLACED")]
    Placed,
    #[schema(rename = "PAID")]
    Paid,
    #[schema(rename = "SHIPPED")]
    Shipped,
    #[schema(rename = "DELIVERED")]
    Delivered,
    #[schema(rename = "CANCELLED")]
    Cancelled,
}

/// OpenAPI schema for [`crate::domain::ItemPayload`].
#[derive(ToSchema)]
#[schema(as = Item)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ItemSchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = 7)]
    order_id: i32,
    #[schema(example = 42)]
    product_id: i32,
    #[schema(example = 2)]
    quantity: i32,
    #[schema(example = 9.99)]
    price: f64,
}

/// OpenAPI schema for [`crate::domain::OrderPayload`].
#[derive(ToSchema)]
#[schema(as = Order)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct OrderSchema {
    #[schema(example = 7)]
    id: i32,
    #[schema(example = 4352)]
    customer_id: i32,
    #[schema(example = 8193)]
    tracking_id: Option<i32>,
    /// ISO 8601 timestamp without offset, in UTC.
    #[schema(example = "2022-01-01T00:00:00")]
    created_time: String,
    status: OrderStatusSchema,
    order_items: Vec<ItemSchema>,
}

/// Accepted body for creating or replacing an item.
#[derive(ToSchema)]
#[schema(as = ItemInput)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ItemInputSchema {
    /// Must equal the order in the path.
    order_id: i32,
    product_id: i32,
    quantity: i32,
    price: f64,
}

/// Accepted body for creating or replacing an order.
#[derive(ToSchema)]
#[schema(as = OrderInput)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct OrderInputSchema {
    /// Required.
    customer_id: i32,
    tracking_id: Option<i32>,
    /// Naive ISO 8601 or RFC 3339; defaults to the insert time.
    created_time: Option<String>,
    /// Defaults to `PLACED`.
    status: Option<OrderStatusSchema>,
    /// Replaces the item set on update when present.
    order_items: Option<Vec<ItemInputSchema>>,
}
