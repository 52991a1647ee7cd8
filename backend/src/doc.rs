//! OpenAPI documentation for the order REST API.
//!
//! [`ApiDoc`] registers every handler in the inbound HTTP layer together
//! with the schema wrappers from [`crate::inbound::http::schemas`]. The
//! document backs Swagger UI in debug builds and is printed by the
//! `openapi-dump` binary.

use crate::inbound::http::index::ServiceInfo;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, ItemInputSchema, ItemSchema, OrderInputSchema, OrderSchema,
    OrderStatusSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order REST API Service",
        description = "Create, query, update and cancel customer orders and their line items."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::index::index,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::update_order,
        crate::inbound::http::orders::delete_order,
        crate::inbound::http::orders::cancel_order,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::add_item,
        crate::inbound::http::items::get_item,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::delete_item,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ServiceInfo,
        OrderSchema,
        ItemSchema,
        OrderInputSchema,
        ItemInputSchema,
        OrderStatusSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "service", description = "Service metadata"),
        (name = "orders", description = "Orders and their lifecycle"),
        (name = "items", description = "Line items of an order"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
