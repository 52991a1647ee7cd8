//! Driving port for order and item mutations.
//!
//! Inbound adapters hand over the raw JSON body; validation and
//! deserialisation happen in the domain so every adapter reports the same
//! messages.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, ItemPayload, OrderPayload};

/// Driving port for order and item mutations.
///
/// Item operations are scoped by the owning order: an item addressed
/// through an order it does not belong to is reported as not found.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrdersCommand: Send + Sync {
    /// Validate `body` and store it as a new order with its items.
    async fn create_order(&self, body: Value) -> Result<OrderPayload, Error>;

    /// Replace the scalar fields of an order, and its items when `body`
    /// carries `order_items`.
    async fn update_order(&self, order_id: i32, body: Value) -> Result<OrderPayload, Error>;

    /// Move an order to `CANCELLED`.
    ///
    /// Orders that have shipped or been delivered yield a conflict.
    async fn cancel_order(&self, order_id: i32) -> Result<OrderPayload, Error>;

    /// Delete an order and its items. Missing orders are ignored.
    async fn delete_order(&self, order_id: i32) -> Result<(), Error>;

    /// Validate `body` and store it as a new item of `order_id`.
    async fn add_item(&self, order_id: i32, body: Value) -> Result<ItemPayload, Error>;

    /// Replace product, quantity and price of an item.
    async fn update_item(
        &self,
        order_id: i32,
        item_id: i32,
        body: Value,
    ) -> Result<ItemPayload, Error>;

    /// Delete an item of `order_id`. Missing items are ignored.
    async fn delete_item(&self, order_id: i32, item_id: i32) -> Result<(), Error>;
}
