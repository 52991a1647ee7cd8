//! Driving port for order and item reads.

use async_trait::async_trait;

use crate::domain::{Error, ItemPayload, OrderPayload, OrderStatus};

/// Selection applied when listing orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderFilter {
    /// Every order.
    #[default]
    All,
    /// Orders placed by a customer.
    Customer(i32),
    /// Orders in a given status.
    Status(OrderStatus),
    /// Orders containing at least one item for a product.
    Product(i32),
}

/// Driving port for order and item reads.
///
/// # Examples
///
/// ```rust,no_run
/// use order_service::domain::ports::{OrderFilter, OrdersQuery};
///
/// async fn customer_total(query: &dyn OrdersQuery, customer_id: i32) -> usize {
///     query
///         .list_orders(OrderFilter::Customer(customer_id))
///         .await
///         .map(|orders| orders.len())
///         .unwrap_or_default()
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrdersQuery: Send + Sync {
    /// Fetch one order with its items.
    async fn get_order(&self, order_id: i32) -> Result<OrderPayload, Error>;

    /// List orders matching `filter`.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderPayload>, Error>;

    /// Fetch one item of `order_id`.
    async fn get_item(&self, order_id: i32, item_id: i32) -> Result<ItemPayload, Error>;

    /// List the items of `order_id`.
    async fn list_items(&self, order_id: i32) -> Result<Vec<ItemPayload>, Error>;
}
