//! Port for order persistence.
//!
//! [`OrderRepository`] is the storage contract for the order aggregate.
//! Adapters load orders together with their items and keep the two in step
//! on every write.

use async_trait::async_trait;

use crate::domain::{ItemDraft, Order, OrderDraft, OrderStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "order repository query failed: {message}",
        /// The order to modify no longer exists.
        Missing { order_id: i32 } =>
            "order {order_id} does not exist",
    }
}

/// Storage for orders and the items they own.
///
/// Every returned [`Order`] carries its complete item list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order and any items in the draft.
    ///
    /// The store assigns the order id and writes it into every item's
    /// `order_id`. A draft without `created_time` is stamped with the
    /// current time.
    async fn create(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError>;

    /// Overwrite the stored scalar fields with those of `order`.
    ///
    /// Items are left untouched. Fails with
    /// [`OrderRepositoryError::Missing`] when the row is gone.
    async fn update(&self, order: &Order) -> Result<Order, OrderRepositoryError>;

    /// Overwrite the scalar fields of `order` and replace all of its items
    /// with fresh rows built from `items`, as one atomic write.
    ///
    /// The drafts' `order_id` values are ignored in favour of `order.id()`.
    /// Fails with [`OrderRepositoryError::Missing`] when the row is gone, in
    /// which case nothing is written.
    async fn update_with_items(
        &self,
        order: &Order,
        items: &[ItemDraft],
    ) -> Result<Order, OrderRepositoryError>;

    /// Remove an order and, through the cascade, its items.
    ///
    /// Deleting an order that does not exist succeeds.
    async fn delete(&self, order_id: i32) -> Result<(), OrderRepositoryError>;

    /// Every order, ordered by id.
    async fn all(&self) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Look up one order.
    async fn find(&self, order_id: i32) -> Result<Option<Order>, OrderRepositoryError>;

    /// Orders placed by `customer_id`.
    async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Orders currently in `status`.
    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Orders with at least one item for `product_id`, each listed once.
    async fn find_by_item(&self, product_id: i32) -> Result<Vec<Order>, OrderRepositoryError>;
}
