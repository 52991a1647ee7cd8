//! Port for line item persistence.

use async_trait::async_trait;

use crate::domain::{Item, ItemDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by item repository adapters.
    pub enum ItemRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "item repository query failed: {message}",
        /// The item to modify no longer exists.
        Missing { item_id: i32 } =>
            "item {item_id} does not exist",
        /// The owning order does not exist.
        MissingOrder { order_id: i32 } =>
            "order {order_id} does not exist",
    }
}

/// Storage for individual line items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert an item under `draft.order_id`.
    ///
    /// Fails with [`ItemRepositoryError::MissingOrder`] when that order does
    /// not exist.
    async fn create(&self, draft: &ItemDraft) -> Result<Item, ItemRepositoryError>;

    /// Overwrite product, quantity and price of a stored item.
    async fn update(&self, item: &Item) -> Result<Item, ItemRepositoryError>;

    /// Remove an item; removing a missing item succeeds.
    async fn delete(&self, item_id: i32) -> Result<(), ItemRepositoryError>;

    /// Every item, ordered by id.
    async fn all(&self) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Look up one item.
    async fn find(&self, item_id: i32) -> Result<Option<Item>, ItemRepositoryError>;

    /// Items owned by `order_id`, ordered by id.
    async fn list_for_order(&self, order_id: i32) -> Result<Vec<Item>, ItemRepositoryError>;
}
