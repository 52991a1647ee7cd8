//! Order domain service.
//!
//! Implements the order driving ports over the order and item repositories:
//! input validation, scoping of items by their order, and translation of
//! repository failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::domain::ports::{
    ItemRepository, ItemRepositoryError, OrderFilter, OrderRepository, OrderRepositoryError,
    OrdersCommand, OrdersQuery,
};
use crate::domain::{
    Error, Item, ItemDraft, ItemPayload, Order, OrderDraft, OrderPayload, OrderValidationError,
};

fn order_not_found(order_id: i32) -> Error {
    Error::not_found(format!("Order with id '{order_id}' was not found."))
}

fn item_not_found(item_id: i32) -> Error {
    Error::not_found(format!("Item with id '{item_id}' was not found."))
}

fn map_validation_error(error: OrderValidationError) -> Error {
    let details = json!({
        "field": error.field(),
        "code": error.code(),
    });
    Error::invalid_request(error.to_string()).with_details(details)
}

fn map_order_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("order repository unavailable: {message}"))
        }
        OrderRepositoryError::Query { message } => {
            Error::internal(format!("order repository error: {message}"))
        }
        OrderRepositoryError::Missing { order_id } => order_not_found(order_id),
    }
}

fn map_item_error(error: ItemRepositoryError) -> Error {
    match error {
        ItemRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("item repository unavailable: {message}"))
        }
        ItemRepositoryError::Query { message } => {
            Error::internal(format!("item repository error: {message}"))
        }
        ItemRepositoryError::Missing { item_id } => item_not_found(item_id),
        ItemRepositoryError::MissingOrder { order_id } => order_not_found(order_id),
    }
}

fn ensure_same_order(path_order_id: i32, draft: &ItemDraft) -> Result<(), Error> {
    if draft.order_id == path_order_id {
        return Ok(());
    }
    Err(Error::invalid_request(format!(
        "Invalid Item: order_id {} does not match order {path_order_id}",
        draft.order_id
    ))
    .with_details(json!({
        "field": "order_id",
        "code": "order_mismatch",
    })))
}

/// Order service implementing [`OrdersCommand`] and [`OrdersQuery`].
#[derive(Clone)]
pub struct OrderService<O, I> {
    orders: Arc<O>,
    items: Arc<I>,
}

impl<O, I> OrderService<O, I> {
    /// Create a service over the given repositories.
    pub fn new(orders: Arc<O>, items: Arc<I>) -> Self {
        Self { orders, items }
    }
}

impl<O, I> OrderService<O, I>
where
    O: OrderRepository,
    I: ItemRepository,
{
    async fn load_order(&self, order_id: i32) -> Result<Order, Error> {
        self.orders
            .find(order_id)
            .await
            .map_err(map_order_error)?
            .ok_or_else(|| order_not_found(order_id))
    }

    /// An item reached through an order it does not belong to is treated
    /// as absent.
    async fn find_scoped_item(&self, order_id: i32, item_id: i32) -> Result<Option<Item>, Error> {
        let item = self.items.find(item_id).await.map_err(map_item_error)?;
        Ok(item.filter(|item| item.order_id() == order_id))
    }

    async fn load_item(&self, order_id: i32, item_id: i32) -> Result<Item, Error> {
        self.find_scoped_item(order_id, item_id)
            .await?
            .ok_or_else(|| item_not_found(item_id))
    }
}

#[async_trait]
impl<O, I> OrdersCommand for OrderService<O, I>
where
    O: OrderRepository,
    I: ItemRepository,
{
    async fn create_order(&self, body: Value) -> Result<OrderPayload, Error> {
        let draft = OrderDraft::deserialize(&body).map_err(map_validation_error)?;
        let order = self.orders.create(&draft).await.map_err(map_order_error)?;
        info!(
            order_id = order.id(),
            customer_id = order.customer_id(),
            items = order.order_items().len(),
            "order created"
        );
        Ok(order.serialize())
    }

    async fn update_order(&self, order_id: i32, body: Value) -> Result<OrderPayload, Error> {
        let draft = OrderDraft::deserialize(&body).map_err(map_validation_error)?;
        let mut order = self.load_order(order_id).await?;
        order.apply(&draft);
        let updated = match draft.order_items.as_deref() {
            Some(items) => self.orders.update_with_items(&order, items).await,
            None => self.orders.update(&order).await,
        }
        .map_err(map_order_error)?;
        info!(order_id, status = %updated.status(), "order updated");
        Ok(updated.serialize())
    }

    async fn cancel_order(&self, order_id: i32) -> Result<OrderPayload, Error> {
        let mut order = self.load_order(order_id).await?;
        let previous = order.status();
        if !order.cancel() {
            return Err(Error::conflict(format!(
                "Order with id '{order_id}' has been {} and cannot be cancelled.",
                previous.as_str().to_lowercase()
            ))
            .with_details(json!({ "status": previous })));
        }
        if previous == order.status() {
            debug!(order_id, "order already cancelled");
            return Ok(order.serialize());
        }
        let order = self.orders.update(&order).await.map_err(map_order_error)?;
        info!(order_id, from = %previous, "order cancelled");
        Ok(order.serialize())
    }

    async fn delete_order(&self, order_id: i32) -> Result<(), Error> {
        self.orders.delete(order_id).await.map_err(map_order_error)?;
        info!(order_id, "order deleted");
        Ok(())
    }

    async fn add_item(&self, order_id: i32, body: Value) -> Result<ItemPayload, Error> {
        let draft = ItemDraft::deserialize(&body).map_err(map_validation_error)?;
        ensure_same_order(order_id, &draft)?;
        let item = self.items.create(&draft).await.map_err(map_item_error)?;
        info!(
            order_id,
            item_id = item.id(),
            product_id = item.product_id(),
            "item added"
        );
        Ok(item.serialize())
    }

    async fn update_item(
        &self,
        order_id: i32,
        item_id: i32,
        body: Value,
    ) -> Result<ItemPayload, Error> {
        let draft = ItemDraft::deserialize(&body).map_err(map_validation_error)?;
        ensure_same_order(order_id, &draft)?;
        let mut item = self.load_item(order_id, item_id).await?;
        item.apply(&draft);
        let item = self.items.update(&item).await.map_err(map_item_error)?;
        info!(order_id, item_id, "item updated");
        Ok(item.serialize())
    }

    async fn delete_item(&self, order_id: i32, item_id: i32) -> Result<(), Error> {
        if self.find_scoped_item(order_id, item_id).await?.is_none() {
            debug!(order_id, item_id, "item already absent");
            return Ok(());
        }
        self.items.delete(item_id).await.map_err(map_item_error)?;
        info!(order_id, item_id, "item deleted");
        Ok(())
    }
}

#[async_trait]
impl<O, I> OrdersQuery for OrderService<O, I>
where
    O: OrderRepository,
    I: ItemRepository,
{
    async fn get_order(&self, order_id: i32) -> Result<OrderPayload, Error> {
        debug!(order_id, "fetching order");
        Ok(self.load_order(order_id).await?.serialize())
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderPayload>, Error> {
        debug!(?filter, "listing orders");
        let orders = match filter {
            OrderFilter::All => self.orders.all().await,
            OrderFilter::Customer(customer_id) => self.orders.find_by_customer(customer_id).await,
            OrderFilter::Status(status) => self.orders.find_by_status(status).await,
            OrderFilter::Product(product_id) => self.orders.find_by_item(product_id).await,
        }
        .map_err(map_order_error)?;
        Ok(orders.iter().map(Order::serialize).collect())
    }

    async fn get_item(&self, order_id: i32, item_id: i32) -> Result<ItemPayload, Error> {
        debug!(order_id, item_id, "fetching item");
        Ok(self.load_item(order_id, item_id).await?.serialize())
    }

    async fn list_items(&self, order_id: i32) -> Result<Vec<ItemPayload>, Error> {
        debug!(order_id, "listing items");
        self.load_order(order_id).await?;
        let items = self
            .items
            .list_for_order(order_id)
            .await
            .map_err(map_item_error)?;
        Ok(items.iter().map(Item::serialize).collect())
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
