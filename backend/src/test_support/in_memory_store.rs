//! In-memory implementation of the order and item repository ports.
//!
//! Mirrors the relational store: serial ids starting at 1, items removed
//! with their order, and inserts of items for unknown orders rejected.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use crate::domain::ports::{
    ItemRepository, ItemRepositoryError, OrderRepository, OrderRepositoryError,
};
use crate::domain::{Item, ItemDraft, Order, OrderDraft, OrderParts, OrderStatus};

#[derive(Debug, Clone)]
struct OrderRecord {
    customer_id: i32,
    tracking_id: Option<i32>,
    created_time: NaiveDateTime,
    status: OrderStatus,
}

#[derive(Debug, Default)]
struct StoreState {
    last_order_id: i32,
    last_item_id: i32,
    orders: BTreeMap<i32, OrderRecord>,
    items: BTreeMap<i32, Item>,
}

impl StoreState {
    fn insert_item(&mut self, order_id: i32, draft: &ItemDraft) -> Item {
        self.last_item_id += 1;
        let item = Item::new(
            self.last_item_id,
            ItemDraft {
                order_id,
                ..draft.clone()
            },
        );
        self.items.insert(item.id(), item.clone());
        item
    }

    fn overwrite(&mut self, order: &Order) -> Result<(), OrderRepositoryError> {
        let record = self
            .orders
            .get_mut(&order.id())
            .ok_or_else(|| OrderRepositoryError::missing(order.id()))?;
        record.customer_id = order.customer_id();
        record.tracking_id = order.tracking_id();
        record.created_time = order.created_time();
        record.status = order.status();
        Ok(())
    }

    fn assemble(&self, order_id: i32) -> Option<Result<Order, OrderRepositoryError>> {
        let record = self.orders.get(&order_id)?;
        let order_items = self
            .items
            .values()
            .filter(|item| item.order_id() == order_id)
            .cloned()
            .collect();
        Some(
            Order::new(OrderParts {
                id: order_id,
                customer_id: record.customer_id,
                tracking_id: record.tracking_id,
                created_time: record.created_time,
                status: record.status,
                order_items,
            })
            .map_err(|err| OrderRepositoryError::query(err.to_string())),
        )
    }

    fn select(
        &self,
        predicate: impl Fn(i32, &OrderRecord) -> bool,
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        self.orders
            .iter()
            .filter(|(id, record)| predicate(**id, record))
            .filter_map(|(id, _)| self.assemble(*id))
            .collect()
    }
}

/// Thread-safe in-memory order store.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use order_service::test_support::InMemoryOrderStore;
/// use order_service::inbound::http::state::HttpState;
///
/// let store = Arc::new(InMemoryOrderStore::new());
/// let state = HttpState::from_repositories(store.clone(), store);
/// # let _ = state;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    state: Mutex<StoreState>,
    unavailable: AtomicBool,
}

impl InMemoryOrderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a connection error until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Release);
    }

    /// Number of stored items across all orders.
    pub fn item_count(&self) -> usize {
        self.lock().items.len()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn check_available<E>(&self, connection: impl FnOnce(&'static str) -> E) -> Result<(), E> {
        if self.unavailable.load(Ordering::Acquire) {
            return Err(connection("in-memory store marked unavailable"));
        }
        Ok(())
    }

    fn order_guard(&self) -> Result<MutexGuard<'_, StoreState>, OrderRepositoryError> {
        self.check_available(OrderRepositoryError::connection)?;
        Ok(self.lock())
    }

    fn item_guard(&self) -> Result<MutexGuard<'_, StoreState>, ItemRepositoryError> {
        self.check_available(ItemRepositoryError::connection)?;
        Ok(self.lock())
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderStore {
    async fn create(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError> {
        let mut state = self.order_guard()?;
        state.last_order_id += 1;
        let order_id = state.last_order_id;
        state.orders.insert(
            order_id,
            OrderRecord {
                customer_id: draft.customer_id,
                tracking_id: draft.tracking_id,
                created_time: draft.created_time.unwrap_or_else(|| Utc::now().naive_utc()),
                status: draft.status,
            },
        );
        for item in draft.items() {
            state.insert_item(order_id, item);
        }
        state
            .assemble(order_id)
            .unwrap_or_else(|| Err(OrderRepositoryError::missing(order_id)))
    }

    async fn update(&self, order: &Order) -> Result<Order, OrderRepositoryError> {
        let mut state = self.order_guard()?;
        state.overwrite(order)?;
        state
            .assemble(order.id())
            .unwrap_or_else(|| Err(OrderRepositoryError::missing(order.id())))
    }

    async fn update_with_items(
        &self,
        order: &Order,
        drafts: &[ItemDraft],
    ) -> Result<Order, OrderRepositoryError> {
        let mut state = self.order_guard()?;
        let order_id = order.id();
        state.overwrite(order)?;
        state.items.retain(|_, item| item.order_id() != order_id);
        for draft in drafts {
            state.insert_item(order_id, draft);
        }
        state
            .assemble(order_id)
            .unwrap_or_else(|| Err(OrderRepositoryError::missing(order_id)))
    }

    async fn delete(&self, order_id: i32) -> Result<(), OrderRepositoryError> {
        let mut state = self.order_guard()?;
        if state.orders.remove(&order_id).is_some() {
            state.items.retain(|_, item| item.order_id() != order_id);
        }
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Order>, OrderRepositoryError> {
        self.order_guard()?.select(|_, _| true)
    }

    async fn find(&self, order_id: i32) -> Result<Option<Order>, OrderRepositoryError> {
        self.order_guard()?.assemble(order_id).transpose()
    }

    async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<Order>, OrderRepositoryError> {
        self.order_guard()?
            .select(|_, record| record.customer_id == customer_id)
    }

    async fn find_by_status(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        self.order_guard()?
            .select(|_, record| record.status == status)
    }

    async fn find_by_item(&self, product_id: i32) -> Result<Vec<Order>, OrderRepositoryError> {
        let state = self.order_guard()?;
        state.select(|order_id, _| {
            state
                .items
                .values()
                .any(|item| item.order_id() == order_id && item.product_id() == product_id)
        })
    }
}

#[async_trait]
impl ItemRepository for InMemoryOrderStore {
    async fn create(&self, draft: &ItemDraft) -> Result<Item, ItemRepositoryError> {
        let mut state = self.item_guard()?;
        if !state.orders.contains_key(&draft.order_id) {
            return Err(ItemRepositoryError::missing_order(draft.order_id));
        }
        Ok(state.insert_item(draft.order_id, draft))
    }

    async fn update(&self, item: &Item) -> Result<Item, ItemRepositoryError> {
        let mut state = self.item_guard()?;
        let stored = state
            .items
            .get_mut(&item.id())
            .ok_or_else(|| ItemRepositoryError::missing(item.id()))?;
        stored.apply(&item.to_draft());
        Ok(stored.clone())
    }

    async fn delete(&self, item_id: i32) -> Result<(), ItemRepositoryError> {
        self.item_guard()?.items.remove(&item_id);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        Ok(self.item_guard()?.items.values().cloned().collect())
    }

    async fn find(&self, item_id: i32) -> Result<Option<Item>, ItemRepositoryError> {
        Ok(self.item_guard()?.items.get(&item_id).cloned())
    }

    async fn list_for_order(&self, order_id: i32) -> Result<Vec<Item>, ItemRepositoryError> {
        Ok(self
            .item_guard()?
            .items
            .values()
            .filter(|item| item.order_id() == order_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryOrderStore {
        InMemoryOrderStore::new()
    }

    fn draft(customer_id: i32, products: &[i32]) -> OrderDraft {
        OrderDraft {
            customer_id,
            tracking_id: None,
            created_time: None,
            status: OrderStatus::Placed,
            order_items: Some(
                products
                    .iter()
                    .map(|product_id| ItemDraft {
                        order_id: 0,
                        product_id: *product_id,
                        quantity: 1,
                        price: 1.0,
                    })
                    .collect(),
            ),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_assigns_serial_ids_and_owns_items(store: InMemoryOrderStore) {
        let first = OrderRepository::create(&store, &draft(1, &[10, 11]))
            .await
            .expect("created");
        let second = OrderRepository::create(&store, &draft(2, &[]))
            .await
            .expect("created");

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert!(first.order_items().iter().all(|item| item.order_id() == 1));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_cascades_to_items(store: InMemoryOrderStore) {
        let order = OrderRepository::create(&store, &draft(1, &[10, 11]))
            .await
            .expect("created");
        OrderRepository::delete(&store, order.id())
            .await
            .expect("deleted");

        assert_eq!(store.item_count(), 0);
        assert!(
            OrderRepository::find(&store, order.id())
                .await
                .expect("lookup")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_item_lists_each_order_once(store: InMemoryOrderStore) {
        OrderRepository::create(&store, &draft(1, &[10, 10]))
            .await
            .expect("created");
        OrderRepository::create(&store, &draft(2, &[11]))
            .await
            .expect("created");

        let found = store.find_by_item(10).await.expect("query");
        assert_eq!(found.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_with_items_swaps_fields_and_items_together(store: InMemoryOrderStore) {
        let mut order = OrderRepository::create(&store, &draft(1, &[10, 11]))
            .await
            .expect("created");
        order.apply(&OrderDraft {
            tracking_id: Some(77),
            status: OrderStatus::Paid,
            ..draft(5, &[])
        });

        let updated = store
            .update_with_items(&order, &draft(0, &[20]).order_items.unwrap_or_default())
            .await
            .expect("updated");

        assert_eq!(updated.customer_id(), 5);
        assert_eq!(updated.tracking_id(), Some(77));
        assert_eq!(updated.status(), OrderStatus::Paid);
        let products: Vec<i32> = updated.order_items().iter().map(Item::product_id).collect();
        assert_eq!(products, vec![20]);
        assert_eq!(store.item_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_with_items_leaves_nothing_behind_for_missing_orders(store: InMemoryOrderStore) {
        let order = OrderRepository::create(&store, &draft(1, &[10]))
            .await
            .expect("created");
        OrderRepository::delete(&store, order.id())
            .await
            .expect("deleted");

        let error = store
            .update_with_items(&order, &draft(0, &[20]).order_items.unwrap_or_default())
            .await
            .expect_err("order is gone");

        assert_eq!(error, OrderRepositoryError::missing(order.id()));
        assert_eq!(store.item_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn items_for_unknown_orders_are_rejected(store: InMemoryOrderStore) {
        let error = ItemRepository::create(
            &store,
            &ItemDraft {
                order_id: 99,
                product_id: 1,
                quantity: 1,
                price: 1.0,
            },
        )
        .await
        .expect_err("no order 99");
        assert_eq!(error, ItemRepositoryError::missing_order(99));
    }

    #[rstest]
    #[tokio::test]
    async fn unavailable_store_reports_connection_errors(store: InMemoryOrderStore) {
        store.set_unavailable(true);
        let error = OrderRepository::all(&store).await.expect_err("unavailable");
        assert!(matches!(error, OrderRepositoryError::Connection { .. }));
    }
}
