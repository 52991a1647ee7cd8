//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised against any store.

use std::sync::Arc;

use crate::domain::OrderService;
use crate::domain::ports::{ItemRepository, OrderRepository, OrdersCommand, OrdersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub orders: Arc<dyn OrdersCommand>,
    pub orders_query: Arc<dyn OrdersQuery>,
}

impl HttpState {
    /// Bundle explicit port implementations.
    pub fn new(orders: Arc<dyn OrdersCommand>, orders_query: Arc<dyn OrdersQuery>) -> Self {
        Self {
            orders,
            orders_query,
        }
    }

    /// Serve both ports from one [`OrderService`] over the given repositories.
    pub fn from_repositories<O, I>(orders: Arc<O>, items: Arc<I>) -> Self
    where
        O: OrderRepository + 'static,
        I: ItemRepository + 'static,
    {
        let service = Arc::new(OrderService::new(orders, items));
        Self::new(service.clone(), service)
    }
}
