//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod item_repository;
mod order_repository;
mod orders_command;
mod orders_query;

#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemRepository, ItemRepositoryError};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use orders_command::MockOrdersCommand;
pub use orders_command::OrdersCommand;
#[cfg(test)]
pub use orders_query::MockOrdersQuery;
pub use orders_query::{OrderFilter, OrdersQuery};
