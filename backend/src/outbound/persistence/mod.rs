//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the order and item repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - Repositories only translate between row structs and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Diesel and pool failures map onto the ports' error enums.
//!
//! # Example
//!
//! ```rust,no_run
//! use order_service::outbound::persistence::{
//!     DbPool, DieselItemRepository, DieselOrderRepository, PoolConfig,
//! };
//!
//! # async fn example() -> Result<(), order_service::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/orders")).await?;
//! let orders = DieselOrderRepository::new(pool.clone());
//! let items = DieselItemRepository::new(pool);
//! # let _ = (orders, items);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_item_repository;
mod diesel_order_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_item_repository::DieselItemRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_async,
};
pub use pool::{DbPool, PoolConfig, PoolError};
