//! Deterministic fake order data for tests and local seeding.
//!
//! The crate produces believable orders and line items from a numeric seed.
//! It deliberately knows nothing about the backend domain types: seeds
//! serialise to the same JSON mapping the REST API accepts, so callers can
//! post them directly or convert them at the point of use.
//!
//! # Example
//!
//! ```
//! use order_factory::{OrderFactory, generate_orders};
//!
//! let orders = generate_orders(42, 3).expect("generation succeeds");
//! assert_eq!(orders.len(), 3);
//!
//! // The same seed always yields the same orders.
//! let again = generate_orders(42, 3).expect("generation succeeds");
//! assert_eq!(orders, again);
//!
//! let mut factory = OrderFactory::new(7);
//! let order = factory.order().expect("order");
//! assert!(order.customer_id >= 0);
//! ```

mod error;
mod generator;
mod seed;

pub use error::FactoryError;
pub use generator::{DEFAULT_MAX_ITEMS, MAX_ITEMS_LIMIT, OrderFactory, generate_orders};
pub use seed::{ItemSeed, OrderSeed, StatusSeed};
