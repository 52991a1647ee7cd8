//! Deterministic order generation from a numeric seed.
//!
//! The same seed always produces the same sequence of orders, which keeps
//! test fixtures and seeded databases reproducible.

use chrono::{DateTime, NaiveDateTime};
use fake::Fake;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::FactoryError;
use crate::seed::{ItemSeed, OrderSeed, StatusSeed};

/// Default ceiling for the number of items attached to a generated order.
pub const DEFAULT_MAX_ITEMS: usize = 3;

/// Largest supported item ceiling.
pub const MAX_ITEMS_LIMIT: usize = 20;

const CUSTOMER_ID_RANGE: std::ops::Range<i32> = 0..10_000_000;
const TRACKING_ID_RANGE: std::ops::Range<i32> = 0..10_000_000;
const PRODUCT_ID_RANGE: std::ops::Range<i32> = 0..100_000;
const QUANTITY_RANGE: std::ops::RangeInclusive<i32> = 1..=10;
const PRICE_CENTS_RANGE: std::ops::RangeInclusive<i32> = 50..=100_000;

/// 2022-01-01T00:00:00Z.
const CREATED_TIME_BASE: i64 = 1_640_995_200;
const CREATED_TIME_SPAN_SECS: i64 = 365 * 24 * 60 * 60;

/// Whole cents as a price with two decimal places.
#[expect(
    clippy::float_arithmetic,
    reason = "prices are stored as floating point; scaling whole cents is exact to two places"
)]
fn price_from_cents(cents: i32) -> f64 {
    f64::from(cents) / 100.0
}

/// Seeded generator for orders and items.
#[derive(Debug, Clone)]
pub struct OrderFactory {
    rng: ChaCha8Rng,
    max_items: usize,
}

impl OrderFactory {
    /// Create a factory seeded with `seed`, attaching up to
    /// [`DEFAULT_MAX_ITEMS`] items per order.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }

    /// Change the item ceiling. Zero produces orders without items.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::TooManyItems`] when `max_items` exceeds
    /// [`MAX_ITEMS_LIMIT`].
    pub const fn with_max_items(mut self, max_items: usize) -> Result<Self, FactoryError> {
        if max_items > MAX_ITEMS_LIMIT {
            return Err(FactoryError::TooManyItems {
                requested: max_items,
                limit: MAX_ITEMS_LIMIT,
            });
        }
        self.max_items = max_items;
        Ok(self)
    }

    /// Generate a single order with between zero and the configured ceiling
    /// of items.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::TimestampOutOfRange`] if the creation time
    /// cannot be represented.
    pub fn order(&mut self) -> Result<OrderSeed, FactoryError> {
        let customer_id: i32 = CUSTOMER_ID_RANGE.fake_with_rng(&mut self.rng);
        let tracking_id: i32 = TRACKING_ID_RANGE.fake_with_rng(&mut self.rng);
        let created_time = self.created_time()?;
        let status = self.status();
        let item_count = self.rng.random_range(0..=self.max_items);
        let order_items = (0..item_count).map(|_| self.item(0)).collect();

        Ok(OrderSeed {
            customer_id,
            tracking_id: Some(tracking_id),
            created_time,
            status,
            order_items,
        })
    }

    /// Generate an item owned by `order_id`.
    pub fn item(&mut self, order_id: i32) -> ItemSeed {
        let product_id: i32 = PRODUCT_ID_RANGE.fake_with_rng(&mut self.rng);
        let quantity = self.rng.random_range(QUANTITY_RANGE);
        let cents = self.rng.random_range(PRICE_CENTS_RANGE);
        ItemSeed {
            order_id,
            product_id,
            quantity,
            price: price_from_cents(cents),
        }
    }

    /// Generate `count` orders.
    ///
    /// # Errors
    ///
    /// Propagates the first [`FactoryError`] raised by [`Self::order`].
    pub fn orders(&mut self, count: usize) -> Result<Vec<OrderSeed>, FactoryError> {
        (0..count).map(|_| self.order()).collect()
    }

    fn status(&mut self) -> StatusSeed {
        StatusSeed::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
    }

    fn created_time(&mut self) -> Result<NaiveDateTime, FactoryError> {
        let offset = self.rng.random_range(0..CREATED_TIME_SPAN_SECS);
        let seconds = CREATED_TIME_BASE + offset;
        DateTime::from_timestamp(seconds, 0)
            .map(|instant| instant.naive_utc())
            .ok_or(FactoryError::TimestampOutOfRange { seconds })
    }
}

/// Generate `count` orders from `seed` with the default item ceiling.
///
/// # Errors
///
/// Propagates [`FactoryError`] from order generation.
pub fn generate_orders(seed: u64, count: usize) -> Result<Vec<OrderSeed>, FactoryError> {
    OrderFactory::new(seed).orders(count)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Determinism and range checks for generated orders.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_seed_yields_identical_orders() {
        let first = generate_orders(42, 5).expect("generation succeeds");
        let second = generate_orders(42, 5).expect("generation succeeds");
        assert_eq!(first, second);
    }

    #[rstest]
    fn different_seeds_diverge() {
        let first = generate_orders(1, 5).expect("generation succeeds");
        let second = generate_orders(2, 5).expect("generation succeeds");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(12)]
    fn count_is_respected(#[case] count: usize) {
        let orders = generate_orders(9, count).expect("generation succeeds");
        assert_eq!(orders.len(), count);
    }

    #[rstest]
    fn generated_values_stay_in_range() {
        let orders = generate_orders(1234, 50).expect("generation succeeds");
        for order in &orders {
            assert!(CUSTOMER_ID_RANGE.contains(&order.customer_id));
            let tracking_id = order.tracking_id.expect("tracking id is generated");
            assert!(TRACKING_ID_RANGE.contains(&tracking_id));
            assert!(order.order_items.len() <= DEFAULT_MAX_ITEMS);
            let year = order.created_time.format("%Y").to_string();
            assert_eq!(year, "2022");
            for item in &order.order_items {
                assert_eq!(item.order_id, 0);
                assert!(PRODUCT_ID_RANGE.contains(&item.product_id));
                assert!(QUANTITY_RANGE.contains(&item.quantity));
                assert!(item.price >= 0.5 && item.price <= 1000.0);
            }
        }
    }

    #[rstest]
    fn zero_item_ceiling_yields_bare_orders() {
        let mut factory = OrderFactory::new(5)
            .with_max_items(0)
            .expect("zero is a valid ceiling");
        let orders = factory.orders(10).expect("generation succeeds");
        assert!(orders.iter().all(|order| order.order_items.is_empty()));
    }

    #[rstest]
    fn oversized_item_ceiling_is_rejected() {
        let err = OrderFactory::new(5)
            .with_max_items(MAX_ITEMS_LIMIT + 1)
            .expect_err("ceiling above the limit is rejected");
        assert_eq!(
            err,
            FactoryError::TooManyItems {
                requested: MAX_ITEMS_LIMIT + 1,
                limit: MAX_ITEMS_LIMIT,
            }
        );
    }

    #[rstest]
    #[case(50, "0.5")]
    #[case(1999, "19.99")]
    #[case(100_000, "1000")]
    fn prices_keep_whole_cents(#[case] cents: i32, #[case] rendered: &str) {
        assert_eq!(price_from_cents(cents).to_string(), rendered);
    }

    #[rstest]
    fn item_prices_have_at_most_two_decimals() {
        let mut factory = OrderFactory::new(11);
        for _ in 0..100 {
            let price = factory.item(1).price.to_string();
            let decimals = price.split_once('.').map_or(0, |(_, fraction)| fraction.len());
            assert!(decimals <= 2, "{price} has more than two decimals");
        }
    }

    #[rstest]
    fn item_carries_owner() {
        let mut factory = OrderFactory::new(3);
        let item = factory.item(17);
        assert_eq!(item.order_id, 17);
    }
}
