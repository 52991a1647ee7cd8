//! Generated order and item records.
//!
//! These types mirror the REST wire mapping without depending on the backend
//! crate, so they can be posted as JSON or converted at the point of use.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Order status chosen for a generated order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusSeed {
    /// Newly placed order.
    #[default]
    Placed,
    /// Payment received.
    Paid,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled before fulfilment.
    Cancelled,
}

impl StatusSeed {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Placed,
        Self::Paid,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "PLACED",
            Self::Paid => "PAID",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// A generated line item.
///
/// `order_id` is `0` for items nested inside an [`OrderSeed`]; the store
/// assigns the real owner when the order is inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSeed {
    /// Owning order identifier.
    pub order_id: i32,
    /// Product reference.
    pub product_id: i32,
    /// Number of units.
    pub quantity: i32,
    /// Unit price, rounded to cents.
    pub price: f64,
}

/// A generated order with its line items.
///
/// # Example
///
/// ```
/// use order_factory::{OrderSeed, StatusSeed};
///
/// let created_time = chrono::DateTime::from_timestamp(1_640_995_200, 0)
///     .expect("valid timestamp")
///     .naive_utc();
/// let order = OrderSeed {
///     customer_id: 4352,
///     tracking_id: Some(8193),
///     created_time,
///     status: StatusSeed::Placed,
///     order_items: Vec::new(),
/// };
///
/// let json = serde_json::to_value(&order).expect("serialises");
/// assert_eq!(json["status"], "PLACED");
/// assert_eq!(json["created_time"], "2022-01-01T00:00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSeed {
    /// Customer placing the order.
    pub customer_id: i32,
    /// Carrier tracking number, when shipped.
    pub tracking_id: Option<i32>,
    /// Creation instant (UTC, no offset).
    pub created_time: NaiveDateTime,
    /// Lifecycle status.
    pub status: StatusSeed,
    /// Line items owned by the order.
    pub order_items: Vec<ItemSeed>,
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Serialisation shape checks.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatusSeed::Placed, "PLACED")]
    #[case(StatusSeed::Paid, "PAID")]
    #[case(StatusSeed::Shipped, "SHIPPED")]
    #[case(StatusSeed::Delivered, "DELIVERED")]
    #[case(StatusSeed::Cancelled, "CANCELLED")]
    fn status_serialises_to_wire_name(#[case] status: StatusSeed, #[case] expected: &str) {
        let json = serde_json::to_value(status).expect("status serialises");
        assert_eq!(json, serde_json::Value::String(expected.to_owned()));
        assert_eq!(status.as_str(), expected);
    }

    #[rstest]
    fn item_serialises_with_wire_keys() {
        let item = ItemSeed {
            order_id: 3,
            product_id: 77,
            quantity: 2,
            price: 9.99,
        };
        let json = serde_json::to_value(&item).expect("item serialises");
        let keys: Vec<&str> = json
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys.len(), 4);
        for key in ["order_id", "product_id", "quantity", "price"] {
            assert!(keys.contains(&key), "missing {key}");
        }
    }
}
