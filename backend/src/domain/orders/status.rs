//! Order lifecycle status.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle stage of an order.
///
/// Orders normally move `PLACED → PAID → SHIPPED → DELIVERED`; `CANCELLED`
/// is reachable until the order ships. The wire and storage representation
/// is the upper-case name returned by [`OrderStatus::as_str`].
///
/// # Examples
/// ```
/// use order_service::domain::OrderStatus;
///
/// let status: OrderStatus = "SHIPPED".parse().expect("known status");
/// assert_eq!(status, OrderStatus::Shipped);
/// assert_eq!(OrderStatus::default(), OrderStatus::Placed);
/// assert!("shipped".parse::<OrderStatus>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// The customer placed the order.
    #[default]
    Placed,
    /// Payment was received.
    Paid,
    /// The order left the warehouse.
    Shipped,
    /// The customer received the order.
    Delivered,
    /// The order was cancelled before shipping.
    Cancelled,
}

impl OrderStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Placed,
        Self::Paid,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Stored and serialised name.
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

    /// Whether an order in this status may still be cancelled.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Placed | Self::Paid | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string does not name an [`OrderStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {value}")]
pub struct ParseOrderStatusError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLACED" => Ok(Self::Placed),
            "PAID" => Ok(Self::Paid),
            "SHIPPED" => Ok(Self::Shipped),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(ParseOrderStatusError {
                value: other.to_owned(),
            }),
        }
    }
}
