//! Validation failures raised while building orders and items from input.

use super::status::ParseOrderStatusError;

/// Entity named in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// An order.
    Order,
    /// A line item.
    Item,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Order => "Order",
            Self::Item => "Item",
        })
    }
}

/// Why an order or item mapping was rejected.
///
/// # Examples
/// ```
/// use order_service::domain::{EntityKind, OrderValidationError};
///
/// let err = OrderValidationError::missing(EntityKind::Order, "customer_id");
/// assert_eq!(err.to_string(), "Invalid Order: missing customer_id");
/// assert_eq!(err.field(), Some("customer_id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    /// A required key was absent or null.
    #[error("Invalid {entity}: missing {field}")]
    MissingField {
        /// Entity being validated.
        entity: EntityKind,
        /// The absent key.
        field: &'static str,
    },
    /// The input had the wrong shape or a value of the wrong type.
    #[error("Invalid {entity}: body of request contained bad or no data - {message}")]
    BadData {
        /// Entity being validated.
        entity: EntityKind,
        /// Parser diagnostic.
        message: String,
    },
    /// The status name is not a known [`crate::domain::OrderStatus`].
    #[error("Invalid Order: {0}")]
    UnknownStatus(#[from] ParseOrderStatusError),
    /// An item claims a different owning order.
    #[error("Invalid Order: item {item_id} belongs to order {item_order_id}, not {order_id}")]
    ForeignItem {
        /// Order being assembled.
        order_id: i32,
        /// Offending item.
        item_id: i32,
        /// Owner recorded on the item.
        item_order_id: i32,
    },
}

impl OrderValidationError {
    /// Shorthand for [`OrderValidationError::MissingField`].
    pub fn missing(entity: EntityKind, field: &'static str) -> Self {
        Self::MissingField { entity, field }
    }

    /// Shorthand for [`OrderValidationError::BadData`].
    pub fn bad_data(entity: EntityKind, message: impl Into<String>) -> Self {
        Self::BadData {
            entity,
            message: message.into(),
        }
    }

    /// The offending key, when the failure concerns a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field, .. } => Some(*field),
            Self::UnknownStatus(_) => Some("status"),
            Self::ForeignItem { .. } => Some("order_items"),
            Self::BadData { .. } => None,
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::BadData { .. } => "bad_data",
            Self::UnknownStatus(_) => "unknown_status",
            Self::ForeignItem { .. } => "foreign_item",
        }
    }
}
