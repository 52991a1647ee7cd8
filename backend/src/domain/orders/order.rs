//! The order aggregate and its serialised forms.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::item::{Item, ItemDraft, ItemInput, ItemPayload};
use super::status::OrderStatus;
use super::validation::{EntityKind, OrderValidationError};

/// Timestamp layouts accepted for `created_time`, tried in order before
/// falling back to RFC 3339.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A stored order and the items it owns.
///
/// ## Invariants
/// - every item's `order_id` equals the order's `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: i32,
    customer_id: i32,
    tracking_id: Option<i32>,
    created_time: NaiveDateTime,
    status: OrderStatus,
    order_items: Vec<Item>,
}

/// Field values used to assemble an [`Order`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderParts {
    pub id: i32,
    pub customer_id: i32,
    pub tracking_id: Option<i32>,
    pub created_time: NaiveDateTime,
    pub status: OrderStatus,
    pub order_items: Vec<Item>,
}

/// An order that has not been stored yet, or replacement values for an
/// existing one.
///
/// `created_time` of `None` means "now" on insert and "unchanged" on update.
/// `order_items` of `None` means the input did not mention items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub customer_id: i32,
    pub tracking_id: Option<i32>,
    pub created_time: Option<NaiveDateTime>,
    pub status: OrderStatus,
    pub order_items: Option<Vec<ItemDraft>>,
}

/// Serialised form of an [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub id: i32,
    pub customer_id: i32,
    pub tracking_id: Option<i32>,
    pub created_time: NaiveDateTime,
    pub status: OrderStatus,
    pub order_items: Vec<ItemPayload>,
}

#[derive(Debug, Default, Deserialize)]
struct OrderInput {
    customer_id: Option<i32>,
    tracking_id: Option<i32>,
    created_time: Option<String>,
    status: Option<String>,
    order_items: Option<Vec<ItemInput>>,
}

fn parse_created_time(raw: &str) -> Result<NaiveDateTime, OrderValidationError> {
    let trimmed = raw.trim();
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|instant| instant.naive_utc())
        })
        .ok_or_else(|| {
            OrderValidationError::bad_data(
                EntityKind::Order,
                format!("created_time is not an ISO 8601 timestamp: {raw}"),
            )
        })
}

impl OrderInput {
    fn into_draft(self) -> Result<OrderDraft, OrderValidationError> {
        let customer_id = self
            .customer_id
            .ok_or_else(|| OrderValidationError::missing(EntityKind::Order, "customer_id"))?;
        let created_time = self
            .created_time
            .as_deref()
            .map(parse_created_time)
            .transpose()?;
        let status = match self.status {
            Some(name) => name.parse::<OrderStatus>()?,
            None => OrderStatus::default(),
        };
        let order_items = self
            .order_items
            .map(|items| {
                items
                    .into_iter()
                    .map(ItemInput::into_draft)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(OrderDraft {
            customer_id,
            tracking_id: self.tracking_id,
            created_time,
            status,
            order_items,
        })
    }
}

impl OrderDraft {
    /// Build a draft from a parsed JSON mapping.
    ///
    /// `customer_id` is required; `tracking_id`, `created_time`, `status`
    /// (default `PLACED`) and `order_items` are optional. `id` is never read.
    ///
    /// # Errors
    /// - [`OrderValidationError::BadData`] for non-mapping input, wrong value
    ///   types or an unparseable `created_time`.
    /// - [`OrderValidationError::MissingField`] naming the absent key; nested
    ///   items report their own missing keys.
    /// - [`OrderValidationError::UnknownStatus`] for an unknown status name.
    ///
    /// # Examples
    /// ```
    /// use order_service::domain::{OrderDraft, OrderStatus};
    /// use serde_json::json;
    ///
    /// let draft = OrderDraft::deserialize(&json!({
    ///     "customer_id": 4352,
    ///     "tracking_id": 8193,
    ///     "created_time": "2022-01-01T00:00:00",
    ///     "status": "PLACED",
    ///     "order_items": []
    /// }))
    /// .expect("valid order");
    /// assert_eq!(draft.status, OrderStatus::Placed);
    ///
    /// let err = OrderDraft::deserialize(&json!({"tracking_id": 1})).expect_err("no customer");
    /// assert_eq!(err.field(), Some("customer_id"));
    /// ```
    pub fn deserialize(data: &Value) -> Result<Self, OrderValidationError> {
        let input = OrderInput::deserialize(data)
            .map_err(|err| OrderValidationError::bad_data(EntityKind::Order, err.to_string()))?;
        input.into_draft()
    }

    /// Items supplied with the draft, or none.
    pub fn items(&self) -> &[ItemDraft] {
        self.order_items.as_deref().unwrap_or_default()
    }
}

impl Order {
    /// Assemble a stored order, checking item ownership.
    ///
    /// # Errors
    /// [`OrderValidationError::ForeignItem`] when an item belongs elsewhere.
    pub fn new(parts: OrderParts) -> Result<Self, OrderValidationError> {
        let OrderParts {
            id,
            customer_id,
            tracking_id,
            created_time,
            status,
            order_items,
        } = parts;

        if let Some(item) = order_items.iter().find(|item| item.order_id() != id) {
            return Err(OrderValidationError::ForeignItem {
                order_id: id,
                item_id: item.id(),
                item_order_id: item.order_id(),
            });
        }

        Ok(Self {
            id,
            customer_id,
            tracking_id,
            created_time,
            status,
            order_items,
        })
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Customer who placed the order.
    pub fn customer_id(&self) -> i32 {
        self.customer_id
    }

    /// Carrier tracking number.
    pub fn tracking_id(&self) -> Option<i32> {
        self.tracking_id
    }

    /// Creation instant (UTC).
    pub fn created_time(&self) -> NaiveDateTime {
        self.created_time
    }

    /// Lifecycle status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Owned items in insertion order.
    pub fn order_items(&self) -> &[Item] {
        &self.order_items
    }

    /// Replace the scalar fields with the draft's values.
    ///
    /// Items are not touched; item replacement is a persistence operation.
    pub fn apply(&mut self, draft: &OrderDraft) {
        self.customer_id = draft.customer_id;
        self.tracking_id = draft.tracking_id;
        if let Some(created_time) = draft.created_time {
            self.created_time = created_time;
        }
        self.status = draft.status;
    }

    /// Move the order to `CANCELLED`.
    ///
    /// Returns `false`, leaving the order untouched, once it has shipped.
    pub fn cancel(&mut self) -> bool {
        if !self.status.is_cancellable() {
            return false;
        }
        self.status = OrderStatus::Cancelled;
        true
    }

    /// Field values without identifiers.
    pub fn to_draft(&self) -> OrderDraft {
        OrderDraft {
            customer_id: self.customer_id,
            tracking_id: self.tracking_id,
            created_time: Some(self.created_time),
            status: self.status,
            order_items: Some(self.order_items.iter().map(Item::to_draft).collect()),
        }
    }

    /// Mapping with keys `id`, `customer_id`, `tracking_id`,
    /// `created_time`, `status` and `order_items`.
    pub fn serialize(&self) -> OrderPayload {
        OrderPayload {
            id: self.id,
            customer_id: self.customer_id,
            tracking_id: self.tracking_id,
            created_time: self.created_time,
            status: self.status,
            order_items: self.order_items.iter().map(Item::serialize).collect(),
        }
    }
}

impl From<&Order> for OrderPayload {
    fn from(value: &Order) -> Self {
        value.serialize()
    }
}
