//! Line items owned by an order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{EntityKind, OrderValidationError};

/// A persisted line item.
///
/// Items never outlive their order: the store removes them when the owning
/// order is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: i32,
    order_id: i32,
    product_id: i32,
    quantity: i32,
    price: f64,
}

/// An item that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    /// Owning order.
    pub order_id: i32,
    /// Product reference.
    pub product_id: i32,
    /// Number of units.
    pub quantity: i32,
    /// Unit price.
    pub price: f64,
}

/// Serialised form of an [`Item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: f64,
}

/// Boundary schema for item input; presence is checked after parsing so
/// missing keys can be named. Unknown keys, including `id`, are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ItemInput {
    order_id: Option<i32>,
    product_id: Option<i32>,
    quantity: Option<i32>,
    price: Option<f64>,
}

impl ItemInput {
    pub(crate) fn into_draft(self) -> Result<ItemDraft, OrderValidationError> {
        let missing = |field| OrderValidationError::missing(EntityKind::Item, field);
        Ok(ItemDraft {
            order_id: self.order_id.ok_or_else(|| missing("order_id"))?,
            product_id: self.product_id.ok_or_else(|| missing("product_id"))?,
            quantity: self.quantity.ok_or_else(|| missing("quantity"))?,
            price: self.price.ok_or_else(|| missing("price"))?,
        })
    }
}

impl ItemDraft {
    /// Build a draft from a parsed JSON mapping.
    ///
    /// # Errors
    /// - [`OrderValidationError::BadData`] when `data` is not a mapping or a
    ///   value has the wrong type.
    /// - [`OrderValidationError::MissingField`] naming the first absent key
    ///   among `order_id`, `product_id`, `quantity` and `price`.
    ///
    /// # Examples
    /// ```
    /// use order_service::domain::ItemDraft;
    /// use serde_json::json;
    ///
    /// let draft = ItemDraft::deserialize(&json!({
    ///     "order_id": 1, "product_id": 42, "quantity": 3, "price": 9.5
    /// }))
    /// .expect("complete item");
    /// assert_eq!(draft.quantity, 3);
    ///
    /// let err = ItemDraft::deserialize(&json!({"order_id": 1})).expect_err("incomplete");
    /// assert_eq!(err.to_string(), "Invalid Item: missing product_id");
    /// ```
    pub fn deserialize(data: &Value) -> Result<Self, OrderValidationError> {
        let input = ItemInput::deserialize(data)
            .map_err(|err| OrderValidationError::bad_data(EntityKind::Item, err.to_string()))?;
        input.into_draft()
    }
}

impl Item {
    /// Assemble a stored item from its identifier and field values.
    pub fn new(id: i32, draft: ItemDraft) -> Self {
        let ItemDraft {
            order_id,
            product_id,
            quantity,
            price,
        } = draft;
        Self {
            id,
            order_id,
            product_id,
            quantity,
            price,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Owning order.
    pub fn order_id(&self) -> i32 {
        self.order_id
    }

    /// Product reference.
    pub fn product_id(&self) -> i32 {
        self.product_id
    }

    /// Number of units.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Unit price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Overwrite product, quantity and price from `draft`.
    ///
    /// The owner is fixed once stored; moving an item between orders means
    /// deleting and re-creating it.
    pub fn apply(&mut self, draft: &ItemDraft) {
        self.product_id = draft.product_id;
        self.quantity = draft.quantity;
        self.price = draft.price;
    }

    /// Field values without the identifier.
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            order_id: self.order_id,
            product_id: self.product_id,
            quantity: self.quantity,
            price: self.price,
        }
    }

    /// Mapping with keys `id`, `order_id`, `product_id`, `quantity`, `price`.
    pub fn serialize(&self) -> ItemPayload {
        ItemPayload {
            id: self.id,
            order_id: self.order_id,
            product_id: self.product_id,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

impl From<&Item> for ItemPayload {
    fn from(value: &Item) -> Self {
        value.serialize()
    }
}
