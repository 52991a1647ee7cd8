//! Internal Diesel row structs for the order and item tables.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types through the validated constructors.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{Item, ItemDraft, Order, OrderDraft};

use super::schema::{items, orders};

/// Row struct for reading from the order table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: i32,
    pub customer_id: i32,
    pub tracking_id: Option<i32>,
    pub created_time: NaiveDateTime,
    pub status: String,
}

/// Insertable order. A `None` creation time lets the column default apply.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow {
    pub customer_id: i32,
    pub tracking_id: Option<i32>,
    pub created_time: Option<NaiveDateTime>,
    pub status: &'static str,
}

impl From<&OrderDraft> for NewOrderRow {
    fn from(draft: &OrderDraft) -> Self {
        Self {
            customer_id: draft.customer_id,
            tracking_id: draft.tracking_id,
            created_time: draft.created_time,
            status: draft.status.as_str(),
        }
    }
}

/// Changeset for the scalar order columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = orders)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct OrderUpdate {
    pub customer_id: i32,
    pub tracking_id: Option<i32>,
    pub created_time: NaiveDateTime,
    pub status: &'static str,
}

impl From<&Order> for OrderUpdate {
    fn from(order: &Order) -> Self {
        Self {
            customer_id: order.customer_id(),
            tracking_id: order.tracking_id(),
            created_time: order.created_time(),
            status: order.status().as_str(),
        }
    }
}

/// Row struct for reading from the item table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: f64,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item::new(
            row.id,
            ItemDraft {
                order_id: row.order_id,
                product_id: row.product_id,
                quantity: row.quantity,
                price: row.price,
            },
        )
    }
}

/// Insertable item.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub(crate) struct NewItemRow {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: f64,
}

impl NewItemRow {
    /// Row for `draft` owned by `order_id`.
    pub fn owned_by(order_id: i32, draft: &ItemDraft) -> Self {
        Self {
            order_id,
            product_id: draft.product_id,
            quantity: draft.quantity,
            price: draft.price,
        }
    }
}

/// Changeset for the mutable item columns; the owner never changes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = items)]
pub(crate) struct ItemUpdate {
    pub product_id: i32,
    pub quantity: i32,
    pub price: f64,
}

impl From<&Item> for ItemUpdate {
    fn from(item: &Item) -> Self {
        Self {
            product_id: item.product_id(),
            quantity: item.quantity(),
            price: item.price(),
        }
    }
}
