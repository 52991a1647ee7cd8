//! PostgreSQL-backed `ItemRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemDraft};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{ItemRow, ItemUpdate, NewItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::items;

/// Diesel-backed implementation of the [`ItemRepository`] port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ItemRepositoryError {
    map_basic_pool_error(error, |message| ItemRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> ItemRepositoryError {
    map_basic_diesel_error(
        error,
        ItemRepositoryError::query,
        ItemRepositoryError::connection,
    )
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn create(&self, draft: &ItemDraft) -> Result<Item, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewItemRow::owned_by(draft.order_id, draft);

        let row: ItemRow = diesel::insert_into(items::table)
            .values(&new_row)
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    ItemRepositoryError::missing_order(draft.order_id)
                } else {
                    map_diesel_error(err)
                }
            })?;

        debug!(item_id = row.id, order_id = row.order_id, "item row inserted");
        Ok(row.into())
    }

    async fn update(&self, item: &Item) -> Result<Item, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let item_id = item.id();

        let row: Option<ItemRow> = diesel::update(items::table.find(item_id))
            .set(&ItemUpdate::from(item))
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Item::from)
            .ok_or_else(|| ItemRepositoryError::missing(item_id))
    }

    async fn delete(&self, item_id: i32) -> Result<(), ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(items::table.find(item_id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(item_id, removed, "item delete executed");
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ItemRow> = items::table
            .select(ItemRow::as_select())
            .order_by(items::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, item_id: i32) -> Result<Option<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ItemRow> = items::table
            .find(item_id)
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn list_for_order(&self, order_id: i32) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ItemRow> = items::table
            .filter(items::order_id.eq(order_id))
            .select(ItemRow::as_select())
            .order_by(items::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
