//! PostgreSQL-backed `OrderRepository` implementation using Diesel ORM.
//!
//! Orders are always loaded together with their items: each read selects the
//! order rows, then their items through `belonging_to`, inside one
//! transaction so both queries see the same snapshot.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{ItemDraft, Order, OrderDraft, OrderParts, OrderStatus};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ItemRow, NewItemRow, NewOrderRow, OrderRow, OrderUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{items, orders};

/// Diesel-backed implementation of the [`OrderRepository`] port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use order_service::outbound::persistence::{DbPool, DieselOrderRepository, PoolConfig};
    ///
    /// # async fn example() -> Result<(), order_service::outbound::persistence::PoolError> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/orders")).await?;
    /// let repo = DieselOrderRepository::new(pool);
    /// # let _ = repo;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OrderRepositoryError {
    map_basic_pool_error(error, |message| OrderRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> OrderRepositoryError {
    map_basic_diesel_error(
        error,
        OrderRepositoryError::query,
        OrderRepositoryError::connection,
    )
}

/// Convert an order row and its item rows into the domain aggregate.
fn row_to_order(row: OrderRow, item_rows: Vec<ItemRow>) -> Result<Order, OrderRepositoryError> {
    let status: OrderStatus = row.status.parse().map_err(|err| {
        OrderRepositoryError::query(format!("order {} has invalid status: {err}", row.id))
    })?;
    Order::new(OrderParts {
        id: row.id,
        customer_id: row.customer_id,
        tracking_id: row.tracking_id,
        created_time: row.created_time,
        status,
        order_items: item_rows.into_iter().map(Into::into).collect(),
    })
    .map_err(|err| OrderRepositoryError::query(err.to_string()))
}

fn rows_to_orders(rows: Vec<(OrderRow, Vec<ItemRow>)>) -> Result<Vec<Order>, OrderRepositoryError> {
    rows.into_iter()
        .map(|(row, item_rows)| row_to_order(row, item_rows))
        .collect()
}

/// Load the items of `rows`, grouped per order and ordered by item id.
async fn attach_items(
    conn: &mut AsyncPgConnection,
    rows: Vec<OrderRow>,
) -> QueryResult<Vec<(OrderRow, Vec<ItemRow>)>> {
    let item_rows: Vec<ItemRow> = ItemRow::belonging_to(&rows)
        .select(ItemRow::as_select())
        .order_by(items::id)
        .load(conn)
        .await?;
    let grouped = item_rows.grouped_by(&rows);
    Ok(rows.into_iter().zip(grouped).collect())
}

/// Insert `drafts` as items of `order_id`.
async fn insert_items(
    conn: &mut AsyncPgConnection,
    order_id: i32,
    drafts: &[ItemDraft],
) -> QueryResult<Vec<ItemRow>> {
    if drafts.is_empty() {
        return Ok(Vec::new());
    }
    let new_rows: Vec<NewItemRow> = drafts
        .iter()
        .map(|draft| NewItemRow::owned_by(order_id, draft))
        .collect();
    diesel::insert_into(items::table)
        .values(&new_rows)
        .returning(ItemRow::as_returning())
        .get_results(conn)
        .await
}

impl DieselOrderRepository {
    /// Run a filtered order selection and attach items in one transaction.
    async fn load_orders<F>(&self, filter: F) -> Result<Vec<Order>, OrderRepositoryError>
    where
        F: FnOnce() -> orders::BoxedQuery<'static, diesel::pg::Pg> + Send,
    {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = conn
            .transaction(|conn| {
                async move {
                    let rows: Vec<OrderRow> = filter()
                        .select(OrderRow::as_select())
                        .order_by(orders::id)
                        .load(conn)
                        .await?;
                    attach_items(conn, rows).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        rows_to_orders(rows)
    }
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn create(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewOrderRow::from(draft);
        let drafts = draft.items();

        let (row, item_rows) = conn
            .transaction(|conn| {
                async move {
                    let row: OrderRow = diesel::insert_into(orders::table)
                        .values(&new_row)
                        .returning(OrderRow::as_returning())
                        .get_result(conn)
                        .await?;
                    let item_rows = insert_items(conn, row.id, drafts).await?;
                    Ok((row, item_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(order_id = row.id, items = item_rows.len(), "order row inserted");
        row_to_order(row, item_rows)
    }

    async fn update(&self, order: &Order) -> Result<Order, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let order_id = order.id();
        let changes = OrderUpdate::from(order);

        let updated = conn
            .transaction(|conn| {
                async move {
                    let row: Option<OrderRow> = diesel::update(orders::table.find(order_id))
                        .set(&changes)
                        .returning(OrderRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    match row {
                        Some(row) => attach_items(conn, vec![row]).await,
                        None => Ok(Vec::new()),
                    }
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows_to_orders(updated)?
            .pop()
            .ok_or_else(|| OrderRepositoryError::missing(order_id))
    }

    async fn update_with_items(
        &self,
        order: &Order,
        drafts: &[ItemDraft],
    ) -> Result<Order, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let order_id = order.id();
        let changes = OrderUpdate::from(order);

        let replaced = conn
            .transaction(|conn| {
                async move {
                    let row: Option<OrderRow> = diesel::update(orders::table.find(order_id))
                        .set(&changes)
                        .returning(OrderRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    let Some(row) = row else {
                        return Ok(None);
                    };
                    diesel::delete(items::table.filter(items::order_id.eq(order_id)))
                        .execute(conn)
                        .await?;
                    let item_rows = insert_items(conn, order_id, drafts).await?;
                    Ok(Some((row, item_rows)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let (row, item_rows) = replaced.ok_or_else(|| OrderRepositoryError::missing(order_id))?;
        debug!(order_id, items = item_rows.len(), "order and items rewritten");
        row_to_order(row, item_rows)
    }

    async fn delete(&self, order_id: i32) -> Result<(), OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(orders::table.find(order_id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(order_id, removed, "order delete executed");
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Order>, OrderRepositoryError> {
        self.load_orders(|| orders::table.into_boxed()).await
    }

    async fn find(&self, order_id: i32) -> Result<Option<Order>, OrderRepositoryError> {
        let mut found = self
            .load_orders(move || orders::table.filter(orders::id.eq(order_id)).into_boxed())
            .await?;
        Ok(found.pop())
    }

    async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<Order>, OrderRepositoryError> {
        self.load_orders(move || {
            orders::table
                .filter(orders::customer_id.eq(customer_id))
                .into_boxed()
        })
        .await
    }

    async fn find_by_status(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        self.load_orders(move || {
            orders::table
                .filter(orders::status.eq(status.as_str()))
                .into_boxed()
        })
        .await
    }

    async fn find_by_item(&self, product_id: i32) -> Result<Vec<Order>, OrderRepositoryError> {
        self.load_orders(move || {
            orders::table
                .filter(
                    orders::id.eq_any(
                        items::table
                            .filter(items::product_id.eq(product_id))
                            .select(items::order_id),
                    ),
                )
                .into_boxed()
        })
        .await
    }
}
