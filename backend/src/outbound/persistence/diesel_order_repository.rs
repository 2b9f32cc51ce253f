//! PostgreSQL-backed `OrderRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OrderPersistenceError, OrderRepository};
use crate::domain::{OrderDraft, OrderRecord, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewOrderRow, OrderRow};
use super::pool::{DbPool, PoolError};
use super::schema::orders;

/// Diesel-backed implementation of the [`OrderRepository`] port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> OrderPersistenceError {
    map_pool_error(error, OrderPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> OrderPersistenceError {
    map_diesel_error(
        error,
        |message| OrderPersistenceError::query(message),
        |message| OrderPersistenceError::connection(message),
    )
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderRecord>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = orders::table
            .filter(orders::userid.eq(user_id.get()))
            .order(orders::id.asc())
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(OrderRecord::from).collect())
    }

    async fn insert(&self, draft: &OrderDraft) -> Result<OrderRecord, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::insert_into(orders::table)
            .values(NewOrderRow {
                userid: draft.userid.get(),
                products: draft.products.as_str(),
            })
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(row.into())
    }
}
