//! Process-local repositories.
//!
//! Used when no database URL is configured and by the integration tests.
//! Both stores mirror the PostgreSQL constraints that matter to callers:
//! emails are unique, and orders must reference an existing user.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    OrderPersistenceError, OrderRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{EmailAddress, OrderDraft, OrderId, OrderRecord, User, UserId};

#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory [`UserRepository`] keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table<User>>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Table<User>>, UserPersistenceError> {
        self.table
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))
    }

    fn exists(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.rows.iter().any(|user| user.id() == id))
    }

    fn insert_locked(table: &mut Table<User>, email: &EmailAddress) -> User {
        let user = User::new(UserId::new(table.allocate_id()), email.clone());
        table.rows.push(user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.clone())
    }

    async fn find_or_create(&self, email: &EmailAddress) -> Result<User, UserPersistenceError> {
        let mut table = self.lock()?;
        if let Some(user) = table.rows.iter().find(|user| user.email() == email) {
            return Ok(user.clone());
        }
        Ok(Self::insert_locked(&mut table, email))
    }

    async fn create(&self, email: &EmailAddress) -> Result<User, UserPersistenceError> {
        let mut table = self.lock()?;
        if table.rows.iter().any(|user| user.email() == email) {
            return Err(UserPersistenceError::query("unique constraint violated"));
        }
        Ok(Self::insert_locked(&mut table, email))
    }
}

/// In-memory [`OrderRepository`] checking user references against a
/// companion [`InMemoryUserRepository`].
#[derive(Debug)]
pub struct InMemoryOrderRepository {
    users: Arc<InMemoryUserRepository>,
    table: Mutex<Table<OrderRecord>>,
}

impl InMemoryOrderRepository {
    /// Create an empty order store bound to `users`.
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            users,
            table: Mutex::new(Table::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table<OrderRecord>>, OrderPersistenceError> {
        self.table
            .lock()
            .map_err(|_| OrderPersistenceError::connection("order store lock poisoned"))
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderRecord>, OrderPersistenceError> {
        Ok(self
            .lock()?
            .rows
            .iter()
            .filter(|order| order.userid == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, draft: &OrderDraft) -> Result<OrderRecord, OrderPersistenceError> {
        let known = self
            .users
            .exists(draft.userid)
            .map_err(|err| OrderPersistenceError::connection(err.to_string()))?;
        if !known {
            return Err(OrderPersistenceError::query(
                "referenced record does not exist",
            ));
        }

        let mut table = self.lock()?;
        let record = OrderRecord {
            id: OrderId::new(table.allocate_id()),
            userid: draft.userid,
            products: draft.products.clone(),
        };
        table.rows.push(record.clone());
        Ok(record)
    }
}
