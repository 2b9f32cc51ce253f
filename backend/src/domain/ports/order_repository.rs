//! Port abstraction for order persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{OrderDraft, OrderRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by order repository adapters.
    pub enum OrderPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "order repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Orders whose `userid` equals `user_id`, in insertion order.
    async fn list_for_user(&self, user_id: UserId)
    -> Result<Vec<OrderRecord>, OrderPersistenceError>;

    /// Persist a draft and return the stored record with its generated id.
    async fn insert(&self, draft: &OrderDraft) -> Result<OrderRecord, OrderPersistenceError>;
}
