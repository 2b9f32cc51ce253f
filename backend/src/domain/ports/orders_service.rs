//! Driving port for order use-cases.

use async_trait::async_trait;

use crate::domain::{Error, Order, OrderDraft, OrderRecord, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Orders placed by `user_id`, with product lists decoded.
    async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, Error>;

    /// Persist an order whose products are already serialised. `None` models
    /// an absent payload.
    async fn save_order(&self, data: Option<OrderDraft>) -> Result<OrderRecord, Error>;
}
