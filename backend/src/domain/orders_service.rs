//! Order domain service.
//!
//! Implements [`OrdersService`] on top of an [`OrderRepository`]. Stored
//! product lists are decoded on the way out; drafts are persisted exactly as
//! the caller serialised them.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{OrderRepository, OrdersService};
use crate::domain::{Error, Order, OrderDraft, OrderRecord, UserId};

const SAVE_FAILED: &str = "Failed to save order";

/// Orders service implementing the driving port.
#[derive(Clone)]
pub struct OrdersServiceImpl<R> {
    repo: Arc<R>,
}

impl<R> OrdersServiceImpl<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn list_failed(user_id: UserId) -> Error {
    Error::internal(format!("Failed to retrieve orders for user: {user_id}"))
}

#[async_trait]
impl<R> OrdersService for OrdersServiceImpl<R>
where
    R: OrderRepository,
{
    async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, Error> {
        let records = self.repo.list_for_user(user_id).await.map_err(|cause| {
            error!(error = %cause, %user_id, "order lookup failed");
            list_failed(user_id)
        })?;

        records
            .into_iter()
            .map(|record| {
                let order_id = record.id;
                record.into_order().map_err(|cause| {
                    error!(error = %cause, %user_id, %order_id, "stored products failed to decode");
                    list_failed(user_id)
                })
            })
            .collect()
    }

    async fn save_order(&self, data: Option<OrderDraft>) -> Result<OrderRecord, Error> {
        let Some(draft) = data else {
            error!("{SAVE_FAILED}: no order data supplied");
            return Err(Error::internal(SAVE_FAILED));
        };

        let record = self.repo.insert(&draft).await.map_err(|cause| {
            error!(error = %cause, userid = %draft.userid, "{SAVE_FAILED}");
            Error::internal(SAVE_FAILED)
        })?;

        info!(
            order_id = %record.id,
            userid = %record.userid,
            products = record.products.as_str(),
            "New order saved"
        );
        Ok(record)
    }
}

#[cfg(test)]
#[path = "orders_service_tests.rs"]
mod tests;
