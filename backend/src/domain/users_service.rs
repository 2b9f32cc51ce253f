//! User domain service.
//!
//! Implements [`UsersService`] on top of a [`UserRepository`]. Persistence
//! failures are logged with their cause and replaced by fixed client-facing
//! messages.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersService};
use crate::domain::{EmailAddress, Error, NewUser, User};

const LIST_FAILED: &str = "Failed to retrieve users";
const SAVE_FAILED: &str = "Failed to save user";

/// Users service implementing the driving port.
#[derive(Clone)]
pub struct UsersServiceImpl<R> {
    repo: Arc<R>,
}

impl<R> UsersServiceImpl<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn log_cause(context: &str, cause: &UserPersistenceError) {
    error!(error = %cause, "{context}");
}

#[async_trait]
impl<R> UsersService for UsersServiceImpl<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repo.list_all().await.map_err(|cause| {
            log_cause(LIST_FAILED, &cause);
            Error::internal(LIST_FAILED)
        })
    }

    async fn find_or_save(&self, email: &EmailAddress) -> Result<User, Error> {
        match self.repo.find_or_create(email).await {
            Ok(user) => {
                info!(user_id = %user.id(), "User located or created with email: {email}");
                Ok(user)
            }
            Err(cause) => {
                let message = format!("Failed to retrieve or save user with email: {email}");
                log_cause(&message, &cause);
                Err(Error::internal(message))
            }
        }
    }

    async fn save_user(&self, data: Option<NewUser>) -> Result<User, Error> {
        let Some(NewUser { email }) = data else {
            error!("{SAVE_FAILED}: no user data supplied");
            return Err(Error::internal(SAVE_FAILED));
        };

        self.repo.create(&email).await.map_err(|cause| {
            log_cause(SAVE_FAILED, &cause);
            Error::internal(SAVE_FAILED)
        })
    }
}

#[cfg(test)]
#[path = "users_service_tests.rs"]
mod tests;
