//! Driving port for user use-cases.
//!
//! HTTP handlers and the authentication extractor call this port; they never
//! see persistence errors, only domain [`Error`] values with fixed messages.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, NewUser, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// List every user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Resolve the user for `email`, creating it on first sight.
    async fn find_or_save(&self, email: &EmailAddress) -> Result<User, Error>;

    /// Explicitly create a user. `None` models an absent payload.
    async fn save_user(&self, data: Option<NewUser>) -> Result<User, Error>;
}
