//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every stored user.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Return the user owning `email`, creating it first when absent.
    ///
    /// Must be atomic: concurrent calls for the same address resolve to a
    /// single row.
    async fn find_or_create(&self, email: &EmailAddress) -> Result<User, UserPersistenceError>;

    /// Insert a new user. Fails when the address is already taken.
    async fn create(&self, email: &EmailAddress) -> Result<User, UserPersistenceError>;
}
