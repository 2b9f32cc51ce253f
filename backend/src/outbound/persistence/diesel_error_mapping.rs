//! Diesel and pool error mapping shared by the repositories.
//!
//! Each repository passes its own `connection`/`query` constructors so the
//! classification lives in one place while the port error types stay
//! distinct.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool failures onto a repository connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel failures onto repository query or connection errors.
///
/// Driver messages are logged at debug level only; the returned error carries
/// a coarse description.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced record does not exist")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => query("database query error"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UserPersistenceError;
    use rstest::rstest;

    fn map(error: DieselError) -> UserPersistenceError {
        map_diesel_error(
            error,
            UserPersistenceError::query,
            UserPersistenceError::connection,
        )
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(
            map(DieselError::NotFound),
            UserPersistenceError::query("record not found")
        );
    }

    #[rstest]
    fn rollback_falls_back_to_generic_query_error() {
        assert_eq!(
            map(DieselError::RollbackTransaction),
            UserPersistenceError::query("database error")
        );
    }

    #[rstest]
    #[case(PoolError::checkout("timed out"), "timed out")]
    #[case(PoolError::build("bad url"), "bad url")]
    fn pool_errors_become_connection_errors(#[case] error: PoolError, #[case] message: &str) {
        assert_eq!(
            map_pool_error(error, UserPersistenceError::connection),
            UserPersistenceError::connection(message)
        );
    }
}
