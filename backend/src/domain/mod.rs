//! Domain primitives, ports and services.
//!
//! Purpose: Define strongly typed entities shared by the HTTP and persistence
//! layers, together with the services that sit between them. Keep types
//! immutable and document serialisation contracts (serde) on each type.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, EmailAddress, NewUser: user identity keyed by email.
//! - Order, OrderRecord, OrderDraft, Product: orders and their products.
//! - UsersServiceImpl, OrdersServiceImpl: driving port implementations.

pub mod error;
pub mod order;
pub mod orders_service;
pub mod ports;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::order::{Order, OrderDraft, OrderId, OrderRecord, Product, SerializedProducts};
pub use self::orders_service::OrdersServiceImpl;
pub use self::user::{EmailAddress, NewUser, User, UserId, UserValidationError};
pub use self::users_service::UsersServiceImpl;
