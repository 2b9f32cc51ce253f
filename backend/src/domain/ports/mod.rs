//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters. Driving
//! ports (`*Service`) are implemented in the domain and consumed by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod order_repository;
mod orders_service;
mod user_repository;
mod users_service;

#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{OrderPersistenceError, OrderRepository};
#[cfg(test)]
pub use orders_service::MockOrdersService;
pub use orders_service::OrdersService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_service::MockUsersService;
pub use users_service::UsersService;
