//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local repositories used when no database is
//!   configured and in tests
//!
//! Adapters only translate between domain types and storage
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
