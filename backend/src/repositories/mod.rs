//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod role;
pub mod user;

pub use role::RoleRepository;
pub use user::{UserRecord, UserRepository};
