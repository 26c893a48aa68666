//! Data models
//!
//! Shared between the server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]` where
//! the columns map one-to-one; everything else is converted in the db layer.
//! All entity IDs are `i64`.

pub mod customer;
pub mod order;
pub mod snack;
pub mod vendor;

// Re-exports
pub use customer::*;
pub use order::*;
pub use snack::*;
pub use vendor::*;
