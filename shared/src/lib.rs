//! Shared types for the snack van backend
//!
//! Domain models, the unified error system and small utilities used by the
//! server crate and its tests.

pub mod error;
pub mod models;
pub mod util;
