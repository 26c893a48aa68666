//! van-server: snack van ordering backend
//!
//! - Customer and vendor accounts (JWT authenticated)
//! - Shared snack menu
//! - Order lifecycle with time-window locking and discount tracking
//! - Nearest ready vendor search

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod middleware;
pub mod orders;
pub mod ranking;
pub mod state;
pub mod util;
pub mod validation;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;

/// Security event log, emitted under the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::warn!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
