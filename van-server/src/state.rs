//! Application state

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::rate_limit::RateLimiter;
use crate::auth::{Authenticator, JwtService};
use crate::config::Config;
use crate::db::DbService;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Resolves the caller of each request
    pub authenticator: Arc<dyn Authenticator>,
    /// Issues tokens at signup/login
    pub jwt: Arc<JwtService>,
    /// Rate limiter for login/signup routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Open the database and wire the JWT authenticator
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_url).await?;
        Ok(Self::from_parts(db.pool, JwtService::with_config(config.jwt.clone())))
    }

    /// Build from an existing pool; `jwt` both issues and verifies tokens.
    pub fn from_parts(pool: SqlitePool, jwt: JwtService) -> Self {
        let jwt = Arc::new(jwt);
        Self {
            pool,
            authenticator: jwt.clone(),
            jwt,
            rate_limiter: RateLimiter::new(),
        }
    }

    /// Replace the authenticator (tests, alternative identity providers)
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }
}
