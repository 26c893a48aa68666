//! Authentication
//!
//! Handlers never parse credentials themselves: an [`Authenticator`] held in
//! the app state resolves the caller, and the extractors in [`extractor`]
//! narrow the result to the role an endpoint needs.

pub mod extractor;
pub mod jwt;
pub mod rate_limit;

pub use extractor::{CustomerActor, VendorActor};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

use http::HeaderMap;
use shared::error::AppError;

use crate::security_log;

/// Resolved caller identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Customer { id: i64, email: String },
    Vendor { id: i64, van_name: String },
}

impl Actor {
    pub fn id(&self) -> i64 {
        match self {
            Actor::Customer { id, .. } | Actor::Vendor { id, .. } => *id,
        }
    }
}

/// Resolves the caller of a request from its headers.
pub trait Authenticator: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Result<Actor, AppError>;
}

impl Authenticator for JwtService {
    fn resolve(&self, headers: &HeaderMap) -> Result<Actor, AppError> {
        let header = headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match header {
            Some(value) => JwtService::extract_from_header(value)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => return Err(AppError::not_authenticated()),
        };

        let claims = self.validate_token(token).map_err(|e| {
            security_log!("WARN", "auth_failed", error = e.to_string());
            match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            }
        })?;

        Actor::try_from(claims)
            .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {e}")))
    }
}
