//! Role extractors
//!
//! `CustomerActor` / `VendorActor` resolve the caller through the state's
//! authenticator and reject tokens of the other role.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::{AppError, ErrorCode};

use super::Actor;
use crate::security_log;
use crate::state::AppState;

/// Authenticated customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerActor {
    pub id: i64,
    pub email: String,
}

/// Authenticated vendor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorActor {
    pub id: i64,
    pub van_name: String,
}

fn resolve_actor(parts: &mut Parts, state: &AppState) -> Result<Actor, AppError> {
    if let Some(actor) = parts.extensions.get::<Actor>() {
        return Ok(actor.clone());
    }
    let actor = state.authenticator.resolve(&parts.headers).inspect_err(|_| {
        security_log!("WARN", "auth_rejected", uri = parts.uri.to_string());
    })?;
    parts.extensions.insert(actor.clone());
    Ok(actor)
}

impl FromRequestParts<AppState> for CustomerActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_actor(parts, state)? {
            Actor::Customer { id, email } => Ok(CustomerActor { id, email }),
            Actor::Vendor { .. } => Err(AppError::with_message(
                ErrorCode::RoleRequired,
                "Customer login required",
            )),
        }
    }
}

impl FromRequestParts<AppState> for VendorActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_actor(parts, state)? {
            Actor::Vendor { id, van_name } => Ok(VendorActor { id, van_name }),
            Actor::Customer { .. } => Err(AppError::with_message(
                ErrorCode::RoleRequired,
                "Vendor login required",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Authenticator;
    use crate::auth::rate_limit::RateLimiter;
    use crate::auth::{JwtConfig, JwtService};
    use http::{HeaderMap, Request};
    use std::sync::Arc;

    /// Accepts `Authorization: customer` / `vendor`, nothing else
    struct StaticAuthenticator;

    impl Authenticator for StaticAuthenticator {
        fn resolve(&self, headers: &HeaderMap) -> Result<Actor, AppError> {
            match headers
                .get(http::header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
            {
                Some("customer") => Ok(Actor::Customer {
                    id: 1,
                    email: "c@example.com".into(),
                }),
                Some("vendor") => Ok(Actor::Vendor {
                    id: 2,
                    van_name: "Van".into(),
                }),
                _ => Err(AppError::not_authenticated()),
            }
        }
    }

    async fn create_test_state() -> AppState {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .connect_lazy("sqlite::memory:")
            .unwrap();
        let jwt = JwtService::with_config(JwtConfig {
            secret: "unused-secret-unused-secret-unused".into(),
            expiration_minutes: 5,
            issuer: "i".into(),
            audience: "a".into(),
        });
        AppState {
            pool,
            authenticator: Arc::new(StaticAuthenticator),
            jwt: Arc::new(jwt),
            rate_limiter: RateLimiter::new(),
        }
    }

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/test");
        if let Some(value) = auth {
            builder = builder.header(http::header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_customer_extractor() {
        let state = create_test_state().await;
        let mut parts = parts_with(Some("customer"));
        let actor = CustomerActor::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(actor.id, 1);
        assert!(parts.extensions.get::<Actor>().is_some());
    }

    #[tokio::test]
    async fn test_customer_extractor_rejects_vendor() {
        let state = create_test_state().await;
        let mut parts = parts_with(Some("vendor"));
        let err = CustomerActor::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RoleRequired);
    }

    #[tokio::test]
    async fn test_vendor_extractor() {
        let state = create_test_state().await;
        let mut parts = parts_with(Some("vendor"));
        let actor = VendorActor::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(actor.van_name, "Van");
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let state = create_test_state().await;
        let mut parts = parts_with(None);
        let err = VendorActor::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }
}
