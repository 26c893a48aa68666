//! Unified service-layer error type
//!
//! `ServiceError` bridges DB-layer errors (`sqlx::Error`, `BoxError`), engine
//! errors and the API-layer error (`AppError`), so handlers can use `?`
//! throughout.

use axum::response::IntoResponse;
use shared::error::AppError;

use crate::orders::LifecycleError;
use crate::ranking::RankingError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: storage errors (logged, surfaced as DatabaseError with the message)
/// - `App`: business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    /// Database or infrastructure error
    Db(BoxError),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<LifecycleError> for ServiceError {
    fn from(e: LifecycleError) -> Self {
        ServiceError::App(e.into())
    }
}

impl From<RankingError> for ServiceError {
    fn from(e: RankingError) -> Self {
        ServiceError::App(e.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::database(db_err.to_string())
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_db_error_passes_message_through() {
        let err: ServiceError = sqlx::Error::RowNotFound.into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert!(app.message.contains("no rows returned"));
    }

    #[test]
    fn test_app_error_is_transparent() {
        let err: ServiceError = AppError::new(ErrorCode::OrderNotFound).into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::OrderNotFound);
    }

    #[test]
    fn test_lifecycle_error_converts() {
        let err: ServiceError = LifecycleError::Locked.into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::OrderLocked);
    }
}
