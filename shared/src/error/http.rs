//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::NotFound
            | Self::CustomerNotFound
            | Self::VendorNotFound
            | Self::OrderNotFound
            | Self::SnackNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists | Self::EmailAlreadyExists | Self::VanNameExists => {
                StatusCode::CONFLICT
            }

            // Ownership failures are reported as 401 too
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::NotResourceOwner
            | Self::RoleRequired => StatusCode::UNAUTHORIZED,

            Self::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,

            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // Validation and business rule failures
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_code() {
        let cases = [
            (ErrorCode::OrderNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::SnackNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::EmailAlreadyExists, StatusCode::CONFLICT),
            (ErrorCode::VanNameExists, StatusCode::CONFLICT),
            (ErrorCode::TokenExpired, StatusCode::UNAUTHORIZED),
            (ErrorCode::NotResourceOwner, StatusCode::UNAUTHORIZED),
            (ErrorCode::RoleRequired, StatusCode::UNAUTHORIZED),
            (ErrorCode::TooManyAttempts, StatusCode::TOO_MANY_REQUESTS),
            (ErrorCode::DatabaseError, StatusCode::INTERNAL_SERVER_ERROR),
            (ErrorCode::OrderLocked, StatusCode::BAD_REQUEST),
            (ErrorCode::RatingOutOfRange, StatusCode::BAD_REQUEST),
            (ErrorCode::RequiredField, StatusCode::BAD_REQUEST),
            (ErrorCode::InvalidCoordinates, StatusCode::BAD_REQUEST),
        ];
        for (code, status) in cases {
            assert_eq!(code.http_status(), status, "{code:?}");
        }
    }
}
