//! Numeric error codes
//!
//! The thousands digit selects the [`ErrorCategory`](super::ErrorCategory):
//! 0 general, 1 auth, 2 permission, 3 account, 4 order, 5 menu, 6 location,
//! 9 system. Codes are part of the wire contract; never renumber.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error code carried in every error body, serialized as a bare number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // General
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    /// A required request field was absent
    RequiredField = 7,
    ValueOutOfRange = 8,

    // Auth
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    TokenInvalid = 1004,
    TooManyAttempts = 1005,

    // Permission
    /// Order or account belongs to someone else
    NotResourceOwner = 2001,
    /// Customer token on a vendor endpoint, or the reverse
    RoleRequired = 2002,

    // Account
    CustomerNotFound = 3001,
    VendorNotFound = 3002,
    EmailAlreadyExists = 3003,
    VanNameExists = 3004,
    PasswordPolicy = 3005,
    IncorrectPassword = 3006,

    // Order
    OrderNotFound = 4001,
    /// Edit window closed or order already fulfilled
    OrderLocked = 4002,
    RateBeforePickup = 4003,
    InvalidOrderStatus = 4004,
    RatingOutOfRange = 4005,
    OrderEmpty = 4006,
    InvalidQuantity = 4007,

    // Menu
    SnackNotFound = 5001,

    // Location
    InvalidCoordinates = 6001,

    // System
    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    const ALL: [ErrorCode; 29] = [
        Self::ValidationFailed,
        Self::NotFound,
        Self::AlreadyExists,
        Self::RequiredField,
        Self::ValueOutOfRange,
        Self::NotAuthenticated,
        Self::InvalidCredentials,
        Self::TokenExpired,
        Self::TokenInvalid,
        Self::TooManyAttempts,
        Self::NotResourceOwner,
        Self::RoleRequired,
        Self::CustomerNotFound,
        Self::VendorNotFound,
        Self::EmailAlreadyExists,
        Self::VanNameExists,
        Self::PasswordPolicy,
        Self::IncorrectPassword,
        Self::OrderNotFound,
        Self::OrderLocked,
        Self::RateBeforePickup,
        Self::InvalidOrderStatus,
        Self::RatingOutOfRange,
        Self::OrderEmpty,
        Self::InvalidQuantity,
        Self::SnackNotFound,
        Self::InvalidCoordinates,
        Self::InternalError,
        Self::DatabaseError,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default client-facing message
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::RequiredField => "Required field is missing",
            Self::ValueOutOfRange => "Value is out of range",

            Self::NotAuthenticated => "Login required",
            Self::InvalidCredentials => "Incorrect username or password",
            Self::TokenExpired => "Session expired, please log in again",
            Self::TokenInvalid => "Invalid authentication token",
            Self::TooManyAttempts => "Too many requests, try again later",

            Self::NotResourceOwner => "Resource belongs to another account",
            Self::RoleRequired => "Account role not allowed for this endpoint",

            Self::CustomerNotFound => "Customer not found",
            Self::VendorNotFound => "Vendor not found",
            Self::EmailAlreadyExists => "Customer with that email already exists",
            Self::VanNameExists => "Vendor with that name already exists",
            Self::PasswordPolicy => {
                "Password must be longer than 8 characters and contain a letter and a digit"
            }
            Self::IncorrectPassword => "Incorrect password",

            Self::OrderNotFound => "Order not found",
            Self::OrderLocked => "No longer be able to change order",
            Self::RateBeforePickup => "Rate after pick up",
            Self::InvalidOrderStatus => "Invalid order status",
            Self::RatingOutOfRange => "rating has to range from 1-5",
            Self::OrderEmpty => "Order must contain at least one snack",
            Self::InvalidQuantity => "Snack quantity must be a positive integer",

            Self::SnackNotFound => "Snack not found",

            Self::InvalidCoordinates => "Invalid coordinates",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown error code {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|code| code.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
