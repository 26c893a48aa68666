//! Error categories, one per thousand-block of codes

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Domain an [`ErrorCode`] belongs to, taken from its leading digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    /// Customer and vendor accounts
    Account,
    Order,
    Menu,
    Location,
    /// Internal failures; logged at ERROR when returned
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            3 => Self::Account,
            4 => Self::Order,
            5 => Self::Menu,
            6 => Self::Location,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1000), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(6999), ErrorCategory::Location);
        assert_eq!(ErrorCategory::from_code(7000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::NotResourceOwner.category(), ErrorCategory::Permission);
        assert_eq!(ErrorCode::VanNameExists.category(), ErrorCategory::Account);
        assert_eq!(ErrorCode::OrderLocked.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::InvalidCoordinates.category(), ErrorCategory::Location);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }
}
