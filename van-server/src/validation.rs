//! Input validation helpers
//!
//! Text length limits and the bridge from `validator` derive errors to
//! `AppError`.

use shared::error::AppError;
use validator::{Validate, ValidationErrors};

// ── Text length limits ──────────────────────────────────────────────

/// Customer given/family names, van names
pub const MAX_NAME_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Free-text location descriptions
pub const MAX_LOCATION_LEN: usize = 200;

/// Rating comments
pub const MAX_COMMENT_LEN: usize = 500;

/// Longest customer edit window a van may configure, in minutes
pub const MAX_TIME_LIMIT_MINUTES: i64 = 24 * 60;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is present, non-empty and within the
/// length limit. Absent values are reported as a missing field.
pub fn require_text<'a>(
    value: &'a Option<String>,
    field: &str,
    max_len: usize,
) -> Result<&'a str, AppError> {
    let Some(v) = value.as_deref() else {
        return Err(AppError::missing_field(field));
    };
    validate_required_text(v, field, max_len)?;
    Ok(v)
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Run `validator` derive rules, reporting the first failing field.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(first_error)
}

fn first_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let Some((field, errs)) = fields.into_iter().next() else {
        return AppError::validation("Invalid input");
    };
    let message = errs
        .first()
        .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| format!("Invalid {field}"));
    AppError::validation(message).with_detail("field", field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[derive(Validate)]
    struct Login {
        #[validate(email(message = "Invalid email"))]
        email: String,
    }

    #[test]
    fn test_require_text() {
        let missing: Option<String> = None;
        let err = require_text(&missing, "van name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Missing van name");

        let blank = Some("  ".to_string());
        let err = require_text(&blank, "van name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let ok = Some("Tasty".to_string());
        assert_eq!(require_text(&ok, "van name", MAX_NAME_LEN).unwrap(), "Tasty");
    }

    #[test]
    fn test_length_limits() {
        let long = "x".repeat(MAX_COMMENT_LEN + 1);
        assert!(validate_required_text(&long, "comment", MAX_COMMENT_LEN).is_err());
        assert!(validate_optional_text(&Some(long), "comment", MAX_COMMENT_LEN).is_err());
        assert!(validate_optional_text(&None, "comment", MAX_COMMENT_LEN).is_ok());
    }

    #[test]
    fn test_validate_payload_reports_message() {
        let err = validate_payload(&Login {
            email: "not-an-email".into(),
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid email");

        assert!(
            validate_payload(&Login {
                email: "amy@example.com".into()
            })
            .is_ok()
        );
    }
}
