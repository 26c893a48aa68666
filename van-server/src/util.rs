//! Password helpers

use shared::error::{AppError, ErrorCode};

/// Minimum password length is this plus one
const PASSWORD_MIN_EXCLUSIVE: usize = 8;

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// More than 8 characters, at least one letter and one digit.
pub fn check_password_policy(password: &str) -> Result<(), AppError> {
    let long_enough = password.chars().count() > PASSWORD_MIN_EXCLUSIVE;
    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if long_enough && has_letter && has_digit {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::PasswordPolicy,
            "Password must be longer than 8 characters and contain letters and digits",
        ))
    }
}

/// Hash a password that already passed policy checks
pub fn hash_or_internal(password: &str) -> Result<String, AppError> {
    hash_password(password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::internal("Failed to hash password")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("snacks4ever").unwrap();
        assert!(verify_password("snacks4ever", &hash));
        assert!(!verify_password("snacks4never", &hash));
        assert!(!verify_password("snacks4ever", "not-a-phc-string"));
    }

    #[test]
    fn test_password_policy() {
        assert!(check_password_policy("abcdefgh1").is_ok());
        // Exactly 8 characters
        assert!(check_password_policy("abcdefg1").is_err());
        assert!(check_password_policy("abcdefghij").is_err());
        assert!(check_password_policy("1234567890").is_err());

        let err = check_password_policy("short1").unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordPolicy);
    }
}
