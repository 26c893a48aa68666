//! Server configuration

use crate::auth::jwt::{JwtConfig, generate_printable_secret};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Minimum JWT secret length outside development
const MIN_JWT_SECRET_LEN: usize = 32;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    /// SQLite connection URL (`sqlite:snackvan.db`, `sqlite::memory:`)
    pub database_url: String,
    /// Token signing settings
    pub jwt: JwtConfig,
    /// Fallback log filter when RUST_LOG is unset
    pub log_level: String,
    /// Directory for daily rolling log files
    pub log_dir: Option<String>,
    /// Allowed CORS origin; permissive when unset
    pub cors_origin: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set, non-empty and long enough in
    /// non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) if !v.is_empty() => v,
            _ => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                return Ok(generate_printable_secret());
            }
        };
        if val.len() < MIN_JWT_SECRET_LEN && environment != "development" {
            return Err(
                format!("{name} must be at least {MIN_JWT_SECRET_LEN} characters long").into(),
            );
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let expiration_minutes = match std::env::var("JWT_EXPIRATION_MINUTES") {
            Ok(v) => v
                .parse()
                .map_err(|_| format!("JWT_EXPIRATION_MINUTES is not a number: {v}"))?,
            Err(_) => 1440,
        };

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:snackvan.db".into()),
            jwt: JwtConfig {
                secret: Self::require_secret("JWT_SECRET", &environment)?,
                expiration_minutes,
                issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "van-server".into()),
                audience: std::env::var("JWT_AUDIENCE")
                    .unwrap_or_else(|_| "snack-van-clients".into()),
            },
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            cors_origin: std::env::var("CORS_ORIGIN").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
