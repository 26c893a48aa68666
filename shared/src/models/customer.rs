//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub given_name: String,
    pub family_name: String,
}

/// Customer response (without password)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerProfile {
    pub id: i64,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
}

impl From<&Customer> for CustomerProfile {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            email: c.email.clone(),
            given_name: c.given_name.clone(),
            family_name: c.family_name.clone(),
        }
    }
}
