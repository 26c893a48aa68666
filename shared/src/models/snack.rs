//! Snack Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu entry, shared by all vendors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snack {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub photo: Option<String>,
}

/// Snack lookup query (`?id=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnackQuery {
    pub id: Option<i64>,
}
