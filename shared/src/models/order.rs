//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minutes after the last status change during which no discount applies.
pub const DISCOUNT_WINDOW_MINUTES: i64 = 15;

/// Order status
///
/// Wire values are exact-case: `"Outstanding"`, `"Fulfilled"`, `"Picked up"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Outstanding,
    Fulfilled,
    #[serde(rename = "Picked up")]
    PickedUp,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding",
            Self::Fulfilled => "Fulfilled",
            Self::PickedUp => "Picked up",
        }
    }

    /// Fulfilled and picked-up orders can no longer be edited by the customer.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Fulfilled | Self::PickedUp)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected status string (wrong case or unknown value)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0:?}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Outstanding" => Ok(Self::Outstanding),
            "Fulfilled" => Ok(Self::Fulfilled),
            "Picked up" => Ok(Self::PickedUp),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// One line of an order. Quantity travels as text and must hold a positive integer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub snack_id: String,
    pub quantity: String,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Sequential order number (assigned by storage)
    pub order_no: i64,
    pub customer_id: i64,
    pub vendor_id: i64,
    pub snacks: Vec<OrderItem>,
    /// Creation or last status change, Unix millis
    pub order_time: i64,
    /// `dd/mm/yyyy HH:MM` rendering of the creation time
    pub time_display: String,
    pub order_status: OrderStatus,
    /// Minutes left before the order locks
    pub remain_time: i64,
    /// Minutes left in the discount window
    pub remain_time_until_discount: i64,
    pub discount: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub vendor_id: Option<i64>,
    pub snacks: Option<Vec<OrderItem>>,
}

/// Customer modify / cancel payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    pub order_no: Option<i64>,
    pub snacks: Option<Vec<OrderItem>>,
    pub order_status: Option<String>,
}

/// Vendor status update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderStatusRequest {
    pub order_no: Option<i64>,
    pub order_status: Option<String>,
}

/// Rate experience payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateOrderRequest {
    pub order_no: Option<i64>,
    pub rate: Option<i64>,
    pub comment: Option<String>,
}

/// Order lookup query (`?order_no=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    pub order_no: Option<i64>,
}
