//! Order lifecycle
//!
//! Pure transitions over [`Order`]: `Outstanding -> Fulfilled -> Picked up`.
//! Every function takes `now` in Unix millis and returns the new order value;
//! persisting it is the caller's job.

use shared::error::{AppError, ErrorCode};
use shared::models::{DISCOUNT_WINDOW_MINUTES, Order, OrderItem, OrderStatus, Vendor};
use shared::util::format_time_display;
use thiserror::Error;

const MILLIS_PER_MINUTE: i64 = 60_000;
const MIN_RATE: i64 = 1;
const MAX_RATE: i64 = 5;

/// Lifecycle rule violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Missing {0}")]
    MissingField(&'static str),

    #[error("Order must contain at least one snack")]
    EmptyOrder,

    #[error("Invalid quantity {quantity:?} for snack {snack_id}")]
    InvalidQuantity { snack_id: String, quantity: String },

    #[error("Invalid order status: {0:?}")]
    InvalidStatus(String),

    #[error("No longer be able to change order")]
    Locked,

    #[error("{0}")]
    NotOwner(&'static str),

    #[error("rating has to range from 1-5")]
    RatingOutOfRange(i64),

    #[error("Rate after pick up")]
    NotPickedUp,
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::MissingField(field) => AppError::missing_field(field),
            LifecycleError::EmptyOrder => AppError::new(ErrorCode::OrderEmpty),
            LifecycleError::InvalidQuantity { snack_id, quantity } => {
                AppError::new(ErrorCode::InvalidQuantity)
                    .with_detail("snack_id", snack_id)
                    .with_detail("quantity", quantity)
            }
            LifecycleError::InvalidStatus(value) => {
                AppError::new(ErrorCode::InvalidOrderStatus).with_detail("order_status", value)
            }
            LifecycleError::Locked => AppError::new(ErrorCode::OrderLocked),
            LifecycleError::NotOwner(msg) => AppError::not_owner(msg),
            LifecycleError::RatingOutOfRange(rate) => {
                AppError::new(ErrorCode::RatingOutOfRange).with_detail("rate", rate)
            }
            LifecycleError::NotPickedUp => AppError::new(ErrorCode::RateBeforePickup),
        }
    }
}

/// Whole minutes from `since` to `now`, never negative.
pub fn elapsed_minutes(now: i64, since: i64) -> i64 {
    (now - since).div_euclid(MILLIS_PER_MINUTE).max(0)
}

/// A new order before storage assigns its number
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub customer_id: i64,
    pub vendor_id: i64,
    pub snacks: Vec<OrderItem>,
    pub order_time: i64,
    pub time_display: String,
    pub order_status: OrderStatus,
    pub remain_time: i64,
    pub remain_time_until_discount: i64,
    pub discount: bool,
}

impl OrderDraft {
    pub fn into_order(self, order_no: i64) -> Order {
        Order {
            order_no,
            customer_id: self.customer_id,
            vendor_id: self.vendor_id,
            snacks: self.snacks,
            order_time: self.order_time,
            time_display: self.time_display,
            order_status: self.order_status,
            remain_time: self.remain_time,
            remain_time_until_discount: self.remain_time_until_discount,
            discount: self.discount,
            rate: None,
            comment: None,
        }
    }
}

/// Result of a customer modification attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ModifyOutcome {
    /// Edit applied
    Updated(Order),
    /// Window closed or status terminal: only `discount` and `remain_time`
    /// were corrected. Persist, then reject the request.
    Locked(Order),
}

/// Read-time view of an order
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    /// The order with derived fields filled in
    pub order: Order,
    /// The discount window lapsed and storage still says `discount = false`
    pub discount_lapsed: bool,
}

fn validate_snacks(snacks: &[OrderItem]) -> Result<(), LifecycleError> {
    if snacks.is_empty() {
        return Err(LifecycleError::EmptyOrder);
    }
    for item in snacks {
        if item.snack_id.trim().is_empty() {
            return Err(LifecycleError::MissingField("snack ID"));
        }
        match item.quantity.trim().parse::<u32>() {
            Ok(q) if q > 0 => {}
            _ => {
                return Err(LifecycleError::InvalidQuantity {
                    snack_id: item.snack_id.clone(),
                    quantity: item.quantity.clone(),
                });
            }
        }
    }
    Ok(())
}

fn parse_status(status: Option<&str>) -> Result<OrderStatus, LifecycleError> {
    let raw = status.ok_or(LifecycleError::MissingField("order status"))?;
    raw.parse()
        .map_err(|_| LifecycleError::InvalidStatus(raw.to_string()))
}

/// Start a new order against `vendor`.
pub fn create_order(
    customer_id: i64,
    vendor: &Vendor,
    snacks: Vec<OrderItem>,
    now: i64,
) -> Result<OrderDraft, LifecycleError> {
    validate_snacks(&snacks)?;

    Ok(OrderDraft {
        customer_id,
        vendor_id: vendor.id,
        snacks,
        order_time: now,
        time_display: format_time_display(now),
        order_status: OrderStatus::Outstanding,
        remain_time: vendor.time_limit,
        remain_time_until_discount: DISCOUNT_WINDOW_MINUTES,
        discount: false,
    })
}

/// Customer edit (also used for cancel).
///
/// `time_limit` is the owning vendor's edit window in minutes.
pub fn modify_order(
    order: &Order,
    customer_id: i64,
    time_limit: i64,
    snacks: Option<Vec<OrderItem>>,
    status: Option<&str>,
    now: i64,
) -> Result<ModifyOutcome, LifecycleError> {
    if order.customer_id != customer_id {
        return Err(LifecycleError::NotOwner(
            "You can't change another customer's order",
        ));
    }

    let remain = time_limit - elapsed_minutes(now, order.order_time);
    if remain <= 0 || order.order_status.is_terminal() {
        let mut locked = order.clone();
        locked.discount = true;
        locked.remain_time = 0;
        return Ok(ModifyOutcome::Locked(locked));
    }

    let new_status = parse_status(status)?;
    if let Some(ref items) = snacks {
        validate_snacks(items)?;
    }

    let mut updated = order.clone();
    if let Some(items) = snacks {
        updated.snacks = items;
    }
    updated.order_status = new_status;
    updated.remain_time = remain;
    updated.remain_time_until_discount = DISCOUNT_WINDOW_MINUTES;
    updated.discount = false;
    updated.order_time = now;
    Ok(ModifyOutcome::Updated(updated))
}

/// Vendor sets the status of one of its own orders. Time fields are untouched.
pub fn set_status_by_vendor(
    order: &Order,
    vendor_id: i64,
    status: Option<&str>,
) -> Result<Order, LifecycleError> {
    if order.vendor_id != vendor_id {
        return Err(LifecycleError::NotOwner(
            "You can't change another vendor's order status",
        ));
    }
    let new_status = parse_status(status)?;

    let mut updated = order.clone();
    updated.order_status = new_status;
    Ok(updated)
}

/// Derive the time fields shown to clients. Has no side effects; pair with
/// `db::orders::persist_discount_if_lapsed` to record a lapsed window.
pub fn derive_display_state(order: &Order, now: i64) -> DisplayState {
    let until_discount = DISCOUNT_WINDOW_MINUTES - elapsed_minutes(now, order.order_time);
    let lapsed = until_discount <= 0;

    let mut view = order.clone();
    view.remain_time_until_discount = until_discount.max(0);
    view.remain_time = view.remain_time_until_discount;
    let discount_lapsed = lapsed && !order.discount;
    if lapsed {
        view.discount = true;
    }

    DisplayState {
        order: view,
        discount_lapsed,
    }
}

/// Record a rating once the order has been picked up.
pub fn rate_order(
    order: &Order,
    customer_id: i64,
    rate: Option<i64>,
    comment: Option<String>,
) -> Result<Order, LifecycleError> {
    if order.customer_id != customer_id {
        return Err(LifecycleError::NotOwner("You can't rate another customer's order"));
    }
    let rate = rate.ok_or(LifecycleError::MissingField("rate"))?;
    if !(MIN_RATE..=MAX_RATE).contains(&rate) {
        return Err(LifecycleError::RatingOutOfRange(rate));
    }
    if order.order_status != OrderStatus::PickedUp {
        return Err(LifecycleError::NotPickedUp);
    }

    let mut rated = order.clone();
    rated.rate = Some(rate);
    if comment.is_some() {
        rated.comment = comment;
    }
    Ok(rated)
}
