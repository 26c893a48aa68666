//! Order storage
//!
//! `snacks` is kept as a JSON text column; `order_status` as its wire string.

use shared::models::{Order, OrderItem, OrderStatus};
use sqlx::SqlitePool;

use crate::orders::{DisplayState, OrderDraft};

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_no: i64,
    customer_id: i64,
    vendor_id: i64,
    snacks: String,
    order_time: i64,
    time_display: String,
    order_status: String,
    remain_time: i64,
    remain_time_until_discount: i64,
    discount: bool,
    rate: Option<i64>,
    comment: Option<String>,
}

impl TryFrom<OrderRow> for Order {
    type Error = sqlx::Error;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let snacks: Vec<OrderItem> = serde_json::from_str(&row.snacks)
            .map_err(|e| super::decode_error("orders.snacks", e))?;
        let order_status: OrderStatus = row
            .order_status
            .parse()
            .map_err(|e| super::decode_error("orders.order_status", e))?;
        Ok(Order {
            order_no: row.order_no,
            customer_id: row.customer_id,
            vendor_id: row.vendor_id,
            snacks,
            order_time: row.order_time,
            time_display: row.time_display,
            order_status,
            remain_time: row.remain_time,
            remain_time_until_discount: row.remain_time_until_discount,
            discount: row.discount,
            rate: row.rate,
            comment: row.comment,
        })
    }
}

const SELECT_ORDER: &str = "SELECT order_no, customer_id, vendor_id, snacks, order_time, \
     time_display, order_status, remain_time, remain_time_until_discount, discount, rate, \
     comment FROM orders";

fn encode_snacks(snacks: &[OrderItem]) -> Result<String, sqlx::Error> {
    serde_json::to_string(snacks).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

fn collect(rows: Vec<OrderRow>) -> Result<Vec<Order>, sqlx::Error> {
    rows.into_iter().map(Order::try_from).collect()
}

/// Store a new order; the AUTOINCREMENT sequence assigns its number.
pub async fn insert(pool: &SqlitePool, draft: OrderDraft) -> Result<Order, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO orders (customer_id, vendor_id, snacks, order_time, time_display, order_status, remain_time, remain_time_until_discount, discount)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(draft.customer_id)
    .bind(draft.vendor_id)
    .bind(encode_snacks(&draft.snacks)?)
    .bind(draft.order_time)
    .bind(&draft.time_display)
    .bind(draft.order_status.as_str())
    .bind(draft.remain_time)
    .bind(draft.remain_time_until_discount)
    .bind(draft.discount)
    .execute(pool)
    .await?;

    Ok(draft.into_order(result.last_insert_rowid()))
}

pub async fn find_by_no(pool: &SqlitePool, order_no: i64) -> Result<Option<Order>, sqlx::Error> {
    let row: Option<OrderRow> = sqlx::query_as(&format!("{SELECT_ORDER} WHERE order_no = ?"))
        .bind(order_no)
        .fetch_optional(pool)
        .await?;
    row.map(Order::try_from).transpose()
}

/// Write back every mutable field of an existing order
pub async fn save(pool: &SqlitePool, order: &Order) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE orders SET snacks = ?1, order_time = ?2, order_status = ?3, remain_time = ?4,
             remain_time_until_discount = ?5, discount = ?6, rate = ?7, comment = ?8
         WHERE order_no = ?9",
    )
    .bind(encode_snacks(&order.snacks)?)
    .bind(order.order_time)
    .bind(order.order_status.as_str())
    .bind(order.remain_time)
    .bind(order.remain_time_until_discount)
    .bind(order.discount)
    .bind(order.rate)
    .bind(&order.comment)
    .bind(order.order_no)
    .execute(pool)
    .await?;
    Ok(())
}

/// Record a lapsed discount window. No-op unless `state.discount_lapsed`.
pub async fn persist_discount_if_lapsed(
    pool: &SqlitePool,
    state: &DisplayState,
) -> Result<bool, sqlx::Error> {
    if !state.discount_lapsed {
        return Ok(false);
    }
    let result = sqlx::query("UPDATE orders SET discount = 1 WHERE order_no = ? AND discount = 0")
        .bind(state.order.order_no)
        .execute(pool)
        .await?;
    if result.rows_affected() > 0 {
        tracing::info!(order_no = state.order.order_no, "Discount window lapsed, recorded");
    }
    Ok(result.rows_affected() > 0)
}

/// A customer's orders, oldest first. `outstanding_only` keeps `Outstanding`.
pub async fn list_by_customer(
    pool: &SqlitePool,
    customer_id: i64,
    outstanding_only: bool,
) -> Result<Vec<Order>, sqlx::Error> {
    let rows: Vec<OrderRow> = if outstanding_only {
        sqlx::query_as(&format!(
            "{SELECT_ORDER} WHERE customer_id = ? AND order_status = ? ORDER BY order_no"
        ))
        .bind(customer_id)
        .bind(OrderStatus::Outstanding.as_str())
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as(&format!("{SELECT_ORDER} WHERE customer_id = ? ORDER BY order_no"))
            .bind(customer_id)
            .fetch_all(pool)
            .await?
    };
    collect(rows)
}

/// Orders a van still has to hand over, oldest `order_time` first
pub async fn vendor_current(pool: &SqlitePool, vendor_id: i64) -> Result<Vec<Order>, sqlx::Error> {
    let rows: Vec<OrderRow> = sqlx::query_as(&format!(
        "{SELECT_ORDER} WHERE vendor_id = ? AND order_status IN (?, ?) ORDER BY order_time, order_no"
    ))
    .bind(vendor_id)
    .bind(OrderStatus::Outstanding.as_str())
    .bind(OrderStatus::Fulfilled.as_str())
    .fetch_all(pool)
    .await?;
    collect(rows)
}

/// Every order of a van, newest number first
pub async fn vendor_history(pool: &SqlitePool, vendor_id: i64) -> Result<Vec<Order>, sqlx::Error> {
    let rows: Vec<OrderRow> =
        sqlx::query_as(&format!("{SELECT_ORDER} WHERE vendor_id = ? ORDER BY order_no DESC"))
            .bind(vendor_id)
            .fetch_all(pool)
            .await?;
    collect(rows)
}
