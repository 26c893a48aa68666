//! Customer order endpoints

use axum::{
    Json,
    extract::{Query, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{NewOrderRequest, Order, OrderQuery, RateOrderRequest, UpdateOrderRequest};
use shared::util::now_millis;

use crate::api::{ApiResult, for_display, load_order};
use crate::auth::CustomerActor;
use crate::db;
use crate::orders::{self, ModifyOutcome};
use crate::security_log;
use crate::state::AppState;
use crate::validation::{MAX_COMMENT_LEN, validate_optional_text};

/// POST /api/customers/newOrder
pub async fn create(
    State(state): State<AppState>,
    actor: CustomerActor,
    Json(req): Json<NewOrderRequest>,
) -> ApiResult<Order> {
    let vendor_id = req
        .vendor_id
        .ok_or_else(|| AppError::missing_field("vendor ID"))?;
    let snacks = req.snacks.ok_or_else(|| AppError::missing_field("snacks"))?;

    let vendor = db::vendors::find_by_id(&state.pool, vendor_id)
        .await?
        .ok_or_else(|| {
            AppError::validation("vendor not found").with_detail("vendor_id", vendor_id)
        })?;

    let draft = orders::create_order(actor.id, &vendor, snacks, now_millis())?;
    let order = db::orders::insert(&state.pool, draft).await?;
    tracing::info!(
        order_no = order.order_no,
        customer_id = actor.id,
        vendor_id,
        "Order created"
    );
    Ok(Json(order))
}

/// POST /api/customers/updateOrder, POST /api/customers/cancelOrder
///
/// Once the van's edit window has run out (or the order is fulfilled) the
/// discount/remaining-time correction is stored and the request is rejected.
pub async fn modify(
    State(state): State<AppState>,
    actor: CustomerActor,
    Json(req): Json<UpdateOrderRequest>,
) -> ApiResult<Order> {
    let order = load_order(&state, req.order_no).await?;
    let vendor = db::vendors::find_by_id(&state.pool, order.vendor_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VendorNotFound))?;

    let outcome = orders::modify_order(
        &order,
        actor.id,
        vendor.time_limit,
        req.snacks,
        req.order_status.as_deref(),
        now_millis(),
    )
    .inspect_err(|e| {
        if matches!(e, orders::LifecycleError::NotOwner(_)) {
            security_log!(
                "WARN",
                "order_owner_mismatch",
                order_no = order.order_no,
                customer_id = actor.id
            );
        }
    })?;

    match outcome {
        ModifyOutcome::Updated(updated) => {
            db::orders::save(&state.pool, &updated).await?;
            tracing::info!(
                order_no = updated.order_no,
                customer_id = actor.id,
                status = %updated.order_status,
                "Order modified"
            );
            Ok(Json(updated))
        }
        ModifyOutcome::Locked(locked) => {
            db::orders::save(&state.pool, &locked).await?;
            tracing::info!(order_no = locked.order_no, "Modify rejected, order locked");
            Err(orders::LifecycleError::Locked.into())
        }
    }
}

/// GET /api/customers/viewOrder?order_no=
pub async fn view(
    State(state): State<AppState>,
    actor: CustomerActor,
    Query(query): Query<OrderQuery>,
) -> ApiResult<Order> {
    let order = load_order(&state, query.order_no).await?;
    if order.customer_id != actor.id {
        security_log!(
            "WARN",
            "order_owner_mismatch",
            order_no = order.order_no,
            customer_id = actor.id
        );
        return Err(AppError::not_owner("You can't view another customer's order").into());
    }

    let display = orders::derive_display_state(&order, now_millis());
    db::orders::persist_discount_if_lapsed(&state.pool, &display).await?;
    Ok(Json(display.order))
}

/// GET /api/customers/viewOutstandingOrders
pub async fn list_outstanding(
    State(state): State<AppState>,
    actor: CustomerActor,
) -> ApiResult<Vec<Order>> {
    let orders = db::orders::list_by_customer(&state.pool, actor.id, true).await?;
    Ok(Json(for_display(orders, now_millis())))
}

/// GET /api/customers/findAllOrder
pub async fn list_all(
    State(state): State<AppState>,
    actor: CustomerActor,
) -> ApiResult<Vec<Order>> {
    let orders = db::orders::list_by_customer(&state.pool, actor.id, false).await?;
    Ok(Json(for_display(orders, now_millis())))
}

/// POST /api/customers/rateExperience
pub async fn rate(
    State(state): State<AppState>,
    actor: CustomerActor,
    Json(req): Json<RateOrderRequest>,
) -> ApiResult<Order> {
    validate_optional_text(&req.comment, "comment", MAX_COMMENT_LEN)?;
    let order = load_order(&state, req.order_no).await?;

    let rated = orders::rate_order(&order, actor.id, req.rate, req.comment)?;
    db::orders::save(&state.pool, &rated).await?;
    tracing::info!(order_no = rated.order_no, rate = rated.rate, "Order rated");
    Ok(Json(rated))
}
