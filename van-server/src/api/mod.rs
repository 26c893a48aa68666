//! HTTP API
//!
//! Customer routes live under `/api/customers`, vendor routes under
//! `/api/vendors`. Login and signup are rate limited per client IP.

pub mod customer;
pub mod health;
pub mod vendor;

use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use shared::error::{AppError, ErrorCode};
use shared::models::Order;

use crate::auth::rate_limit::{login_rate_limit, signup_rate_limit};
use crate::db;
use crate::error::ServiceError;
use crate::middleware::log_request;
use crate::orders;
use crate::state::AppState;

/// Handler result: JSON body on success, `ErrorBody` otherwise
pub type ApiResult<T> = Result<Json<T>, ServiceError>;

/// Look up an order by the number a request supplied
pub(crate) async fn load_order(
    state: &AppState,
    order_no: Option<i64>,
) -> Result<Order, ServiceError> {
    let order_no = order_no.ok_or_else(|| AppError::missing_field("order number"))?;
    db::orders::find_by_no(&state.pool, order_no)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::OrderNotFound)
                .with_detail("order_no", order_no)
                .into()
        })
}

/// Display state of each order, without recording lapsed windows
pub(crate) fn for_display(list: Vec<Order>, now: i64) -> Vec<Order> {
    list.iter()
        .map(|o| orders::derive_display_state(o, now).order)
        .collect()
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::permissive();
    };
    match HeaderValue::from_str(origin) {
        Ok(value) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(value))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        Err(e) => {
            tracing::warn!(origin, error = %e, "Invalid CORS_ORIGIN, allowing any origin");
            CorsLayer::permissive()
        }
    }
}

/// Create the full router
pub fn create_router(state: AppState, cors_origin: Option<&str>) -> Router {
    let login = Router::new()
        .route("/api/customers/login", post(customer::account::login))
        .route("/api/vendors/login", post(vendor::account::login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));

    let signup = Router::new()
        .route("/api/customers/signup", post(customer::account::signup))
        .route("/api/vendors/signup", post(vendor::account::signup))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            signup_rate_limit,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(login)
        .merge(signup)
        .merge(customer::router())
        .merge(vendor::router())
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}
