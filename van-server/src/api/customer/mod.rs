//! Customer API

pub mod account;
pub mod menu;
pub mod order;
pub mod vans;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Customer routes other than login/signup
pub fn router() -> Router<AppState> {
    Router::new()
        // Account
        .route("/api/customers/changePassword", post(account::change_password))
        .route("/api/customers/changeName", post(account::change_name))
        .route("/api/customers/getCustomerByID/{id}", get(account::get_by_id))
        .route("/api/customers/getCustomerByToken", get(account::get_by_token))
        // Menu
        .route("/api/customers/menu", get(menu::list))
        .route("/api/customers/menu/{name}", get(menu::get_by_name))
        .route("/api/customers/findSnackOrder", get(menu::find_snack))
        // Orders
        .route("/api/customers/newOrder", post(order::create))
        .route("/api/customers/updateOrder", post(order::modify))
        .route("/api/customers/cancelOrder", post(order::modify))
        .route("/api/customers/viewOrder", get(order::view))
        .route("/api/customers/viewOutstandingOrders", get(order::list_outstanding))
        .route("/api/customers/findAllOrder", get(order::list_all))
        .route("/api/customers/rateExperience", post(order::rate))
        // Vans
        .route("/api/customers/nearestVans", get(vans::nearest))
}
