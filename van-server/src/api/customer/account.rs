//! Customer account endpoints

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{Customer, CustomerProfile};
use shared::util::{now_millis, snowflake_id};
use validator::Validate;

use crate::api::ApiResult;
use crate::auth::{Actor, CustomerActor};
use crate::db;
use crate::security_log;
use crate::state::AppState;
use crate::util::{check_password_policy, hash_or_internal, verify_password};
use crate::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, require_text, validate_optional_text,
    validate_payload,
};

/// Token plus the profile it was issued for
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerAuthResponse {
    pub token: String,
    #[serde(flatten)]
    pub customer: CustomerProfile,
}

fn issue_token(state: &AppState, customer: &Customer) -> Result<String, AppError> {
    let actor = Actor::Customer {
        id: customer.id,
        email: customer.email.clone(),
    };
    state.jwt.generate_token(&actor).map_err(|e| {
        tracing::error!(error = %e, "JWT creation failed");
        AppError::internal("Failed to issue token")
    })
}

async fn load_customer(state: &AppState, id: i64) -> Result<Customer, crate::ServiceError> {
    db::customers::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound).into())
}

/// POST /api/customers/signup
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<CustomerAuthResponse> {
    let email = require_text(&req.email, "email", MAX_EMAIL_LEN)?;
    let password = require_text(&req.password, "password", MAX_PASSWORD_LEN)?;
    let given_name = require_text(&req.given_name, "given name", MAX_NAME_LEN)?;
    let family_name = require_text(&req.family_name, "family name", MAX_NAME_LEN)?;
    validate_payload(&req)?;
    check_password_policy(password)?;

    let customer = Customer {
        id: snowflake_id(),
        email: email.trim().to_lowercase(),
        password_hash: hash_or_internal(password)?,
        given_name: given_name.trim().to_string(),
        family_name: family_name.trim().to_string(),
    };
    db::customers::insert(&state.pool, &customer, now_millis()).await?;
    tracing::info!(customer_id = customer.id, "Customer signed up");

    Ok(Json(CustomerAuthResponse {
        token: issue_token(&state, &customer)?,
        customer: CustomerProfile::from(&customer),
    }))
}

/// POST /api/customers/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<CustomerAuthResponse> {
    let email = require_text(&req.email, "email", MAX_EMAIL_LEN)?;
    let password = require_text(&req.password, "password", MAX_PASSWORD_LEN)?;
    validate_payload(&req)?;

    let email = email.trim().to_lowercase();
    let customer = db::customers::find_by_email(&state.pool, &email).await?;
    let Some(customer) = customer.filter(|c| verify_password(password, &c.password_hash)) else {
        security_log!("WARN", "login_failed", role = "customer", email = email.as_str());
        return Err(AppError::invalid_credentials().into());
    };

    tracing::info!(customer_id = customer.id, "Customer logged in");
    Ok(Json(CustomerAuthResponse {
        token: issue_token(&state, &customer)?,
        customer: CustomerProfile::from(&customer),
    }))
}

/// POST /api/customers/changePassword
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: Option<String>,
    pub new_password: Option<String>,
}

pub async fn change_password(
    State(state): State<AppState>,
    actor: CustomerActor,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<CustomerProfile> {
    let password = require_text(&req.password, "password", MAX_PASSWORD_LEN)?;
    let new_password = require_text(&req.new_password, "new password", MAX_PASSWORD_LEN)?;

    let customer = load_customer(&state, actor.id).await?;
    if !verify_password(password, &customer.password_hash) {
        security_log!("WARN", "password_change_rejected", customer_id = customer.id);
        return Err(AppError::new(ErrorCode::IncorrectPassword).into());
    }
    check_password_policy(new_password)?;

    let hash = hash_or_internal(new_password)?;
    db::customers::update_password(&state.pool, customer.id, &hash).await?;
    tracing::info!(customer_id = customer.id, "Customer password changed");

    Ok(Json(CustomerProfile::from(&customer)))
}

/// POST /api/customers/changeName
#[derive(Debug, Deserialize)]
pub struct ChangeNameRequest {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

pub async fn change_name(
    State(state): State<AppState>,
    actor: CustomerActor,
    Json(req): Json<ChangeNameRequest>,
) -> ApiResult<CustomerProfile> {
    if req.given_name.is_none() && req.family_name.is_none() {
        return Err(AppError::missing_field("given name or family name").into());
    }
    validate_optional_text(&req.given_name, "given name", MAX_NAME_LEN)?;
    validate_optional_text(&req.family_name, "family name", MAX_NAME_LEN)?;

    let given_name = req.given_name.as_deref().map(str::trim);
    let family_name = req.family_name.as_deref().map(str::trim);
    if given_name.is_some_and(str::is_empty) || family_name.is_some_and(str::is_empty) {
        return Err(AppError::validation("Names must not be empty").into());
    }

    let updated = db::customers::update_name(&state.pool, actor.id, given_name, family_name).await?;
    if !updated {
        return Err(AppError::new(ErrorCode::CustomerNotFound).into());
    }

    let customer = load_customer(&state, actor.id).await?;
    Ok(Json(CustomerProfile::from(&customer)))
}

/// GET /api/customers/getCustomerByID/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<CustomerProfile> {
    let customer = load_customer(&state, id).await?;
    Ok(Json(CustomerProfile::from(&customer)))
}

/// GET /api/customers/getCustomerByToken
pub async fn get_by_token(
    State(state): State<AppState>,
    actor: CustomerActor,
) -> ApiResult<CustomerProfile> {
    let customer = load_customer(&state, actor.id).await?;
    Ok(Json(CustomerProfile::from(&customer)))
}
