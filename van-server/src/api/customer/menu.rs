//! Menu endpoints (public)

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Snack, SnackQuery};

use crate::api::ApiResult;
use crate::db;
use crate::state::AppState;

/// GET /api/customers/menu
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Snack>> {
    Ok(Json(db::snacks::list(&state.pool).await?))
}

/// GET /api/customers/menu/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Snack> {
    let snack = db::snacks::find_by_name(&state.pool, &name)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SnackNotFound).with_detail("name", name))?;
    Ok(Json(snack))
}

/// GET /api/customers/findSnackOrder?id=
pub async fn find_snack(
    State(state): State<AppState>,
    Query(query): Query<SnackQuery>,
) -> ApiResult<Snack> {
    let id = query.id.ok_or_else(|| AppError::missing_field("snack ID"))?;
    let snack = db::snacks::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SnackNotFound).with_detail("id", id))?;
    Ok(Json(snack))
}
