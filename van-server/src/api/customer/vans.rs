use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::NearbyVendor;

use crate::api::ApiResult;
use crate::db;
use crate::ranking::{parse_origin, rank_vendors};
use crate::state::AppState;

/// Raw coordinates; parsed by the ranking engine so bad input gets a
/// field-specific error instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// GET /api/customers/nearestVans?lat=&lon=
pub async fn nearest(
    State(state): State<AppState>,
    Query(query): Query<NearestQuery>,
) -> ApiResult<Vec<NearbyVendor>> {
    let origin = parse_origin(query.lat.as_deref(), query.lon.as_deref())?;
    let vendors = db::vendors::list_ready(&state.pool).await?;
    Ok(Json(rank_vendors(&vendors, origin)))
}
