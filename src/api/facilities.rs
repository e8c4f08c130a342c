use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};

use crate::api::{params::ListParams, AppState};
use crate::error::AppResult;
use crate::models::{Facility, FacilityRequest};

#[utoipa::path(
    get,
    path = "/api/facilities",
    tag = "facilities",
    params(ListParams),
    responses((status = 200, description = "Matching facilities", body = [Facility]))
)]
pub async fn list_facilities(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Facility>>> {
    Ok(Json(state.facilities.all(&params.into_filter()).await?))
}

#[utoipa::path(
    post,
    path = "/api/facilities",
    tag = "facilities",
    request_body = FacilityRequest,
    responses(
        (status = 201, description = "Inserted facility", body = Facility),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::error::ErrorResponse),
    )
)]
pub async fn insert_facility(
    State(state): State<AppState>,
    Json(req): Json<FacilityRequest>,
) -> AppResult<(StatusCode, Json<Facility>)> {
    let facility = state.facilities.insert(req).await?;
    Ok((StatusCode::CREATED, Json(facility)))
}

#[utoipa::path(
    get,
    path = "/api/facilities/exact/{name}",
    tag = "facilities",
    params(("name" = String, Path, description = "Exact facility name, case-insensitive")),
    responses(
        (status = 200, description = "Facility", body = Facility),
        (status = 404, description = "No such facility", body = crate::error::ErrorResponse),
    )
)]
pub async fn exact_facility(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Facility>> {
    Ok(Json(state.facilities.exact(&name).await?))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}",
    tag = "facilities",
    params(("facility_id" = i64, Path, description = "Facility id")),
    responses(
        (status = 200, description = "Facility", body = Facility),
        (status = 404, description = "No such facility", body = crate::error::ErrorResponse),
    )
)]
pub async fn find_facility(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
) -> AppResult<Json<Facility>> {
    Ok(Json(state.facilities.find(facility_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/facilities/{facility_id}",
    tag = "facilities",
    params(("facility_id" = i64, Path, description = "Facility id")),
    request_body = FacilityRequest,
    responses(
        (status = 200, description = "Updated facility", body = Facility),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 404, description = "No such facility", body = crate::error::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_facility(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
    Json(req): Json<FacilityRequest>,
) -> AppResult<Json<Facility>> {
    Ok(Json(state.facilities.update(facility_id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/api/facilities/{facility_id}",
    tag = "facilities",
    params(("facility_id" = i64, Path, description = "Facility id")),
    responses(
        (status = 200, description = "Removed facility, with its guests, templates and checkins", body = Facility),
        (status = 404, description = "No such facility", body = crate::error::ErrorResponse),
    )
)]
pub async fn remove_facility(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
) -> AppResult<Json<Facility>> {
    Ok(Json(state.facilities.remove(facility_id).await?))
}
