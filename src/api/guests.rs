use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};

use crate::api::{params::ListParams, AppState};
use crate::error::AppResult;
use crate::models::{Guest, GuestRequest};

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}/guests",
    tag = "guests",
    params(("facility_id" = i64, Path, description = "Facility id"), ListParams),
    responses(
        (status = 200, description = "Matching guests", body = [Guest]),
        (status = 404, description = "No such facility", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_guests(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Guest>>> {
    Ok(Json(state.guests.all(facility_id, &params.into_filter()).await?))
}

#[utoipa::path(
    post,
    path = "/api/facilities/{facility_id}/guests",
    tag = "guests",
    params(("facility_id" = i64, Path, description = "Facility id")),
    request_body = GuestRequest,
    responses(
        (status = 201, description = "Inserted guest", body = Guest),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::error::ErrorResponse),
    )
)]
pub async fn insert_guest(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
    Json(req): Json<GuestRequest>,
) -> AppResult<(StatusCode, Json<Guest>)> {
    let guest = state.guests.insert(facility_id, req).await?;
    Ok((StatusCode::CREATED, Json(guest)))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}/guests/exact/{first_name}/{last_name}",
    tag = "guests",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("first_name" = String, Path, description = "Exact first name"),
        ("last_name" = String, Path, description = "Exact last name"),
    ),
    responses(
        (status = 200, description = "Guest", body = Guest),
        (status = 404, description = "No such guest", body = crate::error::ErrorResponse),
    )
)]
pub async fn exact_guest(
    State(state): State<AppState>,
    Path((facility_id, first_name, last_name)): Path<(i64, String, String)>,
) -> AppResult<Json<Guest>> {
    Ok(Json(state.guests.exact(facility_id, &first_name, &last_name).await?))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}/guests/{guest_id}",
    tag = "guests",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("guest_id" = i64, Path, description = "Guest id"),
    ),
    responses(
        (status = 200, description = "Guest", body = Guest),
        (status = 404, description = "No such guest", body = crate::error::ErrorResponse),
    )
)]
pub async fn find_guest(
    State(state): State<AppState>,
    Path((facility_id, guest_id)): Path<(i64, i64)>,
) -> AppResult<Json<Guest>> {
    Ok(Json(state.guests.find(facility_id, guest_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/facilities/{facility_id}/guests/{guest_id}",
    tag = "guests",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("guest_id" = i64, Path, description = "Guest id"),
    ),
    request_body = GuestRequest,
    responses(
        (status = 200, description = "Updated guest", body = Guest),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 404, description = "No such guest", body = crate::error::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_guest(
    State(state): State<AppState>,
    Path((facility_id, guest_id)): Path<(i64, i64)>,
    Json(req): Json<GuestRequest>,
) -> AppResult<Json<Guest>> {
    Ok(Json(state.guests.update(facility_id, guest_id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/api/facilities/{facility_id}/guests/{guest_id}",
    tag = "guests",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("guest_id" = i64, Path, description = "Guest id"),
    ),
    responses(
        (status = 200, description = "Removed guest", body = Guest),
        (status = 400, description = "Guest still has checkins", body = crate::error::ErrorResponse),
        (status = 404, description = "No such guest", body = crate::error::ErrorResponse),
    )
)]
pub async fn remove_guest(
    State(state): State<AppState>,
    Path((facility_id, guest_id)): Path<(i64, i64)>,
) -> AppResult<Json<Guest>> {
    Ok(Json(state.guests.remove(facility_id, guest_id).await?))
}
