use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};

use crate::api::{params::CheckinParams, AppState};
use crate::error::{AppError, AppResult};
use crate::models::{AssignmentRequest, Checkin, CheckinRequest};

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}/checkins",
    tag = "checkins",
    params(("facility_id" = i64, Path, description = "Facility id"), CheckinParams),
    responses(
        (status = 200, description = "All mats of the night, by mat number", body = [Checkin]),
        (status = 400, description = "Missing or malformed date", body = crate::error::ErrorResponse),
        (status = 404, description = "No such facility", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_checkins(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
    Query(params): Query<CheckinParams>,
) -> AppResult<Json<Vec<Checkin>>> {
    let date = params
        .date
        .ok_or_else(|| AppError::BadRequest("date is required".to_string()))?;
    let checkins = state
        .checkins
        .for_date(facility_id, &date, params.with_guest.unwrap_or(false))
        .await?;
    Ok(Json(checkins))
}

#[utoipa::path(
    post,
    path = "/api/facilities/{facility_id}/checkins",
    tag = "checkins",
    params(("facility_id" = i64, Path, description = "Facility id")),
    request_body = CheckinRequest,
    responses(
        (status = 201, description = "Inserted checkin", body = Checkin),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 409, description = "Mat or guest already taken that night", body = crate::error::ErrorResponse),
    )
)]
pub async fn insert_checkin(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
    Json(req): Json<CheckinRequest>,
) -> AppResult<(StatusCode, Json<Checkin>)> {
    let checkin = state.checkins.insert(facility_id, req).await?;
    Ok((StatusCode::CREATED, Json(checkin)))
}

#[utoipa::path(
    post,
    path = "/api/facilities/{facility_id}/checkins/generate/{checkin_date}/{template_id}",
    tag = "checkins",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("checkin_date" = String, Path, description = "Night to generate, YYYY-MM-DD"),
        ("template_id" = i64, Path, description = "Template describing the mats"),
    ),
    responses(
        (status = 201, description = "Generated unassigned checkins", body = [Checkin]),
        (status = 400, description = "Bad date, bad template, or checkins already exist", body = crate::error::ErrorResponse),
        (status = 404, description = "No such template", body = crate::error::ErrorResponse),
    )
)]
pub async fn generate_checkins(
    State(state): State<AppState>,
    Path((facility_id, checkin_date, template_id)): Path<(i64, String, i64)>,
) -> AppResult<(StatusCode, Json<Vec<Checkin>>)> {
    let checkins = state
        .checkins
        .generate(facility_id, &checkin_date, template_id)
        .await?;
    Ok((StatusCode::CREATED, Json(checkins)))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}/checkins/{checkin_id}",
    tag = "checkins",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("checkin_id" = i64, Path, description = "Checkin id"),
        CheckinParams,
    ),
    responses(
        (status = 200, description = "Checkin", body = Checkin),
        (status = 404, description = "No such checkin", body = crate::error::ErrorResponse),
    )
)]
pub async fn find_checkin(
    State(state): State<AppState>,
    Path((facility_id, checkin_id)): Path<(i64, i64)>,
    Query(params): Query<CheckinParams>,
) -> AppResult<Json<Checkin>> {
    let checkin = state
        .checkins
        .find(facility_id, checkin_id, params.with_guest.unwrap_or(false))
        .await?;
    Ok(Json(checkin))
}

#[utoipa::path(
    put,
    path = "/api/facilities/{facility_id}/checkins/{checkin_id}",
    tag = "checkins",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("checkin_id" = i64, Path, description = "Checkin id"),
    ),
    request_body = CheckinRequest,
    responses(
        (status = 200, description = "Updated checkin", body = Checkin),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 404, description = "No such checkin", body = crate::error::ErrorResponse),
        (status = 409, description = "Mat or guest already taken that night", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_checkin(
    State(state): State<AppState>,
    Path((facility_id, checkin_id)): Path<(i64, i64)>,
    Json(req): Json<CheckinRequest>,
) -> AppResult<Json<Checkin>> {
    Ok(Json(state.checkins.update(facility_id, checkin_id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/api/facilities/{facility_id}/checkins/{checkin_id}",
    tag = "checkins",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("checkin_id" = i64, Path, description = "Checkin id"),
    ),
    responses(
        (status = 200, description = "Removed checkin", body = Checkin),
        (status = 404, description = "No such checkin", body = crate::error::ErrorResponse),
    )
)]
pub async fn remove_checkin(
    State(state): State<AppState>,
    Path((facility_id, checkin_id)): Path<(i64, i64)>,
) -> AppResult<Json<Checkin>> {
    Ok(Json(state.checkins.remove(facility_id, checkin_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/facilities/{facility_id}/checkins/{checkin_id}/assignment",
    tag = "checkins",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("checkin_id" = i64, Path, description = "Checkin id"),
    ),
    request_body = AssignmentRequest,
    responses(
        (status = 200, description = "Assigned checkin", body = Checkin),
        (status = 400, description = "Validation failure or unknown guest", body = crate::error::ErrorResponse),
        (status = 404, description = "No such checkin", body = crate::error::ErrorResponse),
        (status = 409, description = "Guest already holds a mat that night", body = crate::error::ErrorResponse),
    )
)]
pub async fn assign_checkin(
    State(state): State<AppState>,
    Path((facility_id, checkin_id)): Path<(i64, i64)>,
    Json(req): Json<AssignmentRequest>,
) -> AppResult<Json<Checkin>> {
    Ok(Json(state.checkins.assign(facility_id, checkin_id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/api/facilities/{facility_id}/checkins/{checkin_id}/assignment",
    tag = "checkins",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("checkin_id" = i64, Path, description = "Checkin id"),
    ),
    responses(
        (status = 200, description = "Unassigned checkin", body = Checkin),
        (status = 404, description = "No such checkin", body = crate::error::ErrorResponse),
    )
)]
pub async fn deassign_checkin(
    State(state): State<AppState>,
    Path((facility_id, checkin_id)): Path<(i64, i64)>,
) -> AppResult<Json<Checkin>> {
    Ok(Json(state.checkins.deassign(facility_id, checkin_id).await?))
}
