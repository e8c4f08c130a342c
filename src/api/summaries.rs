use axum::{
    extract::{Json, Path, State},
    http::{header, HeaderValue},
    response::IntoResponse,
};

use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::models::Summary;

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}/summaries/{checkin_date_from}/{checkin_date_to}",
    tag = "summaries",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("checkin_date_from" = String, Path, description = "First date, YYYY-MM-DD"),
        ("checkin_date_to" = String, Path, description = "Last date, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, description = "One summary per date with checkins", body = [Summary]),
        (status = 400, description = "Malformed date range", body = crate::error::ErrorResponse),
        (status = 404, description = "No such facility", body = crate::error::ErrorResponse),
    )
)]
pub async fn daily_summaries(
    State(state): State<AppState>,
    Path((facility_id, from, to)): Path<(i64, String, String)>,
) -> AppResult<Json<Vec<Summary>>> {
    Ok(Json(state.summaries.daily(facility_id, &from, &to).await?))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}/summaries/{checkin_date_from}/{checkin_date_to}/monthly",
    tag = "summaries",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("checkin_date_from" = String, Path, description = "First date, YYYY-MM-DD"),
        ("checkin_date_to" = String, Path, description = "Last date, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, description = "One summary per month, labelled YYYY-MM", body = [Summary]),
        (status = 400, description = "Malformed date range", body = crate::error::ErrorResponse),
        (status = 404, description = "No such facility", body = crate::error::ErrorResponse),
    )
)]
pub async fn monthly_summaries(
    State(state): State<AppState>,
    Path((facility_id, from, to)): Path<(i64, String, String)>,
) -> AppResult<Json<Vec<Summary>>> {
    Ok(Json(state.summaries.monthly(facility_id, &from, &to).await?))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}/exports/checkins/{checkin_date_from}/{checkin_date_to}",
    tag = "summaries",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("checkin_date_from" = String, Path, description = "First date, YYYY-MM-DD"),
        ("checkin_date_to" = String, Path, description = "Last date, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, description = "Checkins as CSV", body = String, content_type = "text/csv"),
        (status = 400, description = "Malformed date range", body = crate::error::ErrorResponse),
        (status = 404, description = "No such facility", body = crate::error::ErrorResponse),
    )
)]
pub async fn export_checkins(
    State(state): State<AppState>,
    Path((facility_id, from, to)): Path<(i64, String, String)>,
) -> AppResult<impl IntoResponse> {
    let csv = state.exports.checkins_csv(facility_id, &from, &to).await?;
    let disposition = format!(
        "attachment; filename=\"checkins-{}-{}-{}.csv\"",
        facility_id, from, to
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| AppError::Internal(format!("Bad export file name: {}", e)))?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
