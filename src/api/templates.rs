use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};

use crate::api::{params::ListParams, AppState};
use crate::error::AppResult;
use crate::models::{Template, TemplateRequest};

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}/templates",
    tag = "templates",
    params(("facility_id" = i64, Path, description = "Facility id"), ListParams),
    responses(
        (status = 200, description = "Matching templates", body = [Template]),
        (status = 404, description = "No such facility", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_templates(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Template>>> {
    Ok(Json(state.templates.all(facility_id, &params.into_filter()).await?))
}

#[utoipa::path(
    post,
    path = "/api/facilities/{facility_id}/templates",
    tag = "templates",
    params(("facility_id" = i64, Path, description = "Facility id")),
    request_body = TemplateRequest,
    responses(
        (status = 201, description = "Inserted template", body = Template),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::error::ErrorResponse),
    )
)]
pub async fn insert_template(
    State(state): State<AppState>,
    Path(facility_id): Path<i64>,
    Json(req): Json<TemplateRequest>,
) -> AppResult<(StatusCode, Json<Template>)> {
    let template = state.templates.insert(facility_id, req).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}/templates/exact/{name}",
    tag = "templates",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("name" = String, Path, description = "Exact template name"),
    ),
    responses(
        (status = 200, description = "Template", body = Template),
        (status = 404, description = "No such template", body = crate::error::ErrorResponse),
    )
)]
pub async fn exact_template(
    State(state): State<AppState>,
    Path((facility_id, name)): Path<(i64, String)>,
) -> AppResult<Json<Template>> {
    Ok(Json(state.templates.exact(facility_id, &name).await?))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{facility_id}/templates/{template_id}",
    tag = "templates",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("template_id" = i64, Path, description = "Template id"),
    ),
    responses(
        (status = 200, description = "Template", body = Template),
        (status = 404, description = "No such template", body = crate::error::ErrorResponse),
    )
)]
pub async fn find_template(
    State(state): State<AppState>,
    Path((facility_id, template_id)): Path<(i64, i64)>,
) -> AppResult<Json<Template>> {
    Ok(Json(state.templates.find(facility_id, template_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/facilities/{facility_id}/templates/{template_id}",
    tag = "templates",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("template_id" = i64, Path, description = "Template id"),
    ),
    request_body = TemplateRequest,
    responses(
        (status = 200, description = "Updated template", body = Template),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 404, description = "No such template", body = crate::error::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_template(
    State(state): State<AppState>,
    Path((facility_id, template_id)): Path<(i64, i64)>,
    Json(req): Json<TemplateRequest>,
) -> AppResult<Json<Template>> {
    Ok(Json(state.templates.update(facility_id, template_id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/api/facilities/{facility_id}/templates/{template_id}",
    tag = "templates",
    params(
        ("facility_id" = i64, Path, description = "Facility id"),
        ("template_id" = i64, Path, description = "Template id"),
    ),
    responses(
        (status = 200, description = "Removed template", body = Template),
        (status = 404, description = "No such template", body = crate::error::ErrorResponse),
    )
)]
pub async fn remove_template(
    State(state): State<AppState>,
    Path((facility_id, template_id)): Path<(i64, i64)>,
) -> AppResult<Json<Template>> {
    Ok(Json(state.templates.remove(facility_id, template_id).await?))
}
