use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};

use crate::api::{params::ListParams, AppState};
use crate::error::AppResult;
use crate::models::{User, UserRequest};

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(ListParams),
    responses((status = 200, description = "Matching users", body = [User]))
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.all(&params.into_filter()).await?))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "Inserted user", body = User),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 409, description = "Username already in use", body = crate::error::ErrorResponse),
    )
)]
pub async fn insert_user(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.users.insert(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/exact/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Exact username")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "No such user", body = crate::error::ErrorResponse),
    )
)]
pub async fn exact_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.exact(&username).await?))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "No such user", body = crate::error::ErrorResponse),
    )
)]
pub async fn find_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.find(user_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User id")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 404, description = "No such user", body = crate::error::ErrorResponse),
        (status = 409, description = "Username already in use", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UserRequest>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.update(user_id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Removed user", body = User),
        (status = 404, description = "No such user", body = crate::error::ErrorResponse),
    )
)]
pub async fn remove_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.remove(user_id).await?))
}
