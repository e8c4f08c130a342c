use crate::db::ListFilter;
use crate::models::{User, UserRequest};
use sqlx::{PgPool, Postgres, QueryBuilder};

const USER_COLUMNS: &str = "id, active, name, scope, username";

pub async fn list_users(pool: &PgPool, filter: &ListFilter) -> Result<Vec<User>, sqlx::Error> {
    let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM users WHERE TRUE", USER_COLUMNS));
    if filter.active_only {
        query.push(" AND active = TRUE");
    }
    if let Some(name) = &filter.name {
        let pattern = format!("%{}%", name);
        query
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR username ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    query
        .push(" ORDER BY username LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.offset);

    query.build_query_as::<User>().fetch_all(pool).await
}

pub async fn get_user(pool: &PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_user_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE username = $1",
        USER_COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// `password_hash` is the already-hashed password
pub async fn insert_user(
    pool: &PgPool,
    req: &UserRequest,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (active, name, password, scope, username)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(req.active)
    .bind(&req.name)
    .bind(password_hash)
    .bind(&req.scope)
    .bind(&req.username)
    .fetch_one(pool)
    .await
}

/// A `None` hash keeps the stored password
pub async fn update_user(
    pool: &PgPool,
    user_id: i64,
    req: &UserRequest,
    password_hash: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET active = $2, name = $3, password = COALESCE($4, password), scope = $5, username = $6
        WHERE id = $1
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(user_id)
    .bind(req.active)
    .bind(&req.name)
    .bind(password_hash)
    .bind(&req.scope)
    .bind(&req.username)
    .fetch_optional(pool)
    .await
}

pub async fn delete_user(pool: &PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "DELETE FROM users WHERE id = $1 RETURNING {}",
        USER_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
