use crate::db::ListFilter;
use crate::models::{Guest, GuestRequest};
use sqlx::{PgPool, Postgres, QueryBuilder};

const GUEST_COLUMNS: &str = "id, facility_id, active, comments, favorite, first_name, last_name";

/// Guests of one facility; the name filter matches first or last name
pub async fn list_guests(
    pool: &PgPool,
    facility_id: i64,
    filter: &ListFilter,
) -> Result<Vec<Guest>, sqlx::Error> {
    let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM guests WHERE facility_id = ", GUEST_COLUMNS));
    query.push_bind(facility_id);
    if filter.active_only {
        query.push(" AND active = TRUE");
    }
    if let Some(name) = &filter.name {
        let pattern = format!("%{}%", name);
        query
            .push(" AND (first_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR last_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    query
        .push(" ORDER BY last_name, first_name LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.offset);

    query.build_query_as::<Guest>().fetch_all(pool).await
}

pub async fn get_guest(
    pool: &PgPool,
    facility_id: i64,
    guest_id: i64,
) -> Result<Option<Guest>, sqlx::Error> {
    sqlx::query_as::<_, Guest>(&format!(
        "SELECT {} FROM guests WHERE facility_id = $1 AND id = $2",
        GUEST_COLUMNS
    ))
    .bind(facility_id)
    .bind(guest_id)
    .fetch_optional(pool)
    .await
}

/// Guests by id, used to attach guests to a page of checkins
pub async fn list_guests_by_ids(pool: &PgPool, guest_ids: &[i64]) -> Result<Vec<Guest>, sqlx::Error> {
    sqlx::query_as::<_, Guest>(&format!(
        "SELECT {} FROM guests WHERE id = ANY($1)",
        GUEST_COLUMNS
    ))
    .bind(guest_ids)
    .fetch_all(pool)
    .await
}

/// Case-insensitive exact match on the name pair
pub async fn get_guest_by_name(
    pool: &PgPool,
    facility_id: i64,
    first_name: &str,
    last_name: &str,
) -> Result<Option<Guest>, sqlx::Error> {
    sqlx::query_as::<_, Guest>(&format!(
        r#"
        SELECT {} FROM guests
        WHERE facility_id = $1
          AND lower(first_name) = lower($2)
          AND lower(last_name) = lower($3)
        "#,
        GUEST_COLUMNS
    ))
    .bind(facility_id)
    .bind(first_name)
    .bind(last_name)
    .fetch_optional(pool)
    .await
}

pub async fn insert_guest(
    pool: &PgPool,
    facility_id: i64,
    req: &GuestRequest,
) -> Result<Guest, sqlx::Error> {
    sqlx::query_as::<_, Guest>(&format!(
        r#"
        INSERT INTO guests (facility_id, active, comments, favorite, first_name, last_name)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {}
        "#,
        GUEST_COLUMNS
    ))
    .bind(facility_id)
    .bind(req.active)
    .bind(&req.comments)
    .bind(&req.favorite)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .fetch_one(pool)
    .await
}

pub async fn update_guest(
    pool: &PgPool,
    facility_id: i64,
    guest_id: i64,
    req: &GuestRequest,
) -> Result<Option<Guest>, sqlx::Error> {
    sqlx::query_as::<_, Guest>(&format!(
        r#"
        UPDATE guests
        SET active = $3, comments = $4, favorite = $5, first_name = $6, last_name = $7
        WHERE facility_id = $1 AND id = $2
        RETURNING {}
        "#,
        GUEST_COLUMNS
    ))
    .bind(facility_id)
    .bind(guest_id)
    .bind(req.active)
    .bind(&req.comments)
    .bind(&req.favorite)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .fetch_optional(pool)
    .await
}

pub async fn delete_guest(
    pool: &PgPool,
    facility_id: i64,
    guest_id: i64,
) -> Result<Option<Guest>, sqlx::Error> {
    sqlx::query_as::<_, Guest>(&format!(
        "DELETE FROM guests WHERE facility_id = $1 AND id = $2 RETURNING {}",
        GUEST_COLUMNS
    ))
    .bind(facility_id)
    .bind(guest_id)
    .fetch_optional(pool)
    .await
}
