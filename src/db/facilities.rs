use crate::db::ListFilter;
use crate::models::{Facility, FacilityRequest};
use sqlx::{PgPool, Postgres, QueryBuilder};

const FACILITY_COLUMNS: &str =
    "id, active, address1, address2, city, email, name, phone, scope, state, zip_code";

/// List facilities, optionally active only and/or by name substring
pub async fn list_facilities(
    pool: &PgPool,
    filter: &ListFilter,
) -> Result<Vec<Facility>, sqlx::Error> {
    let mut query = QueryBuilder::<Postgres>::new(format!(
        "SELECT {} FROM facilities WHERE TRUE",
        FACILITY_COLUMNS
    ));
    if filter.active_only {
        query.push(" AND active = TRUE");
    }
    if let Some(name) = &filter.name {
        query.push(" AND name ILIKE ").push_bind(format!("%{}%", name));
    }
    query
        .push(" ORDER BY name LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.offset);

    query.build_query_as::<Facility>().fetch_all(pool).await
}

pub async fn get_facility(pool: &PgPool, facility_id: i64) -> Result<Option<Facility>, sqlx::Error> {
    sqlx::query_as::<_, Facility>(&format!(
        "SELECT {} FROM facilities WHERE id = $1",
        FACILITY_COLUMNS
    ))
    .bind(facility_id)
    .fetch_optional(pool)
    .await
}

/// Case-insensitive exact name match
pub async fn get_facility_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<Facility>, sqlx::Error> {
    sqlx::query_as::<_, Facility>(&format!(
        "SELECT {} FROM facilities WHERE lower(name) = lower($1)",
        FACILITY_COLUMNS
    ))
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn insert_facility(pool: &PgPool, req: &FacilityRequest) -> Result<Facility, sqlx::Error> {
    sqlx::query_as::<_, Facility>(&format!(
        r#"
        INSERT INTO facilities (active, address1, address2, city, email, name, phone, scope, state, zip_code)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {}
        "#,
        FACILITY_COLUMNS
    ))
    .bind(req.active)
    .bind(&req.address1)
    .bind(&req.address2)
    .bind(&req.city)
    .bind(&req.email)
    .bind(&req.name)
    .bind(&req.phone)
    .bind(&req.scope)
    .bind(&req.state)
    .bind(&req.zip_code)
    .fetch_one(pool)
    .await
}

pub async fn update_facility(
    pool: &PgPool,
    facility_id: i64,
    req: &FacilityRequest,
) -> Result<Option<Facility>, sqlx::Error> {
    sqlx::query_as::<_, Facility>(&format!(
        r#"
        UPDATE facilities
        SET active = $2, address1 = $3, address2 = $4, city = $5, email = $6,
            name = $7, phone = $8, scope = $9, state = $10, zip_code = $11
        WHERE id = $1
        RETURNING {}
        "#,
        FACILITY_COLUMNS
    ))
    .bind(facility_id)
    .bind(req.active)
    .bind(&req.address1)
    .bind(&req.address2)
    .bind(&req.city)
    .bind(&req.email)
    .bind(&req.name)
    .bind(&req.phone)
    .bind(&req.scope)
    .bind(&req.state)
    .bind(&req.zip_code)
    .fetch_optional(pool)
    .await
}

/// Returns the deleted facility; its guests, templates and checkins go with it
pub async fn delete_facility(pool: &PgPool, facility_id: i64) -> Result<Option<Facility>, sqlx::Error> {
    sqlx::query_as::<_, Facility>(&format!(
        "DELETE FROM facilities WHERE id = $1 RETURNING {}",
        FACILITY_COLUMNS
    ))
    .bind(facility_id)
    .fetch_optional(pool)
    .await
}
