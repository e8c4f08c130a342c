use crate::db::ListFilter;
use crate::models::{Template, TemplateRequest};
use sqlx::{PgPool, Postgres, QueryBuilder};

const TEMPLATE_COLUMNS: &str =
    "id, facility_id, active, all_mats, comments, handicap_mats, name, socket_mats, work_mats";

pub async fn list_templates(
    pool: &PgPool,
    facility_id: i64,
    filter: &ListFilter,
) -> Result<Vec<Template>, sqlx::Error> {
    let mut query = QueryBuilder::<Postgres>::new(format!(
        "SELECT {} FROM templates WHERE facility_id = ",
        TEMPLATE_COLUMNS
    ));
    query.push_bind(facility_id);
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

    query.build_query_as::<Template>().fetch_all(pool).await
}

pub async fn get_template(
    pool: &PgPool,
    facility_id: i64,
    template_id: i64,
) -> Result<Option<Template>, sqlx::Error> {
    sqlx::query_as::<_, Template>(&format!(
        "SELECT {} FROM templates WHERE facility_id = $1 AND id = $2",
        TEMPLATE_COLUMNS
    ))
    .bind(facility_id)
    .bind(template_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_template_by_name(
    pool: &PgPool,
    facility_id: i64,
    name: &str,
) -> Result<Option<Template>, sqlx::Error> {
    sqlx::query_as::<_, Template>(&format!(
        "SELECT {} FROM templates WHERE facility_id = $1 AND lower(name) = lower($2)",
        TEMPLATE_COLUMNS
    ))
    .bind(facility_id)
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn insert_template(
    pool: &PgPool,
    facility_id: i64,
    req: &TemplateRequest,
) -> Result<Template, sqlx::Error> {
    sqlx::query_as::<_, Template>(&format!(
        r#"
        INSERT INTO templates (facility_id, active, all_mats, comments, handicap_mats, name, socket_mats, work_mats)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {}
        "#,
        TEMPLATE_COLUMNS
    ))
    .bind(facility_id)
    .bind(req.active)
    .bind(&req.all_mats)
    .bind(&req.comments)
    .bind(&req.handicap_mats)
    .bind(&req.name)
    .bind(&req.socket_mats)
    .bind(&req.work_mats)
    .fetch_one(pool)
    .await
}

pub async fn update_template(
    pool: &PgPool,
    facility_id: i64,
    template_id: i64,
    req: &TemplateRequest,
) -> Result<Option<Template>, sqlx::Error> {
    sqlx::query_as::<_, Template>(&format!(
        r#"
        UPDATE templates
        SET active = $3, all_mats = $4, comments = $5, handicap_mats = $6,
            name = $7, socket_mats = $8, work_mats = $9
        WHERE facility_id = $1 AND id = $2
        RETURNING {}
        "#,
        TEMPLATE_COLUMNS
    ))
    .bind(facility_id)
    .bind(template_id)
    .bind(req.active)
    .bind(&req.all_mats)
    .bind(&req.comments)
    .bind(&req.handicap_mats)
    .bind(&req.name)
    .bind(&req.socket_mats)
    .bind(&req.work_mats)
    .fetch_optional(pool)
    .await
}

pub async fn delete_template(
    pool: &PgPool,
    facility_id: i64,
    template_id: i64,
) -> Result<Option<Template>, sqlx::Error> {
    sqlx::query_as::<_, Template>(&format!(
        "DELETE FROM templates WHERE facility_id = $1 AND id = $2 RETURNING {}",
        TEMPLATE_COLUMNS
    ))
    .bind(facility_id)
    .bind(template_id)
    .fetch_optional(pool)
    .await
}
