use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, PgConnection, PgPool};

use crate::models::{Checkin, CheckinValues};

const CHECKIN_COLUMNS: &str = "id, facility_id, checkin_date, comments, features, guest_id, \
    mat_number, payment_amount, payment_type, shower_time, wakeup_time";

/// Checkin joined with its guest's name, for exports
#[derive(Debug, Clone, FromRow)]
pub struct CheckinExportRow {
    pub id: i64,
    pub checkin_date: NaiveDate,
    pub mat_number: i32,
    pub features: Option<String>,
    pub guest_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub payment_type: Option<String>,
    pub payment_amount: Option<BigDecimal>,
    pub shower_time: Option<NaiveTime>,
    pub wakeup_time: Option<NaiveTime>,
    pub comments: Option<String>,
}

/// All mats of one facility for one night, by mat number
pub async fn list_checkins_for_date(
    pool: &PgPool,
    facility_id: i64,
    checkin_date: NaiveDate,
) -> Result<Vec<Checkin>, sqlx::Error> {
    sqlx::query_as::<_, Checkin>(&format!(
        r#"
        SELECT {} FROM checkins
        WHERE facility_id = $1 AND checkin_date = $2
        ORDER BY mat_number
        "#,
        CHECKIN_COLUMNS
    ))
    .bind(facility_id)
    .bind(checkin_date)
    .fetch_all(pool)
    .await
}

/// Checkins in an inclusive date range, by date then mat number
pub async fn list_checkins_between(
    pool: &PgPool,
    facility_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Checkin>, sqlx::Error> {
    sqlx::query_as::<_, Checkin>(&format!(
        r#"
        SELECT {} FROM checkins
        WHERE facility_id = $1 AND checkin_date BETWEEN $2 AND $3
        ORDER BY checkin_date, mat_number
        "#,
        CHECKIN_COLUMNS
    ))
    .bind(facility_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

pub async fn list_export_rows(
    pool: &PgPool,
    facility_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<CheckinExportRow>, sqlx::Error> {
    sqlx::query_as::<_, CheckinExportRow>(
        r#"
        SELECT c.id, c.checkin_date, c.mat_number, c.features, c.guest_id,
               g.first_name, g.last_name,
               c.payment_type, c.payment_amount, c.shower_time, c.wakeup_time, c.comments
        FROM checkins c
        LEFT JOIN guests g ON g.id = c.guest_id
        WHERE c.facility_id = $1 AND c.checkin_date BETWEEN $2 AND $3
        ORDER BY c.checkin_date, c.mat_number
        "#,
    )
    .bind(facility_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

pub async fn get_checkin(
    pool: &PgPool,
    facility_id: i64,
    checkin_id: i64,
) -> Result<Option<Checkin>, sqlx::Error> {
    sqlx::query_as::<_, Checkin>(&format!(
        "SELECT {} FROM checkins WHERE facility_id = $1 AND id = $2",
        CHECKIN_COLUMNS
    ))
    .bind(facility_id)
    .bind(checkin_id)
    .fetch_optional(pool)
    .await
}

/// The checkin holding a mat number on a date, if any
pub async fn get_checkin_by_mat(
    pool: &PgPool,
    facility_id: i64,
    checkin_date: NaiveDate,
    mat_number: i32,
) -> Result<Option<Checkin>, sqlx::Error> {
    sqlx::query_as::<_, Checkin>(&format!(
        "SELECT {} FROM checkins WHERE facility_id = $1 AND checkin_date = $2 AND mat_number = $3",
        CHECKIN_COLUMNS
    ))
    .bind(facility_id)
    .bind(checkin_date)
    .bind(mat_number)
    .fetch_optional(pool)
    .await
}

/// The checkin a guest already holds on a date, if any
pub async fn get_checkin_for_guest(
    pool: &PgPool,
    facility_id: i64,
    checkin_date: NaiveDate,
    guest_id: i64,
) -> Result<Option<Checkin>, sqlx::Error> {
    sqlx::query_as::<_, Checkin>(&format!(
        "SELECT {} FROM checkins WHERE facility_id = $1 AND checkin_date = $2 AND guest_id = $3",
        CHECKIN_COLUMNS
    ))
    .bind(facility_id)
    .bind(checkin_date)
    .bind(guest_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_checkin(
    pool: &PgPool,
    facility_id: i64,
    values: &CheckinValues,
) -> Result<Checkin, sqlx::Error> {
    sqlx::query_as::<_, Checkin>(&format!(
        r#"
        INSERT INTO checkins (facility_id, checkin_date, comments, features, guest_id,
                              mat_number, payment_amount, payment_type, shower_time, wakeup_time)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {}
        "#,
        CHECKIN_COLUMNS
    ))
    .bind(facility_id)
    .bind(values.checkin_date)
    .bind(&values.comments)
    .bind(&values.features)
    .bind(values.guest_id)
    .bind(values.mat_number)
    .bind(&values.payment_amount)
    .bind(&values.payment_type)
    .bind(values.shower_time)
    .bind(values.wakeup_time)
    .fetch_one(pool)
    .await
}

pub async fn update_checkin(
    pool: &PgPool,
    facility_id: i64,
    checkin_id: i64,
    values: &CheckinValues,
) -> Result<Option<Checkin>, sqlx::Error> {
    sqlx::query_as::<_, Checkin>(&format!(
        r#"
        UPDATE checkins
        SET checkin_date = $3, comments = $4, features = $5, guest_id = $6, mat_number = $7,
            payment_amount = $8, payment_type = $9, shower_time = $10, wakeup_time = $11
        WHERE facility_id = $1 AND id = $2
        RETURNING {}
        "#,
        CHECKIN_COLUMNS
    ))
    .bind(facility_id)
    .bind(checkin_id)
    .bind(values.checkin_date)
    .bind(&values.comments)
    .bind(&values.features)
    .bind(values.guest_id)
    .bind(values.mat_number)
    .bind(&values.payment_amount)
    .bind(&values.payment_type)
    .bind(values.shower_time)
    .bind(values.wakeup_time)
    .fetch_optional(pool)
    .await
}

pub async fn delete_checkin(
    pool: &PgPool,
    facility_id: i64,
    checkin_id: i64,
) -> Result<Option<Checkin>, sqlx::Error> {
    sqlx::query_as::<_, Checkin>(&format!(
        "DELETE FROM checkins WHERE facility_id = $1 AND id = $2 RETURNING {}",
        CHECKIN_COLUMNS
    ))
    .bind(facility_id)
    .bind(checkin_id)
    .fetch_optional(pool)
    .await
}

pub async fn count_checkins_for_date(
    conn: &mut PgConnection,
    facility_id: i64,
    checkin_date: NaiveDate,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT count(*) FROM checkins WHERE facility_id = $1 AND checkin_date = $2",
    )
    .bind(facility_id)
    .bind(checkin_date)
    .fetch_one(conn)
    .await
}

/// Rows per INSERT, bounded by Postgres's 65535 bind parameters (four per row)
const INSERT_CHUNK_SIZE: usize = 1000;

/// Bulk insert unassigned mats `(mat_number, features)` for one night
pub async fn insert_unassigned_batch(
    conn: &mut PgConnection,
    facility_id: i64,
    checkin_date: NaiveDate,
    mats: &[(i32, Option<String>)],
) -> Result<Vec<Checkin>, sqlx::Error> {
    if mats.is_empty() {
        return Ok(Vec::new());
    }

    tracing::debug!(
        "Building batch insert for {} mats in {} chunk(s)",
        mats.len(),
        mats.len().div_ceil(INSERT_CHUNK_SIZE)
    );
    let start_time = std::time::Instant::now();
    let mut inserted = Vec::with_capacity(mats.len());

    for chunk in mats.chunks(INSERT_CHUNK_SIZE) {
        let mut query_builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(
            "INSERT INTO checkins (facility_id, checkin_date, mat_number, features) ",
        );
        query_builder.push_values(chunk, |mut b, (mat_number, features)| {
            b.push_bind(facility_id)
                .push_bind(checkin_date)
                .push_bind(*mat_number)
                .push_bind(features.clone());
        });
        query_builder.push(format!(" RETURNING {}", CHECKIN_COLUMNS));

        let execute_result = tokio::time::timeout(
            std::time::Duration::from_secs(30),
            query_builder.build_query_as::<Checkin>().fetch_all(&mut *conn),
        )
        .await;

        match execute_result {
            Ok(Ok(rows)) => inserted.extend(rows),
            Ok(Err(e)) => {
                tracing::error!("Batch insert failed after {:?}: {:?}", start_time.elapsed(), e);
                return Err(e);
            }
            Err(_) => {
                tracing::error!("Batch insert timed out (>30s)");
                return Err(sqlx::Error::PoolTimedOut);
            }
        }
    }

    tracing::info!(
        "Inserted {} checkins for facility {} on {} in {:?}",
        inserted.len(),
        facility_id,
        checkin_date,
        start_time.elapsed()
    );
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BINDS_PER_ROW: usize = 4;
    const POSTGRES_MAX_BINDS: usize = u16::MAX as usize;

    #[test]
    fn insert_chunks_stay_under_the_bind_limit() {
        assert!(INSERT_CHUNK_SIZE * BINDS_PER_ROW <= POSTGRES_MAX_BINDS);
    }
}
