use sqlx::PgPool;

use crate::db;
use crate::error::{AppError, AppResult};
use crate::models::{roll_up_by_month, summarize_by_date, Summary};
use crate::service::validation;

pub struct SummaryService {
    pool: PgPool,
}

impl SummaryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One summary per date that has checkins in `[from, to]`
    pub async fn daily(&self, facility_id: i64, from: &str, to: &str) -> AppResult<Vec<Summary>> {
        let (from, to) = validation::validate_date_range(from, to)?;
        db::get_facility(&self.pool, facility_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("facilityId: Missing Facility {}", facility_id)))?;

        let checkins = db::list_checkins_between(&self.pool, facility_id, from, to).await?;
        let summaries = summarize_by_date(facility_id, &checkins);
        tracing::debug!(
            "Summarized {} checkins into {} days for facility {}",
            checkins.len(),
            summaries.len(),
            facility_id
        );
        Ok(summaries)
    }

    /// Daily summaries rolled up per calendar month
    pub async fn monthly(&self, facility_id: i64, from: &str, to: &str) -> AppResult<Vec<Summary>> {
        let daily = self.daily(facility_id, from, to).await?;
        Ok(roll_up_by_month(facility_id, &daily))
    }
}
