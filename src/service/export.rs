use bigdecimal::BigDecimal;
use chrono::NaiveTime;
use sqlx::PgPool;

use crate::db::{self, CheckinExportRow};
use crate::error::{AppError, AppResult};
use crate::service::validation;

const HEADER: [&str; 12] = [
    "id",
    "checkinDate",
    "matNumber",
    "features",
    "guestId",
    "firstName",
    "lastName",
    "paymentType",
    "paymentAmount",
    "showerTime",
    "wakeupTime",
    "comments",
];

pub struct ExportService {
    pool: PgPool,
}

impl ExportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// CSV of a facility's checkins in `[from, to]`
    pub async fn checkins_csv(&self, facility_id: i64, from: &str, to: &str) -> AppResult<String> {
        let (from, to) = validation::validate_date_range(from, to)?;
        db::get_facility(&self.pool, facility_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("facilityId: Missing Facility {}", facility_id)))?;

        let rows = db::list_export_rows(&self.pool, facility_id, from, to).await?;
        tracing::info!("Exporting {} checkins for facility {}", rows.len(), facility_id);
        write_csv(&rows).map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))
    }
}

fn option_to_csv<T: ToString>(val: &Option<T>) -> String {
    val.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

fn amount_to_csv(val: &Option<BigDecimal>) -> String {
    val.as_ref().map(|v| v.with_scale(2).to_string()).unwrap_or_default()
}

fn time_to_csv(val: &Option<NaiveTime>) -> String {
    val.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

pub fn write_csv(rows: &[CheckinExportRow]) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for row in rows {
        writer.write_record(&[
            row.id.to_string(),
            row.checkin_date.format("%Y-%m-%d").to_string(),
            row.mat_number.to_string(),
            option_to_csv(&row.features),
            option_to_csv(&row.guest_id),
            option_to_csv(&row.first_name),
            option_to_csv(&row.last_name),
            option_to_csv(&row.payment_type),
            amount_to_csv(&row.payment_amount),
            time_to_csv(&row.shower_time),
            time_to_csv(&row.wakeup_time),
            option_to_csv(&row.comments),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    #[test]
    fn rows_are_written_under_header() {
        let rows = vec![
            CheckinExportRow {
                id: 1,
                checkin_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                mat_number: 1,
                features: Some("H".to_string()),
                guest_id: Some(5),
                first_name: Some("Fred".to_string()),
                last_name: Some("Flintstone, Sr.".to_string()),
                payment_type: Some("$$".to_string()),
                payment_amount: Some(BigDecimal::from_str("5").unwrap()),
                shower_time: NaiveTime::from_hms_opt(5, 30, 0),
                wakeup_time: None,
                comments: None,
            },
            CheckinExportRow {
                id: 2,
                checkin_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                mat_number: 2,
                features: None,
                guest_id: None,
                first_name: None,
                last_name: None,
                payment_type: None,
                payment_amount: None,
                shower_time: None,
                wakeup_time: None,
                comments: None,
            },
        ];

        let csv = write_csv(&rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,checkinDate,matNumber"));
        assert_eq!(
            lines[1],
            "1,2024-03-09,1,H,5,Fred,\"Flintstone, Sr.\",$$,5.00,05:30,,"
        );
        assert_eq!(lines[2], "2,2024-03-09,2,,,,,,,,,");
    }
}
