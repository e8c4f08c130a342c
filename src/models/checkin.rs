use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{normalize, Guest};

/// One mat for one night at a facility (`checkins` table).
/// An absent `guest_id` means the mat is unassigned.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Checkin {
    pub id: i64,
    pub facility_id: i64,
    pub checkin_date: NaiveDate,
    pub comments: Option<String>,
    /// Feature letters of the mat: H(andicap), S(ocket), W(ork)
    pub features: Option<String>,
    pub guest_id: Option<i64>,
    pub mat_number: i32,
    #[schema(value_type = Option<String>, example = "5.00")]
    pub payment_amount: Option<BigDecimal>,
    pub payment_type: Option<String>,
    #[schema(value_type = Option<String>, example = "05:30")]
    pub shower_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "06:00")]
    pub wakeup_time: Option<NaiveTime>,

    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<Guest>,
}

/// Insert/update body for a checkin. Dates and times arrive as text and are
/// validated by the service layer.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    #[schema(example = "2024-03-09")]
    pub checkin_date: String,
    pub comments: Option<String>,
    pub features: Option<String>,
    pub guest_id: Option<i64>,
    pub mat_number: i32,
    #[schema(value_type = Option<String>)]
    pub payment_amount: Option<BigDecimal>,
    pub payment_type: Option<String>,
    pub shower_time: Option<String>,
    pub wakeup_time: Option<String>,
}

impl CheckinRequest {
    pub fn normalized(self) -> Self {
        Self {
            checkin_date: self.checkin_date.trim().to_string(),
            comments: normalize(self.comments),
            features: normalize(self.features).map(|f| f.to_uppercase()),
            guest_id: self.guest_id,
            mat_number: self.mat_number,
            payment_amount: self.payment_amount,
            payment_type: normalize(self.payment_type),
            shower_time: normalize(self.shower_time),
            wakeup_time: normalize(self.wakeup_time),
        }
    }
}

/// Guest assignment for an existing checkin
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub guest_id: i64,
    pub comments: Option<String>,
    #[schema(value_type = Option<String>)]
    pub payment_amount: Option<BigDecimal>,
    pub payment_type: Option<String>,
    pub shower_time: Option<String>,
    pub wakeup_time: Option<String>,
}

impl AssignmentRequest {
    pub fn normalized(self) -> Self {
        Self {
            guest_id: self.guest_id,
            comments: normalize(self.comments),
            payment_amount: self.payment_amount,
            payment_type: normalize(self.payment_type),
            shower_time: normalize(self.shower_time),
            wakeup_time: normalize(self.wakeup_time),
        }
    }
}

/// Validated column values for a checkin write
#[derive(Debug, Clone)]
pub struct CheckinValues {
    pub checkin_date: NaiveDate,
    pub comments: Option<String>,
    pub features: Option<String>,
    pub guest_id: Option<i64>,
    pub mat_number: i32,
    pub payment_amount: Option<BigDecimal>,
    pub payment_type: Option<String>,
    pub shower_time: Option<NaiveTime>,
    pub wakeup_time: Option<NaiveTime>,
}
