use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::models::{Checkin, PaymentType};

/// Mat counts and payment totals for one reporting bucket: a single date,
/// or a month rolled up from daily summaries.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    facility_id: Option<i64>,
    /// `YYYY-MM-DD` for a day, `YYYY-MM` for a monthly rollup
    checkin_date: Option<String>,

    #[serde(rename = "total$$")]
    total_cash: u32,
    #[serde(rename = "totalAG")]
    total_agency: u32,
    #[serde(rename = "totalCT")]
    total_client_trust: u32,
    #[serde(rename = "totalFM")]
    total_free_mat: u32,
    #[serde(rename = "totalMM")]
    total_mission_manager: u32,
    #[serde(rename = "totalSW")]
    total_shelter_worker: u32,
    #[serde(rename = "totalUK")]
    total_unknown: u32,

    total_assigned: u32,
    total_unassigned: u32,
    total_mats: u32,
    percent_assigned: u32,
    percent_unassigned: u32,
    #[schema(value_type = String, example = "15.00")]
    total_amount: BigDecimal,
    #[schema(example = "$15.00")]
    total_amount_display: String,
}

impl Default for Summary {
    fn default() -> Self {
        Self::empty(None, None)
    }
}

impl Summary {
    fn empty(facility_id: Option<i64>, checkin_date: Option<String>) -> Self {
        Self {
            facility_id,
            checkin_date,
            total_cash: 0,
            total_agency: 0,
            total_client_trust: 0,
            total_free_mat: 0,
            total_mission_manager: 0,
            total_shelter_worker: 0,
            total_unknown: 0,
            total_assigned: 0,
            total_unassigned: 0,
            total_mats: 0,
            percent_assigned: 0,
            percent_unassigned: 0,
            total_amount: BigDecimal::zero(),
            total_amount_display: format_amount(&BigDecimal::zero()),
        }
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_date(facility_id: i64, checkin_date: NaiveDate) -> Self {
        Self::empty(
            Some(facility_id),
            Some(checkin_date.format("%Y-%m-%d").to_string()),
        )
    }

    /// Count one mat-night. Assigned checkins also feed the payment-type
    /// counter for their code and the amount total; unrecognized codes only
    /// count toward the totals.
    pub fn include_checkin(&mut self, checkin: &Checkin) {
        self.total_mats += 1;
        if checkin.guest_id.is_some() {
            self.total_assigned += 1;
            if let Some(pt) = checkin.payment_type.as_deref().and_then(PaymentType::from_code) {
                *self.counter_mut(pt) += 1;
            }
            if let Some(amount) = &checkin.payment_amount {
                self.total_amount += amount.clone();
            }
        } else {
            self.total_unassigned += 1;
        }
        self.recalculate();
    }

    pub fn include_summary(&mut self, other: &Summary) {
        for pt in PaymentType::ALL {
            *self.counter_mut(pt) += other.count_for(pt);
        }
        self.total_assigned += other.total_assigned;
        self.total_unassigned += other.total_unassigned;
        self.total_mats += other.total_mats;
        self.total_amount += other.total_amount.clone();
        self.recalculate();
    }

    fn counter_mut(&mut self, pt: PaymentType) -> &mut u32 {
        match pt {
            PaymentType::Cash => &mut self.total_cash,
            PaymentType::Agency => &mut self.total_agency,
            PaymentType::ClientTrust => &mut self.total_client_trust,
            PaymentType::FreeMat => &mut self.total_free_mat,
            PaymentType::MissionManager => &mut self.total_mission_manager,
            PaymentType::ShelterWorker => &mut self.total_shelter_worker,
            PaymentType::Unknown => &mut self.total_unknown,
        }
    }

    pub fn count_for(&self, pt: PaymentType) -> u32 {
        match pt {
            PaymentType::Cash => self.total_cash,
            PaymentType::Agency => self.total_agency,
            PaymentType::ClientTrust => self.total_client_trust,
            PaymentType::FreeMat => self.total_free_mat,
            PaymentType::MissionManager => self.total_mission_manager,
            PaymentType::ShelterWorker => self.total_shelter_worker,
            PaymentType::Unknown => self.total_unknown,
        }
    }

    fn recalculate(&mut self) {
        if self.total_mats == 0 {
            self.percent_assigned = 0;
            self.percent_unassigned = 0;
        } else {
            self.percent_assigned = percent(self.total_assigned, self.total_mats);
            self.percent_unassigned = 100 - self.percent_assigned;
        }
        self.total_amount_display = format_amount(&self.total_amount);
    }

    pub fn facility_id(&self) -> Option<i64> {
        self.facility_id
    }

    pub fn checkin_date(&self) -> Option<&str> {
        self.checkin_date.as_deref()
    }

    pub fn total_assigned(&self) -> u32 {
        self.total_assigned
    }

    pub fn total_unassigned(&self) -> u32 {
        self.total_unassigned
    }

    pub fn total_mats(&self) -> u32 {
        self.total_mats
    }

    pub fn percent_assigned(&self) -> u32 {
        self.percent_assigned
    }

    pub fn percent_unassigned(&self) -> u32 {
        self.percent_unassigned
    }

    pub fn total_amount(&self) -> &BigDecimal {
        &self.total_amount
    }

    pub fn total_amount_display(&self) -> &str {
        &self.total_amount_display
    }
}

/// Nearest integer percentage, exact halves rounded up.
fn percent(part: u32, whole: u32) -> u32 {
    let (part, whole) = (u64::from(part), u64::from(whole));
    ((200 * part + whole) / (2 * whole)) as u32
}

/// Two-decimal dollar string, e.g. `$15.00`.
pub fn format_amount(amount: &BigDecimal) -> String {
    let rounded = amount.round(2).with_scale(2);
    if rounded < BigDecimal::zero() {
        format!("-${}", rounded.abs())
    } else {
        format!("${}", rounded)
    }
}

/// One summary per distinct checkin date, in ascending date order.
pub fn summarize_by_date(facility_id: i64, checkins: &[Checkin]) -> Vec<Summary> {
    let mut by_date: BTreeMap<NaiveDate, Summary> = BTreeMap::new();
    for checkin in checkins {
        by_date
            .entry(checkin.checkin_date)
            .or_insert_with(|| Summary::for_date(facility_id, checkin.checkin_date))
            .include_checkin(checkin);
    }
    by_date.into_values().collect()
}

/// Fold daily summaries into one summary per calendar month, keyed by the
/// `YYYY-MM` prefix of each daily label. Unlabelled summaries are skipped.
pub fn roll_up_by_month(facility_id: i64, daily: &[Summary]) -> Vec<Summary> {
    let mut by_month: BTreeMap<String, Summary> = BTreeMap::new();
    for summary in daily {
        let Some(month) = summary.checkin_date().and_then(|d| d.get(..7)) else {
            continue;
        };
        by_month
            .entry(month.to_string())
            .or_insert_with(|| Summary::empty(Some(facility_id), Some(month.to_string())))
            .include_summary(summary);
    }
    by_month.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(0, 5), 0);
    }

    #[test]
    fn amounts_format_with_two_decimals() {
        assert_eq!(format_amount(&BigDecimal::from(15)), "$15.00");
        assert_eq!(format_amount(&BigDecimal::from_str("2.5").unwrap()), "$2.50");
        assert_eq!(format_amount(&BigDecimal::from_str("-4.25").unwrap()), "-$4.25");
        assert_eq!(format_amount(&BigDecimal::zero()), "$0.00");
    }

    #[test]
    fn empty_summary_serializes_counter_names() {
        let json = serde_json::to_value(Summary::for_date(
            7,
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        ))
        .unwrap();
        assert_eq!(json["facilityId"], 7);
        assert_eq!(json["checkinDate"], "2024-03-09");
        assert_eq!(json["total$$"], 0);
        assert_eq!(json["totalAG"], 0);
        assert_eq!(json["totalAmountDisplay"], "$0.00");
    }

    #[test]
    fn roll_up_groups_days_by_month() {
        let mut jan = Summary::for_date(1, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        jan.total_mats = 2;
        jan.total_unassigned = 2;
        let feb1 = Summary::for_date(1, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let mut feb2 = Summary::for_date(1, NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
        feb2.total_mats = 1;
        feb2.total_assigned = 1;

        let months = roll_up_by_month(1, &[jan, feb1, feb2, Summary::new()]);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].checkin_date(), Some("2024-01"));
        assert_eq!(months[0].total_mats(), 2);
        assert_eq!(months[0].percent_unassigned(), 100);
        assert_eq!(months[1].checkin_date(), Some("2024-02"));
        assert_eq!(months[1].percent_assigned(), 100);
    }
}
