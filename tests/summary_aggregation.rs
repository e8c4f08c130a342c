use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use shelter_checkins::models::{roll_up_by_month, summarize_by_date};
use shelter_checkins::{Checkin, PaymentType, Summary};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn checkin(
    mat_number: i32,
    guest_id: Option<i64>,
    payment_type: Option<&str>,
    payment_amount: Option<i64>,
) -> Checkin {
    checkin_on(date(2024, 3, 9), mat_number, guest_id, payment_type, payment_amount)
}

fn checkin_on(
    checkin_date: NaiveDate,
    mat_number: i32,
    guest_id: Option<i64>,
    payment_type: Option<&str>,
    payment_amount: Option<i64>,
) -> Checkin {
    Checkin {
        id: i64::from(mat_number),
        facility_id: 1,
        checkin_date,
        comments: None,
        features: None,
        guest_id,
        mat_number,
        payment_amount: payment_amount.map(BigDecimal::from),
        payment_type: payment_type.map(str::to_string),
        shower_time: None,
        wakeup_time: None,
        guest: None,
    }
}

fn fold(checkins: &[Checkin]) -> Summary {
    let mut summary = Summary::new();
    for c in checkins {
        summary.include_checkin(c);
    }
    summary
}

fn mixed_night() -> Vec<Checkin> {
    vec![
        checkin(1, Some(1), Some("CT"), Some(5)),
        checkin(2, None, None, None),
        checkin(3, Some(2), Some("AG"), Some(10)),
        checkin(4, Some(3), Some("$$"), None),
        checkin(5, None, None, None),
        checkin(6, Some(4), Some("ZZ"), Some(2)),
        checkin(7, Some(5), None, Some(1)),
    ]
}

#[test]
fn three_checkin_scenario() {
    let summary = fold(&[
        checkin(1, Some(1), Some("CT"), Some(5)),
        checkin(2, None, None, None),
        checkin(3, Some(2), Some("AG"), Some(10)),
    ]);

    assert_eq!(summary.total_mats(), 3);
    assert_eq!(summary.total_assigned(), 2);
    assert_eq!(summary.total_unassigned(), 1);
    assert_eq!(summary.percent_assigned(), 67);
    assert_eq!(summary.percent_unassigned(), 33);
    assert_eq!(summary.total_amount(), &BigDecimal::from(15));
    assert_eq!(summary.total_amount_display(), "$15.00");
    assert_eq!(summary.count_for(PaymentType::ClientTrust), 1);
    assert_eq!(summary.count_for(PaymentType::Agency), 1);
    assert_eq!(summary.count_for(PaymentType::Cash), 0);
}

#[test]
fn empty_sequence_is_all_zero() {
    let summary = fold(&[]);
    assert_eq!(summary.total_mats(), 0);
    assert_eq!(summary.total_assigned(), 0);
    assert_eq!(summary.total_unassigned(), 0);
    assert_eq!(summary.percent_assigned(), 0);
    assert_eq!(summary.percent_unassigned(), 0);
    assert_eq!(summary.total_amount_display(), "$0.00");
    for pt in PaymentType::ALL {
        assert_eq!(summary.count_for(pt), 0);
    }
}

#[test]
fn unrecognized_payment_type_counts_only_toward_totals() {
    let summary = fold(&[checkin(1, Some(9), Some("ZZ"), None)]);
    assert_eq!(summary.total_mats(), 1);
    assert_eq!(summary.total_assigned(), 1);
    let per_type: u32 = PaymentType::ALL.iter().map(|pt| summary.count_for(*pt)).sum();
    assert_eq!(per_type, 0);
}

#[test]
fn unassigned_mats_ignore_payment_fields() {
    let summary = fold(&[checkin(1, None, Some("$$"), Some(20))]);
    assert_eq!(summary.total_unassigned(), 1);
    assert_eq!(summary.count_for(PaymentType::Cash), 0);
    assert_eq!(summary.total_amount_display(), "$0.00");
}

#[test]
fn totals_and_percentages_stay_consistent() {
    let checkins = mixed_night();
    let mut summary = Summary::new();
    for (n, c) in checkins.iter().enumerate() {
        summary.include_checkin(c);
        assert_eq!(
            summary.total_assigned() + summary.total_unassigned(),
            summary.total_mats()
        );
        assert_eq!(summary.total_mats() as usize, n + 1);
        assert_eq!(summary.percent_assigned() + summary.percent_unassigned(), 100);
    }
    assert_eq!(summary.total_assigned(), 5);
    assert_eq!(summary.percent_assigned(), 71);
    assert_eq!(summary.total_amount_display(), "$18.00");
}

#[test]
fn combining_partial_folds_matches_whole_fold() {
    let checkins = mixed_night();
    let whole = fold(&checkins);

    for split in 0..=checkins.len() {
        let (left, right) = checkins.split_at(split);
        let mut combined = fold(left);
        combined.include_summary(&fold(right));
        assert_eq!(combined, whole, "split at {split}");

        let mut reversed = fold(right);
        reversed.include_summary(&fold(left));
        assert_eq!(reversed, whole, "reversed split at {split}");
    }
}

#[test]
fn including_the_same_checkin_twice_double_counts() {
    let c = checkin(1, Some(1), Some("$$"), Some(5));
    let summary = fold(&[c.clone(), c]);
    assert_eq!(summary.total_mats(), 2);
    assert_eq!(summary.count_for(PaymentType::Cash), 2);
    assert_eq!(summary.total_amount_display(), "$10.00");
}

#[test]
fn daily_and_monthly_buckets() {
    let checkins = vec![
        checkin_on(date(2024, 1, 31), 1, Some(1), Some("$$"), Some(5)),
        checkin_on(date(2024, 1, 31), 2, None, None, None),
        checkin_on(date(2024, 2, 1), 1, Some(2), Some("FM"), None),
        checkin_on(date(2024, 2, 2), 1, None, None, None),
        checkin_on(date(2024, 2, 2), 2, Some(1), Some("SW"), Some(3)),
    ];

    let daily = summarize_by_date(1, &checkins);
    let labels: Vec<_> = daily.iter().map(|s| s.checkin_date().unwrap()).collect();
    assert_eq!(labels, vec!["2024-01-31", "2024-02-01", "2024-02-02"]);
    assert_eq!(daily[0].percent_assigned(), 50);
    assert_eq!(daily[1].percent_assigned(), 100);

    let monthly = roll_up_by_month(1, &daily);
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0].checkin_date(), Some("2024-01"));
    assert_eq!(monthly[0].total_mats(), 2);
    assert_eq!(monthly[1].checkin_date(), Some("2024-02"));
    assert_eq!(monthly[1].total_mats(), 3);
    assert_eq!(monthly[1].total_assigned(), 2);
    assert_eq!(monthly[1].percent_assigned(), 67);
    assert_eq!(monthly[1].count_for(PaymentType::FreeMat), 1);
    assert_eq!(monthly[1].count_for(PaymentType::ShelterWorker), 1);
    assert_eq!(monthly[1].total_amount_display(), "$3.00");
    assert_eq!(monthly[1].facility_id(), Some(1));
}

#[test]
fn summary_json_matches_client_field_names() {
    let summary = fold(&[
        checkin(1, Some(1), Some("CT"), Some(5)),
        checkin(2, None, None, None),
        checkin(3, Some(2), Some("AG"), Some(10)),
    ]);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["totalMats"], 3);
    assert_eq!(json["totalCT"], 1);
    assert_eq!(json["totalAG"], 1);
    assert_eq!(json["total$$"], 0);
    assert_eq!(json["percentAssigned"], 67);
    assert_eq!(json["totalAmountDisplay"], "$15.00");
}
