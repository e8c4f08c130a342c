use chrono::{NaiveDate, NaiveTime};

use crate::error::{AppError, AppResult};
use crate::models::{MatsList, PaymentType, MAX_MAT_NUMBER};

const FEATURE_CODES: [char; 3] = ['H', 'S', 'W'];

fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value
            .bytes()
            .zip(shape.bytes())
            .all(|(v, s)| if s == b'9' { v.is_ascii_digit() } else { v == s })
}

/// `YYYY-MM-DD`, and a real calendar date
pub fn validate_date(value: &str) -> AppResult<NaiveDate> {
    if !has_shape(value, "9999-99-99") {
        return Err(AppError::BadRequest(format!(
            "Invalid date '{}', expected YYYY-MM-DD",
            value
        )));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{}'", value)))
}

pub fn validate_date_range(from: &str, to: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let from = validate_date(from)?;
    let to = validate_date(to)?;
    if from > to {
        return Err(AppError::BadRequest(format!(
            "Date range start {} is after end {}",
            from, to
        )));
    }
    Ok((from, to))
}

/// `HH:MM` or `HH:MM:SS`
pub fn validate_time(value: &str) -> AppResult<NaiveTime> {
    let format = if has_shape(value, "99:99") {
        "%H:%M"
    } else if has_shape(value, "99:99:99") {
        "%H:%M:%S"
    } else {
        return Err(AppError::BadRequest(format!(
            "Invalid time '{}', expected HH:MM or HH:MM:SS",
            value
        )));
    };
    NaiveTime::parse_from_str(value, format)
        .map_err(|_| AppError::BadRequest(format!("Invalid time '{}'", value)))
}

pub fn validate_optional_time(value: Option<&str>) -> AppResult<Option<NaiveTime>> {
    value.map(validate_time).transpose()
}

/// Strict lookup for the write path; aggregation tolerates unknown codes.
pub fn validate_payment_type(value: Option<&str>) -> AppResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(code) => PaymentType::from_code(code)
            .map(|pt| Some(pt.code().to_string()))
            .ok_or_else(|| AppError::BadRequest(format!("Invalid payment type '{}'", code))),
    }
}

pub fn validate_mat_number(mat_number: i32) -> AppResult<i32> {
    if mat_number > 0 && mat_number <= MAX_MAT_NUMBER {
        Ok(mat_number)
    } else {
        Err(AppError::BadRequest(format!(
            "Invalid mat number {}, must be between 1 and {}",
            mat_number, MAX_MAT_NUMBER
        )))
    }
}

pub fn validate_features(value: Option<&str>) -> AppResult<()> {
    let Some(features) = value else {
        return Ok(());
    };
    let mut seen = Vec::new();
    for c in features.chars() {
        if !FEATURE_CODES.contains(&c) || seen.contains(&c) {
            return Err(AppError::BadRequest(format!(
                "Invalid features '{}', expected letters from HSW",
                features
            )));
        }
        seen.push(c);
    }
    Ok(())
}

pub fn validate_mats_list(field: &str, value: &str) -> AppResult<MatsList> {
    value
        .parse::<MatsList>()
        .map_err(|e| AppError::BadRequest(format!("{}: {}", field, e)))
}

pub fn validate_required(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

pub fn validate_state(value: Option<&str>) -> AppResult<()> {
    match value {
        Some(state) if !(state.len() == 2 && state.bytes().all(|b| b.is_ascii_uppercase())) => Err(
            AppError::BadRequest(format!("Invalid state '{}', expected two letters", state)),
        ),
        _ => Ok(()),
    }
}

pub fn validate_zip_code(value: Option<&str>) -> AppResult<()> {
    match value {
        Some(zip) if !(has_shape(zip, "99999") || has_shape(zip, "99999-9999")) => {
            Err(AppError::BadRequest(format!(
                "Invalid zip code '{}', expected 99999 or 99999-9999",
                zip
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_must_be_padded_calendar_dates() {
        assert!(validate_date("2024-02-29").is_ok());
        assert!(validate_date("2023-02-29").is_err());
        assert!(validate_date("2024-2-9").is_err());
        assert!(validate_date("2024/02/09").is_err());
        assert!(validate_date("").is_err());
    }

    #[test]
    fn date_range_must_be_ascending() {
        assert!(validate_date_range("2024-01-01", "2024-01-01").is_ok());
        assert!(matches!(
            validate_date_range("2024-01-02", "2024-01-01"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn times_accept_minutes_or_seconds() {
        assert_eq!(
            validate_time("05:30").unwrap(),
            NaiveTime::from_hms_opt(5, 30, 0).unwrap()
        );
        assert!(validate_time("23:59:59").is_ok());
        assert!(validate_time("24:00").is_err());
        assert!(validate_time("5:30").is_err());
        assert_eq!(validate_optional_time(None).unwrap(), None);
    }

    #[test]
    fn payment_types_are_checked_strictly() {
        assert_eq!(
            validate_payment_type(Some("AG")).unwrap(),
            Some("AG".to_string())
        );
        assert!(validate_payment_type(Some("ZZ")).is_err());
        assert_eq!(validate_payment_type(None).unwrap(), None);
    }

    #[test]
    fn features_are_unique_known_letters() {
        assert!(validate_features(Some("HSW")).is_ok());
        assert!(validate_features(None).is_ok());
        assert!(validate_features(Some("HH")).is_err());
        assert!(validate_features(Some("X")).is_err());
    }

    #[test]
    fn address_fields() {
        assert!(validate_state(Some("OR")).is_ok());
        assert!(validate_state(Some("Ore")).is_err());
        assert!(validate_zip_code(Some("97201")).is_ok());
        assert!(validate_zip_code(Some("97201-1234")).is_ok());
        assert!(validate_zip_code(Some("9720")).is_err());
        assert!(validate_mat_number(0).is_err());
        assert!(validate_mat_number(MAX_MAT_NUMBER).is_ok());
        assert!(validate_mat_number(MAX_MAT_NUMBER + 1).is_err());
        assert!(validate_required("name", "  ").is_err());
    }
}
