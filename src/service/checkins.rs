use chrono::NaiveDate;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::db;
use crate::error::{AppError, AppResult};
use crate::models::{AssignmentRequest, Checkin, CheckinRequest, CheckinValues};
use crate::service::{templates, validation};

/// Facility-scoped checkin operations, including guest assignment and
/// bulk generation from a template.
pub struct CheckinService {
    pool: PgPool,
}

impl CheckinService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All mats for one night, optionally with their guests attached
    pub async fn for_date(
        &self,
        facility_id: i64,
        checkin_date: &str,
        with_guest: bool,
    ) -> AppResult<Vec<Checkin>> {
        let checkin_date = validation::validate_date(checkin_date)?;
        self.require_facility(facility_id).await?;
        let mut checkins = db::list_checkins_for_date(&self.pool, facility_id, checkin_date).await?;
        if with_guest {
            self.attach_guests(&mut checkins).await?;
        }
        Ok(checkins)
    }

    pub async fn find(&self, facility_id: i64, checkin_id: i64, with_guest: bool) -> AppResult<Checkin> {
        let checkin = db::get_checkin(&self.pool, facility_id, checkin_id)
            .await?
            .ok_or_else(|| missing(facility_id, checkin_id))?;
        let mut checkins = vec![checkin];
        if with_guest {
            self.attach_guests(&mut checkins).await?;
        }
        Ok(checkins.remove(0))
    }

    pub async fn insert(&self, facility_id: i64, req: CheckinRequest) -> AppResult<Checkin> {
        let values = validate(req)?;
        self.require_facility(facility_id).await?;
        self.check_placement(facility_id, &values, None).await?;
        Ok(db::insert_checkin(&self.pool, facility_id, &values).await?)
    }

    pub async fn update(&self, facility_id: i64, checkin_id: i64, req: CheckinRequest) -> AppResult<Checkin> {
        let values = validate(req)?;
        self.check_placement(facility_id, &values, Some(checkin_id)).await?;
        db::update_checkin(&self.pool, facility_id, checkin_id, &values)
            .await?
            .ok_or_else(|| missing(facility_id, checkin_id))
    }

    pub async fn remove(&self, facility_id: i64, checkin_id: i64) -> AppResult<Checkin> {
        db::delete_checkin(&self.pool, facility_id, checkin_id)
            .await?
            .ok_or_else(|| missing(facility_id, checkin_id))
    }

    /// Put a guest on a mat, replacing any previous assignment of that mat
    pub async fn assign(
        &self,
        facility_id: i64,
        checkin_id: i64,
        req: AssignmentRequest,
    ) -> AppResult<Checkin> {
        let req = req.normalized();
        let payment_type = validation::validate_payment_type(req.payment_type.as_deref())?;
        let shower_time = validation::validate_optional_time(req.shower_time.as_deref())?;
        let wakeup_time = validation::validate_optional_time(req.wakeup_time.as_deref())?;

        let checkin = db::get_checkin(&self.pool, facility_id, checkin_id)
            .await?
            .ok_or_else(|| missing(facility_id, checkin_id))?;
        let values = CheckinValues {
            checkin_date: checkin.checkin_date,
            comments: req.comments,
            features: checkin.features,
            guest_id: Some(req.guest_id),
            mat_number: checkin.mat_number,
            payment_amount: req.payment_amount,
            payment_type,
            shower_time,
            wakeup_time,
        };
        self.check_placement(facility_id, &values, Some(checkin_id)).await?;

        let updated = db::update_checkin(&self.pool, facility_id, checkin_id, &values)
            .await?
            .ok_or_else(|| missing(facility_id, checkin_id))?;
        tracing::info!(
            "Assigned guest {} to mat {} on {} in facility {}",
            req.guest_id,
            updated.mat_number,
            updated.checkin_date,
            facility_id
        );
        Ok(updated)
    }

    /// Return a mat to the unassigned state, clearing payment details
    pub async fn deassign(&self, facility_id: i64, checkin_id: i64) -> AppResult<Checkin> {
        let checkin = db::get_checkin(&self.pool, facility_id, checkin_id)
            .await?
            .ok_or_else(|| missing(facility_id, checkin_id))?;
        let values = CheckinValues {
            checkin_date: checkin.checkin_date,
            comments: None,
            features: checkin.features,
            guest_id: None,
            mat_number: checkin.mat_number,
            payment_amount: None,
            payment_type: None,
            shower_time: None,
            wakeup_time: None,
        };
        let updated = db::update_checkin(&self.pool, facility_id, checkin_id, &values)
            .await?
            .ok_or_else(|| missing(facility_id, checkin_id))?;
        tracing::info!(
            "Deassigned mat {} on {} in facility {}",
            updated.mat_number,
            updated.checkin_date,
            facility_id
        );
        Ok(updated)
    }

    /// Create one unassigned checkin per mat of the template. Refuses a date
    /// that already has checkins.
    pub async fn generate(
        &self,
        facility_id: i64,
        checkin_date: &str,
        template_id: i64,
    ) -> AppResult<Vec<Checkin>> {
        let checkin_date = validation::validate_date(checkin_date)?;
        let template = db::get_template(&self.pool, facility_id, template_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "templateId: Missing Template {} in Facility {}",
                    template_id, facility_id
                ))
            })?;
        let layout = templates::mat_layout(&template)?;

        let mut tx = self.pool.begin().await?;
        let existing = db::count_checkins_for_date(&mut tx, facility_id, checkin_date).await?;
        ensure_night_is_empty(existing, checkin_date)?;
        let checkins = db::insert_unassigned_batch(&mut tx, facility_id, checkin_date, &layout).await?;
        tx.commit().await?;

        tracing::info!(
            "Generated {} checkins for facility {} on {} from template '{}'",
            checkins.len(),
            facility_id,
            checkin_date,
            template.name
        );
        Ok(checkins)
    }

    async fn require_facility(&self, facility_id: i64) -> AppResult<()> {
        db::get_facility(&self.pool, facility_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("facilityId: Missing Facility {}", facility_id)))
    }

    /// Mat numbers are unique per night, and a guest holds at most one mat
    /// per night. The guest must belong to the same facility.
    async fn check_placement(
        &self,
        facility_id: i64,
        values: &CheckinValues,
        checkin_id: Option<i64>,
    ) -> AppResult<()> {
        let holder =
            db::get_checkin_by_mat(&self.pool, facility_id, values.checkin_date, values.mat_number).await?;
        check_mat_free(holder.as_ref(), values, checkin_id)?;

        let Some(guest_id) = values.guest_id else {
            return Ok(());
        };
        db::get_guest(&self.pool, facility_id, guest_id).await?.ok_or_else(|| {
            AppError::BadRequest(format!(
                "guestId: Missing Guest {} in Facility {}",
                guest_id, facility_id
            ))
        })?;
        let held = db::get_checkin_for_guest(&self.pool, facility_id, values.checkin_date, guest_id).await?;
        check_guest_free(held.as_ref(), guest_id, values, checkin_id)
    }

    async fn attach_guests(&self, checkins: &mut [Checkin]) -> AppResult<()> {
        let mut guest_ids: Vec<i64> = checkins.iter().filter_map(|c| c.guest_id).collect();
        if guest_ids.is_empty() {
            return Ok(());
        }
        guest_ids.sort_unstable();
        guest_ids.dedup();

        let guests: HashMap<i64, _> = db::list_guests_by_ids(&self.pool, &guest_ids)
            .await?
            .into_iter()
            .map(|g| (g.id, g))
            .collect();
        for checkin in checkins.iter_mut() {
            checkin.guest = checkin.guest_id.and_then(|id| guests.get(&id).cloned());
        }
        Ok(())
    }
}

fn missing(facility_id: i64, checkin_id: i64) -> AppError {
    AppError::NotFound(format!(
        "checkinId: Missing Checkin {} in Facility {}",
        checkin_id, facility_id
    ))
}

/// `checkin_id` is the row being written, which may keep its own mat
fn check_mat_free(holder: Option<&Checkin>, values: &CheckinValues, checkin_id: Option<i64>) -> AppResult<()> {
    match holder {
        Some(existing) if Some(existing.id) != checkin_id => Err(AppError::NotUnique(format!(
            "matNumber: Mat {} is already in use on {}",
            values.mat_number, values.checkin_date
        ))),
        _ => Ok(()),
    }
}

/// A guest holds at most one mat per night
fn check_guest_free(
    held: Option<&Checkin>,
    guest_id: i64,
    values: &CheckinValues,
    checkin_id: Option<i64>,
) -> AppResult<()> {
    match held {
        Some(existing) if Some(existing.id) != checkin_id => Err(AppError::NotUnique(format!(
            "guestId: Guest {} is already assigned to mat {} on {}",
            guest_id, existing.mat_number, values.checkin_date
        ))),
        _ => Ok(()),
    }
}

fn ensure_night_is_empty(existing: i64, checkin_date: NaiveDate) -> AppResult<()> {
    if existing > 0 {
        return Err(AppError::BadRequest(format!(
            "checkinDate: There are already {} checkins for {}",
            existing, checkin_date
        )));
    }
    Ok(())
}

/// Parse and check a checkin body into column values
fn validate(req: CheckinRequest) -> AppResult<CheckinValues> {
    let req = req.normalized();
    let checkin_date = validation::validate_date(&req.checkin_date)?;
    let mat_number = validation::validate_mat_number(req.mat_number)?;
    validation::validate_features(req.features.as_deref())?;
    let payment_type = validation::validate_payment_type(req.payment_type.as_deref())?;
    let shower_time = validation::validate_optional_time(req.shower_time.as_deref())?;
    let wakeup_time = validation::validate_optional_time(req.wakeup_time.as_deref())?;

    Ok(CheckinValues {
        checkin_date,
        comments: req.comments,
        features: req.features,
        guest_id: req.guest_id,
        mat_number,
        payment_amount: req.payment_amount,
        payment_type,
        shower_time,
        wakeup_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn request() -> CheckinRequest {
        CheckinRequest {
            checkin_date: " 2024-03-09 ".to_string(),
            comments: Some("  ".to_string()),
            features: Some("hs".to_string()),
            guest_id: Some(4),
            mat_number: 12,
            payment_amount: None,
            payment_type: Some("$$".to_string()),
            shower_time: Some("05:30".to_string()),
            wakeup_time: None,
        }
    }

    #[test]
    fn request_is_parsed_into_values() {
        let values = validate(request()).unwrap();
        assert_eq!(values.checkin_date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(values.comments, None);
        assert_eq!(values.features.as_deref(), Some("HS"));
        assert_eq!(values.payment_type.as_deref(), Some("$$"));
        assert_eq!(values.shower_time, NaiveTime::from_hms_opt(5, 30, 0));
    }

    #[test]
    fn bad_fields_are_rejected() {
        let mut req = request();
        req.mat_number = 0;
        assert!(matches!(validate(req), Err(AppError::BadRequest(_))));

        let mut req = request();
        req.payment_type = Some("ZZ".to_string());
        assert!(matches!(validate(req), Err(AppError::BadRequest(_))));

        let mut req = request();
        req.wakeup_time = Some("6am".to_string());
        assert!(matches!(validate(req), Err(AppError::BadRequest(_))));
    }

    fn stored(id: i64, mat_number: i32, guest_id: Option<i64>) -> Checkin {
        Checkin {
            id,
            facility_id: 1,
            checkin_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            comments: None,
            features: None,
            guest_id,
            mat_number,
            payment_amount: None,
            payment_type: None,
            shower_time: None,
            wakeup_time: None,
            guest: None,
        }
    }

    #[test]
    fn mat_taken_by_another_checkin_conflicts() {
        let values = validate(request()).unwrap();
        let holder = stored(7, 12, None);

        assert!(check_mat_free(None, &values, None).is_ok());
        assert!(check_mat_free(Some(&holder), &values, Some(7)).is_ok());
        assert!(matches!(
            check_mat_free(Some(&holder), &values, None),
            Err(AppError::NotUnique(_))
        ));
        assert!(matches!(
            check_mat_free(Some(&holder), &values, Some(8)),
            Err(AppError::NotUnique(_))
        ));
    }

    #[test]
    fn guest_holds_one_mat_per_night() {
        let values = validate(request()).unwrap();
        let held = stored(3, 20, Some(4));

        assert!(check_guest_free(None, 4, &values, None).is_ok());
        assert!(check_guest_free(Some(&held), 4, &values, Some(3)).is_ok());
        let err = check_guest_free(Some(&held), 4, &values, Some(9)).unwrap_err();
        assert!(matches!(err, AppError::NotUnique(_)));
        assert!(err.to_string().contains("mat 20"));
    }

    #[test]
    fn generate_refuses_a_night_with_checkins() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert!(ensure_night_is_empty(0, date).is_ok());
        let err = ensure_night_is_empty(24, date).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(err.to_string().contains("already 24 checkins"));
    }
}
