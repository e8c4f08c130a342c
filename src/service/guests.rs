use sqlx::PgPool;

use crate::db::{self, ListFilter};
use crate::error::{AppError, AppResult};
use crate::models::{Guest, GuestRequest};
use crate::service::validation;

/// Facility-scoped guest operations
pub struct GuestService {
    pool: PgPool,
}

impl GuestService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn all(&self, facility_id: i64, filter: &ListFilter) -> AppResult<Vec<Guest>> {
        self.require_facility(facility_id).await?;
        Ok(db::list_guests(&self.pool, facility_id, filter).await?)
    }

    pub async fn find(&self, facility_id: i64, guest_id: i64) -> AppResult<Guest> {
        db::get_guest(&self.pool, facility_id, guest_id)
            .await?
            .ok_or_else(|| missing(facility_id, guest_id))
    }

    pub async fn exact(&self, facility_id: i64, first_name: &str, last_name: &str) -> AppResult<Guest> {
        db::get_guest_by_name(&self.pool, facility_id, first_name.trim(), last_name.trim())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "name: Missing Guest '{} {}' in Facility {}",
                    first_name, last_name, facility_id
                ))
            })
    }

    pub async fn insert(&self, facility_id: i64, req: GuestRequest) -> AppResult<Guest> {
        let req = validate(req)?;
        self.require_facility(facility_id).await?;
        self.ensure_unique_name(facility_id, &req, None).await?;
        let guest = db::insert_guest(&self.pool, facility_id, &req).await?;
        tracing::info!("Inserted guest {} in facility {}", guest.id, facility_id);
        Ok(guest)
    }

    pub async fn update(&self, facility_id: i64, guest_id: i64, req: GuestRequest) -> AppResult<Guest> {
        let req = validate(req)?;
        self.ensure_unique_name(facility_id, &req, Some(guest_id)).await?;
        db::update_guest(&self.pool, facility_id, guest_id, &req)
            .await?
            .ok_or_else(|| missing(facility_id, guest_id))
    }

    /// Fails with 400 while the guest still holds checkins
    pub async fn remove(&self, facility_id: i64, guest_id: i64) -> AppResult<Guest> {
        db::delete_guest(&self.pool, facility_id, guest_id)
            .await?
            .ok_or_else(|| missing(facility_id, guest_id))
    }

    async fn require_facility(&self, facility_id: i64) -> AppResult<()> {
        db::get_facility(&self.pool, facility_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("facilityId: Missing Facility {}", facility_id)))
    }

    async fn ensure_unique_name(
        &self,
        facility_id: i64,
        req: &GuestRequest,
        guest_id: Option<i64>,
    ) -> AppResult<()> {
        match db::get_guest_by_name(&self.pool, facility_id, &req.first_name, &req.last_name).await? {
            Some(existing) if Some(existing.id) != guest_id => Err(AppError::NotUnique(format!(
                "name: Name '{} {}' is already in use within this Facility",
                req.first_name, req.last_name
            ))),
            _ => Ok(()),
        }
    }
}

fn missing(facility_id: i64, guest_id: i64) -> AppError {
    AppError::NotFound(format!(
        "guestId: Missing Guest {} in Facility {}",
        guest_id, facility_id
    ))
}

fn validate(req: GuestRequest) -> AppResult<GuestRequest> {
    let req = req.normalized();
    validation::validate_required("firstName", &req.first_name)?;
    validation::validate_required("lastName", &req.last_name)?;
    if let Some(favorite) = &req.favorite {
        validation::validate_mats_list("favorite", favorite)?;
    }
    Ok(req)
}
