use sqlx::PgPool;

use crate::db::{self, ListFilter};
use crate::error::{AppError, AppResult};
use crate::models::{Facility, FacilityRequest};
use crate::service::validation;

pub struct FacilityService {
    pool: PgPool,
}

impl FacilityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn all(&self, filter: &ListFilter) -> AppResult<Vec<Facility>> {
        Ok(db::list_facilities(&self.pool, filter).await?)
    }

    pub async fn find(&self, facility_id: i64) -> AppResult<Facility> {
        db::get_facility(&self.pool, facility_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("facilityId: Missing Facility {}", facility_id)))
    }

    pub async fn exact(&self, name: &str) -> AppResult<Facility> {
        db::get_facility_by_name(&self.pool, name.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("name: Missing Facility '{}'", name)))
    }

    pub async fn insert(&self, req: FacilityRequest) -> AppResult<Facility> {
        let req = validate(req)?;
        self.ensure_unique_name(&req.name, None).await?;
        let facility = db::insert_facility(&self.pool, &req).await?;
        tracing::info!("Inserted facility {} '{}'", facility.id, facility.name);
        Ok(facility)
    }

    pub async fn update(&self, facility_id: i64, req: FacilityRequest) -> AppResult<Facility> {
        let req = validate(req)?;
        self.ensure_unique_name(&req.name, Some(facility_id)).await?;
        db::update_facility(&self.pool, facility_id, &req)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("facilityId: Missing Facility {}", facility_id)))
    }

    pub async fn remove(&self, facility_id: i64) -> AppResult<Facility> {
        let facility = db::delete_facility(&self.pool, facility_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("facilityId: Missing Facility {}", facility_id)))?;
        tracing::info!("Removed facility {} '{}'", facility.id, facility.name);
        Ok(facility)
    }

    async fn ensure_unique_name(&self, name: &str, facility_id: Option<i64>) -> AppResult<()> {
        match db::get_facility_by_name(&self.pool, name).await? {
            Some(existing) if Some(existing.id) != facility_id => Err(AppError::NotUnique(format!(
                "name: Name '{}' is already in use",
                name
            ))),
            _ => Ok(()),
        }
    }
}

fn validate(req: FacilityRequest) -> AppResult<FacilityRequest> {
    let req = req.normalized();
    validation::validate_required("name", &req.name)?;
    validation::validate_state(req.state.as_deref())?;
    validation::validate_zip_code(req.zip_code.as_deref())?;
    Ok(req)
}
