use sqlx::PgPool;

use crate::db::{self, ListFilter};
use crate::error::{AppError, AppResult};
use crate::models::{MatsList, Template, TemplateRequest};
use crate::service::validation;

/// Facility-scoped template operations
pub struct TemplateService {
    pool: PgPool,
}

impl TemplateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn all(&self, facility_id: i64, filter: &ListFilter) -> AppResult<Vec<Template>> {
        db::get_facility(&self.pool, facility_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("facilityId: Missing Facility {}", facility_id)))?;
        Ok(db::list_templates(&self.pool, facility_id, filter).await?)
    }

    pub async fn find(&self, facility_id: i64, template_id: i64) -> AppResult<Template> {
        db::get_template(&self.pool, facility_id, template_id)
            .await?
            .ok_or_else(|| missing(facility_id, template_id))
    }

    pub async fn exact(&self, facility_id: i64, name: &str) -> AppResult<Template> {
        db::get_template_by_name(&self.pool, facility_id, name.trim())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "name: Missing Template '{}' in Facility {}",
                    name, facility_id
                ))
            })
    }

    pub async fn insert(&self, facility_id: i64, req: TemplateRequest) -> AppResult<Template> {
        let req = validate(req)?;
        db::get_facility(&self.pool, facility_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("facilityId: Missing Facility {}", facility_id)))?;
        self.ensure_unique_name(facility_id, &req.name, None).await?;
        let template = db::insert_template(&self.pool, facility_id, &req).await?;
        tracing::info!("Inserted template {} '{}' in facility {}", template.id, template.name, facility_id);
        Ok(template)
    }

    pub async fn update(
        &self,
        facility_id: i64,
        template_id: i64,
        req: TemplateRequest,
    ) -> AppResult<Template> {
        let req = validate(req)?;
        self.ensure_unique_name(facility_id, &req.name, Some(template_id)).await?;
        db::update_template(&self.pool, facility_id, template_id, &req)
            .await?
            .ok_or_else(|| missing(facility_id, template_id))
    }

    pub async fn remove(&self, facility_id: i64, template_id: i64) -> AppResult<Template> {
        db::delete_template(&self.pool, facility_id, template_id)
            .await?
            .ok_or_else(|| missing(facility_id, template_id))
    }

    async fn ensure_unique_name(
        &self,
        facility_id: i64,
        name: &str,
        template_id: Option<i64>,
    ) -> AppResult<()> {
        match db::get_template_by_name(&self.pool, facility_id, name).await? {
            Some(existing) if Some(existing.id) != template_id => Err(AppError::NotUnique(format!(
                "name: Name '{}' is already in use within this Facility",
                name
            ))),
            _ => Ok(()),
        }
    }
}

fn missing(facility_id: i64, template_id: i64) -> AppError {
    AppError::NotFound(format!(
        "templateId: Missing Template {} in Facility {}",
        template_id, facility_id
    ))
}

fn feature_list(field: &str, value: Option<&str>, all: &MatsList) -> AppResult<MatsList> {
    let list = match value {
        Some(text) => validation::validate_mats_list(field, text)?,
        None => MatsList::default(),
    };
    if !list.is_subset(all) {
        return Err(AppError::BadRequest(format!(
            "{}: Mats must be a subset of allMats",
            field
        )));
    }
    Ok(list)
}

fn validate(req: TemplateRequest) -> AppResult<TemplateRequest> {
    let req = req.normalized();
    validation::validate_required("name", &req.name)?;
    validation::validate_required("allMats", &req.all_mats)?;
    let all = validation::validate_mats_list("allMats", &req.all_mats)?;
    feature_list("handicapMats", req.handicap_mats.as_deref(), &all)?;
    feature_list("socketMats", req.socket_mats.as_deref(), &all)?;
    feature_list("workMats", req.work_mats.as_deref(), &all)?;
    Ok(req)
}

/// Every mat of the template with its feature letters (`H`, `S`, `W` in that
/// order), `None` for a plain mat.
pub fn mat_layout(template: &Template) -> AppResult<Vec<(i32, Option<String>)>> {
    let all = validation::validate_mats_list("allMats", &template.all_mats)?;
    let handicap = feature_list("handicapMats", template.handicap_mats.as_deref(), &all)?;
    let socket = feature_list("socketMats", template.socket_mats.as_deref(), &all)?;
    let work = feature_list("workMats", template.work_mats.as_deref(), &all)?;

    Ok(all
        .iter()
        .map(|mat| {
            let features: String = [(&handicap, 'H'), (&socket, 'S'), (&work, 'W')]
                .iter()
                .filter(|(list, _)| list.contains(mat))
                .map(|(_, code)| *code)
                .collect();
            (mat, Some(features).filter(|f| !f.is_empty()))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(all: &str, handicap: Option<&str>, socket: Option<&str>, work: Option<&str>) -> Template {
        Template {
            id: 1,
            facility_id: 1,
            active: true,
            all_mats: all.to_string(),
            comments: None,
            handicap_mats: handicap.map(str::to_string),
            name: "Standard".to_string(),
            socket_mats: socket.map(str::to_string),
            work_mats: work.map(str::to_string),
        }
    }

    #[test]
    fn layout_combines_feature_lists() {
        let layout = mat_layout(&template("1-4", Some("1"), Some("1,3"), Some("3-4"))).unwrap();
        assert_eq!(
            layout,
            vec![
                (1, Some("HS".to_string())),
                (2, None),
                (3, Some("SW".to_string())),
                (4, Some("W".to_string())),
            ]
        );
    }

    #[test]
    fn feature_mats_outside_all_mats_are_rejected() {
        let err = mat_layout(&template("1-4", Some("5"), None, None)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.starts_with("handicapMats")));
    }

    #[test]
    fn request_validation_requires_all_mats() {
        let req = TemplateRequest {
            active: true,
            all_mats: " ".to_string(),
            comments: None,
            handicap_mats: None,
            name: "Winter".to_string(),
            socket_mats: None,
            work_mats: None,
        };
        assert!(matches!(validate(req), Err(AppError::BadRequest(_))));
    }
}
