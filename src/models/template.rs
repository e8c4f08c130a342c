use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{default_active, normalize};

/// Mat layout of a facility, used to generate a night's checkins
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: i64,
    pub facility_id: i64,
    pub active: bool,
    #[schema(example = "1-24")]
    pub all_mats: String,
    pub comments: Option<String>,
    #[schema(example = "1,2")]
    pub handicap_mats: Option<String>,
    pub name: String,
    pub socket_mats: Option<String>,
    pub work_mats: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequest {
    #[serde(default = "default_active")]
    pub active: bool,
    pub all_mats: String,
    pub comments: Option<String>,
    pub handicap_mats: Option<String>,
    pub name: String,
    pub socket_mats: Option<String>,
    pub work_mats: Option<String>,
}

impl TemplateRequest {
    pub fn normalized(self) -> Self {
        Self {
            active: self.active,
            all_mats: self.all_mats.trim().to_string(),
            comments: normalize(self.comments),
            handicap_mats: normalize(self.handicap_mats),
            name: self.name.trim().to_string(),
            socket_mats: normalize(self.socket_mats),
            work_mats: normalize(self.work_mats),
        }
    }
}
