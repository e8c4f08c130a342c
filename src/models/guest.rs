use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{default_active, normalize};

/// Guest of a facility (`guests` table)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: i64,
    pub facility_id: i64,
    pub active: bool,
    pub comments: Option<String>,
    /// Preferred mats, in mat list syntax
    pub favorite: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestRequest {
    #[serde(default = "default_active")]
    pub active: bool,
    pub comments: Option<String>,
    pub favorite: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

impl GuestRequest {
    pub fn normalized(self) -> Self {
        Self {
            active: self.active,
            comments: normalize(self.comments),
            favorite: normalize(self.favorite),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}
