use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{default_active, normalize};

/// Shelter facility (`facilities` table)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: i64,
    pub active: bool,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub scope: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Insert/update body for a facility
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRequest {
    #[serde(default = "default_active")]
    pub active: bool,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub scope: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl FacilityRequest {
    pub fn normalized(self) -> Self {
        Self {
            active: self.active,
            address1: normalize(self.address1),
            address2: normalize(self.address2),
            city: normalize(self.city),
            email: normalize(self.email),
            name: self.name.trim().to_string(),
            phone: normalize(self.phone),
            scope: normalize(self.scope),
            state: normalize(self.state).map(|s| s.to_uppercase()),
            zip_code: normalize(self.zip_code),
        }
    }
}
