use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{default_active, normalize};

/// Application user. The password hash never leaves the database layer.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub active: bool,
    pub name: String,
    pub scope: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[serde(default = "default_active")]
    pub active: bool,
    pub name: String,
    /// Required on insert; when absent on update the stored hash is kept
    pub password: Option<String>,
    pub scope: String,
    pub username: String,
}

impl UserRequest {
    pub fn normalized(self) -> Self {
        Self {
            active: self.active,
            name: self.name.trim().to_string(),
            password: normalize(self.password),
            scope: self.scope.trim().to_string(),
            username: self.username.trim().to_string(),
        }
    }
}
