use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::Argon2;
use sqlx::PgPool;

use crate::db::{self, ListFilter};
use crate::error::{AppError, AppResult};
use crate::models::{User, UserRequest};
use crate::service::validation;

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn all(&self, filter: &ListFilter) -> AppResult<Vec<User>> {
        Ok(db::list_users(&self.pool, filter).await?)
    }

    pub async fn find(&self, user_id: i64) -> AppResult<User> {
        db::get_user(&self.pool, user_id)
            .await?
            .ok_or_else(|| missing(user_id))
    }

    pub async fn exact(&self, username: &str) -> AppResult<User> {
        db::get_user_by_username(&self.pool, username.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("username: Missing User '{}'", username)))
    }

    pub async fn insert(&self, req: UserRequest) -> AppResult<User> {
        let req = validate(req)?;
        let password = req
            .password
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("password is required".to_string()))?;
        let hash = hash_off_runtime(password.to_string()).await?;
        self.ensure_unique_username(&req.username, None).await?;
        let user = db::insert_user(&self.pool, &req, &hash).await?;
        tracing::info!("Inserted user {} '{}'", user.id, user.username);
        Ok(user)
    }

    pub async fn update(&self, user_id: i64, req: UserRequest) -> AppResult<User> {
        let req = validate(req)?;
        let hash = match &req.password {
            Some(password) => Some(hash_off_runtime(password.clone()).await?),
            None => None,
        };
        self.ensure_unique_username(&req.username, Some(user_id)).await?;
        db::update_user(&self.pool, user_id, &req, hash.as_deref())
            .await?
            .ok_or_else(|| missing(user_id))
    }

    pub async fn remove(&self, user_id: i64) -> AppResult<User> {
        db::delete_user(&self.pool, user_id)
            .await?
            .ok_or_else(|| missing(user_id))
    }

    async fn ensure_unique_username(&self, username: &str, user_id: Option<i64>) -> AppResult<()> {
        match db::get_user_by_username(&self.pool, username).await? {
            Some(existing) if Some(existing.id) != user_id => Err(AppError::NotUnique(format!(
                "username: Username '{}' is already in use",
                username
            ))),
            _ => Ok(()),
        }
    }
}

fn missing(user_id: i64) -> AppError {
    AppError::NotFound(format!("userId: Missing User {}", user_id))
}

fn validate(req: UserRequest) -> AppResult<UserRequest> {
    let req = req.normalized();
    validation::validate_required("name", &req.name)?;
    validation::validate_required("scope", &req.scope)?;
    validation::validate_required("username", &req.username)?;
    Ok(req)
}

/// Argon2id PHC string with a fresh random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// `hash_password` on tokio's blocking thread pool
async fn hash_off_runtime(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn hashes_verify_and_are_salted() {
        let first = hash_password("s3cret").unwrap();
        let second = hash_password("s3cret").unwrap();
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);

        let parsed = PasswordHash::new(&first).unwrap();
        assert!(Argon2::default().verify_password(b"s3cret", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    #[tokio::test]
    async fn hashing_runs_on_the_blocking_pool() {
        let hash = hash_off_runtime("s3cret".to_string()).await.unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default().verify_password(b"s3cret", &parsed).is_ok());
    }

    #[test]
    fn blank_username_is_rejected() {
        let req = UserRequest {
            active: true,
            name: "Front Desk".to_string(),
            password: Some("pw".to_string()),
            scope: "regular".to_string(),
            username: " ".to_string(),
        };
        assert!(matches!(validate(req), Err(AppError::BadRequest(_))));
    }
}
