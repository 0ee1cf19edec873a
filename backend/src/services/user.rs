//! User service: profile lookup and the admin-only listing.

use crate::error::ApiError;
use crate::repositories::UserRepository;
use sqlx::PgPool;
use user_portal_shared::UserProfile;
use uuid::Uuid;

/// User service for profile operations
pub struct UserService;

impl UserService {
    /// Get the caller's profile.
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<UserProfile, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Database)?
            .ok_or_else(|| ApiError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(user.into())
    }

    /// List every user profile. Callers must already be admin-gated.
    pub async fn list_users(pool: &PgPool) -> Result<Vec<UserProfile>, ApiError> {
        let users = UserRepository::list_all(pool)
            .await
            .map_err(ApiError::Database)?;

        Ok(users.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    // Database-backed paths are covered by the integration suite.
}
