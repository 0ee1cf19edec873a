//! Auth service: sign-up and sign-in orchestration
//!
//! Sign-up runs the shared credential validator (every failing field is
//! reported), hashes on the blocking pool and persists with the default
//! role. Sign-in deliberately answers unknown email and wrong password
//! with the identical message.

use crate::auth::{PasswordService, TokenService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use chrono::Utc;
use sqlx::PgPool;
use user_portal_shared::{validate_sign_up, Role, SignInRequest, SignUpRequest, TokenResponse, UserProfile};

const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

/// Auth service for sign-up and sign-in
pub struct AuthService;

impl AuthService {
    /// Register a new user. Returns the created profile, hash excluded.
    pub async fn sign_up(pool: &PgPool, req: &SignUpRequest) -> Result<UserProfile, ApiError> {
        let new_user = validate_sign_up(req, Utc::now().date_naive())
            .map_err(ApiError::Validation)?;

        // Hash on the blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(new_user.password.clone())
            .await
            .map_err(ApiError::Internal)?;

        // The store's uniqueness constraint is the source of truth for
        // duplicate emails; a concurrent duplicate loses the race here.
        let user = UserRepository::create(pool, &new_user, &password_hash, &[Role::User])
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db) = &e {
                    if db.is_unique_violation() {
                        return ApiError::Conflict("El email ya está registrado".to_string());
                    }
                }
                ApiError::Database(e)
            })?;

        Ok(user.into())
    }

    /// Authenticate and issue a token carrying the current role names.
    pub async fn sign_in(
        pool: &PgPool,
        tokens: &TokenService,
        req: &SignInRequest,
    ) -> Result<TokenResponse, ApiError> {
        let (email, password) = match (req.email.as_deref(), req.password.as_deref()) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                (email.trim().to_lowercase(), password.to_string())
            }
            _ => {
                return Err(ApiError::BadRequest(
                    "El email y password son requeridos".to_string(),
                ))
            }
        };

        // Unknown email and wrong password must be indistinguishable.
        let user = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Database)?
            .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        // Verify on the blocking thread pool (CPU-intensive)
        let valid = PasswordService::verify_async(password, user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = tokens
            .issue(user.id, &user.role_set())
            .map_err(ApiError::Internal)?;

        Ok(TokenResponse { token })
    }
}

#[cfg(test)]
mod tests {
    // Database-backed paths are covered by the integration suite.
}
