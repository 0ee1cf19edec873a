//! Authentication and authorization extractors
//!
//! `AuthUser` verifies the bearer token on every protected request;
//! `AdminUser` additionally requires the admin role. Both decide only
//! from the verified claims, never from anything else the client sent.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use user_portal_shared::Role;
use uuid::Uuid;

/// Authenticated caller extracted from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub roles: Vec<Role>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Token no proporcionado".to_string()))?;

        // Check Bearer prefix
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Token no proporcionado".to_string()))?;

        // Verify with the pre-computed keys from state. The message stays
        // generic so a caller cannot distinguish bad signature from expiry.
        let claims = app_state
            .tokens
            .verify(token)
            .map_err(|_| ApiError::Unauthorized("Token inválido o expirado".to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Token inválido o expirado".to_string()))?;

        // The token is ours, so unknown role names cannot normally occur;
        // they are dropped rather than trusted.
        let roles = claims
            .roles
            .iter()
            .filter_map(|r| r.parse::<Role>().ok())
            .collect();

        Ok(AuthUser { user_id, roles })
    }
}

/// Authenticated caller that additionally holds the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(ApiError::Forbidden(
                "Se requiere rol de administrador".to_string(),
            ));
        }
        Ok(AdminUser(user))
    }
}
