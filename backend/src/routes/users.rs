//! User routes
//!
//! `GET /users/me` for any authenticated caller, `GET /users` for
//! admins only. Authorization comes exclusively from the verified
//! token extractors.

use crate::auth::{AdminUser, AuthUser};
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use user_portal_shared::UserProfile;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(me))
}

/// Get the caller's profile
///
/// GET /api/users/me
async fn me(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<UserProfile>> {
    let profile = UserService::get_profile(&state.db, user.user_id).await?;
    Ok(Json(profile))
}

/// List all users (admin only)
///
/// GET /api/users
async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<UserProfile>>> {
    let users = UserService::list_users(&state.db).await?;
    Ok(Json(users))
}

#[cfg(test)]
mod tests {
    // Covered by routes::auth_tests and the integration suite.
}
