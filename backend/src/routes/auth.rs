//! Authentication routes
//!
//! Sign-up and sign-in. Password hashing and verification run on the
//! blocking thread pool; token issuance uses the pre-computed keys held
//! in AppState.

use crate::error::{ApiResult, AppJson};
use crate::services::AuthService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use user_portal_shared::{SignInRequest, SignUpRequest, TokenResponse, UserProfile};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signUp", post(sign_up))
        .route("/signIn", post(sign_in))
}

/// Register a new user
///
/// POST /api/auth/signUp
///
/// 201 with the created profile (never the hash); 400 listing every
/// validation failure; 409 when the email is taken.
async fn sign_up(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let user = AuthService::sign_up(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Sign in with email and password
///
/// POST /api/auth/signIn
///
/// 200 with `{token}`; 400 on missing fields; 401 with a generic
/// message on bad credentials.
async fn sign_in(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignInRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = AuthService::sign_in(&state.db, &state.tokens, &req).await?;
    Ok(Json(token))
}
