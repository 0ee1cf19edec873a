//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses. It is the
//! single point where anything can turn into an HTTP error body, so no
//! request can crash the process.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use user_portal_shared::FieldError;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    /// Sign-up validation failed; carries every failing field.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

/// Error response body: `{"message": ..., "details"?: [...]}`
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Datos de registro inválidos".to_string(),
                Some(errors),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor".to_string(),
                    None,
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse { message, details });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON extractor that reports body problems as 400 with a `{message}`
/// body instead of axum's default 422 plain-text rejection.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(AppJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::Validation(vec![FieldError::new("email", "inválido")]), StatusCode::BAD_REQUEST)]
    #[case(ApiError::BadRequest("faltan campos".into()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::Unauthorized("Credenciales inválidas".into()), StatusCode::UNAUTHORIZED)]
    #[case(ApiError::Forbidden("Se requiere rol de administrador".into()), StatusCode::FORBIDDEN)]
    #[case(ApiError::NotFound("Usuario no encontrado".into()), StatusCode::NOT_FOUND)]
    #[case(ApiError::Conflict("El email ya está registrado".into()), StatusCode::CONFLICT)]
    #[case(ApiError::Internal(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_error_status(#[case] error: ApiError, #[case] status: StatusCode) {
        let response = error.into_response();
        assert_eq!(response.status(), status);
    }

    #[tokio::test]
    async fn test_validation_body_lists_every_field() {
        let error = ApiError::Validation(vec![
            FieldError::new("email", "inválido"),
            FieldError::new("password", "inválida"),
        ]);
        let response = error.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["details"].as_array().unwrap().len(), 2);
        assert_eq!(json["details"][0]["field"], "email");
    }
}
