use crate::error::{AppError, AppResult};
use crate::services::credential::CredentialValidator;
use axum::{response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Moderator password
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
}

/// Establish a moderator session.
///
/// Only this endpoint is gated by the credential validator; the queue reads
/// and the action endpoint carry no credential check.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credential accepted", body = LoginResponse),
        (status = 400, description = "Missing password", body = AppError),
        (status = 401, description = "Credential rejected", body = AppError),
    ),
    tag = "auth"
)]
pub async fn login(
    Extension(credentials): Extension<CredentialValidator>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let password = payload
        .password
        .as_deref()
        .filter(|password| !password.is_empty())
        .ok_or_else(|| AppError::Validation("Missing required field: password".to_string()))?;

    if !credentials.validate(password) {
        return Err(AppError::Unauthorized);
    }

    Ok(Json(LoginResponse { success: true }))
}
