use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::auth::provider::AuthSession;
use crate::auth::validation::{
    login_email, validate_sign_in, validate_sign_up, SignInRequest, SignUpRequest,
};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/auth/signup
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthSession>), AppError> {
    let phone = validate_sign_up(&req)?;
    let session = state
        .identity
        .sign_up(&login_email(&phone), &req.password)
        .await?;
    info!("Registered user {}", session.user_id);
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/v1/auth/login
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<AuthSession>, AppError> {
    let phone = validate_sign_in(&req)?;
    let session = state
        .identity
        .sign_in(&login_email(&phone), &req.password)
        .await?;
    Ok(Json(session))
}
