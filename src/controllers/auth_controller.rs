use axum::{Json, extract::State, http::HeaderMap};
use serde::Deserialize;

use crate::{
    AppState, auth,
    error::AppError,
    response::{self, ApiResponse},
    services::auth_service,
    validation,
};

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub mobile: i64,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// POST /signup
pub async fn post_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    let username = req.username.trim().to_string();

    if !validation::is_valid_username(&username) {
        return Err(AppError::InvalidUsername);
    }
    if !validation::is_valid_password(&req.password) {
        return Err(AppError::InvalidPassword);
    }
    if !validation::is_valid_email(req.email.trim()) {
        return Err(AppError::InvalidEmail);
    }
    if !validation::is_valid_mobile(req.mobile) {
        return Err(AppError::InvalidMobile);
    }

    auth_service::signup(
        &state,
        auth_service::SignupData {
            username: username.clone(),
            password: req.password,
            email: req.email.trim().to_string(),
            mobile: req.mobile,
        },
    )
    .await?;

    tracing::info!(user = %username, "signup successful");
    Ok(response::ok("Signup successful"))
}

// POST /login
pub async fn post_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    let username = req.username.trim();

    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidCredentials);
    }

    let (user, token) = auth_service::login(&state, username, &req.password).await?;

    tracing::info!(user = %user.username, "login successful");
    Ok(response::ok_with_token("Login successful", token))
}

// POST /logout
pub async fn post_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse>, AppError> {
    let token = auth::extract_bearer(&headers).ok_or(AppError::TokenRequired)?;
    let claims = auth::decode_claims(&state, &token)?;

    auth::blacklist_token(&state, token, claims.exp as i64);

    tracing::info!(user = %claims.sub, "logout successful");
    Ok(response::ok("Logout successful"))
}
