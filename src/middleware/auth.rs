use axum::{
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    error::AppError,
    models::{CurrentUser, Role},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    // username
    pub sub: String,
    pub role: Role,
    // expiry (unix timestamp seconds)
    pub exp: usize,
}

pub fn make_jwt(state: &AppState, username: &str, role: Role) -> Result<String, AppError> {
    let exp = (Utc::now() + Duration::hours(24)).timestamp() as usize;

    let claims = Claims {
        sub: username.to_string(),
        role,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.settings.jwt_secret.as_bytes()),
    )
    .map_err(|_| AppError::Unauthorized)
}

pub fn decode_claims(state: &AppState, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.settings.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidToken)
}

pub fn extract_bearer(headers: &axum::http::HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    raw.strip_prefix("Bearer ").map(|t| t.trim().to_string())
}

fn authenticate(state: &AppState, headers: &axum::http::HeaderMap) -> Result<CurrentUser, AppError> {
    let token = extract_bearer(headers).ok_or(AppError::TokenRequired)?;

    let blacklisted = state
        .blacklist
        .lock()
        .map(|map| map.contains_key(&token))
        .unwrap_or(false);
    if blacklisted {
        return Err(AppError::BlacklistedToken);
    }

    let claims = decode_claims(state, &token)?;

    Ok(CurrentUser {
        username: claims.sub,
        role: claims.role,
    })
}

/// Requires a valid, non-blacklisted token. Admins pass as well.
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

/// Requires the admin role on top of a valid token.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()) {
        Ok(user) if user.role == Role::Admin => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(_) => AppError::Unauthorized.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Records the token until its own expiry. Each call also drops entries for
/// tokens that have since lapsed, so the map cannot grow without bound.
pub fn blacklist_token(state: &AppState, token: String, exp: i64) {
    let now = Utc::now().timestamp();

    if let Ok(mut map) = state.blacklist.lock() {
        map.retain(|_, entry_exp| *entry_exp > now);
        if exp > now {
            map.insert(token, exp);
        }
    }
}
