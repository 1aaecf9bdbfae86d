use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState,
    error::AppError,
    models::{RequestStatus, UnavailableCryptoRequest, User},
    response::{self, ApiResponse},
    services::{admin_service, requests_service, user_service},
};

#[derive(Deserialize)]
pub struct ProfilesQuery {
    pub username: Option<String>,
}

#[derive(Deserialize)]
pub struct RequestsQuery {
    pub crypto: Option<String>,
}

#[derive(Deserialize)]
pub struct ModerationQuery {
    pub status: Option<String>,
}

fn user_json(u: &User) -> serde_json::Value {
    json!({
        "username": u.username,
        "email": u.email,
        "mobile": u.mobile,
        "role": u.role,
    })
}

fn request_json(r: &UnavailableCryptoRequest) -> serde_json::Value {
    json!({
        "crypto_symbol": r.symbol,
        "username": r.username,
        "request_message": r.message,
        "status": r.status.as_str(),
        "timestamp": r.timestamp,
    })
}

// GET /admin/profiles?username=
pub async fn get_profiles(
    State(state): State<AppState>,
    Query(q): Query<ProfilesQuery>,
) -> Result<Json<ApiResponse>, AppError> {
    if let Some(username) = q.username.as_deref().filter(|s| !s.is_empty()) {
        let user = user_service::get_profile(&state.db, username).await?;
        return Ok(response::ok_with_data(
            "User profile fetched successfully",
            user_json(&user),
        ));
    }

    let users = admin_service::view_profiles(&state.db).await?;
    let data: Vec<serde_json::Value> = users.iter().map(user_json).collect();

    Ok(response::ok_with_data(
        "User profiles fetched successfully",
        json!(data),
    ))
}

// DELETE /admin/users/:username
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    admin_service::delete_user(&state.db, &username).await?;

    tracing::info!(user = %username, "user deleted by admin");
    Ok(response::ok("User deleted successfully"))
}

// PATCH /admin/delegate/:username
pub async fn delegate_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    admin_service::delegate_user(&state.db, &username).await?;

    tracing::info!(user = %username, "user delegated to admin");
    Ok(response::ok("User delegated to admin successfully"))
}

// GET /admin/requests?crypto=
pub async fn get_requests(
    State(state): State<AppState>,
    Query(q): Query<RequestsQuery>,
) -> Result<Json<ApiResponse>, AppError> {
    let data = match q.crypto.as_deref().filter(|s| !s.is_empty()) {
        Some(symbol) => {
            let requests = requests_service::list_for_symbol(&state.db, symbol).await?;
            let items: Vec<serde_json::Value> = requests.iter().map(request_json).collect();

            json!({
                "crypto_symbol": symbol.to_lowercase(),
                "count": items.len(),
                "requests": items,
            })
        }
        None => {
            let requests = requests_service::list_all(&state.db).await?;
            let total = requests.len();

            let mut grouped: BTreeMap<String, Vec<serde_json::Value>> = BTreeMap::new();
            for r in &requests {
                grouped.entry(r.symbol.clone()).or_default().push(request_json(r));
            }

            let groups: Vec<serde_json::Value> = grouped
                .into_iter()
                .map(|(symbol, items)| {
                    json!({
                        "crypto_symbol": symbol,
                        "count": items.len(),
                        "requests": items,
                    })
                })
                .collect();

            json!({ "count": total, "data": groups })
        }
    };

    Ok(response::ok_with_data("Requests fetched successfully", data))
}

// GET /admin/requests/user/:username
pub async fn get_requests_for_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    let requests = requests_service::list_for_user(&state.db, &username).await?;

    if requests.is_empty() {
        return Ok(response::ok("No requests found for user"));
    }

    let items: Vec<serde_json::Value> = requests.iter().map(request_json).collect();
    Ok(response::ok_with_data(
        "Requests fetched successfully",
        json!(items),
    ))
}

// PUT /admin/requests/:crypto?status=Approved|Rejected
pub async fn act_on_requests(
    State(state): State<AppState>,
    Path(crypto): Path<String>,
    Query(q): Query<ModerationQuery>,
) -> Result<Json<ApiResponse>, AppError> {
    let status = q
        .status
        .as_deref()
        .map(str::trim)
        .and_then(RequestStatus::parse_moderation)
        .ok_or(AppError::InvalidRequestStatus)?;

    let updated = requests_service::moderate_symbol(&state.db, &crypto, status).await?;

    tracing::info!(symbol = %crypto, status = status.as_str(), updated, "moderated requests");
    Ok(response::ok_with_data(
        "Acted on requests successfully",
        json!({ "updated": updated }),
    ))
}
