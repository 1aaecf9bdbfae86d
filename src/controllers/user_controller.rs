use axum::{Json, extract::{Extension, State}};
use serde_json::json;

use crate::{
    AppState,
    error::AppError,
    models::CurrentUser,
    response::{self, ApiResponse},
    services::user_service,
};

// GET /users/me
pub async fn get_me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse>, AppError> {
    let profile = user_service::get_profile(&state.db, &user.username).await?;

    Ok(response::ok_with_data(
        "User profile retrieved successfully",
        json!({
            "username": profile.username,
            "email": profile.email,
            "mobile": profile.mobile,
        }),
    ))
}
