use axum::{Json, extract::{Extension, State}};
use serde_json::json;

use crate::{
    AppState,
    error::AppError,
    models::CurrentUser,
    response::{self, ApiResponse},
    services::notification_service,
};

// GET /notifications
pub async fn get_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse>, AppError> {
    let notifications = notification_service::check_notifications(&state, &user.username).await?;

    Ok(response::ok_with_data(
        "Notifications retrieved",
        json!(notifications),
    ))
}
