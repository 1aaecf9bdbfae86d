use axum::{Router, routing::get};

use crate::{AppState, controllers::notification_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/notifications", get(notification_controller::get_notifications))
}
