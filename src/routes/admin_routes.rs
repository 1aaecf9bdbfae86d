use axum::{
    Router,
    routing::{delete, get, patch, put},
};

use crate::{AppState, controllers::admin_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/admin/profiles", get(admin_controller::get_profiles))
        .route("/admin/users/:username", delete(admin_controller::delete_user))
        .route("/admin/delegate/:username", patch(admin_controller::delegate_user))
        .route("/admin/requests", get(admin_controller::get_requests))
        .route(
            "/admin/requests/user/:username",
            get(admin_controller::get_requests_for_user),
        )
        .route("/admin/requests/:crypto", put(admin_controller::act_on_requests))
}
