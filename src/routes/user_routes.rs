use axum::{Router, routing::get};

use crate::{AppState, controllers::user_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/users/me", get(user_controller::get_me))
}
