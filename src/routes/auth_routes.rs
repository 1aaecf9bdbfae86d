use axum::{Router, routing::post};

use crate::{AppState, controllers::auth_controller};

pub fn public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/signup", post(auth_controller::post_signup))
        .route("/login", post(auth_controller::post_login))
}

pub fn protected_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/logout", post(auth_controller::post_logout))
}
