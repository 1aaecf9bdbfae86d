use axum::Router;
use axum::middleware::from_fn_with_state;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::AppState;

pub mod auth_routes;
pub mod user_routes;
pub mod crypto_routes;
pub mod notification_routes;
pub mod admin_routes;

pub fn app(state: AppState) -> Router {
    let public = auth_routes::public_routes(Router::<AppState>::new());

    let user = Router::<AppState>::new();
    let user = auth_routes::protected_routes(user);
    let user = user_routes::add_routes(user);
    let user = crypto_routes::add_routes(user);
    let user = notification_routes::add_routes(user);
    let user = user.route_layer(from_fn_with_state(state.clone(), crate::auth::require_user));

    let admin = admin_routes::add_routes(Router::<AppState>::new())
        .route_layer(from_fn_with_state(state.clone(), crate::auth::require_admin));

    public
        .merge(user)
        .merge(admin)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
