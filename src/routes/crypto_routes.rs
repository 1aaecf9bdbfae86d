use axum::{Router, routing::{get, post}};

use crate::{AppState, controllers::crypto_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/cryptos", get(crypto_controller::get_top_cryptos))
        .route("/cryptos/alert", post(crypto_controller::post_price_alert))
        .route("/cryptos/:symbol", get(crypto_controller::get_crypto_by_symbol))
}
