use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState,
    error::AppError,
    models::{CurrentUser, Cryptocurrency},
    response::{self, ApiResponse},
    services::crypto_service::{self, AlertOutcome, SearchOutcome},
};

#[derive(Deserialize)]
pub struct TopQuery {
    pub count: Option<u32>,
}

#[derive(Deserialize)]
pub struct AlertRequest {
    pub crypto_symbol: String,
    pub target_price: f64,
}

fn crypto_json(c: &Cryptocurrency) -> serde_json::Value {
    json!({
        "id": c.id,
        "name": c.name,
        "symbol": c.symbol,
        "slug": c.slug,
        "cmc_rank": c.cmc_rank,
        "date_added": c.date_added,
        "last_updated": c.last_updated,
        "quote": {
            "USD": {
                "price": c.usd_price_rounded(),
                "percent_change_1h": c.quote.usd.percent_change_1h,
                "percent_change_24h": c.quote.usd.percent_change_24h,
                "percent_change_7d": c.quote.usd.percent_change_7d,
                "fully_diluted_market_cap": c.quote.usd.fully_diluted_market_cap,
            }
        },
    })
}

// GET /cryptos?count=N
pub async fn get_top_cryptos(
    State(state): State<AppState>,
    Query(q): Query<TopQuery>,
) -> Result<Json<ApiResponse>, AppError> {
    let count = q.count.unwrap_or(10);

    let cryptos = crypto_service::top_cryptocurrencies(&state, count).await?;
    let data: Vec<serde_json::Value> = cryptos.iter().map(crypto_json).collect();

    Ok(response::ok_with_data(
        "Top cryptocurrencies retrieved successfully",
        json!(data),
    ))
}

// GET /cryptos/:symbol
pub async fn get_crypto_by_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse>, AppError> {
    let symbol = symbol.trim().to_string();
    if symbol.is_empty() {
        return Err(AppError::MissingSymbol);
    }

    match crypto_service::search_cryptocurrency(&state, &user.username, &symbol).await? {
        SearchOutcome::Found(crypto) => Ok(response::ok_with_data(
            "Cryptocurrency details retrieved successfully",
            crypto_json(&crypto),
        )),
        SearchOutcome::RequestSubmitted => Ok(response::ok(format!(
            "Request to add {symbol} has been submitted"
        ))),
    }
}

// POST /cryptos/alert
pub async fn post_price_alert(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<AlertRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    let symbol = req.crypto_symbol.trim().to_string();
    if symbol.is_empty() {
        return Err(AppError::MissingSymbol);
    }
    if !req.target_price.is_finite() || req.target_price <= 0.0 {
        return Err(AppError::InvalidPayload);
    }

    match crypto_service::set_price_alert(&state, &user.username, &symbol, req.target_price).await? {
        AlertOutcome::Created { current_price } => Ok(response::ok_with_data(
            "Price alert set successfully",
            json!({ "current_price": current_price }),
        )),
        AlertOutcome::AlreadyMet { current_price } => Ok(response::ok_with_data(
            format!(
                "{symbol} has already reached your target price of ${:.2}. Current price: ${:.2}",
                req.target_price, current_price
            ),
            json!({ "current_price": current_price }),
        )),
    }
}
