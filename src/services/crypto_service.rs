use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::error::AppError;
use crate::models::{AlertStatus, Cryptocurrency, PriceAlert, RequestStatus, UnavailableCryptoRequest};
use crate::services::{alerts_service, requests_service};
use crate::AppState;

// How deep the listings scan goes when searching by symbol or name.
const SEARCH_DEPTH: u32 = 5000;

pub enum SearchOutcome {
    Found(Box<Cryptocurrency>),
    /// Not listed upstream; an unavailability request was stored.
    RequestSubmitted,
}

pub enum AlertOutcome {
    Created { current_price: f64 },
    /// Target already at/above current price; nothing stored.
    AlreadyMet { current_price: f64 },
}

pub async fn top_cryptocurrencies(
    state: &AppState,
    count: u32,
) -> Result<Vec<Cryptocurrency>, AppError> {
    state.cmc.listings(count).await
}

/// Case-insensitive search over upstream listings by symbol or full name.
/// A miss is not an error: it files an UnavailableCryptoRequest for admins
/// to moderate.
pub async fn search_cryptocurrency(
    state: &AppState,
    username: &str,
    query: &str,
) -> Result<SearchOutcome, AppError> {
    let q = query.to_lowercase();

    let listings = state.cmc.listings(SEARCH_DEPTH).await?;

    if let Some(found) = listings.into_iter().find(|c| matches_query(c, &q)) {
        return Ok(SearchOutcome::Found(Box::new(found)));
    }

    tracing::info!(query = %q, user = %username, "cryptocurrency not found, filing request");

    let request = UnavailableCryptoRequest {
        id: ObjectId::new(),
        symbol: q,
        username: username.to_string(),
        message: "Please add this cryptocurrency.".to_string(),
        status: RequestStatus::Pending,
        timestamp: Utc::now().timestamp(),
    };
    requests_service::save(&state.db, &request).await?;

    Ok(SearchOutcome::RequestSubmitted)
}

/// Creates a Pending price alert, or reports immediate fulfillment when the
/// current price already meets the target. One upstream fetch; the symbol
/// must exist upstream before anything is written.
pub async fn set_price_alert(
    state: &AppState,
    username: &str,
    symbol: &str,
    target_price: f64,
) -> Result<AlertOutcome, AppError> {
    let quote = state
        .cmc
        .quote_by_symbol(symbol)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("cryptocurrency {symbol}")))?;

    let current_price = quote.usd_price();

    if current_price >= target_price {
        return Ok(AlertOutcome::AlreadyMet { current_price });
    }

    let alert = PriceAlert {
        id: ObjectId::new(),
        username: username.to_string(),
        crypto_id: quote.id,
        symbol: quote.symbol.clone(),
        target_price,
        status: AlertStatus::Pending,
        asked_at: Utc::now().timestamp(),
        served_at: None,
    };
    alerts_service::create(&state.db, &alert).await?;

    Ok(AlertOutcome::Created { current_price })
}

fn matches_query(crypto: &Cryptocurrency, lowercased_query: &str) -> bool {
    crypto.symbol.to_lowercase() == lowercased_query
        || crypto.name.to_lowercase() == lowercased_query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crypto::CryptoQuoteBlock;
    use crate::models::UsdQuote;

    fn sample(symbol: &str, name: &str) -> Cryptocurrency {
        Cryptocurrency {
            id: 1,
            name: name.to_string(),
            symbol: symbol.to_string(),
            slug: None,
            cmc_rank: None,
            date_added: None,
            last_updated: None,
            quote: CryptoQuoteBlock {
                usd: UsdQuote {
                    price: 1.0,
                    percent_change_1h: None,
                    percent_change_24h: None,
                    percent_change_7d: None,
                    fully_diluted_market_cap: None,
                },
            },
        }
    }

    #[test]
    fn search_matches_symbol_and_name_case_insensitively() {
        let btc = sample("BTC", "Bitcoin");
        assert!(matches_query(&btc, "btc"));
        assert!(matches_query(&btc, "bitcoin"));
        assert!(!matches_query(&btc, "bit"));
    }
}
