use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::Cryptocurrency;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin client over the CoinMarketCap v1 cryptocurrency API. No caching and
/// no retries; every call goes upstream with a bounded timeout.
#[derive(Clone)]
pub struct CmcClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl CmcClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let http = Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .expect("failed to build http client");

        Self {
            http,
            base_url,
            api_key,
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<reqwest::Response, AppError> {
        if !self.has_key() {
            return Err(AppError::Upstream("CMC_API_KEY is missing in .env".to_string()));
        }

        let url = format!("{}{}", self.base_url, endpoint);
        self.http
            .get(&url)
            .header("X-CMC_PRO_API_KEY", &self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))
    }

    /// Top listings, USD-converted. Used by the top-cryptos endpoint and by
    /// symbol search.
    pub async fn listings(&self, limit: u32) -> Result<Vec<Cryptocurrency>, AppError> {
        let params = [
            ("start", "1".to_string()),
            ("limit", limit.to_string()),
            ("convert", "USD".to_string()),
        ];

        let res = self.get("/listings/latest", &params).await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("listings failed: {status} {body}")));
        }

        let parsed = res
            .json::<ListingsResponse>()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        Ok(parsed.data)
    }

    /// Latest quote for one symbol. `Ok(None)` when the symbol is unknown
    /// upstream, which is a valid outcome rather than a fault.
    pub async fn quote_by_symbol(&self, symbol: &str) -> Result<Option<Cryptocurrency>, AppError> {
        let sym = symbol.to_uppercase();
        let params = [("symbol", sym.clone()), ("convert", "USD".to_string())];
        self.quote(&params, &sym).await
    }

    /// Latest quote by upstream numeric id. Used by the reconciliation pass.
    pub async fn quote_by_id(&self, id: i64) -> Result<Option<Cryptocurrency>, AppError> {
        let key = id.to_string();
        let params = [("id", key.clone()), ("convert", "USD".to_string())];
        self.quote(&params, &key).await
    }

    async fn quote(
        &self,
        params: &[(&str, String)],
        data_key: &str,
    ) -> Result<Option<Cryptocurrency>, AppError> {
        let res = self.get("/quotes/latest", params).await?;

        let status = res.status();
        // The upstream answers 400 for unknown symbols/ids; that is a miss,
        // not a fault. Other client errors (bad key, rate limit) and server
        // failures stay errors.
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Ok(None);
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("quote failed: {status} {body}")));
        }

        let parsed = res
            .json::<QuotesResponse>()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        Ok(parsed.data.get(data_key).cloned())
    }
}

#[derive(Debug, Deserialize)]
struct ListingsResponse {
    data: Vec<Cryptocurrency>,
}

#[derive(Debug, Deserialize)]
struct QuotesResponse {
    data: HashMap<String, Cryptocurrency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_JSON: &str = r#"{
        "data": [
            {
                "id": 1,
                "name": "Bitcoin",
                "symbol": "BTC",
                "slug": "bitcoin",
                "cmc_rank": 1,
                "date_added": "2013-04-28T00:00:00.000Z",
                "last_updated": "2024-01-01T00:00:00.000Z",
                "quote": {
                    "USD": {
                        "price": 42000.123456,
                        "percent_change_1h": 0.1,
                        "percent_change_24h": -1.2,
                        "percent_change_7d": 3.4,
                        "fully_diluted_market_cap": 880000000000.0
                    }
                }
            }
        ]
    }"#;

    #[test]
    fn listings_decode_into_typed_records() {
        let parsed: ListingsResponse = serde_json::from_str(LISTING_JSON).unwrap();
        assert_eq!(parsed.data.len(), 1);

        let btc = &parsed.data[0];
        assert_eq!(btc.id, 1);
        assert_eq!(btc.symbol, "BTC");
        assert_eq!(btc.usd_price_rounded(), 42000.12);
    }

    #[test]
    fn quotes_decode_is_keyed_by_symbol() {
        let json = r#"{
            "data": {
                "ETH": {
                    "id": 1027,
                    "name": "Ethereum",
                    "symbol": "ETH",
                    "quote": { "USD": { "price": 3000.0 } }
                }
            }
        }"#;

        let parsed: QuotesResponse = serde_json::from_str(json).unwrap();
        let eth = parsed.data.get("ETH").unwrap();
        assert_eq!(eth.id, 1027);
        assert_eq!(eth.usd_price(), 3000.0);
        assert!(parsed.data.get("BTC").is_none());
    }

    #[test]
    fn optional_listing_fields_may_be_absent() {
        let json = r#"{
            "data": { "1": { "id": 1, "name": "Bitcoin", "symbol": "BTC",
                             "quote": { "USD": { "price": 50000.0 } } } }
        }"#;

        let parsed: QuotesResponse = serde_json::from_str(json).unwrap();
        let btc = parsed.data.get("1").unwrap();
        assert!(btc.cmc_rank.is_none());
        assert_eq!(btc.usd_price(), 50000.0);
    }
}
