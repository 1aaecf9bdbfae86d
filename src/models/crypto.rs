use serde::{Deserialize, Serialize};

/// USD leg of an upstream quote, trimmed to the fields the API exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsdQuote {
    pub price: f64,

    #[serde(default)]
    pub percent_change_1h: Option<f64>,
    #[serde(default)]
    pub percent_change_24h: Option<f64>,
    #[serde(default)]
    pub percent_change_7d: Option<f64>,
    #[serde(default)]
    pub fully_diluted_market_cap: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoQuoteBlock {
    #[serde(rename = "USD")]
    pub usd: UsdQuote,
}

/// Caller-facing projection of an upstream listing. Ephemeral; never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cryptocurrency {
    pub id: i64,
    pub name: String,
    pub symbol: String,

    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub cmc_rank: Option<i64>,
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,

    pub quote: CryptoQuoteBlock,
}

impl Cryptocurrency {
    pub fn usd_price(&self) -> f64 {
        self.quote.usd.price
    }

    /// Price rounded to cents for display payloads.
    pub fn usd_price_rounded(&self) -> f64 {
        (self.quote.usd.price * 100.0).round() / 100.0
    }
}
