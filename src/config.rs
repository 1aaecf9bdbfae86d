use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,

    pub cmc_api_key: String,
    pub cmc_base_url: String,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "cryptotracker".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5555);

    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-dev-secret".to_string());

    let cmc_api_key = env::var("CMC_API_KEY").unwrap_or_default();

    // Overridable so tests can point the client at a local stub.
    let cmc_base_url = env::var("CMC_BASE_URL")
        .unwrap_or_else(|_| "https://pro-api.coinmarketcap.com/v1/cryptocurrency".to_string());

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        jwt_secret,
        cmc_api_key,
        cmc_base_url,
    }
}
