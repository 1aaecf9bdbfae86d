//! Library entrypoint for cryptotracker.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod validation;

// Kept at crate root because the codebase references it as `crate::auth`.
#[path = "middleware/auth.rs"]
pub mod auth;

pub mod services;

pub mod controllers;
pub mod routes;

/// Tokens invalidated by logout, keyed to their expiry. The auth middleware
/// rejects anything in here; entries are pruned once the token would have
/// lapsed on its own, so the map stays bounded by the 24h token lifetime.
pub type TokenBlacklist = Arc<Mutex<HashMap<String, i64>>>;

#[derive(Clone)]
pub struct AppState {
    pub db: mongodb::Database,
    pub settings: config::Settings,
    pub cmc: services::coinmarketcap::CmcClient,
    pub blacklist: TokenBlacklist,
}

impl AppState {
    pub fn new(db: mongodb::Database, settings: config::Settings) -> Self {
        let cmc = services::coinmarketcap::CmcClient::new(
            settings.cmc_base_url.clone(),
            settings.cmc_api_key.clone(),
        );

        Self {
            db,
            settings,
            cmc,
            blacklist: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}
