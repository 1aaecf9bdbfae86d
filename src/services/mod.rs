pub mod coinmarketcap;
pub mod db_init;

pub mod auth_service;
pub mod user_service;
pub mod admin_service;
pub mod crypto_service;
pub mod alerts_service;
pub mod requests_service;
pub mod notification_service;
