pub mod auth_controller;
pub mod user_controller;
pub mod crypto_controller;
pub mod notification_controller;
pub mod admin_controller;
