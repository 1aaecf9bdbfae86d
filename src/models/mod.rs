pub mod user;
pub mod alert;
pub mod request;
pub mod crypto;

pub use user::{CurrentUser, Role, User};
pub use alert::{AlertStatus, PriceAlert};
pub use request::{RequestStatus, UnavailableCryptoRequest};
pub use crypto::{Cryptocurrency, UsdQuote};
