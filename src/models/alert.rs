use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertStatus {
    Pending,
    Served,
}

/// A user's request to be told when a symbol's price reaches a target.
/// `served_at` is set if and only if `status` is `Served`; the transition is
/// made only by the reconciliation pass, through a status-guarded update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceAlert {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub username: String,

    // Upstream numeric id, captured when the alert is created so the
    // reconciliation pass can quote by id.
    pub crypto_id: i64,
    pub symbol: String,

    pub target_price: f64,
    pub status: AlertStatus,

    pub asked_at: i64,
    pub served_at: Option<i64>,
}
