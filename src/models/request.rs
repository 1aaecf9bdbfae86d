use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn parse_moderation(s: &str) -> Option<Self> {
        match s {
            "Approved" => Some(Self::Approved),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// A user's ask to add a symbol the tracker does not know. Created on a
/// failed search; moderated by admins; re-reported to the user on every
/// notifications check once moderated (there is no "seen" marker).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailableCryptoRequest {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub symbol: String,
    pub username: String,
    pub message: String,
    pub status: RequestStatus,
    pub timestamp: i64,
}
