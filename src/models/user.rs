use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub username: String,
    pub email: String,
    pub mobile: i64,

    // Never exposed directly; responses go through explicit projections.
    pub password_hash: String,

    pub role: Role,
}

/// What the auth middleware injects into request extensions, straight from
/// the token claims (no DB round-trip per request).
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
    pub role: Role,
}
