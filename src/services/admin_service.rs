use futures_util::StreamExt;
use mongodb::Database;
use mongodb::bson::doc;

use crate::error::AppError;
use crate::models::{Role, User};
use crate::services::{alerts_service, requests_service};

pub async fn view_profiles(db: &Database) -> Result<Vec<User>, AppError> {
    let users = db.collection::<User>("users");

    let mut cursor = users.find(doc! {}, None).await?;

    let mut items: Vec<User> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res?);
    }

    Ok(items)
}

/// Deletes the account and cascades to the user's alerts and unavailability
/// requests.
pub async fn delete_user(db: &Database, username: &str) -> Result<(), AppError> {
    let users = db.collection::<User>("users");

    let res = users.delete_one(doc! { "username": username }, None).await?;
    if res.deleted_count == 0 {
        return Err(AppError::NotFound(format!("user {username}")));
    }

    alerts_service::delete_all_for_user(db, username).await?;
    requests_service::delete_all_for_user(db, username).await?;

    Ok(())
}

/// Promotes a user to admin. Idempotence is not wanted here: promoting an
/// admin again is reported as an error.
pub async fn delegate_user(db: &Database, username: &str) -> Result<(), AppError> {
    let users = db.collection::<User>("users");

    let user = users
        .find_one(doc! { "username": username }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {username}")))?;

    if user.role == Role::Admin {
        return Err(AppError::AlreadyAdmin);
    }

    users
        .update_one(
            doc! { "username": username },
            doc! { "$set": { "role": "admin" } },
            None,
        )
        .await?;

    Ok(())
}
