use mongodb::Database;
use mongodb::bson::doc;

use crate::error::AppError;
use crate::models::User;

pub async fn get_profile(db: &Database, username: &str) -> Result<User, AppError> {
    let users = db.collection::<User>("users");

    users
        .find_one(doc! { "username": username }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {username}")))
}
