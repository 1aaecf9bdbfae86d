use bcrypt::{DEFAULT_COST, hash, verify};
use mongodb::bson::{doc, oid::ObjectId};

use crate::auth;
use crate::error::AppError;
use crate::models::{Role, User};
use crate::AppState;

pub struct SignupData {
    pub username: String,
    pub password: String,
    pub email: String,
    pub mobile: i64,
}

/// Registers a new "user"-role account. Usernames are unique; a duplicate is
/// reported as a generic signup failure, same as any other store problem
/// during registration.
pub async fn signup(state: &AppState, data: SignupData) -> Result<(), AppError> {
    let users = state.db.collection::<User>("users");

    let existing = users
        .find_one(doc! { "username": &data.username }, None)
        .await?;
    if existing.is_some() {
        return Err(AppError::SignupFailed);
    }

    let password_hash = hash(&data.password, DEFAULT_COST).map_err(|_| AppError::SignupFailed)?;

    let user = User {
        id: ObjectId::new(),
        username: data.username,
        email: data.email,
        mobile: data.mobile,
        password_hash,
        role: Role::User,
    };

    users.insert_one(&user, None).await?;

    Ok(())
}

/// Verifies credentials and issues a 24h token carrying username + role.
pub async fn login(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<(User, String), AppError> {
    let users = state.db.collection::<User>("users");

    let user = users
        .find_one(doc! { "username": username }, None)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify(password, &user.password_hash).unwrap_or(false) {
        return Err(AppError::InvalidCredentials);
    }

    let token = auth::make_jwt(state, &user.username, user.role)?;

    Ok((user, token))
}
