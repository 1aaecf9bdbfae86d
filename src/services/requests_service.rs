use futures_util::StreamExt;
use mongodb::Database;
use mongodb::bson::doc;

use crate::error::AppError;
use crate::models::{RequestStatus, UnavailableCryptoRequest};

const COLLECTION: &str = "unavailable_cryptos";

pub async fn save(db: &Database, request: &UnavailableCryptoRequest) -> Result<(), AppError> {
    let col = db.collection::<UnavailableCryptoRequest>(COLLECTION);
    col.insert_one(request, None).await?;
    Ok(())
}

/// Requests an admin has already acted on, for the notifications feed.
/// Read-only: there is no "seen" marker, so the same request keeps being
/// reported on every check.
pub async fn list_moderated_for_user(
    db: &Database,
    username: &str,
) -> Result<Vec<UnavailableCryptoRequest>, AppError> {
    collect(
        db,
        doc! { "username": username, "status": { "$in": ["Approved", "Rejected"] } },
    )
    .await
}

pub async fn list_all(db: &Database) -> Result<Vec<UnavailableCryptoRequest>, AppError> {
    collect(db, doc! {}).await
}

pub async fn list_for_symbol(
    db: &Database,
    symbol: &str,
) -> Result<Vec<UnavailableCryptoRequest>, AppError> {
    collect(db, doc! { "symbol": symbol.to_lowercase() }).await
}

pub async fn list_for_user(
    db: &Database,
    username: &str,
) -> Result<Vec<UnavailableCryptoRequest>, AppError> {
    collect(db, doc! { "username": username }).await
}

/// Moderates every Pending request for a symbol. Only Pending rows match, so
/// Approved/Rejected are terminal. Returns how many requests were updated.
pub async fn moderate_symbol(
    db: &Database,
    symbol: &str,
    status: RequestStatus,
) -> Result<u64, AppError> {
    let col = db.collection::<UnavailableCryptoRequest>(COLLECTION);

    let res = col
        .update_many(
            doc! { "symbol": symbol.to_lowercase(), "status": "Pending" },
            doc! { "$set": { "status": status.as_str() } },
            None,
        )
        .await?;

    Ok(res.modified_count)
}

pub async fn delete_all_for_user(db: &Database, username: &str) -> Result<(), AppError> {
    let col = db.collection::<UnavailableCryptoRequest>(COLLECTION);
    col.delete_many(doc! { "username": username }, None).await?;
    Ok(())
}

async fn collect(
    db: &Database,
    filter: mongodb::bson::Document,
) -> Result<Vec<UnavailableCryptoRequest>, AppError> {
    let col = db.collection::<UnavailableCryptoRequest>(COLLECTION);

    let mut cursor = col.find(filter, None).await?;

    let mut items: Vec<UnavailableCryptoRequest> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res?);
    }

    Ok(items)
}
