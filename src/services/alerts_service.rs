use futures_util::StreamExt;
use mongodb::Database;
use mongodb::bson::{doc, oid::ObjectId};

use crate::error::AppError;
use crate::models::PriceAlert;

const COLLECTION: &str = "price_alerts";

pub async fn list_pending(db: &Database, username: &str) -> Result<Vec<PriceAlert>, AppError> {
    let alerts = db.collection::<PriceAlert>(COLLECTION);

    let mut cursor = alerts
        .find(doc! { "username": username, "status": "Pending" }, None)
        .await?;

    let mut items: Vec<PriceAlert> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res?);
    }

    Ok(items)
}

/// Transitions one alert Pending -> Served. The `status: Pending` guard makes
/// the update a compare-and-set: a second reconciliation pass racing on the
/// same alert matches zero rows and reports `false`, which callers treat as
/// an idempotent success rather than an error.
pub async fn mark_served(
    db: &Database,
    alert_id: ObjectId,
    served_at: i64,
) -> Result<bool, AppError> {
    let alerts = db.collection::<PriceAlert>(COLLECTION);

    let res = alerts
        .update_one(
            doc! { "_id": alert_id, "status": "Pending" },
            doc! { "$set": { "status": "Served", "served_at": served_at } },
            None,
        )
        .await?;

    Ok(res.matched_count > 0)
}

pub async fn create(db: &Database, alert: &PriceAlert) -> Result<(), AppError> {
    let alerts = db.collection::<PriceAlert>(COLLECTION);
    alerts.insert_one(alert, None).await?;
    Ok(())
}

/// Cascade used when an admin deletes a user.
pub async fn delete_all_for_user(db: &Database, username: &str) -> Result<(), AppError> {
    let alerts = db.collection::<PriceAlert>(COLLECTION);
    alerts.delete_many(doc! { "username": username }, None).await?;
    Ok(())
}
