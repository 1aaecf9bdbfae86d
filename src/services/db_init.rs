use mongodb::{
    Database, IndexModel,
    bson::doc,
    options::IndexOptions,
};

use crate::error::AppError;

pub async fn ensure_indexes(db: &Database) -> Result<(), AppError> {
    // users: unique username
    {
        let col = db.collection::<mongodb::bson::Document>("users");
        let model = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None).await?;
    }

    // price_alerts: the reconciliation pass scans by (username, status)
    {
        let col = db.collection::<mongodb::bson::Document>("price_alerts");
        let model = IndexModel::builder()
            .keys(doc! { "username": 1, "status": 1 })
            .build();

        col.create_index(model, None).await?;
    }

    // unavailable_cryptos: notifications scan by (username, status), admin
    // moderation by (symbol, status)
    {
        let col = db.collection::<mongodb::bson::Document>("unavailable_cryptos");

        let model = IndexModel::builder()
            .keys(doc! { "username": 1, "status": 1 })
            .build();
        col.create_index(model, None).await?;

        let model = IndexModel::builder()
            .keys(doc! { "symbol": 1, "status": 1 })
            .build();
        col.create_index(model, None).await?;
    }

    Ok(())
}
