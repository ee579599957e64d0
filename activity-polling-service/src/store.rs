use activity_db_entity::db::token_activity::{
    Column as TokenActivityColumn, Entity as TokenActivity, Model as TokenActivityModel,
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

/// The staleness cutoff for an ingestion run: the max `block_time` across all
/// persisted activities, 0 when the table is empty. Read once per run so a
/// run filters against a consistent watermark even while it writes.
pub async fn latest_known_block_time(db: &DatabaseConnection) -> Result<i64, DbErr> {
    let latest = TokenActivity::find()
        .filter(TokenActivityColumn::BlockTime.is_not_null())
        .order_by_desc(TokenActivityColumn::BlockTime)
        .one(db)
        .await?;

    Ok(latest.and_then(|activity| activity.block_time).unwrap_or(0))
}

/// Bulk insert-or-replace keyed by signature. Replaying an already persisted
/// activity rewrites the row with identical content, so retries and page
/// overlaps are harmless.
pub async fn upsert_batch(
    db: &DatabaseConnection,
    batch: Vec<TokenActivityModel>,
) -> Result<(), DbErr> {
    if batch.is_empty() {
        return Ok(());
    }

    let models = batch
        .into_iter()
        .map(IntoActiveModel::into_active_model)
        .collect::<Vec<_>>();

    TokenActivity::insert_many(models)
        .on_conflict(
            OnConflict::column(TokenActivityColumn::Signature)
                .update_columns([
                    TokenActivityColumn::FromAddress,
                    TokenActivityColumn::ToAddress,
                    TokenActivityColumn::Amount,
                    TokenActivityColumn::Slot,
                    TokenActivityColumn::BlockTime,
                    TokenActivityColumn::ActivityType,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(())
}
