use sea_orm::entity::prelude::*;

/// One observed token activity. `signature` is the feed's transaction id and
/// the only identity: re-ingesting the same signature overwrites the row with
/// identical content.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "token_activity_history", schema_name = "public")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub signature: String,
    pub from_address: String,
    pub to_address: String,
    /// Kept as text; the upstream amount is an arbitrary-precision decimal.
    pub amount: String,
    pub slot: i64,
    /// Null while the transaction is unconfirmed upstream.
    pub block_time: Option<i64>,
    pub activity_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
