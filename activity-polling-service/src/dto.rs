use crate::error::NormalizeError;
use activity_db_entity::db::token_activity;
use serde::Deserialize;
use serde_json::Value;

/// One page of the paginated activities endpoint:
/// `{ "success": bool, "data": [ ... ] }`.
#[derive(Debug, Deserialize)]
#[serde(crate = "serde")]
pub struct ActivityPage {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<ActivityItem>,
}

/// A raw feed item. Every field is optional at the serde level so that a
/// partially filled item still decodes; presence is enforced by
/// [`ActivityItem::normalize`], which is where a broken upstream contract
/// surfaces as an error instead of a silently dropped page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(crate = "serde")]
pub struct ActivityItem {
    pub trans_id: Option<String>,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    pub routers: Option<Routers>,
    pub block_id: Option<i64>,
    pub block_time: Option<i64>,
    pub activity_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(crate = "serde")]
pub struct Routers {
    pub amount1: Option<Value>,
}

impl ActivityItem {
    /// Maps a raw feed item onto the persisted record shape. Pure, no I/O.
    /// The amount arrives nested under `routers` and may be a JSON number or
    /// string; either way it is carried forward as text, never parsed into a
    /// float.
    pub fn normalize(&self) -> Result<token_activity::Model, NormalizeError> {
        let signature = self
            .trans_id
            .clone()
            .ok_or(NormalizeError::MissingField("trans_id"))?;
        let from_address = self
            .from_address
            .clone()
            .ok_or(NormalizeError::MissingField("from_address"))?;
        let to_address = self
            .to_address
            .clone()
            .ok_or(NormalizeError::MissingField("to_address"))?;
        let slot = self
            .block_id
            .ok_or(NormalizeError::MissingField("block_id"))?;
        let activity_type = self
            .activity_type
            .clone()
            .ok_or(NormalizeError::MissingField("activity_type"))?;

        let amount = match self.routers.as_ref().and_then(|r| r.amount1.as_ref()) {
            Some(Value::String(amount)) => amount.to_owned(),
            Some(Value::Number(amount)) => amount.to_string(),
            Some(other) => {
                return Err(NormalizeError::NonScalarAmount {
                    signature,
                    value: other.to_owned(),
                })
            }
            None => return Err(NormalizeError::MissingField("routers.amount1")),
        };

        Ok(token_activity::Model {
            signature,
            from_address,
            to_address,
            amount,
            slot,
            block_time: self.block_time,
            activity_type,
        })
    }
}
