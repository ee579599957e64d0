use sea_orm::DbErr;
use thiserror::Error;

/// Anything that aborts a single ingestion run. None of these are fatal to
/// the process; the next scheduled trigger starts over from the persisted
/// watermark.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("activity feed request failed: {0}")]
    Feed(#[from] FeedError),
    #[error("malformed activity in feed response: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("database operation failed: {0}")]
    Db(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
}

/// A required field was absent or unusable. Malformed items indicate an
/// upstream contract change, so the whole page is rejected rather than the
/// item skipped.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("activity is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("activity {signature} has a non-scalar amount: {value}")]
    NonScalarAmount {
        signature: String,
        value: serde_json::Value,
    },
}
