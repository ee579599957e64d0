use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub rust_log: String,
    pub polling_service_log: String,
    pub database_url: String,
    pub activities_api_key: String,
    pub token_mint_address: String,
    /// Defaults to the Solscan pro endpoint when not set.
    pub activities_api_url: Option<String>,
    pub polling_page_size: Option<u64>,
    pub polling_sleep_secs: Option<u64>,
    pub sqlx_max_connections: Option<u32>,
    pub sqlx_connect_timeout: Option<u64>,
    pub sqlx_logging: Option<bool>,
}

pub async fn get_db_connection(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options: ConnectOptions = config.database_url.to_owned().into();
    options
        .max_connections(match config.sqlx_max_connections {
            Some(v) => v,
            None => 5,
        })
        .connect_timeout(Duration::from_secs(match config.sqlx_connect_timeout {
            Some(v) => v,
            None => 8,
        }))
        .sqlx_logging(match config.sqlx_logging {
            Some(v) => v,
            None => false,
        });

    Database::connect(options).await
}
