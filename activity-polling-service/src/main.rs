mod config;
mod dto;
mod error;
mod feed;
mod store;
mod sync_activities;

use figment::{
    providers::{Format, Toml},
    Figment,
};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use sync_activities::{Ingester, RunOutcome};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config: config::Config = Figment::new().merge(Toml::file("App.toml")).extract()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.rust_log);
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                format!("activity_polling_service={}", &config.polling_service_log)
                    .parse()
                    .expect("Error parsing directive"),
            ),
        )
        .with_span_events(FmtSpan::FULL)
        .init();

    let db = config::get_db_connection(&config).await?;
    info!("Connected to database successfully");

    let client = reqwest::Client::builder()
        .build()
        .expect("Reqwest client failed to initialize!");

    let polling_sleep_secs = match config.polling_sleep_secs {
        Some(v) => v,
        None => 60,
    };

    let ingester = Arc::new(Ingester::new(db, feed::SolscanFeed::new(client, &config)));

    // The first tick fires immediately, giving the startup run; a tick that
    // lands while a run is still in flight is dropped by the single-flight
    // guard, and missed ticks are skipped rather than bunched up.
    let mut ticker = interval(Duration::from_secs(polling_sleep_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let ingester = ingester.clone();
                tokio::spawn(async move {
                    match ingester.run().await {
                        RunOutcome::Completed { pages_fetched, records } => {
                            info!(
                                "Activity sync completed: {} pages fetched, {} new records",
                                pages_fetched, records
                            );
                        }
                        RunOutcome::Skipped => {}
                        RunOutcome::Failed(sync_error) => {
                            error!("Error fetching activities: {:?}", sync_error);
                        }
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down activity polling service");
                break;
            }
        }
    }

    Ok(())
}
