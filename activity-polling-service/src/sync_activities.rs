use crate::error::SyncError;
use crate::feed::ActivityFeed;
use crate::store;
use sea_orm::DatabaseConnection;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Result of one trigger of the ingestion loop. Errors are carried rather
/// than logged here so the scheduler decides how to surface them.
#[derive(Debug)]
pub enum RunOutcome {
    Completed { pages_fetched: u64, records: usize },
    /// A run was already in flight; this trigger was dropped, not queued.
    Skipped,
    Failed(SyncError),
}

/// Single-flight incremental ingestion of the activity feed.
///
/// Each run reads the watermark once, then walks pages from 1 upward,
/// upserting every activity strictly newer than the watermark. The feed is
/// expected to page newest-first, so the first page contributing nothing new
/// proves every later page is stale and the run stops there instead of
/// re-scanning feed history.
pub struct Ingester<F> {
    db: DatabaseConnection,
    feed: F,
    running: AtomicBool,
}

impl<F: ActivityFeed + Send + Sync> Ingester<F> {
    pub fn new(db: DatabaseConnection, feed: F) -> Ingester<F> {
        Ingester {
            db,
            feed,
            running: AtomicBool::new(false),
        }
    }

    pub async fn run(&self) -> RunOutcome {
        let _guard = match RunGuard::acquire(&self.running) {
            Some(guard) => guard,
            None => {
                info!("Fetching activities is already running");
                return RunOutcome::Skipped;
            }
        };

        match self.sync().await {
            Ok((pages_fetched, records)) => RunOutcome::Completed {
                pages_fetched,
                records,
            },
            Err(error) => RunOutcome::Failed(error),
        }
        // guard dropped here on success and failure alike
    }

    async fn sync(&self) -> Result<(u64, usize), SyncError> {
        let watermark = store::latest_known_block_time(&self.db).await?;

        let mut page = 1;
        let mut records = 0;

        loop {
            let response = self.feed.fetch_page(page).await?;
            if !response.success || response.data.is_empty() {
                break;
            }

            // A single malformed item rejects the whole page: it means the
            // upstream contract changed, not that one record is disposable.
            let activities = response
                .data
                .iter()
                .map(|item| item.normalize())
                .collect::<Result<Vec<_>, _>>()?;

            let fresh = activities
                .into_iter()
                .filter(|activity| {
                    activity
                        .block_time
                        .map_or(false, |block_time| block_time > watermark)
                })
                .collect::<Vec<_>>();

            if fresh.is_empty() {
                info!("No new activities found");
                break;
            }

            let processed = fresh.len();
            store::upsert_batch(&self.db, fresh).await?;
            info!("Page {}: {} activities processed successfully", page, processed);

            records += processed;
            page += 1;
        }

        Ok((page, records))
    }
}

/// Run state owned by the ingester: Idle -> Running on acquire, Running ->
/// Idle on drop, so every exit path releases the slot.
struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<RunGuard<'a>> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
            .then(|| RunGuard { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
