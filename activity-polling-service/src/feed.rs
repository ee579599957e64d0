use crate::config::Config;
use crate::dto::ActivityPage;
use crate::error::FeedError;
use async_trait::async_trait;
use tracing::debug;

const DEFAULT_ACTIVITIES_API_URL: &str = "https://pro-api.solscan.io/v2.0/token/defi/activities";

/// One page fetch against the upstream activities feed. Pages are 1-based and
/// requested one at a time; the feed is expected to order activities
/// newest-first, which the ingestion loop relies on for early termination.
#[async_trait]
pub trait ActivityFeed {
    async fn fetch_page(&self, page: u64) -> Result<ActivityPage, FeedError>;
}

pub struct SolscanFeed {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    address: String,
    page_size: u64,
}

impl SolscanFeed {
    pub fn new(client: reqwest::Client, config: &Config) -> SolscanFeed {
        SolscanFeed {
            client,
            api_url: match &config.activities_api_url {
                Some(url) => url.to_owned(),
                None => DEFAULT_ACTIVITIES_API_URL.to_owned(),
            },
            api_key: config.activities_api_key.to_owned(),
            address: config.token_mint_address.to_owned(),
            page_size: match config.polling_page_size {
                Some(v) => v,
                None => 100,
            },
        }
    }
}

#[async_trait]
impl ActivityFeed for SolscanFeed {
    async fn fetch_page(&self, page: u64) -> Result<ActivityPage, FeedError> {
        debug!("Fetching activities page {} for {}", page, self.address);

        let response = self
            .client
            .get(&self.api_url)
            .header("token", &self.api_key)
            .query(&[
                ("address", self.address.to_owned()),
                ("page", page.to_string()),
                ("page_size", self.page_size.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        Ok(response.json::<ActivityPage>().await?)
    }
}
