//! Feed trait and adapters.

use crate::error::FeedError;
use crate::listing::InstrumentListing;
use crate::FeedResult;
use levels::InstrumentSnapshot;
use std::time::Duration;
use tracing::{debug, info};

/// Source of the active options chain for an underlying.
///
/// Allows different implementations for production (HTTP listing endpoint)
/// vs tests (fixed snapshot set).
#[async_trait::async_trait]
pub trait InstrumentFeed: Send + Sync {
    /// Fetch all active contracts for `underlying`, normalized into
    /// snapshots sharing one underlying quote.
    async fn fetch_chain(&self, underlying: &str) -> FeedResult<Vec<InstrumentSnapshot>>;
}

/// Production feed adapter: GET `{endpoint}?underlying={sym}` returning an
/// [`InstrumentListing`] as JSON.
pub struct HttpInstrumentFeed {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpInstrumentFeed {
    pub fn new(endpoint: String, timeout: Duration) -> FeedResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Request(e.to_string()))?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait::async_trait]
impl InstrumentFeed for HttpInstrumentFeed {
    async fn fetch_chain(&self, underlying: &str) -> FeedResult<Vec<InstrumentSnapshot>> {
        debug!(endpoint = %self.endpoint, underlying, "Fetching options chain");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("underlying", underlying)])
            .send()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let listing: InstrumentListing = response
            .json()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))?;

        let snapshots = listing.into_snapshots()?;
        info!(
            underlying,
            contracts = snapshots.len(),
            "Options chain fetched"
        );
        Ok(snapshots)
    }
}

/// Static feed - returns a fixed snapshot set. Used in tests and dry runs.
pub struct StaticInstrumentFeed {
    snapshots: Vec<InstrumentSnapshot>,
}

impl StaticInstrumentFeed {
    pub fn new(snapshots: Vec<InstrumentSnapshot>) -> Self {
        Self { snapshots }
    }
}

#[async_trait::async_trait]
impl InstrumentFeed for StaticInstrumentFeed {
    async fn fetch_chain(&self, _underlying: &str) -> FeedResult<Vec<InstrumentSnapshot>> {
        Ok(self.snapshots.clone())
    }
}
