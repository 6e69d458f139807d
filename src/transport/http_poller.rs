//! Periodic HTTP GET source for the dashboards.

use reqwest::blocking::Client;

use crate::error::{FeedError, FeedResult};
use crate::traits::SnapshotSource;

/// Fetches a whole snapshot as the body of one GET request.
///
/// No retry or backoff: a failed fetch is reported and the next poll tick
/// simply tries again.
pub struct HttpPoller {
    client: Client,
    url: String,
}

impl HttpPoller {
    pub fn new(url: impl Into<String>) -> FeedResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("snapview/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SnapshotSource for HttpPoller {
    fn describe(&self) -> String {
        format!("GET {}", self.url)
    }

    fn fetch(&mut self) -> FeedResult<Vec<u8>> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }
        Ok(response.bytes()?.to_vec())
    }
}
