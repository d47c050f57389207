//! HTTP plumbing for the qBittorrent Web API.
//!
//! # Design
//! - Single `GET`-only client; each call is atomic with no retry or backoff.
//! - Status and decode failures carry the operation and URL so the caller
//!   can attribute a skipped category in the audit log.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::warn;

use crate::error::{ClientError, ClientResult};
use crate::model::{Category, Torrent};

const CATEGORIES_PATH: &str = "api/v2/torrents/categories";
const TORRENTS_PATH: &str = "api/v2/torrents/info";

/// Client for the subset of the qBittorrent Web API the reconciliation pass
/// consumes.
#[derive(Debug, Clone)]
pub struct QbClient {
    client: Client,
    base_url: Url,
}

impl QbClient {
    /// Construct a client against `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Build { source })?;
        Ok(Self { client, base_url })
    }

    /// Every category known to the client, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails at the transport level, the
    /// server answers with a non-success status, or the body is not the
    /// expected JSON object keyed by category name.
    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let url = self.endpoint("list_categories", CATEGORIES_PATH)?;
        let body = self.fetch("list_categories", &url).await?;
        let categories: BTreeMap<String, Value> = serde_json::from_str(&body)
            .map_err(|source| ClientError::decode("list_categories", &url, source))?;
        Ok(categories
            .into_keys()
            .map(|name| Category { name })
            .collect())
    }

    /// The active torrents in `category`.
    ///
    /// An empty upstream list is a valid result. A record that does not
    /// decode as a [`Torrent`] is skipped with a warning rather than failing
    /// the whole category.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails at the transport level, the
    /// server answers with a non-success status, or the body is not a JSON
    /// array.
    pub async fn list_torrents(&self, category: &str) -> ClientResult<Vec<Torrent>> {
        let mut url = self.endpoint("list_torrents", TORRENTS_PATH)?;
        url.query_pairs_mut().append_pair("category", category);
        let body = self.fetch("list_torrents", &url).await?;
        let records: Vec<Value> = serde_json::from_str(&body)
            .map_err(|source| ClientError::decode("list_torrents", &url, source))?;

        let mut torrents = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::from_value::<Torrent>(record) {
                Ok(torrent) => torrents.push(torrent),
                Err(err) => {
                    warn!(category, error = %err, "skipping malformed torrent record");
                }
            }
        }
        Ok(torrents)
    }

    async fn fetch(&self, operation: &'static str, url: &Url) -> ClientResult<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ClientError::http(operation, url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(operation, url, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|source| ClientError::http(operation, url, source))
    }

    fn endpoint(&self, operation: &'static str, path: &'static str) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::invalid_url(operation, self.base_url.as_str()))?
            .pop_if_empty()
            .extend(path.split('/'));
        Ok(url)
    }
}
