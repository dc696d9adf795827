//! HTTP client for the catalog API (`/ss/*`).
//!
//! Wraps `reqwest` with base-URL handling, status checks, optional
//! cache-busting and an opt-in retry policy. The envelope inside the body is
//! left for the caches to interpret.

use std::time::Duration;

use reqwest::{Client, Url};
use shopstyle_core::query_string::{cache_buster, set_parameter, CACHE_BUSTER_PARAM};
use shopstyle_core::AppConfig;

use crate::error::CatalogError;
use crate::fetch::Fetch;
use crate::retry::retry_with_backoff;

/// Client for the catalog API.
///
/// Use [`CatalogClient::new`] with the catalog host, or
/// [`CatalogClient::from_config`] to apply every knob from [`AppConfig`].
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    /// Additional attempts after the first failure; `0` disables retries.
    max_retries: u32,
    backoff_base_ms: u64,
    /// Append a random `zzcb` parameter so intermediaries cannot serve a cached body.
    break_cache: bool,
}

impl CatalogClient {
    /// Creates a client for the catalog hosted at `base_url`, without
    /// retries or cache-busting.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Ensure exactly one trailing slash so joined endpoint paths land
        // under the base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
            break_cache: false,
        })
    }

    /// Builds a client from application config.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_retries(config.max_retries, config.retry_backoff_base_ms)
        .with_cache_busting(config.break_cache))
    }

    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    #[must_use]
    pub fn with_cache_busting(mut self, break_cache: bool) -> Self {
        self.break_cache = break_cache;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path (with optional query) against the base URL.
    fn endpoint_url(&self, path_and_query: &str) -> Result<Url, CatalogError> {
        let relative = if self.break_cache {
            set_parameter(
                path_and_query,
                CACHE_BUSTER_PARAM,
                Some(&cache_buster().to_string()),
            )
        } else {
            path_and_query.to_owned()
        };

        self.base_url
            .join(relative.trim_start_matches('/'))
            .map_err(|e| CatalogError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot resolve \"{relative}\": {e}"),
            })
    }

    /// Sends a GET request, requires a 2xx status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, CatalogError> {
        tracing::debug!(url = %url, "catalog request");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

impl Fetch for CatalogClient {
    async fn get_json(&self, path_and_query: &str) -> Result<serde_json::Value, CatalogError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async {
            // Resolved per attempt so each retry gets a fresh cache-buster.
            let url = self.endpoint_url(path_and_query)?;
            self.request_json(&url).await
        })
        .await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
