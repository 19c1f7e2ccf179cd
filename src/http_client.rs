//! Page fetching
//!
//! One GET per call, fixed browser identification, no cookie jar and no
//! retries. The pipeline only depends on [`PageFetcher`], so tests and other
//! front-ends can substitute their own transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::fingerprint::{chrome_profile, BrowserProfile};

/// Source of raw page bodies.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return its body, failing on any non-2xx status.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct PageClient {
    client: Client,
    profile: BrowserProfile,
}

impl PageClient {
    /// Create a client with transport defaults.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(&FetchConfig::default())
    }

    /// Create a client honouring the optional timeouts in `config`.
    pub fn with_config(config: &FetchConfig) -> Result<Self, FetchError> {
        let profile = chrome_profile();

        let mut builder = Client::builder()
            .use_rustls_tls()
            .brotli(true)
            .zstd(true)
            .gzip(true)
            .deflate(true)
            .default_headers(profile.to_headers())
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            profile,
        })
    }

    /// Identification sent with every request
    #[must_use]
    pub fn profile(&self) -> BrowserProfile {
        self.profile
    }
}

#[async_trait]
impl PageFetcher for PageClient {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching page");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        info!(
            status = %status,
            version = ?response.version(),
            "Response received"
        );

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
