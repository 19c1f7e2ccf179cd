//! Two-hop link resolution
//!
//! ```text
//! Validate → FetchGateway → ResolveToken → FetchListing → Parse → Classify → Rank → Done
//! ```
//!
//! Strictly sequential: the listing fetch cannot start before the token is
//! resolved. The first failure aborts the run and nothing partial is
//! returned. Nothing is cached between runs.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use crate::classify::{Link, LinkClassifier};
use crate::error::{ResolveError, Result, Stage};
use crate::http_client::PageFetcher;
use crate::{page, rank, token};

/// Outcome of one successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    /// Trusted links first, each group in document order
    pub links: Vec<Link>,
    pub page_title: String,
    pub is_zip_file: bool,
}

/// Check that `input` is an absolute URL with a host.
pub fn validate_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed).map_err(|e| ResolveError::MalformedInput(e.to_string()))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ResolveError::MalformedInput(format!(
            "{trimmed} has no host"
        )));
    }
    Ok(url)
}

/// Runs the pipeline with a fetcher and a classifier.
///
/// Holds no per-request state; share it freely between tasks.
#[derive(Debug, Clone)]
pub struct Resolver<F> {
    fetcher: F,
    classifier: LinkClassifier,
}

impl<F: PageFetcher> Resolver<F> {
    pub fn new(fetcher: F, classifier: LinkClassifier) -> Self {
        Self {
            fetcher,
            classifier,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolve a gateway URL into ranked links.
    #[instrument(skip(self), fields(gateway = %gateway))]
    pub async fn resolve(&self, gateway: &str) -> Result<PipelineResult> {
        let origin = validate_url(gateway)?;

        debug!(stage = %Stage::FetchGateway, "Fetching gateway page");
        let gateway_html = self
            .fetcher
            .fetch_page(origin.as_str())
            .await
            .map_err(|e| ResolveError::from_fetch(Stage::FetchGateway, e))?;

        debug!(stage = %Stage::ResolveToken, bytes = gateway_html.len(), "Resolving token");
        let listing_url = token::resolve(&gateway_html, &origin)?;

        debug!(stage = %Stage::FetchListing, listing = %listing_url, "Fetching listing page");
        let listing_html = self
            .fetcher
            .fetch_page(&listing_url)
            .await
            .map_err(|e| ResolveError::from_fetch(Stage::FetchListing, e))?;

        let parsed = page::parse(&listing_html);
        debug!(
            stage = %Stage::Parse,
            title = %parsed.title,
            anchors = parsed.anchors.len(),
            "Parsed listing page"
        );

        let base = Url::parse(&listing_url).unwrap_or(origin);
        let links = self.classifier.classify_all(&parsed.anchors, &base);
        debug!(stage = %Stage::Classify, kept = links.len(), "Classified anchors");
        if links.is_empty() {
            return Err(ResolveError::NoLinksFound);
        }

        debug!(stage = %Stage::Rank, "Ranking links");
        let links = rank::rank(links);
        let trusted = links.iter().filter(|l| l.is_trusted).count();
        info!(
            links = links.len(),
            trusted,
            zip = parsed.is_zip,
            "Resolved download links"
        );

        Ok(PipelineResult {
            links,
            page_title: parsed.title,
            is_zip_file: parsed.is_zip,
        })
    }
}
