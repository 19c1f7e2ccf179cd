//! `StreamScout` - gateway page to ranked download links
//!
//! A gateway page hides its listing page behind a short-lived token. This
//! crate follows the token, reads the listing page's mirror buttons, marks the
//! mirrors it trusts and returns them trusted-first.
//!
//! # Pipeline
//!
//! - **Fetch**: one GET per hop with a fixed browser identification
//! - **Token**: script literal `var url = '...'`, else the first `token=` link
//! - **Parse**: page title, zip flag, `a.btn` anchors in document order
//! - **Classify**: drop Telegram entries, rewrite storage share links,
//!   normalize labels, test trust patterns
//! - **Rank**: stable trusted-first partition
//!
//! # Example
//!
//! ```rust,no_run
//! use streamscout::{LinkClassifier, PageClient, Resolver};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolver = Resolver::new(PageClient::new()?, LinkClassifier::default());
//!     let result = resolver.resolve("https://gateway.example/file/abc").await?;
//!     for link in &result.links {
//!         println!("{} {} {}", link.is_trusted, link.label, link.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod branding;
pub mod classify;
pub mod config;
pub mod deeplink;
pub mod error;
pub mod fingerprint;
pub mod http_client;
pub mod page;
pub mod pipeline;
pub mod rank;
pub mod server;
pub mod token;

pub use classify::{Link, LinkClassifier, MatchTarget, TrustPattern, TrustTable};
pub use config::Config;
pub use deeplink::DeepLinkParams;
pub use error::{FetchError, ResolveError, Stage};
pub use http_client::{PageClient, PageFetcher};
pub use page::{Anchor, ParsedPage};
pub use pipeline::{PipelineResult, Resolver};

/// Version of streamscout
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
