//! Shared fixtures: an in-memory fetcher serving canned pages.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use streamscout::{FetchError, LinkClassifier, PageFetcher, Resolver};

pub const GATEWAY: &str = "https://gate.example/file/abc";
pub const LISTING: &str = "https://mirror.example/page2";

/// Nothing listens on port 1, so connecting there fails at the transport layer.
const REFUSING_ADDR: &str = "http://127.0.0.1:1/";

enum Reply {
    Body(String),
    Status(u16),
    Refused,
}

/// Serves fixed bodies or statuses per URL and records every request.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), Reply::Body(body.to_string()));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Reply::Status(status));
        self
    }

    /// Fail `url` with a real connection-refused transport error.
    pub fn refused(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), Reply::Refused);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Status(status)) => Err(FetchError::Status(*status)),
            Some(Reply::Refused) => {
                let client = reqwest::Client::builder()
                    .no_proxy()
                    .build()
                    .expect("client should build");
                let err = client
                    .get(REFUSING_ADDR)
                    .send()
                    .await
                    .expect_err("nothing should listen on port 1");
                Err(FetchError::Transport(err))
            }
            None => Err(FetchError::Status(404)),
        }
    }
}

pub fn resolver(fetcher: ScriptedFetcher) -> Resolver<ScriptedFetcher> {
    Resolver::new(fetcher, LinkClassifier::default())
}

/// Gateway page using the script literal form.
pub fn gateway_with_literal(target: &str) -> String {
    format!(
        "<html><head><script>var url = '{target}';</script></head>\
         <body><p>Redirecting...</p></body></html>"
    )
}

/// Listing page with the given title and `(href, text)` buttons.
pub fn listing(title: &str, buttons: &[(&str, &str)]) -> String {
    let mut html = format!("<html><head><title>{title}</title></head><body>");
    for (href, text) in buttons {
        html.push_str(&format!(
            r#"<a class="btn btn-lg" href="{href}">{text}</a>"#
        ));
    }
    html.push_str(r#"<a href="https://ads.example/">not a button</a></body></html>"#);
    html
}
