//! Search page clients: the HTTP implementation and a mock for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::{DocsiftError, Result};

/// Fetches one page of search results as an HTML fragment.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<String>;
}

/// reqwest-backed client for the paged search endpoint.
///
/// Pages are addressed by the `page` query parameter; responses must not be
/// served from an HTTP cache (the endpoint returns a moving window over a
/// changing result set).
pub struct HttpSearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSearchClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<String> {
        log::debug!("fetching search page {page} for query {query:?}");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("page", &page.to_string())])
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocsiftError::Fetch(format!(
                "search page {page} returned {status}"
            )));
        }
        Ok(response.text().await?)
    }
}

/// Canned response for the mock client
#[derive(Debug, Clone)]
pub enum MockResponse {
    Body(String),
    Failure(String),
}

/// Serves a scripted sequence of fragments; once the script runs out it
/// returns empty bodies (the endpoint's "no more pages" shape).
#[derive(Default)]
pub struct MockSearchClient {
    responses: Mutex<VecDeque<MockResponse>>,
    calls: AtomicUsize,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(pages: impl IntoIterator<Item = String>) -> Self {
        let client = Self::new();
        for page in pages {
            client.push(MockResponse::Body(page));
        }
        client
    }

    pub fn push(&self, response: MockResponse) {
        self.responses
            .lock()
            .expect("mock response queue poisoned")
            .push_back(response);
    }

    /// Number of fetches issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn fetch_page(&self, _query: &str, _page: u32) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .responses
            .lock()
            .expect("mock response queue poisoned")
            .pop_front();
        match next {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Failure(message)) => Err(DocsiftError::Fetch(message)),
            None => Ok(String::new()),
        }
    }
}
