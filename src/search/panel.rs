//! The search panel: pager + client + accumulated results.

use super::client::SearchClient;
use super::fragment::{SearchFragment, SearchResult, parse_search_fragment};
use super::pager::{ScrollPosition, SearchPager};

/// What a scroll event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// Not near the bottom, a fetch already in flight, or paging over
    Ignored,
    /// New results appended
    Appended(usize),
    /// This fetch ended paging (failure, empty page or no-results marker)
    Exhausted,
}

/// Accumulates paged search results for one query.
///
/// Failures never surface to the caller as errors: a failed or malformed
/// page degrades to "no more pages" with a log line, so the panel simply
/// stops growing.
pub struct SearchPanel<C: SearchClient> {
    client: C,
    query: String,
    pager: SearchPager,
    results: Vec<SearchResult>,
}

impl<C: SearchClient> SearchPanel<C> {
    pub fn new(client: C, query: impl Into<String>, threshold: f64) -> Self {
        Self {
            client,
            query: query.into(),
            pager: SearchPager::new(threshold),
            results: Vec::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn pager(&self) -> &SearchPager {
        &self.pager
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Seed the panel with the server-rendered first page.
    pub fn seed(&mut self, results: Vec<SearchResult>) {
        self.results = results;
    }

    /// Handle one scroll event of the results container.
    pub async fn on_scroll(&mut self, position: ScrollPosition) -> ScrollOutcome {
        if !self.pager.should_fetch(&position) {
            return ScrollOutcome::Ignored;
        }

        let page = self.pager.begin();
        let body = match self.client.fetch_page(&self.query, page).await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("search page {page} failed, ending paging: {e}");
                self.pager.complete_exhausted();
                return ScrollOutcome::Exhausted;
            }
        };

        match parse_search_fragment(&body) {
            Ok(SearchFragment::Results(new_results)) if !new_results.is_empty() => {
                let appended = new_results.len();
                self.results.extend(new_results);
                self.pager.complete_appended();
                log::debug!("appended {appended} result(s) from page {page}");
                ScrollOutcome::Appended(appended)
            }
            Ok(_) => {
                self.pager.complete_exhausted();
                ScrollOutcome::Exhausted
            }
            Err(e) => {
                log::warn!("search page {page} was malformed, ending paging: {e}");
                self.pager.complete_exhausted();
                ScrollOutcome::Exhausted
            }
        }
    }
}
