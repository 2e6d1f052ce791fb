//! Scroll-driven paged search.
//!
//! The search panel renders page 1 server-side; nearing the bottom of the
//! scrollable results container fetches the next page as an HTML fragment
//! and appends its results. At most one fetch is in flight at a time: a
//! threshold crossing while one is outstanding is dropped, not buffered. An
//! empty body, a fetch failure or a no-results marker ends paging for good.

mod client;
mod fragment;
mod pager;
mod panel;

pub use client::{HttpSearchClient, MockResponse, MockSearchClient, SearchClient};
pub use fragment::{SearchFragment, SearchResult, parse_search_fragment};
pub use pager::{FIRST_FETCHED_PAGE, ScrollPosition, SearchPager};
pub use panel::{ScrollOutcome, SearchPanel};
