//! docsift - filtering and search paging for generated API documentation
//!
//! docsift is the record model behind a Scaladoc-style documentation browser:
//! member lists are materialized once from the generated markup, then shown or
//! hidden by a predicate filter pipeline, re-sorted by a stable comparator,
//! and extended page by page through a scroll-driven search fetcher.

pub mod domain;
pub mod error;
pub mod filter;
pub mod index;
pub mod markup;
pub mod order;
pub mod scheduler;
pub mod search;

pub use error::{DocsiftError, Result};
