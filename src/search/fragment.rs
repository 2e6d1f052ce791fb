//! Parsing of paged-search HTML fragments.
//!
//! A page response carries a `#searchResults` container holding either
//! `.searchResult` nodes or a `#noResults` marker. An empty body is also
//! treated as the end of the result set.

use scraper::{Html, Selector};

use crate::error::{DocsiftError, Result};

/// One entry of a search results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The entity definition line (qualified name and kind)
    pub definition: String,
    /// Member signature, when the hit is a member rather than a template
    pub signature: String,
    /// Documentation excerpt
    pub comment: String,
}

/// Outcome of parsing one page response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFragment {
    /// The endpoint signalled that there are no further results
    NoMore,
    Results(Vec<SearchResult>),
}

fn selector(source: &str) -> Result<Selector> {
    Selector::parse(source).map_err(|e| DocsiftError::Markup(format!("bad selector {source:?}: {e}")))
}

/// Parse a page response body.
///
/// A non-empty body without a `#searchResults` container is malformed; the
/// caller decides whether that degrades to end-of-results.
pub fn parse_search_fragment(body: &str) -> Result<SearchFragment> {
    if body.trim().is_empty() {
        return Ok(SearchFragment::NoMore);
    }

    let fragment = Html::parse_fragment(body);
    let container_sel = selector("#searchResults")?;
    let container = fragment
        .select(&container_sel)
        .next()
        .ok_or_else(|| DocsiftError::Markup("response missing #searchResults container".to_string()))?;

    let no_results_sel = selector("#noResults")?;
    if container.select(&no_results_sel).next().is_some() {
        return Ok(SearchFragment::NoMore);
    }

    let result_sel = selector(".searchResult")?;
    let definition_sel = selector(".definition")?;
    let signature_sel = selector(".signature")?;
    let comment_sel = selector(".fullcomment")?;

    let mut results = Vec::new();
    for node in container.select(&result_sel) {
        let definition = node
            .select(&definition_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .ok_or_else(|| {
                DocsiftError::Markup("search result missing .definition".to_string())
            })?;
        let signature = node
            .select(&signature_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let comment = node
            .select(&comment_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        results.push(SearchResult {
            definition,
            signature,
            comment,
        });
    }

    Ok(SearchFragment::Results(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_no_more() {
        assert_eq!(parse_search_fragment("").unwrap(), SearchFragment::NoMore);
        assert_eq!(parse_search_fragment("  \n ").unwrap(), SearchFragment::NoMore);
    }

    #[test]
    fn test_no_results_marker() {
        let body = r#"<div id="searchResults"><p id="noResults">Nothing found</p></div>"#;
        assert_eq!(parse_search_fragment(body).unwrap(), SearchFragment::NoMore);
    }

    #[test]
    fn test_results_are_extracted() {
        let body = r#"
            <div id="searchResults">
              <div class="searchResult">
                <div class="definition">scala.BitSet</div>
                <div class="signature">class BitSet extends Set</div>
                <div class="fullcomment">Fixed-size bit sets.</div>
              </div>
              <div class="searchResult">
                <div class="definition">scala.BitSet#apply</div>
              </div>
            </div>
        "#;
        let SearchFragment::Results(results) = parse_search_fragment(body).unwrap() else {
            panic!("expected results");
        };
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].definition, "scala.BitSet");
        assert_eq!(results[0].comment, "Fixed-size bit sets.");
        assert_eq!(results[1].signature, "");
    }

    #[test]
    fn test_missing_container_is_malformed() {
        let err = parse_search_fragment("<div>whatever</div>").unwrap_err();
        assert!(matches!(err, DocsiftError::Markup(_)));
    }

    #[test]
    fn test_result_without_definition_is_malformed() {
        let body = r#"<div id="searchResults"><div class="searchResult"></div></div>"#;
        assert!(parse_search_fragment(body).is_err());
    }
}
