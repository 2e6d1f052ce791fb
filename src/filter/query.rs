//! Smart-case free-text queries.
//!
//! An all-lowercase query is a case-insensitive substring match. A query
//! containing uppercase letters is expanded into a CamelCase-acronym regex
//! where each uppercase letter `X` becomes `[a-z]*X`, so "BiSe" matches
//! "BitSet" and "ABitSet" but not "biset". Regex metacharacters in the query
//! are deliberately left unescaped, matching the long-standing behavior of
//! the generated pages; a query that fails to compile falls back to a literal
//! substring match.

use regex::Regex;

/// A compiled free-text query
#[derive(Debug, Clone)]
pub enum TextQuery {
    /// Empty query: everything matches
    All,
    /// Substring match; `needle` is pre-lowercased when `case_insensitive`
    Literal { needle: String, case_insensitive: bool },
    /// CamelCase-acronym pattern built from an uppercase-bearing query
    Pattern(Regex),
}

impl TextQuery {
    /// Compile a raw query string.
    pub fn compile(raw: &str) -> Self {
        if raw.is_empty() {
            return TextQuery::All;
        }

        if raw.chars().any(|c| c.is_uppercase()) {
            let mut pattern = String::with_capacity(raw.len() * 2);
            for c in raw.chars() {
                if c.is_uppercase() {
                    pattern.push_str("[a-z]*");
                }
                pattern.push(c);
            }
            match Regex::new(&pattern) {
                Ok(re) => TextQuery::Pattern(re),
                Err(e) => {
                    log::debug!("query {raw:?} is not a valid pattern ({e}), matching literally");
                    TextQuery::Literal {
                        needle: raw.to_string(),
                        case_insensitive: false,
                    }
                }
            }
        } else {
            TextQuery::Literal {
                needle: raw.to_lowercase(),
                case_insensitive: true,
            }
        }
    }

    /// Test the query against a haystack.
    pub fn matches(&self, haystack: &str) -> bool {
        match self {
            TextQuery::All => true,
            TextQuery::Literal {
                needle,
                case_insensitive: true,
            } => haystack.to_lowercase().contains(needle.as_str()),
            TextQuery::Literal { needle, .. } => haystack.contains(needle.as_str()),
            TextQuery::Pattern(re) => re.is_match(haystack),
        }
    }
}
