//! Query Parsing
//!
//! Turns a free-text query into categorized terms:
//! - Tokenization (lower-case, delimiter split, short-token removal)
//! - Categorization by keyword affinity

mod categorizer;
mod tokenizer;

pub use categorizer::{categorize, classify_term, CategorizedTerms, Category};
pub use tokenizer::tokenize;

/// Tokenize and categorize a raw query
pub fn parse_query(query: &str) -> CategorizedTerms {
    categorize(&tokenize(query))
}
