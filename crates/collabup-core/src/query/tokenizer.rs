//! Query tokenization

/// Split a raw query into normalized terms.
///
/// The query is lower-cased and trimmed, then split on `;`, `,` and any run of
/// whitespace (newlines and tabs included). Tokens of one character or less are
/// dropped. Order and duplicates are preserved.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .trim()
        .split(is_delimiter)
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

fn is_delimiter(c: char) -> bool {
    c == ';' || c == ',' || c.is_whitespace()
}
